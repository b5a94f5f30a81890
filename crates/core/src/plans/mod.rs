//! Plans module - loading, reconciling and retaining yearly expense plans.

mod plans_model;
mod plans_service;
mod plans_traits;


pub use plans_model::{diff_plan, PlanDiff, RetentionPolicy, SaveOutcome};
pub use plans_service::PlanService;
pub use plans_traits::PlanServiceTrait;
