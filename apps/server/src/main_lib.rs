use std::sync::Arc;

use billfold_core::{
    balances::{BalanceService, BalanceServiceTrait},
    bills::{BillService, BillServiceTrait},
    plans::{PlanService, PlanServiceTrait, RetentionPolicy},
};
use billfold_storage_rest::{
    balances::BalanceRepository, bills::BillRepository, expenses::ExpenseRepository, RestClient,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub plan_service: Arc<dyn PlanServiceTrait>,
    pub bill_service: Arc<dyn BillServiceTrait>,
    pub balance_service: Arc<dyn BalanceServiceTrait>,
    pub retention: RetentionPolicy,
}

pub fn init_tracing() {
    let log_format = std::env::var("BILLFOLD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let client = Arc::new(RestClient::new(
        &config.data_api_url,
        &config.data_api_key,
        config.request_timeout,
    )?);
    tracing::info!("Data API in use: {}", config.data_api_url);

    let retention = RetentionPolicy::new(config.retention_years)?;
    tracing::info!("Retaining {} plan years", retention.window_years());

    let expense_repository = Arc::new(ExpenseRepository::new(client.clone()));
    let bill_repository = Arc::new(BillRepository::new(client.clone()));
    let balance_repository = Arc::new(BalanceRepository::new(client));

    let plan_service: Arc<dyn PlanServiceTrait> =
        Arc::new(PlanService::new(expense_repository, retention));
    let balance_service: Arc<dyn BalanceServiceTrait> =
        Arc::new(BalanceService::new(balance_repository));
    let bill_service: Arc<dyn BillServiceTrait> = Arc::new(BillService::new(
        bill_repository,
        plan_service.clone(),
        balance_service.clone(),
    ));

    Ok(Arc::new(AppState {
        plan_service,
        bill_service,
        balance_service,
        retention,
    }))
}
