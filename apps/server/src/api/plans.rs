use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use billfold_core::{
    expenses::{validate_plan_year, ExpenseRecord},
    plans::SaveOutcome,
};
use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegenerateResponse {
    generated: usize,
}

fn check_year(state: &AppState, year: i32) -> ApiResult<()> {
    validate_plan_year(year, Utc::now().year(), state.retention.window_years())?;
    Ok(())
}

async fn list_years(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<i32>>> {
    let years = state.plan_service.list_available_years(&user_id).await?;
    Ok(Json(years))
}

async fn load_plan(
    State(state): State<Arc<AppState>>,
    Path((user_id, year)): Path<(String, i32)>,
) -> ApiResult<Json<Vec<ExpenseRecord>>> {
    let records = state.plan_service.load_plan(&user_id, year).await?;
    Ok(Json(records))
}

async fn save_plan(
    State(state): State<Arc<AppState>>,
    Path((user_id, year)): Path<(String, i32)>,
    Json(records): Json<Vec<ExpenseRecord>>,
) -> ApiResult<Json<SaveOutcome>> {
    check_year(&state, year)?;
    let outcome = state.plan_service.save_plan(&user_id, year, records).await?;
    Ok(Json(outcome))
}

async fn regenerate_bills(
    State(state): State<Arc<AppState>>,
    Path((user_id, year)): Path<(String, i32)>,
) -> ApiResult<Json<RegenerateResponse>> {
    check_year(&state, year)?;
    let generated = state.bill_service.regenerate_bills(&user_id, year).await?;
    Ok(Json(RegenerateResponse { generated }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}/plans/years", get(list_years))
        .route(
            "/users/{user_id}/plans/{year}",
            get(load_plan).put(save_plan),
        )
        .route("/users/{user_id}/plans/{year}/bills", post(regenerate_bills))
}
