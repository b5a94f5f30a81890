use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use billfold_core::bills::{Bill, MonthOverview};
use chrono::Utc;

use crate::{error::ApiResult, main_lib::AppState};

async fn available_months(
    State(state): State<Arc<AppState>>,
    Path((user_id, year)): Path<(String, i32)>,
) -> ApiResult<Json<Vec<u32>>> {
    let today = Utc::now().date_naive();
    let months = state
        .bill_service
        .available_months(&user_id, year, today)
        .await?;
    Ok(Json(months))
}

async fn month_overview(
    State(state): State<Arc<AppState>>,
    Path((user_id, year, month)): Path<(String, i32, u32)>,
) -> ApiResult<Json<MonthOverview>> {
    let overview = state
        .bill_service
        .month_overview(&user_id, year, month)
        .await?;
    Ok(Json(overview))
}

async fn save_bill(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(bill): Json<Bill>,
) -> ApiResult<Json<Bill>> {
    let saved = state.bill_service.save_bill(&user_id, bill).await?;
    Ok(Json(saved))
}

async fn delete_bill(
    State(state): State<Arc<AppState>>,
    Path((user_id, bill_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state.bill_service.delete_bill(&user_id, &bill_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}/bills", post(save_bill))
        .route("/users/{user_id}/bills/entries/{bill_id}", delete(delete_bill))
        .route("/users/{user_id}/bills/{year}/months", get(available_months))
        .route("/users/{user_id}/bills/{year}/{month}", get(month_overview))
}
