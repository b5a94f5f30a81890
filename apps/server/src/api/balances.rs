use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use billfold_core::balances::{BankAccount, BankBalance};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct BalanceBody {
    balance: f64,
}

async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path((user_id, year, month, account)): Path<(String, i32, u32, BankAccount)>,
) -> ApiResult<Json<BankBalance>> {
    let balance = state
        .balance_service
        .get_balance(&user_id, year, month, account)
        .await?;
    Ok(Json(balance))
}

async fn update_balance(
    State(state): State<Arc<AppState>>,
    Path((user_id, year, month, account)): Path<(String, i32, u32, BankAccount)>,
    Json(body): Json<BalanceBody>,
) -> ApiResult<Json<BankBalance>> {
    let balance = BankBalance {
        year,
        month,
        account,
        balance: body.balance,
    };
    let stored = state
        .balance_service
        .update_balance(&user_id, balance)
        .await?;
    Ok(Json(stored))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/users/{user_id}/balances/{year}/{month}/{account}",
        get(get_balance).put(update_balance),
    )
}
