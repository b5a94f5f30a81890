//! Stateless calculations on a single record being edited.

use std::sync::Arc;

use axum::{routing::post, Json, Router};
use billfold_core::{
    bills::{expand_to_bills, BillLineItem},
    expenses::{valuation_report, ExpenseRecord, ValuationReport},
};

use crate::{error::ApiResult, main_lib::AppState};

async fn valuate_record(Json(record): Json<ExpenseRecord>) -> ApiResult<Json<ValuationReport>> {
    let record = record.normalized();
    Ok(Json(valuation_report(&record)))
}

async fn expand_record(Json(record): Json<ExpenseRecord>) -> ApiResult<Json<Vec<BillLineItem>>> {
    let record = record.normalized();
    Ok(Json(expand_to_bills(&record)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/valuations", post(valuate_record))
        .route("/bills/expand", post(expand_record))
}
