//! Order listing handler.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use tienda_core::models::OrderSummary;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "orders",
    responses(
        (status = 200, description = "All orders with customer details, newest first", body = [OrderSummary]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let orders = state.db.order_repository.list().await?;
    Ok(Json(orders))
}
