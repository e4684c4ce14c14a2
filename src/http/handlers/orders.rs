use crate::domain::order::CreateOrderRequest;
use crate::http::credentials::api_credentials;
use crate::http::error::ApiError;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (key, secret) = api_credentials(&headers);
    let merchant = state.auth.authenticate(key, secret).await?;

    // Amount bounds are checked here, before the order service is involved.
    let amount = match req.amount {
        Some(a) if a >= 100 => a,
        _ => return Err(ApiError::bad_request("amount must be at least 100")),
    };

    let order = state.orders.create_order(req, amount, merchant.id).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let (key, secret) = api_credentials(&headers);
    let merchant = state.auth.authenticate(key, secret).await?;

    let order = state.orders.get_order(&order_id).await?;
    // Another merchant's order looks exactly like a missing one.
    if order.merchant_id != merchant.id {
        return Err(ApiError::not_found("Order not found"));
    }
    Ok(Json(order))
}

/// Unauthenticated variant used by the hosted checkout page.
pub async fn get_order_public(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.orders.get_order(&order_id).await?;
    Ok(Json(order))
}
