use crate::domain::payment::{CreatePaymentRequest, Method};
use crate::http::credentials::api_credentials;
use crate::http::error::ApiError;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (key, secret) = api_credentials(&headers);
    let merchant = state.auth.authenticate(key, secret).await?;

    let order_id = req.order_id.as_deref().unwrap_or_default();
    if order_id.trim().is_empty() {
        return Err(ApiError::bad_request("order_id is required"));
    }

    let order = state.orders.get_order(order_id).await?;
    if order.merchant_id != merchant.id {
        return Err(ApiError::bad_request("Order does not belong to merchant"));
    }

    let method = match req.method.as_deref() {
        Some("upi") => Method::Upi,
        Some("card") => Method::Card,
        Some(_) => return Err(ApiError::bad_request("Invalid payment method")),
        None => return Err(ApiError::bad_request("Payment method is required")),
    };

    // Method-specific validation lives entirely in the payment service.
    let payment = state.payments.process(&req, method, &order).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn get_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(payment_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let (key, secret) = api_credentials(&headers);
    let merchant = state.auth.authenticate(key, secret).await?;

    match state.payments.get_payment(&payment_id).await? {
        Some(payment) if payment.merchant_id == merchant.id => Ok(Json(payment)),
        _ => Err(ApiError::not_found("Payment not found")),
    }
}
