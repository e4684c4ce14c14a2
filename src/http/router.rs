use crate::http::handlers::{health, orders, payments};
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/orders", post(orders::create_order))
        .route("/orders/:order_id", get(orders::get_order))
        .route("/orders/:order_id/public", get(orders::get_order_public))
        .route("/payments", post(payments::create_payment))
        .route("/payments/:payment_id", get(payments::get_payment))
        .route("/health", get(health::health))
        .with_state(state)
}
