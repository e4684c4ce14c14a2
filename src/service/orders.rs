use crate::domain::order::{CreateOrderRequest, Order, OrderStatus};
use crate::http::error::ApiError;
use crate::service::ids;
use crate::store::OrderStore;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderService {
    pub orders: Arc<dyn OrderStore>,
}

impl OrderService {
    /// Amount bounds are the transport's responsibility; by the time a
    /// request reaches here it is trusted. Currency defaults to INR.
    pub async fn create_order(
        &self,
        req: CreateOrderRequest,
        amount: i64,
        merchant_id: Uuid,
    ) -> Result<Order, ApiError> {
        let id = ids::new_order_id(self.orders.as_ref()).await?;
        let now = chrono::Utc::now();
        let order = Order {
            id,
            merchant_id,
            amount,
            currency: req.currency.unwrap_or_else(|| "INR".to_string()),
            receipt: req.receipt,
            notes: req.notes,
            status: OrderStatus::Created,
            created_at: now,
            updated_at: now,
        };
        self.orders.save(&order).await?;
        Ok(order)
    }

    /// A blank id and an unknown id are the same failure: the caller learns
    /// only that no such order exists.
    pub async fn get_order(&self, order_id: &str) -> Result<Order, ApiError> {
        if order_id.trim().is_empty() {
            return Err(ApiError::not_found("Order not found"));
        }
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Order not found"))
    }
}
