use crate::domain::merchant::Merchant;
use crate::domain::order::Order;
use crate::domain::payment::Payment;
use anyhow::Result;

pub mod memory;
pub mod postgres;

#[async_trait::async_trait]
pub trait MerchantStore: Send + Sync {
    async fn save(&self, merchant: &Merchant) -> Result<()>;
    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<Merchant>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Merchant>>;
}

#[async_trait::async_trait]
pub trait OrderStore: Send + Sync {
    async fn save(&self, order: &Order) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>>;
    async fn exists_by_id(&self, id: &str) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait PaymentStore: Send + Sync {
    async fn save(&self, payment: &Payment) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>>;
}
