use crate::domain::merchant::Merchant;
use crate::domain::order::Order;
use crate::domain::payment::Payment;
use crate::store::{MerchantStore, OrderStore, PaymentStore};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Map-backed stores for tests and database-less local runs. Uniqueness is
/// enforced the same way the Postgres schema does it, so the id-collision
/// retry path behaves identically.
#[derive(Default)]
pub struct MemoryMerchantStore {
    merchants: Mutex<HashMap<String, Merchant>>,
}

#[derive(Default)]
pub struct MemoryOrderStore {
    orders: Mutex<HashMap<String, Order>>,
}

#[derive(Default)]
pub struct MemoryPaymentStore {
    payments: Mutex<HashMap<String, Payment>>,
}

#[async_trait::async_trait]
impl MerchantStore for MemoryMerchantStore {
    async fn save(&self, merchant: &Merchant) -> Result<()> {
        let mut guard = self.merchants.lock().map_err(|_| anyhow::anyhow!("merchant store poisoned"))?;
        if guard.contains_key(&merchant.api_key) {
            anyhow::bail!("duplicate api_key: {}", merchant.api_key);
        }
        guard.insert(merchant.api_key.clone(), merchant.clone());
        Ok(())
    }

    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<Merchant>> {
        let guard = self.merchants.lock().map_err(|_| anyhow::anyhow!("merchant store poisoned"))?;
        Ok(guard.get(api_key).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Merchant>> {
        let guard = self.merchants.lock().map_err(|_| anyhow::anyhow!("merchant store poisoned"))?;
        Ok(guard.values().find(|m| m.email == email).cloned())
    }
}

#[async_trait::async_trait]
impl OrderStore for MemoryOrderStore {
    async fn save(&self, order: &Order) -> Result<()> {
        let mut guard = self.orders.lock().map_err(|_| anyhow::anyhow!("order store poisoned"))?;
        if guard.contains_key(&order.id) {
            anyhow::bail!("duplicate order id: {}", order.id);
        }
        guard.insert(order.id.clone(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>> {
        let guard = self.orders.lock().map_err(|_| anyhow::anyhow!("order store poisoned"))?;
        Ok(guard.get(id).cloned())
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let guard = self.orders.lock().map_err(|_| anyhow::anyhow!("order store poisoned"))?;
        Ok(guard.contains_key(id))
    }
}

#[async_trait::async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn save(&self, payment: &Payment) -> Result<()> {
        let mut guard = self.payments.lock().map_err(|_| anyhow::anyhow!("payment store poisoned"))?;
        if guard.contains_key(&payment.id) {
            anyhow::bail!("duplicate payment id: {}", payment.id);
        }
        guard.insert(payment.id.clone(), payment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>> {
        let guard = self.payments.lock().map_err(|_| anyhow::anyhow!("payment store poisoned"))?;
        Ok(guard.get(id).cloned())
    }
}
