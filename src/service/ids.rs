use crate::store::OrderStore;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const ORDER_ID_PREFIX: &str = "order_";
pub const PAYMENT_ID_PREFIX: &str = "pay_";
const ORDER_ID_LEN: usize = 16;

// 62^16 candidates; a collision within a handful of draws means the store is
// effectively full, so give up instead of spinning.
const MAX_ORDER_ID_ATTEMPTS: u32 = 16;

fn random_order_id() -> String {
    let suffix: String = OsRng
        .sample_iter(&Alphanumeric)
        .take(ORDER_ID_LEN)
        .map(char::from)
        .collect();
    format!("{ORDER_ID_PREFIX}{suffix}")
}

/// Draws candidates until one is unused in the order store. Collisions are
/// practically impossible but the membership check is part of the contract,
/// not an optimisation.
pub async fn new_order_id(orders: &dyn OrderStore) -> anyhow::Result<String> {
    for _ in 0..MAX_ORDER_ID_ATTEMPTS {
        let candidate = random_order_id();
        if !orders.exists_by_id(&candidate).await? {
            return Ok(candidate);
        }
    }
    anyhow::bail!("exhausted {MAX_ORDER_ID_ATTEMPTS} order id attempts without finding a free id")
}

static LAST_PAYMENT_SUFFIX: AtomicU64 = AtomicU64::new(0);

/// Nanosecond Unix clock merged through a process-global atomic, so the
/// suffix is strictly increasing even when two calls land on the same tick.
/// No store lookup: the payment path relies on the suffix source alone.
pub fn new_payment_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();

    let mut prev = LAST_PAYMENT_SUFFIX.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_PAYMENT_SUFFIX.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return format!("{PAYMENT_ID_PREFIX}{next}"),
            Err(observed) => prev = observed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryOrderStore;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn order_id_shape() {
        let id = random_order_id();
        assert!(id.starts_with("order_"));
        let suffix = &id["order_".len()..];
        assert_eq!(suffix.len(), 16);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn concurrent_order_ids_never_collide() {
        let store = Arc::new(MemoryOrderStore::default());
        let mut handles = Vec::new();
        for _ in 0..64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move { new_order_id(store.as_ref()).await }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            let id = handle.await.expect("join").expect("generate");
            assert!(seen.insert(id), "duplicate order id generated");
        }
    }

    struct CollidingStore {
        rejections: std::sync::atomic::AtomicU32,
    }

    #[async_trait::async_trait]
    impl crate::store::OrderStore for CollidingStore {
        async fn save(&self, _order: &crate::domain::order::Order) -> anyhow::Result<()> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &str) -> anyhow::Result<Option<crate::domain::order::Order>> {
            Ok(None)
        }

        async fn exists_by_id(&self, _id: &str) -> anyhow::Result<bool> {
            let left = self.rejections.load(Ordering::Relaxed);
            if left > 0 {
                self.rejections.store(left - 1, Ordering::Relaxed);
                return Ok(true);
            }
            Ok(false)
        }
    }

    #[tokio::test]
    async fn order_id_retries_past_collisions() {
        let store = CollidingStore {
            rejections: std::sync::atomic::AtomicU32::new(3),
        };
        let id = new_order_id(&store).await.expect("free id after retries");
        assert!(id.starts_with("order_"));
    }

    #[tokio::test]
    async fn order_id_generation_fails_past_attempt_cap() {
        let store = CollidingStore {
            rejections: std::sync::atomic::AtomicU32::new(u32::MAX),
        };
        assert!(new_order_id(&store).await.is_err());
    }

    #[test]
    fn payment_ids_strictly_increase() {
        let mut previous = 0u64;
        for _ in 0..1000 {
            let id = new_payment_id();
            let suffix: u64 = id["pay_".len()..].parse().expect("numeric suffix");
            assert!(suffix > previous);
            previous = suffix;
        }
    }
}
