use crate::config::AppConfig;
use crate::domain::merchant::Merchant;
use crate::store::MerchantStore;
use uuid::Uuid;

/// Inserts the configured development merchant unless one with the same
/// email already exists. Idempotent across restarts.
pub async fn seed_merchant(store: &dyn MerchantStore, cfg: &AppConfig) -> anyhow::Result<()> {
    if store.find_by_email(&cfg.seed_merchant_email).await?.is_some() {
        return Ok(());
    }

    let now = chrono::Utc::now();
    let merchant = Merchant {
        id: Uuid::new_v4(),
        name: cfg.seed_merchant_name.clone(),
        email: cfg.seed_merchant_email.clone(),
        api_key: cfg.seed_api_key.clone(),
        api_secret: cfg.seed_api_secret.clone(),
        webhook_url: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    store.save(&merchant).await?;
    tracing::info!(api_key = %merchant.api_key, email = %merchant.email, "seeded merchant");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryMerchantStore;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let cfg = AppConfig::from_env();
        let store = MemoryMerchantStore::default();

        seed_merchant(&store, &cfg).await.expect("first seed");
        seed_merchant(&store, &cfg).await.expect("second seed is a no-op");

        let merchant = store
            .find_by_api_key(&cfg.seed_api_key)
            .await
            .expect("lookup")
            .expect("seeded merchant present");
        assert_eq!(merchant.email, cfg.seed_merchant_email);
    }
}
