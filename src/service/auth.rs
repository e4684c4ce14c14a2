use crate::domain::merchant::Merchant;
use crate::http::error::ApiError;
use crate::store::MerchantStore;
use std::sync::Arc;
use subtle::ConstantTimeEq;

#[derive(Clone)]
pub struct MerchantAuthenticator {
    pub merchants: Arc<dyn MerchantStore>,
}

impl MerchantAuthenticator {
    /// Missing credentials, an unknown key and a wrong secret all collapse
    /// into the same 401 so nothing about key existence leaks.
    pub async fn authenticate(
        &self,
        api_key: Option<&str>,
        api_secret: Option<&str>,
    ) -> Result<Merchant, ApiError> {
        let (key, secret) = match (api_key, api_secret) {
            (Some(k), Some(s)) if !k.is_empty() && !s.is_empty() => (k, s),
            _ => return Err(ApiError::unauthorized()),
        };

        let merchant = self
            .merchants
            .find_by_api_key(key)
            .await?
            .ok_or_else(ApiError::unauthorized)?;

        let secret_matches: bool = merchant
            .api_secret
            .as_bytes()
            .ct_eq(secret.as_bytes())
            .into();
        if !secret_matches {
            return Err(ApiError::unauthorized());
        }

        Ok(merchant)
    }
}
