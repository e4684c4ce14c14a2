use crate::domain::order::Order;
use crate::domain::payment::{CreatePaymentRequest, Method, Payment, PaymentStatus};
use crate::http::error::ApiError;
use crate::service::ids;
use crate::service::validation::{self, CardError};
use crate::store::PaymentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct PaymentService {
    pub payments: Arc<dyn PaymentStore>,
}

impl PaymentService {
    /// Builds and persists one payment attempt against an order the caller
    /// has already authenticated and ownership-checked. Amount and currency
    /// are always inherited from the order, never taken from the request.
    ///
    /// The payment stays in `processing`: no capture/settle/fail transition
    /// exists yet. `error_code`/`error_description` are the seam for that.
    pub async fn process(
        &self,
        req: &CreatePaymentRequest,
        method: Method,
        order: &Order,
    ) -> Result<Payment, ApiError> {
        let now = chrono::Utc::now();
        let mut payment = Payment {
            id: ids::new_payment_id(),
            order_id: order.id.clone(),
            merchant_id: order.merchant_id,
            amount: order.amount,
            currency: order.currency.clone(),
            method,
            status: PaymentStatus::Processing,
            vpa: None,
            card_network: None,
            card_last4: None,
            error_code: None,
            error_description: None,
            created_at: now,
            updated_at: now,
        };

        match method {
            Method::Upi => {
                let vpa = req.vpa.as_deref().unwrap_or_default();
                if !validation::is_valid_vpa(vpa) {
                    return Err(ApiError::invalid_vpa());
                }
                payment.vpa = Some(vpa.to_string());
            }
            Method::Card => {
                let card = req
                    .card
                    .as_ref()
                    .ok_or_else(|| ApiError::bad_request("Card details are required"))?;
                validation::validate_card(card).map_err(|e| match e {
                    CardError::Invalid => ApiError::invalid_card(),
                    CardError::MissingHolderDetails => {
                        ApiError::bad_request("CVV and cardholder name are required")
                    }
                })?;
                // Only the network and last four digits are retained.
                payment.card_network = Some(validation::detect_card_network(&card.number).to_string());
                payment.card_last4 = Some(validation::card_last4(&card.number));
            }
        }

        self.payments.save(&payment).await?;
        Ok(payment)
    }

    pub async fn get_payment(&self, payment_id: &str) -> Result<Option<Payment>, ApiError> {
        if payment_id.trim().is_empty() {
            return Ok(None);
        }
        Ok(self.payments.find_by_id(payment_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;
    use crate::domain::payment::CardDetails;
    use crate::store::memory::MemoryPaymentStore;
    use chrono::{Datelike, Months, Utc};
    use uuid::Uuid;

    fn service() -> PaymentService {
        PaymentService {
            payments: Arc::new(MemoryPaymentStore::default()),
        }
    }

    fn order() -> Order {
        let now = Utc::now();
        Order {
            id: "order_test1234567890ab".to_string(),
            merchant_id: Uuid::new_v4(),
            amount: 500,
            currency: "INR".to_string(),
            receipt: None,
            notes: None,
            status: OrderStatus::Created,
            created_at: now,
            updated_at: now,
        }
    }

    fn upi_request(vpa: &str) -> CreatePaymentRequest {
        CreatePaymentRequest {
            order_id: Some("order_test1234567890ab".to_string()),
            method: Some("upi".to_string()),
            vpa: Some(vpa.to_string()),
            card: None,
        }
    }

    fn card_request(number: &str) -> CreatePaymentRequest {
        let later = Utc::now() + Months::new(12);
        CreatePaymentRequest {
            order_id: Some("order_test1234567890ab".to_string()),
            method: Some("card".to_string()),
            vpa: None,
            card: Some(CardDetails {
                number: number.to_string(),
                expiry_month: later.month().to_string(),
                expiry_year: later.year().to_string(),
                cvv: Some("123".to_string()),
                holder_name: Some("A Customer".to_string()),
            }),
        }
    }

    #[tokio::test]
    async fn upi_payment_inherits_order_amount() {
        let svc = service();
        let order = order();
        let payment = svc
            .process(&upi_request("a@b"), Method::Upi, &order)
            .await
            .expect("payment");

        assert!(payment.id.starts_with("pay_"));
        assert_eq!(payment.status, PaymentStatus::Processing);
        assert_eq!(payment.amount, 500);
        assert_eq!(payment.currency, "INR");
        assert_eq!(payment.order_id, order.id);
        assert_eq!(payment.vpa.as_deref(), Some("a@b"));
        assert!(payment.card_network.is_none());
        assert!(payment.card_last4.is_none());
    }

    #[tokio::test]
    async fn invalid_vpa_rejected_and_nothing_persisted() {
        let svc = service();
        let order = order();
        assert!(svc.process(&upi_request("user@@bank"), Method::Upi, &order).await.is_err());
        // Nothing was written for the failed attempt.
        assert!(svc.payments.find_by_id("").await.expect("lookup").is_none());
    }

    #[tokio::test]
    async fn card_payment_stores_network_and_last4_only() {
        let svc = service();
        let order = order();
        let payment = svc
            .process(&card_request("4111111111111111"), Method::Card, &order)
            .await
            .expect("payment");

        assert_eq!(payment.card_network.as_deref(), Some("visa"));
        assert_eq!(payment.card_last4.as_deref(), Some("1111"));
        assert!(payment.vpa.is_none());

        let stored = svc
            .get_payment(&payment.id)
            .await
            .expect("lookup")
            .expect("stored");
        assert_eq!(stored.card_last4.as_deref(), Some("1111"));
    }

    #[tokio::test]
    async fn luhn_failure_is_invalid_card() {
        let svc = service();
        let order = order();
        let err = svc
            .process(&card_request("4111111111111112"), Method::Card, &order)
            .await
            .expect_err("rejected");
        match err {
            crate::http::error::ApiError::Domain { code, .. } => {
                assert_eq!(code, crate::http::error::INVALID_CARD)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_payment_id_lookup_is_none() {
        let svc = service();
        assert!(svc.get_payment("").await.expect("lookup").is_none());
    }
}
