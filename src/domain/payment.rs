use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Upi,
    Card,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Upi => "upi",
            Method::Card => "card",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Processing,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Processing => "processing",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    pub merchant_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub method: Method,
    pub status: PaymentStatus,
    pub vpa: Option<String>,
    pub card_network: Option<String>,
    pub card_last4: Option<String>,
    // Reserved for a future failure path; nothing writes these yet.
    pub error_code: Option<String>,
    pub error_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: Option<String>,
    pub holder_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    pub order_id: Option<String>,
    pub method: Option<String>,
    pub vpa: Option<String>,
    pub card: Option<CardDetails>,
}
