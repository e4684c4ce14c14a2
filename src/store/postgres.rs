use crate::domain::merchant::Merchant;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::payment::{Method, Payment, PaymentStatus};
use crate::store::{MerchantStore, OrderStore, PaymentStore};
use anyhow::Result;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

#[derive(Clone)]
pub struct PgMerchantStore {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct PgOrderStore {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct PgPaymentStore {
    pub pool: PgPool,
}

fn merchant_from_row(r: &PgRow) -> Merchant {
    Merchant {
        id: r.get("id"),
        name: r.get("name"),
        email: r.get("email"),
        api_key: r.get("api_key"),
        api_secret: r.get("api_secret"),
        webhook_url: r.get("webhook_url"),
        is_active: r.get("is_active"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

fn order_from_row(r: &PgRow) -> Result<Order> {
    let status: String = r.get("status");
    let notes: Option<Json<HashMap<String, Value>>> = r.get("notes");
    Ok(Order {
        id: r.get("id"),
        merchant_id: r.get("merchant_id"),
        amount: r.get("amount"),
        currency: r.get("currency"),
        receipt: r.get("receipt"),
        notes: notes.map(|n| n.0),
        status: parse_order_status(&status)?,
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

fn payment_from_row(r: &PgRow) -> Result<Payment> {
    let method: String = r.get("method");
    let status: String = r.get("status");
    Ok(Payment {
        id: r.get("id"),
        order_id: r.get("order_id"),
        merchant_id: r.get("merchant_id"),
        amount: r.get("amount"),
        currency: r.get("currency"),
        method: parse_method(&method)?,
        status: parse_payment_status(&status)?,
        vpa: r.get("vpa"),
        card_network: r.get("card_network"),
        card_last4: r.get("card_last4"),
        error_code: r.get("error_code"),
        error_description: r.get("error_description"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

fn parse_order_status(s: &str) -> Result<OrderStatus> {
    match s {
        "created" => Ok(OrderStatus::Created),
        other => anyhow::bail!("unknown order status in store: {other}"),
    }
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus> {
    match s {
        "processing" => Ok(PaymentStatus::Processing),
        other => anyhow::bail!("unknown payment status in store: {other}"),
    }
}

fn parse_method(s: &str) -> Result<Method> {
    match s {
        "upi" => Ok(Method::Upi),
        "card" => Ok(Method::Card),
        other => anyhow::bail!("unknown payment method in store: {other}"),
    }
}

#[async_trait::async_trait]
impl MerchantStore for PgMerchantStore {
    async fn save(&self, merchant: &Merchant) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO merchants (id, name, email, api_key, api_secret, webhook_url, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(merchant.id)
        .bind(&merchant.name)
        .bind(&merchant.email)
        .bind(&merchant.api_key)
        .bind(&merchant.api_secret)
        .bind(&merchant.webhook_url)
        .bind(merchant.is_active)
        .bind(merchant.created_at)
        .bind(merchant.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<Merchant>> {
        let row = sqlx::query(
            "SELECT id, name, email, api_key, api_secret, webhook_url, is_active, created_at, updated_at FROM merchants WHERE api_key = $1",
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| merchant_from_row(&r)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Merchant>> {
        let row = sqlx::query(
            "SELECT id, name, email, api_key, api_secret, webhook_url, is_active, created_at, updated_at FROM merchants WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| merchant_from_row(&r)))
    }
}

#[async_trait::async_trait]
impl OrderStore for PgOrderStore {
    async fn save(&self, order: &Order) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (id, merchant_id, amount, currency, receipt, notes, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&order.id)
        .bind(order.merchant_id)
        .bind(order.amount)
        .bind(&order.currency)
        .bind(&order.receipt)
        .bind(order.notes.clone().map(Json))
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>> {
        let row = sqlx::query(
            "SELECT id, merchant_id, amount, currency, receipt, notes, status, created_at, updated_at FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| order_from_row(&r)).transpose()
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 AS present FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}

#[async_trait::async_trait]
impl PaymentStore for PgPaymentStore {
    async fn save(&self, payment: &Payment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, order_id, merchant_id, amount, currency, method, status,
                vpa, card_network, card_last4, error_code, error_description,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(&payment.id)
        .bind(&payment.order_id)
        .bind(payment.merchant_id)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(payment.method.as_str())
        .bind(payment.status.as_str())
        .bind(&payment.vpa)
        .bind(&payment.card_network)
        .bind(&payment.card_last4)
        .bind(&payment.error_code)
        .bind(&payment.error_description)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>> {
        let row = sqlx::query(
            "SELECT id, order_id, merchant_id, amount, currency, method, status, vpa, card_network, card_last4, error_code, error_description, created_at, updated_at FROM payments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| payment_from_row(&r)).transpose()
    }
}
