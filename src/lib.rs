pub mod config;
pub mod domain {
    pub mod merchant;
    pub mod order;
    pub mod payment;
}
pub mod http {
    pub mod credentials;
    pub mod error;
    pub mod router;
    pub mod handlers {
        pub mod health;
        pub mod orders;
        pub mod payments;
    }
}
pub mod seed;
pub mod service {
    pub mod auth;
    pub mod ids;
    pub mod orders;
    pub mod payments;
    pub mod validation;
}
pub mod store;

#[derive(Clone)]
pub struct AppState {
    pub auth: service::auth::MerchantAuthenticator,
    pub orders: service::orders::OrderService,
    pub payments: service::payments::PaymentService,
    pub db: Option<sqlx::PgPool>,
}
