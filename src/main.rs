use merchant_gateway::config::AppConfig;
use merchant_gateway::http::router::build_router;
use merchant_gateway::seed::seed_merchant;
use merchant_gateway::service::auth::MerchantAuthenticator;
use merchant_gateway::service::orders::OrderService;
use merchant_gateway::service::payments::PaymentService;
use merchant_gateway::store::postgres::{PgMerchantStore, PgOrderStore, PgPaymentStore};
use merchant_gateway::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let merchants = Arc::new(PgMerchantStore { pool: pool.clone() });
    let orders = Arc::new(PgOrderStore { pool: pool.clone() });
    let payments = Arc::new(PgPaymentStore { pool: pool.clone() });

    seed_merchant(merchants.as_ref(), &cfg).await?;

    let state = AppState {
        auth: MerchantAuthenticator { merchants },
        orders: OrderService { orders },
        payments: PaymentService { payments },
        db: Some(pool),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
