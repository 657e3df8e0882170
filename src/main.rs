//! Printshop order service

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use printshop_orders::{
    api::{self, AppState},
    assets::MediaLibrary,
    config::Config,
    import::{HttpOrderSheet, OrderSource},
    service::OrderService,
    storage::{InMemoryStore, OrderRepository, PgStore, TemplateStore},
    TemplateCatalog,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let (orders, templates): (Arc<dyn OrderRepository>, Arc<dyn TemplateStore>) = match &config.database_url {
        Some(url) => {
            let db = PgPoolOptions::new().max_connections(config.max_connections).connect(url).await?;
            sqlx::migrate!("./migrations").run(&db).await?;
            let store = Arc::new(PgStore::new(db));
            (store.clone() as Arc<dyn OrderRepository>, store as Arc<dyn TemplateStore>)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, orders are kept in memory only");
            let store = Arc::new(InMemoryStore::new());
            (store.clone() as Arc<dyn OrderRepository>, store as Arc<dyn TemplateStore>)
        }
    };

    let sheet = config.order_sheet_url.as_deref().map(|url| Arc::new(HttpOrderSheet::new(url)) as Arc<dyn OrderSource>);

    let state = AppState {
        orders: OrderService::new(orders, sheet),
        templates,
        catalog: Arc::new(TemplateCatalog::with_defaults()),
        media: MediaLibrary::new(config.media_cloud_name.as_str(), config.media_root.as_str()),
    };
    state.refresh_templates().await;

    let app = api::router(state);

    tracing::info!("Printshop orders listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?, app).await?;
    Ok(())
}
