//! HTTP API

mod error;
pub mod handlers;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;

use crate::assets::MediaLibrary;
use crate::domain::templates::TemplateCatalog;
use crate::service::OrderService;
use crate::storage::TemplateStore;

#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
    pub templates: Arc<dyn TemplateStore>,
    pub catalog: Arc<TemplateCatalog>,
    pub media: MediaLibrary,
}

impl AppState {
    /// Reload stored templates into the catalog. On failure the catalog keeps what it has.
    pub async fn refresh_templates(&self) {
        match self.templates.list_templates().await {
            Ok(stored) => self.catalog.refresh(stored),
            Err(e) => tracing::warn!("could not load predesigned templates, keeping cached ones: {}", e),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/orders", get(handlers::list_orders))
        .route("/api/v1/orders/check", get(handlers::check_order))
        .route("/api/v1/orders/search", get(handlers::search_order))
        .route("/api/v1/orders/print-status", post(handlers::update_print_status))
        .route("/api/v1/orders/:order_id", get(handlers::get_order))
        .route("/api/v1/orders/:order_id/phone", put(handlers::update_phone))
        .route("/api/v1/orders/:order_id/designs", post(handlers::attach_design))
        .route("/api/v1/designs", get(handlers::list_templates).post(handlers::create_template))
        .route("/api/v1/designs/resolve", post(handlers::resolve_template_url))
        .route("/api/v1/product-lines/parse", post(handlers::parse_product))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Order;
    use crate::domain::value_objects::{OrderId, PrintStatus};
    use crate::storage::{InMemoryStore, OrderRepository};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn setup() -> (Router, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let order = Order::create(
            OrderId::parse("1042").unwrap(),
            "Ngozi",
            "Designed & Custom White T-Shirt, size: M, design: Front , Back Custom Design, AquaStrike Elite Pro, size: Large",
        );
        store.upsert(&order).await.unwrap();
        store.upsert(&Order::create(OrderId::parse("1043").unwrap(), "Emeka", "S-Class of 2025")).await.unwrap();

        let state = AppState {
            orders: OrderService::new(store.clone(), None),
            templates: store.clone(),
            catalog: Arc::new(TemplateCatalog::with_defaults()),
            media: MediaLibrary::new("shop-cloud", "yhe"),
        };
        (router(state), store)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder.header("content-type", "application/json").body(Body::from(b.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");
        let resp = app.clone().oneshot(req).await.expect("request failed");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    #[tokio::test]
    async fn test_get_order_decodes_products() {
        let (app, _) = setup().await;
        let (status, body) = send(&app, "GET", "/api/v1/orders/1042", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["orderId"], "01042");
        assert_eq!(body["summary"], "2 products");

        let products = body["products"].as_array().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0]["size"], "M");
        assert_eq!(products[0]["design"], "Front");
        assert_eq!(products[1]["name"], "AquaStrike Elite Pro");
        assert_eq!(products[1]["fulfillment"], Value::Null);
        assert_eq!(products[1]["novelty"], true);
    }

    #[tokio::test]
    async fn test_order_lookup_errors() {
        let (app, _) = setup().await;
        let (status, body) = send(&app, "GET", "/api/v1/orders/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Order not found");

        let (status, body) = send(&app, "GET", "/api/v1/orders/check?orderId=12ab", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Order ID must contain only numbers");

        let (status, body) = send(&app, "GET", "/api/v1/orders/check?orderId=1043", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "exists": true }));

        let (_, body) = send(&app, "GET", "/api/v1/orders/search?orderId=5", None).await;
        assert_eq!(body["found"], false);
    }

    #[tokio::test]
    async fn test_print_status_and_filters() {
        let (app, store) = setup().await;
        let (status, _) = send(&app, "POST", "/api/v1/orders/print-status", Some(json!({ "orderId": "1043", "printStatus": "PRINTED" }))).await;
        assert_eq!(status, StatusCode::OK);
        let order = store.get(&OrderId::parse("1043").unwrap()).await.unwrap().unwrap();
        assert_eq!(order.print_status(), PrintStatus::Printed);

        let (status, body) = send(&app, "POST", "/api/v1/orders/print-status", Some(json!({ "orderId": "x1", "printStatus": "PRINTED" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Order ID must contain only numbers");

        let (_, body) = send(&app, "GET", "/api/v1/orders?print=printed", None).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["orderId"], "01043");
        assert_eq!(body["data"][0]["summary"], "Designed & Custom White T-Shirt");

        let (_, body) = send(&app, "GET", "/api/v1/orders?filter=guns", None).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["data"][0]["customer"], "Ngozi");

        let (status, _) = send(&app, "GET", "/api/v1/orders?filter=sideways", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_attach_design() {
        let (app, _) = setup().await;
        let body = json!({ "productIndex": 0, "designType": "back", "url": "https://cdn.example.com/back.png" });
        let (status, resp) = send(&app, "POST", "/api/v1/orders/1042/designs", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(resp["location"]["publicId"], "yhe/backDesign/01042-back-0");
        assert_eq!(resp["imageLinks"].as_array().unwrap().len(), 1);

        let body = json!({ "productIndex": 5, "designType": "front", "url": "https://cdn.example.com/front.png" });
        let (status, _) = send(&app, "POST", "/api/v1/orders/1042/designs", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_templates() {
        let (app, _) = setup().await;
        let body = json!({ "designId": "Graduate Loading", "name": "Graduate loading...", "url": "https://cdn.example.com/g.png" });
        let (status, created) = send(&app, "POST", "/api/v1/designs", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], "graduate-loading");
        assert_eq!(created["path"], "yhe/predesigned/graduate-loading");

        let (_, all) = send(&app, "GET", "/api/v1/designs", None).await;
        assert_eq!(all.as_array().unwrap().len(), 9);

        let (_, resolved) = send(&app, "POST", "/api/v1/designs/resolve", Some(json!({ "designName": "graduate loading..." }))).await;
        assert_eq!(resolved["url"], "https://cdn.example.com/g.png");
        let (_, resolved) = send(&app, "POST", "/api/v1/designs/resolve", Some(json!({ "designName": "Class of 2025" }))).await;
        assert_eq!(resolved["url"], "https://res.cloudinary.com/shop-cloud/image/upload/yhe/predesigned/class-of-2025");
        let (_, resolved) = send(&app, "POST", "/api/v1/designs/resolve", Some(json!({ "designName": "Unheard of" }))).await;
        assert_eq!(resolved["url"], "/placeholder.svg");
    }

    #[tokio::test]
    async fn test_blank_template_is_rejected() {
        let (app, _) = setup().await;
        let (status, body) = send(&app, "POST", "/api/v1/designs", Some(json!({ "designId": "   ", "name": "Graduate" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Design id is required");
        let (status, body) = send(&app, "POST", "/api/v1/designs", Some(json!({ "designId": "grad", "name": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Design name is required");

        let (_, all) = send(&app, "GET", "/api/v1/designs", None).await;
        assert_eq!(all.as_array().unwrap().len(), 8);
        let (_, resolved) = send(&app, "POST", "/api/v1/designs/resolve", Some(json!({ "designName": "Unheard of" }))).await;
        assert_eq!(resolved["url"], "/placeholder.svg");
    }

    #[tokio::test]
    async fn test_parse_product_line() {
        let (app, _) = setup().await;
        let (status, body) = send(&app, "POST", "/api/v1/product-lines/parse", Some(json!({ "product": "M-No be beans" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["fulfillment"], "pre-designed");
        assert_eq!(body[0]["template"]["id"], "no-be-beans");

        let (_, health) = send(&app, "GET", "/health", None).await;
        assert_eq!(health["status"], "healthy");
    }
}
