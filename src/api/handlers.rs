//! HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ApiError, AppState};
use crate::assets::{AssetLocation, DesignAsset};
use crate::domain::aggregates::{ImageLink, Order, OrderFilter};
use crate::domain::product_line::{
    classify_fulfillment, display_name, is_novelty_product, parse_product_line, resolve_template, FulfillmentType,
    ProductDescriptor,
};
use crate::domain::templates::{Template, TemplateRegistry};
use crate::domain::value_objects::{DesignSide, OrderId, PhoneNumber, PrintStatus, ORDER_ID_RE, PHONE_RE};

const PLACEHOLDER_URL: &str = "/placeholder.svg";

type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Views
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub index: usize,
    #[serde(flatten)]
    pub descriptor: ProductDescriptor,
    pub display_name: String,
    pub fulfillment: Option<FulfillmentType>,
    pub novelty: bool,
    pub needs_artwork: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
    /// Where the customer's artwork for each required side goes
    pub uploads: Vec<AssetLocation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub summary: String,
    pub products: Vec<ProductView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListItem {
    #[serde(flatten)]
    pub order: Order,
    pub summary: String,
    pub has_custom_designs: bool,
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> { pub data: Vec<T>, pub total: usize, pub page: u32 }

fn product_views(s: &AppState, order_id: Option<&OrderId>, descriptors: Vec<ProductDescriptor>) -> Vec<ProductView> {
    descriptors
        .into_iter()
        .enumerate()
        .map(|(index, descriptor)| {
            let fulfillment = classify_fulfillment(&descriptor);
            let uploads = match (order_id, fulfillment) {
                (Some(id), Some(kind)) => kind
                    .design_sides()
                    .iter()
                    .map(|side| s.media.locate(&DesignAsset::new(id.clone(), *side, index)))
                    .collect(),
                _ => vec![],
            };
            ProductView {
                index,
                display_name: display_name(&descriptor.name),
                novelty: is_novelty_product(&descriptor.name),
                needs_artwork: fulfillment.is_some_and(|k| k.needs_artwork()),
                template: resolve_template(&descriptor, s.catalog.as_ref()),
                fulfillment,
                uploads,
                descriptor,
            }
        })
        .collect()
}

fn order_view(s: &AppState, order: Order) -> OrderView {
    let products = product_views(s, Some(order.id()), order.products(s.catalog.as_ref()));
    OrderView { summary: order.summary(s.catalog.as_ref()), products, order }
}

// =============================================================================
// Customer endpoints
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct OrderIdQuery {
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
}

impl OrderIdQuery {
    fn parse(&self) -> ApiResult<OrderId> {
        let raw = self.order_id.as_deref().unwrap_or_default();
        OrderId::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

pub async fn check_order(State(s): State<AppState>, Query(q): Query<OrderIdQuery>) -> ApiResult<Json<serde_json::Value>> {
    let id = q.parse()?;
    let exists = s.orders.order_exists(&id).await?;
    Ok(Json(serde_json::json!({ "exists": exists })))
}

pub async fn search_order(State(s): State<AppState>, Query(q): Query<OrderIdQuery>) -> ApiResult<Json<serde_json::Value>> {
    let id = q.parse()?;
    let body = match s.orders.find_order(&id).await? {
        Some((order, origin)) => serde_json::json!({ "found": true, "source": origin, "orderId": order.id() }),
        None => serde_json::json!({ "found": false, "error": "Order not found" }),
    };
    Ok(Json(body))
}

pub async fn get_order(State(s): State<AppState>, Path(order_id): Path<String>) -> ApiResult<Json<OrderView>> {
    let id = OrderId::parse(&order_id)?;
    let order = s.orders.get_order(&id).await?;
    Ok(Json(order_view(&s, order)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePhoneRequest {
    #[validate(regex(path = "PHONE_RE", message = "Invalid phone number"))]
    pub phone: String,
}

pub async fn update_phone(State(s): State<AppState>, Path(order_id): Path<String>, Json(r): Json<UpdatePhoneRequest>) -> ApiResult<StatusCode> {
    r.validate()?;
    let id = OrderId::parse(&order_id)?;
    let phone = PhoneNumber::new(r.phone)?;
    s.orders.update_phone(&id, &phone).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttachDesignRequest {
    pub product_index: usize,
    pub design_type: DesignSide,
    #[validate(url(message = "Design URL is invalid"))]
    pub url: String,
    pub design_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachDesignResponse { pub location: AssetLocation, pub image_links: Vec<ImageLink> }

pub async fn attach_design(State(s): State<AppState>, Path(order_id): Path<String>, Json(r): Json<AttachDesignRequest>) -> ApiResult<(StatusCode, Json<AttachDesignResponse>)> {
    r.validate()?;
    let id = OrderId::parse(&order_id)?;
    let order = s.orders.get_order(&id).await?;
    let count = order.products(s.catalog.as_ref()).len();
    if r.product_index >= count {
        return Err(ApiError::BadRequest(format!("Product index {} out of range for {} products", r.product_index, count)));
    }

    let location = s.media.locate(&DesignAsset::new(id.clone(), r.design_type, r.product_index));
    let link = ImageLink { product_index: r.product_index, design_type: r.design_type, url: r.url, design_id: r.design_id };
    let image_links = s.orders.attach_design(&id, link).await?;
    Ok((StatusCode::CREATED, Json(AttachDesignResponse { location, image_links })))
}

// =============================================================================
// Admin endpoints
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ListParams { pub page: Option<u32>, pub per_page: Option<u32>, pub filter: Option<String>, pub print: Option<String>, pub q: Option<String> }

pub async fn list_orders(State(s): State<AppState>, Query(p): Query<ListParams>) -> ApiResult<Json<PaginatedResponse<OrderListItem>>> {
    let page = p.page.unwrap_or(1).max(1);
    let per_page = p.per_page.unwrap_or(20).clamp(1, 100);
    let filter = OrderFilter {
        product: p.filter.as_deref().unwrap_or_default().parse()?,
        print: p.print.as_deref().unwrap_or_default().parse()?,
        query: p.q,
    };

    let registry = s.catalog.as_ref();
    let matching: Vec<Order> = s.orders.list_orders().await?.into_iter().filter(|o| o.matches(&filter, registry)).collect();
    let total = matching.len();
    let data = matching
        .into_iter()
        .skip((page - 1) as usize * per_page as usize)
        .take(per_page as usize)
        .map(|order| OrderListItem { summary: order.summary(registry), has_custom_designs: order.has_custom_designs(registry), order })
        .collect();
    Ok(Json(PaginatedResponse { data, total, page }))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrintStatusRequest {
    #[validate(regex(path = "ORDER_ID_RE", message = "Order ID must contain only numbers"))]
    pub order_id: String,
    #[validate(length(min = 1, message = "Print status is required"))]
    pub print_status: String,
}

pub async fn update_print_status(State(s): State<AppState>, Json(r): Json<UpdatePrintStatusRequest>) -> ApiResult<Json<serde_json::Value>> {
    r.validate()?;
    let id = OrderId::parse(&r.order_id)?;
    let status: PrintStatus = r.print_status.parse()?;
    s.orders.update_print_status(&id, status).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn list_templates(State(s): State<AppState>) -> Json<Vec<Template>> {
    Json(s.catalog.all())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, max = 64, message = "Design id is required"))]
    pub design_id: String,
    #[validate(length(min = 1, message = "Design name is required"))]
    pub name: String,
    #[validate(url(message = "Design URL is invalid"))]
    pub url: Option<String>,
}

pub async fn create_template(State(s): State<AppState>, Json(r): Json<CreateTemplateRequest>) -> ApiResult<(StatusCode, Json<Template>)> {
    r.validate()?;
    let id = r.design_id.trim().to_lowercase().replace(' ', "-");
    let name = r.name.trim();
    if id.is_empty() {
        return Err(ApiError::BadRequest("Design id is required".to_string()));
    }
    if name.is_empty() {
        return Err(ApiError::BadRequest("Design name is required".to_string()));
    }
    let mut template = Template::new(&id, name, s.media.template_path(&id));
    template.url = r.url;
    s.templates.save_template(&template).await?;
    s.refresh_templates().await;
    tracing::info!(design_id = %template.id, "predesigned template saved");
    Ok((StatusCode::CREATED, Json(template)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveTemplateRequest { pub design_name: String }

pub async fn resolve_template_url(State(s): State<AppState>, Json(r): Json<ResolveTemplateRequest>) -> ApiResult<Json<serde_json::Value>> {
    if r.design_name.trim().is_empty() {
        return Err(ApiError::BadRequest("designName is required".to_string()));
    }
    let url = match s.catalog.lookup(&r.design_name) {
        Some(Template { url: Some(url), .. }) => url,
        Some(template) => s.media.delivery_url(&template.path),
        None => PLACEHOLDER_URL.to_string(),
    };
    Ok(Json(serde_json::json!({ "url": url })))
}

#[derive(Debug, Deserialize)]
pub struct ParseProductRequest { pub product: String }

pub async fn parse_product(State(s): State<AppState>, Json(r): Json<ParseProductRequest>) -> Json<Vec<ProductView>> {
    Json(product_views(&s, None, parse_product_line(&r.product, s.catalog.as_ref())))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy", "service": env!("CARGO_PKG_NAME") }))
}
