//! Order Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::product_line::{
    classify_fulfillment, display_name, is_novelty_product, parse_product_line, FulfillmentType, ProductDescriptor,
};
use crate::domain::templates::TemplateRegistry;
use crate::domain::value_objects::{DesignSide, Money, OrderId, PhoneNumber, PrintStatus};

/// An order as tracked by the shop. `product` is the raw product line from the intake form.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    order_id: OrderId,
    customer: String,
    phone: Option<String>,
    product: String,
    total: Money,
    order_status: String,
    payment_status: String,
    shipping_status: String,
    shipping_details: String,
    sales_channel: String,
    date: String,
    print_status: PrintStatus,
    image_links: Vec<ImageLink>,
    created_at: DateTime<Utc>,
}

/// A design image registered for one product of an order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLink {
    pub product_index: usize,
    pub design_type: DesignSide,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_id: Option<String>,
}

pub const PENDING: &str = "PENDING";
pub const DEFAULT_SALES_CHANNEL: &str = "website";

impl Order {
    pub fn create(order_id: OrderId, customer: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            order_id, customer: customer.into(), phone: None, product: product.into(), total: Money::default(),
            order_status: PENDING.into(), payment_status: PENDING.into(), shipping_status: PENDING.into(),
            shipping_details: String::new(), sales_channel: DEFAULT_SALES_CHANNEL.into(),
            date: Utc::now().date_naive().to_string(), print_status: PrintStatus::NotPrinted, image_links: vec![],
            created_at: Utc::now(),
        }
    }

    pub fn with_phone(mut self, phone: Option<String>) -> Self { self.phone = phone.filter(|p| !p.trim().is_empty()); self }
    pub fn with_total(mut self, total: Money) -> Self { self.total = total; self }
    pub fn with_statuses(mut self, order: impl Into<String>, payment: impl Into<String>, shipping: impl Into<String>) -> Self {
        self.order_status = order.into();
        self.payment_status = payment.into();
        self.shipping_status = shipping.into();
        self
    }
    pub fn with_shipping_details(mut self, details: impl Into<String>) -> Self { self.shipping_details = details.into(); self }
    pub fn with_sales_channel(mut self, channel: impl Into<String>) -> Self { self.sales_channel = channel.into(); self }
    pub fn with_date(mut self, date: impl Into<String>) -> Self { self.date = date.into(); self }
    pub fn with_print_status(mut self, status: PrintStatus) -> Self { self.print_status = status; self }
    pub fn with_image_links(mut self, links: Vec<ImageLink>) -> Self { self.image_links = links; self }
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self { self.created_at = at; self }

    pub fn id(&self) -> &OrderId { &self.order_id }
    pub fn customer(&self) -> &str { &self.customer }
    pub fn phone(&self) -> Option<&str> { self.phone.as_deref() }
    pub fn product(&self) -> &str { &self.product }
    pub fn total(&self) -> &Money { &self.total }
    pub fn order_status(&self) -> &str { &self.order_status }
    pub fn payment_status(&self) -> &str { &self.payment_status }
    pub fn shipping_status(&self) -> &str { &self.shipping_status }
    pub fn shipping_details(&self) -> &str { &self.shipping_details }
    pub fn sales_channel(&self) -> &str { &self.sales_channel }
    pub fn date(&self) -> &str { &self.date }
    pub fn print_status(&self) -> PrintStatus { self.print_status }
    pub fn image_links(&self) -> &[ImageLink] { &self.image_links }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

    pub fn products(&self, registry: &dyn TemplateRegistry) -> Vec<ProductDescriptor> {
        parse_product_line(&self.product, registry)
    }

    pub fn fulfillment_types(&self, registry: &dyn TemplateRegistry) -> Vec<Option<FulfillmentType>> {
        self.products(registry).iter().map(classify_fulfillment).collect()
    }

    /// One-line description for the admin table.
    pub fn summary(&self, registry: &dyn TemplateRegistry) -> String {
        let products = self.products(registry);
        match products.as_slice() {
            [] => self.product.clone(),
            [only] => display_name(&only.name),
            many => format!("{} products", many.len()),
        }
    }

    pub fn has_custom_designs(&self, registry: &dyn TemplateRegistry) -> bool {
        self.fulfillment_types(registry).into_iter().flatten().any(|t| t != FulfillmentType::Plain)
    }

    pub fn set_print_status(&mut self, status: PrintStatus) { self.print_status = status; }

    pub fn set_phone(&mut self, phone: PhoneNumber) { self.phone = Some(phone.to_string()); }

    pub fn set_image_links(&mut self, links: Vec<ImageLink>) { self.image_links = links; }

    /// Register a design image, replacing any earlier one for the same product and side.
    pub fn attach_design(&mut self, link: ImageLink) {
        self.image_links.retain(|l| !(l.product_index == link.product_index && l.design_type == link.design_type));
        self.image_links.push(link);
    }

    pub fn matches(&self, filter: &OrderFilter, registry: &dyn TemplateRegistry) -> bool {
        let print_ok = match filter.print {
            PrintFilter::All => true,
            PrintFilter::Printed => self.print_status.is_printed(),
            PrintFilter::NotPrinted => !self.print_status.is_printed(),
        };
        if !print_ok {
            return false;
        }

        let product_ok = match filter.product {
            ProductFilter::All => true,
            ProductFilter::Guns => self.products(registry).iter().any(|p| is_novelty_product(&p.name)),
            ProductFilter::Kind(kind) => self.fulfillment_types(registry).contains(&Some(kind)),
        };
        if !product_ok {
            return false;
        }

        match filter.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            None => true,
            Some(query) => {
                let query = query.to_lowercase();
                [self.order_id.as_str(), self.customer.as_str(), self.product.as_str()].iter().any(|field| field.to_lowercase().contains(&query))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProductFilter {
    #[default]
    All,
    Guns,
    Kind(FulfillmentType),
}

impl std::str::FromStr for ProductFilter {
    type Err = FilterError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" | "all" => Self::All,
            "guns" => Self::Guns,
            "plain" => Self::Kind(FulfillmentType::Plain),
            "pre-designed" => Self::Kind(FulfillmentType::PreDesigned),
            "custom-front" => Self::Kind(FulfillmentType::CustomFront),
            "custom-back" => Self::Kind(FulfillmentType::CustomBack),
            "custom-front-back" => Self::Kind(FulfillmentType::CustomFrontBack),
            other => return Err(FilterError(other.to_string())),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrintFilter { #[default] All, Printed, NotPrinted }

impl std::str::FromStr for PrintFilter {
    type Err = FilterError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            "printed" => Ok(Self::Printed),
            "not-printed" | "not_printed" => Ok(Self::NotPrinted),
            other => Err(FilterError(other.to_string())),
        }
    }
}

/// Admin list filter
#[derive(Clone, Debug, Default)]
pub struct OrderFilter {
    pub product: ProductFilter,
    pub print: PrintFilter,
    pub query: Option<String>,
}

#[derive(Debug, Clone)] pub struct FilterError(pub String);
impl std::error::Error for FilterError {}
impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "Unknown filter: {}", self.0) }
}
