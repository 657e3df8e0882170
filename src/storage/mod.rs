//! Persistence for orders and predesigned templates

pub mod in_memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::aggregates::{ImageLink, Order};
use crate::domain::templates::Template;
use crate::domain::value_objects::{OrderId, PhoneNumber, PrintStatus};
use crate::Result;

pub use in_memory::InMemoryStore;
pub use postgres::PgStore;

/// Orders keyed by their zero-padded id.
///
/// The `update_*` methods return `false` when no order has the given id.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn get(&self, id: &OrderId) -> Result<Option<Order>>;

    /// All orders, newest first
    async fn list(&self) -> Result<Vec<Order>>;

    async fn upsert(&self, order: &Order) -> Result<()>;

    async fn update_print_status(&self, id: &OrderId, status: PrintStatus) -> Result<bool>;

    async fn update_phone(&self, id: &OrderId, phone: &PhoneNumber) -> Result<bool>;

    async fn update_image_links(&self, id: &OrderId, links: &[ImageLink]) -> Result<bool>;
}

#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn list_templates(&self) -> Result<Vec<Template>>;

    /// Insert or replace by template id
    async fn save_template(&self, template: &Template) -> Result<()>;
}
