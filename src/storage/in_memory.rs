//! In-memory store for tests and database-less development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{OrderRepository, TemplateStore};
use crate::domain::aggregates::{ImageLink, Order};
use crate::domain::templates::Template;
use crate::domain::value_objects::{OrderId, PhoneNumber, PrintStatus};
use crate::{Error, Result};

/// Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    templates: Arc<RwLock<Vec<Template>>>,
}

impl InMemoryStore {
    pub fn new() -> Self { Self::default() }

    fn update<F>(&self, id: &OrderId, apply: F) -> Result<bool>
    where
        F: FnOnce(&mut Order),
    {
        let mut orders = self.orders.write().map_err(|e| Error::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(orders.get_mut(id).map(apply).is_some())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn get(&self, id: &OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().map_err(|e| Error::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(orders.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().map_err(|e| Error::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()).then_with(|| b.id().cmp(a.id())));
        Ok(all)
    }

    async fn upsert(&self, order: &Order) -> Result<()> {
        let mut orders = self.orders.write().map_err(|e| Error::Storage(format!("Failed to acquire write lock: {}", e)))?;
        orders.insert(order.id().clone(), order.clone());
        Ok(())
    }

    async fn update_print_status(&self, id: &OrderId, status: PrintStatus) -> Result<bool> {
        self.update(id, |o| o.set_print_status(status))
    }

    async fn update_phone(&self, id: &OrderId, phone: &PhoneNumber) -> Result<bool> {
        self.update(id, |o| o.set_phone(phone.clone()))
    }

    async fn update_image_links(&self, id: &OrderId, links: &[ImageLink]) -> Result<bool> {
        self.update(id, |o| o.set_image_links(links.to_vec()))
    }
}

#[async_trait]
impl TemplateStore for InMemoryStore {
    async fn list_templates(&self) -> Result<Vec<Template>> {
        let templates = self.templates.read().map_err(|e| Error::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(templates.clone())
    }

    async fn save_template(&self, template: &Template) -> Result<()> {
        let mut templates = self.templates.write().map_err(|e| Error::Storage(format!("Failed to acquire write lock: {}", e)))?;
        match templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template.clone(),
            None => templates.push(template.clone()),
        }
        Ok(())
    }
}
