//! Order lookups and updates on top of the repository and the order sheet

use serde::Serialize;
use std::sync::Arc;

use crate::domain::aggregates::{ImageLink, Order};
use crate::domain::value_objects::{OrderId, PhoneNumber, PrintStatus};
use crate::import::OrderSource;
use crate::storage::OrderRepository;
use crate::{Error, Result};

/// Where a found order came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderOrigin { Database, Csv }

#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    sheet: Option<Arc<dyn OrderSource>>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>, sheet: Option<Arc<dyn OrderSource>>) -> Self {
        Self { repo, sheet }
    }

    /// Database first, then the order sheet; sheet hits are saved for next time.
    pub async fn find_order(&self, id: &OrderId) -> Result<Option<(Order, OrderOrigin)>> {
        if let Some(order) = self.repo.get(id).await? {
            return Ok(Some((order, OrderOrigin::Database)));
        }
        let Some(sheet) = &self.sheet else { return Ok(None) };

        match sheet.find(id).await {
            Ok(Some(order)) => {
                self.repo.upsert(&order).await?;
                tracing::info!(order_id = %id, "order imported from sheet");
                Ok(Some((order, OrderOrigin::Csv)))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                tracing::warn!(order_id = %id, "order sheet lookup failed: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn get_order(&self, id: &OrderId) -> Result<Order> {
        self.find_order(id).await?.map(|(order, _)| order).ok_or(Error::OrderNotFound)
    }

    pub async fn order_exists(&self, id: &OrderId) -> Result<bool> {
        Ok(self.find_order(id).await?.is_some())
    }

    /// All orders, newest first. An empty database is seeded from the sheet.
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        let orders = self.repo.list().await?;
        if !orders.is_empty() {
            return Ok(orders);
        }
        let Some(sheet) = &self.sheet else { return Ok(orders) };

        let imported = match sheet.fetch_all().await {
            Ok(imported) => imported,
            Err(e) => {
                tracing::warn!("order sheet import failed: {}", e);
                return Ok(orders);
            }
        };
        for order in &imported {
            self.repo.upsert(order).await?;
        }
        tracing::info!(count = imported.len(), "orders imported from sheet");
        self.repo.list().await
    }

    pub async fn update_print_status(&self, id: &OrderId, status: PrintStatus) -> Result<()> {
        if !self.repo.update_print_status(id, status).await? {
            return Err(Error::OrderNotFound);
        }
        tracing::info!(order_id = %id, print_status = %status, "print status updated");
        Ok(())
    }

    pub async fn update_phone(&self, id: &OrderId, phone: &PhoneNumber) -> Result<()> {
        if !self.repo.update_phone(id, phone).await? {
            return Err(Error::OrderNotFound);
        }
        Ok(())
    }

    /// Register a design image on the order, replacing the one in the same slot.
    pub async fn attach_design(&self, id: &OrderId, link: ImageLink) -> Result<Vec<ImageLink>> {
        let mut order = self.get_order(id).await?;
        order.attach_design(link);
        self.repo.update_image_links(id, order.image_links()).await?;
        tracing::info!(order_id = %id, links = order.image_links().len(), "design attached");
        Ok(order.image_links().to_vec())
    }
}
