//! PostgreSQL store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{OrderRepository, TemplateStore};
use crate::domain::aggregates::{ImageLink, Order};
use crate::domain::templates::Template;
use crate::domain::value_objects::{Money, OrderId, PhoneNumber, PrintStatus};
use crate::{Error, Result};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_id: String, customer_name: String, phone: Option<String>, product: String,
    total: Decimal, currency: String, order_status: String, pay_status: String, ship_status: String,
    ship_detail: String, sales_channel: String, order_date: String, print_status: String,
    image_links: Json<Vec<ImageLink>>, created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = Error;

    fn try_from(row: OrderRow) -> Result<Self> {
        let id = OrderId::parse(&row.order_id).map_err(|e| Error::Storage(format!("order {:?}: {}", row.order_id, e)))?;
        let print_status = row.print_status.parse().unwrap_or_else(|_| {
            tracing::warn!(order_id = %id, print_status = %row.print_status, "unknown print status, treating as not printed");
            PrintStatus::NotPrinted
        });
        Ok(Order::create(id, row.customer_name, row.product)
            .with_phone(row.phone)
            .with_total(Money::new(row.total, &row.currency))
            .with_statuses(row.order_status, row.pay_status, row.ship_status)
            .with_shipping_details(row.ship_detail)
            .with_sales_channel(row.sales_channel)
            .with_date(row.order_date)
            .with_print_status(print_status)
            .with_image_links(row.image_links.0)
            .with_created_at(row.created_at))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TemplateRow { design_id: String, name: String, path: String, url: Option<String> }

impl From<TemplateRow> for Template {
    fn from(row: TemplateRow) -> Self {
        Template { id: row.design_id, name: row.name, path: row.path, url: row.url }
    }
}

const ORDER_COLUMNS: &str = "order_id, customer_name, phone, product, total, currency, order_status, pay_status, ship_status, ship_detail, sales_channel, order_date, print_status, image_links, created_at";

#[async_trait]
impl OrderRepository for PgStore {
    async fn get(&self, id: &OrderId) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1"))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Order::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, order_id DESC"))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Order::try_from).collect()
    }

    async fn upsert(&self, order: &Order) -> Result<()> {
        sqlx::query(
            "INSERT INTO orders (order_id, customer_name, phone, product, total, currency, order_status, pay_status, ship_status, ship_detail, sales_channel, order_date, print_status, image_links, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, NOW()) \
             ON CONFLICT (order_id) DO UPDATE SET customer_name = $2, phone = $3, product = $4, total = $5, currency = $6, \
             order_status = $7, pay_status = $8, ship_status = $9, ship_detail = $10, sales_channel = $11, order_date = $12, \
             print_status = $13, image_links = $14, updated_at = NOW()",
        )
        .bind(order.id().as_str()).bind(order.customer()).bind(order.phone()).bind(order.product())
        .bind(order.total().amount()).bind(order.total().currency())
        .bind(order.order_status()).bind(order.payment_status()).bind(order.shipping_status()).bind(order.shipping_details())
        .bind(order.sales_channel()).bind(order.date()).bind(order.print_status().as_str())
        .bind(Json(order.image_links())).bind(order.created_at())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_print_status(&self, id: &OrderId, status: PrintStatus) -> Result<bool> {
        let done = sqlx::query("UPDATE orders SET print_status = $2, updated_at = NOW() WHERE order_id = $1")
            .bind(id.as_str()).bind(status.as_str())
            .execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }

    async fn update_phone(&self, id: &OrderId, phone: &PhoneNumber) -> Result<bool> {
        let done = sqlx::query("UPDATE orders SET phone = $2, updated_at = NOW() WHERE order_id = $1")
            .bind(id.as_str()).bind(phone.as_str())
            .execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }

    async fn update_image_links(&self, id: &OrderId, links: &[ImageLink]) -> Result<bool> {
        let done = sqlx::query("UPDATE orders SET image_links = $2, updated_at = NOW() WHERE order_id = $1")
            .bind(id.as_str()).bind(Json(links))
            .execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }
}

#[async_trait]
impl TemplateStore for PgStore {
    async fn list_templates(&self) -> Result<Vec<Template>> {
        let rows = sqlx::query_as::<_, TemplateRow>("SELECT design_id, name, path, url FROM predesigned_designs ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Template::from).collect())
    }

    async fn save_template(&self, template: &Template) -> Result<()> {
        sqlx::query(
            "INSERT INTO predesigned_designs (design_id, name, path, url, created_at) VALUES ($1, $2, $3, $4, NOW()) \
             ON CONFLICT (design_id) DO UPDATE SET name = $2, path = $3, url = $4",
        )
        .bind(&template.id).bind(&template.name).bind(&template.path).bind(&template.url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
