//! Order sheet import
//!
//! The intake form exports every order as one CSV row. Orders missing from the database are
//! looked up here and written back.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::aggregates::order::{DEFAULT_SALES_CHANNEL, PENDING};
use crate::domain::aggregates::Order;
use crate::domain::value_objects::{Money, OrderId, PrintStatus};
use crate::Result;

/// Somewhere orders can be read from besides the database.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Order>>;

    async fn find(&self, id: &OrderId) -> Result<Option<Order>> {
        Ok(self.fetch_all().await?.into_iter().find(|o| o.id() == id))
    }
}

/// CSV order sheet published at a URL
pub struct HttpOrderSheet {
    url: String,
    client: reqwest::Client,
}

impl HttpOrderSheet {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), client: reqwest::Client::new() }
    }
}

#[async_trait]
impl OrderSource for HttpOrderSheet {
    async fn fetch_all(&self) -> Result<Vec<Order>> {
        tracing::debug!(url = %self.url, "fetching order sheet");
        let text = self.client.get(&self.url).send().await?.error_for_status()?.text().await?;
        Ok(parse_order_sheet(&text))
    }
}

/// Parse the exported CSV. Rows that cannot be read are skipped with a warning.
pub fn parse_order_sheet(text: &str) -> Vec<Order> {
    let mut lines = text.lines();
    let headers: Vec<String> = match lines.next() {
        Some(header) => split_csv_line(header).into_iter().map(|h| h.trim().to_string()).collect(),
        None => return vec![],
    };

    let mut orders = Vec::new();
    for (i, line) in lines.enumerate() {
        let row = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let values = split_csv_line(line);
        if values.len() < headers.len() {
            tracing::warn!(row, "skipping order sheet row: not enough values");
            continue;
        }
        let fields: HashMap<&str, &str> = headers.iter().map(String::as_str).zip(values.iter().map(|v| v.trim())).collect();
        match order_from_fields(&fields) {
            Some(order) => orders.push(order),
            None => tracing::warn!(row, order_id = fields.get("Order ID").copied().unwrap_or(""), "skipping order sheet row: invalid order id"),
        }
    }
    orders
}

fn order_from_fields(fields: &HashMap<&str, &str>) -> Option<Order> {
    let get = |key: &str| fields.get(key).copied().filter(|v| !v.is_empty());
    let id = OrderId::parse(get("Order ID")?).ok()?;

    let order_status = get("Order Status").unwrap_or(PENDING);
    let print_status = if order_status == "PRINTED" { PrintStatus::Printed } else { PrintStatus::NotPrinted };
    let total = get("Total").and_then(|t| Decimal::from_str(t).ok()).unwrap_or(Decimal::ZERO);

    Some(
        Order::create(id, get("Customer").unwrap_or("Unknown"), get("Product").unwrap_or("Unknown"))
            .with_phone(get("Phone").map(str::to_string))
            .with_total(Money::ngn(total))
            .with_statuses(order_status, get("Payment Status").unwrap_or(PENDING), get("Shipping Status").unwrap_or(PENDING))
            .with_shipping_details(get("Shipping Details").unwrap_or(""))
            .with_sales_channel(get("Sales Channel").unwrap_or(DEFAULT_SALES_CHANNEL))
            .with_date(get("Date").map(str::to_string).unwrap_or_else(|| Utc::now().date_naive().to_string()))
            .with_print_status(print_status),
    )
}

/// Split on commas outside double quotes; quotes themselves are dropped.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    values.push(current);
    values
}
