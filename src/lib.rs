//! Print-shop order tracking
//!
//! Order lookup and custom-design management for a t-shirt and novelty printing business.
//!
//! ## Features
//! - Decoding of free-text product lines into sized, classified products
//! - Predesigned template registry
//! - Order lookup with write-back from the order sheet
//! - Print status, phone and design-image tracking
//! - Admin order browsing with product/print filters

pub mod api;
pub mod assets;
pub mod config;
pub mod domain;
pub mod import;
pub mod service;
pub mod storage;

use thiserror::Error;

pub use domain::aggregates::{ImageLink, Order, OrderFilter};
pub use domain::product_line::{
    classify_fulfillment, is_novelty_product, parse_product_descriptor, parse_product_line, split_product_line,
    FulfillmentType, ProductDescriptor,
};
pub use domain::templates::{Template, TemplateCatalog, TemplateRegistry};
pub use domain::value_objects::{OrderId, PrintStatus};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum Error {
    #[error("Order not found")]
    OrderNotFound,

    #[error("{0}")]
    InvalidOrderId(#[from] domain::value_objects::OrderIdError),

    #[error("{0}")]
    InvalidPhone(#[from] domain::value_objects::PhoneError),

    #[error("{0}")]
    InvalidPrintStatus(#[from] domain::value_objects::PrintStatusError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Order sheet error: {0}")]
    Source(String),
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self { Error::Storage(e.to_string()) }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self { Error::Source(e.to_string()) }
}

pub type Result<T> = std::result::Result<T, Error>;
