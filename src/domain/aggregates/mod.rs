//! Aggregates module
pub mod order;

pub use order::{FilterError, ImageLink, Order, OrderFilter, PrintFilter, ProductFilter};
