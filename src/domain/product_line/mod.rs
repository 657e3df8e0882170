//! Decoding of the free-text `product` field of an order
//!
//! The order-intake form stores every purchased item of an order in one string, e.g.
//! `"Designed & Custom White T-Shirt, size: M, design: Front Custom Design"`. This module
//! splits such a line into entries, extracts name/size/design per entry and classifies
//! how each t-shirt has to be fulfilled.

pub mod descriptor;
pub mod fulfillment;
pub mod splitter;

pub use descriptor::{parse_product_descriptor, ProductDescriptor};
pub use fulfillment::{classify_fulfillment, display_name, is_novelty_product, resolve_template, FulfillmentType};
pub use splitter::split_product_line;

use crate::domain::templates::TemplateRegistry;

/// Canonical name of the printable t-shirt.
pub const TSHIRT: &str = "Designed & Custom White T-Shirt";

/// Fixed set of novelty (water gun) products sold alongside the shirts.
pub const NOVELTY_PRODUCTS: [&str; 5] = [
    "AquaStrike Elite Veteran",
    "AquaStrike Elite Pro",
    "AquaStrike Elite Novice",
    "Play Gun Set Pistol",
    "Water Shooting Play Gun Set",
];

/// Phrases that begin a new entry in a product line, in matching priority.
pub(crate) const STARTERS: [&str; 6] = [
    TSHIRT,
    NOVELTY_PRODUCTS[0],
    NOVELTY_PRODUCTS[1],
    NOVELTY_PRODUCTS[2],
    NOVELTY_PRODUCTS[3],
    NOVELTY_PRODUCTS[4],
];

/// Split a raw product line and decode every entry.
pub fn parse_product_line(raw: &str, registry: &dyn TemplateRegistry) -> Vec<ProductDescriptor> {
    split_product_line(raw).iter().map(|entry| parse_product_descriptor(entry, registry)).collect()
}
