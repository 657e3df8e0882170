//! Domain layer: order aggregate, product-line decoding and template registry
pub mod aggregates;
pub mod product_line;
pub mod templates;
pub mod value_objects;
