//! Fulfillment classification and product-name helpers

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ProductDescriptor, NOVELTY_PRODUCTS, TSHIRT};
use crate::domain::templates::{Template, TemplateRegistry};
use crate::domain::value_objects::DesignSide;

/// How a t-shirt entry has to be printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FulfillmentType {
    Plain,
    PreDesigned,
    CustomFront,
    CustomBack,
    CustomFrontBack,
}

impl FulfillmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::PreDesigned => "pre-designed",
            Self::CustomFront => "custom-front",
            Self::CustomBack => "custom-back",
            Self::CustomFrontBack => "custom-front-back",
        }
    }

    /// Whether the customer has to supply artwork for this shirt.
    pub fn needs_artwork(&self) -> bool {
        matches!(self, Self::CustomFront | Self::CustomBack | Self::CustomFrontBack)
    }

    /// Artwork slots the customer fills for this shirt.
    pub fn design_sides(&self) -> &'static [DesignSide] {
        match self {
            Self::CustomFront => &[DesignSide::Front],
            Self::CustomBack => &[DesignSide::Back],
            Self::CustomFrontBack => &[DesignSide::Front, DesignSide::Back],
            Self::Plain | Self::PreDesigned => &[],
        }
    }
}

impl fmt::Display for FulfillmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Classify a decoded entry. `None` means the product is not a t-shirt.
///
/// "front" and "back" anywhere in the design means both sides: the intake form joins the two
/// words with `&`, `,`, `and` or nothing at all. A design name that merely mentions both words
/// is misread as a two-sided custom print.
pub fn classify_fulfillment(descriptor: &ProductDescriptor) -> Option<FulfillmentType> {
    if !descriptor.is_tshirt() {
        return None;
    }

    let design = match descriptor.design.as_deref() {
        Some(design) if !design.trim().is_empty() => design.to_lowercase(),
        _ => return Some(FulfillmentType::Plain),
    };

    let has_front = design.contains("front");
    let has_back = design.contains("back");

    let kind = if design.contains("plain white t shirt") {
        FulfillmentType::Plain
    } else if design.contains("front custom design") {
        FulfillmentType::CustomFront
    } else if design.contains("back custom design") && !has_front {
        FulfillmentType::CustomBack
    } else if has_front && has_back {
        FulfillmentType::CustomFrontBack
    } else {
        // Known template or not, any other design is printed from a predesigned file.
        FulfillmentType::PreDesigned
    };
    Some(kind)
}

/// Template to preview for a pre-designed entry.
pub fn resolve_template(descriptor: &ProductDescriptor, registry: &dyn TemplateRegistry) -> Option<Template> {
    if classify_fulfillment(descriptor) != Some(FulfillmentType::PreDesigned) {
        return None;
    }
    descriptor
        .predesigned_id
        .as_deref()
        .and_then(|id| registry.lookup(id))
        .or_else(|| descriptor.design.as_deref().and_then(|design| registry.lookup(design)))
}

pub fn is_novelty_product(name: &str) -> bool {
    NOVELTY_PRODUCTS.iter().any(|novelty| name.contains(novelty))
}

/// Short product name for tables and cards.
pub fn display_name(name: &str) -> String {
    if name.contains(TSHIRT) {
        return TSHIRT.to_string();
    }
    if name.contains("AquaStrike Elite") {
        let variant = ["Veteran", "Pro", "Novice"].into_iter().find(|v| name.contains(v));
        return match variant {
            Some(v) => format!("AquaStrike Elite {v}"),
            None => "AquaStrike Elite".to_string(),
        };
    }
    ["Play Gun Set Pistol", "Water Shooting Play Gun Set"]
        .into_iter()
        .find(|n| name.contains(n))
        .map_or_else(|| name.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::templates::TemplateCatalog;

    fn shirt(design: Option<&str>) -> ProductDescriptor {
        ProductDescriptor { design: design.map(str::to_string), ..ProductDescriptor::named(TSHIRT) }
    }

    #[test]
    fn test_not_a_shirt() {
        let d = ProductDescriptor { size: Some("Large".into()), ..ProductDescriptor::named("AquaStrike Elite Pro") };
        assert_eq!(classify_fulfillment(&d), None);
        assert!(is_novelty_product(&d.name));
    }

    #[test]
    fn test_plain() {
        assert_eq!(classify_fulfillment(&shirt(None)), Some(FulfillmentType::Plain));
        assert_eq!(classify_fulfillment(&shirt(Some(""))), Some(FulfillmentType::Plain));
        assert_eq!(classify_fulfillment(&shirt(Some("Plain White T Shirt"))), Some(FulfillmentType::Plain));
    }

    #[test]
    fn test_custom_sides() {
        assert_eq!(classify_fulfillment(&shirt(Some("Front Custom Design"))), Some(FulfillmentType::CustomFront));
        assert_eq!(classify_fulfillment(&shirt(Some("Back Custom Design"))), Some(FulfillmentType::CustomBack));
        for design in [
            "Front , Back Custom Design",
            "Front,Back Custom Design",
            "Front & Back Custom Design",
            "front and back custom design",
            "Front Back Custom Design",
        ] {
            assert_eq!(classify_fulfillment(&shirt(Some(design))), Some(FulfillmentType::CustomFrontBack), "{design}");
        }
    }

    #[test]
    fn test_pre_designed_fallback() {
        assert_eq!(classify_fulfillment(&shirt(Some("Class of 2025"))), Some(FulfillmentType::PreDesigned));
        assert_eq!(classify_fulfillment(&shirt(Some("Something unheard of"))), Some(FulfillmentType::PreDesigned));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let d = shirt(Some("Front , Back Custom Design"));
        assert_eq!(classify_fulfillment(&d), classify_fulfillment(&d));
    }

    #[test]
    fn test_resolve_template() {
        let catalog = TemplateCatalog::with_defaults();
        let d = ProductDescriptor { predesigned_id: Some("coding-my-way".into()), ..shirt(Some("Coding my way")) };
        assert_eq!(resolve_template(&d, &catalog).unwrap().id, "coding-my-way");
        assert!(resolve_template(&shirt(Some("Front Custom Design")), &catalog).is_none());
        assert!(resolve_template(&shirt(Some("Something unheard of")), &catalog).is_none());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("Designed & Custom White T-Shirt, size: M"), TSHIRT);
        assert_eq!(display_name("AquaStrike Elite Veteran"), "AquaStrike Elite Veteran");
        assert_eq!(display_name("AquaStrike Elite (limited)"), "AquaStrike Elite");
        assert_eq!(display_name("Water Shooting Play Gun Set"), "Water Shooting Play Gun Set");
        assert_eq!(display_name("Mug"), "Mug");
        assert_eq!(FulfillmentType::CustomFrontBack.to_string(), "custom-front-back");
    }
}
