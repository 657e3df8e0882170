//! Field extraction for a single product entry

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{NOVELTY_PRODUCTS, TSHIRT};
use crate::domain::templates::TemplateRegistry;

static SHORTHAND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^([SMLX]+)-(.+)$").unwrap());
static SIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)size:\s*([^,]+)").unwrap());
static DESIGN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)design:\s*([^,]+)").unwrap());

/// Annotation appended by the intake form to custom designs; everything from it on is dropped.
const AFTER_ORDER_MARKER: &str = "(after order placement";
const SIZE_MARKER: &str = ", size:";

/// One purchased item decoded from a product line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predesigned_id: Option<String>,
}

impl ProductDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn is_tshirt(&self) -> bool { self.name.contains(TSHIRT) }
}

/// Extract name, size and design from one entry produced by the splitter.
///
/// Never fails: anything unrecognized becomes a descriptor named after the trimmed entry.
pub fn parse_product_descriptor(entry: &str, registry: &dyn TemplateRegistry) -> ProductDescriptor {
    let entry = entry.trim();

    if let Some((start, novelty)) = find_novelty(entry) {
        let tail = &entry[start + novelty.len()..];
        return ProductDescriptor { size: capture(&SIZE_RE, tail), ..ProductDescriptor::named(novelty) };
    }

    if let Some(caps) = SHORTHAND_RE.captures(entry) {
        let design = caps[2].trim();
        return ProductDescriptor {
            name: TSHIRT.to_string(),
            size: Some(caps[1].to_string()),
            design: (!design.is_empty()).then(|| design.to_string()),
            predesigned_id: None,
        };
    }

    let mut descriptor = ProductDescriptor::named(entry);

    descriptor.size = capture(&SIZE_RE, entry);
    if descriptor.size.is_some() {
        if let Some((name, _)) = entry.split_once(SIZE_MARKER) {
            descriptor.name = name.trim().to_string();
        }
    }

    descriptor.design = capture(&DESIGN_RE, entry)
        .map(|design| match design.split_once(AFTER_ORDER_MARKER) {
            Some((kept, _)) => kept.trim().to_string(),
            None => design,
        })
        .filter(|design| !design.is_empty());

    if let Some(design) = &descriptor.design {
        descriptor.predesigned_id = registry.lookup(design).map(|t| t.id);
    }

    descriptor
}

fn find_novelty(entry: &str) -> Option<(usize, &'static str)> {
    NOVELTY_PRODUCTS.iter().find_map(|name| entry.find(name).map(|start| (start, *name)))
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::templates::TemplateCatalog;

    fn parse(entry: &str) -> ProductDescriptor {
        parse_product_descriptor(entry, &TemplateCatalog::with_defaults())
    }

    #[test]
    fn test_tshirt_with_size_and_design() {
        let d = parse("Designed & Custom White T-Shirt, size: M, design: Plain White T Shirt");
        assert_eq!(d.name, TSHIRT);
        assert_eq!(d.size.as_deref(), Some("M"));
        assert_eq!(d.design.as_deref(), Some("Plain White T Shirt"));
    }

    #[test]
    fn test_size_prefixed_shorthand() {
        let d = parse("S-Class of 2025");
        assert_eq!(
            d,
            ProductDescriptor {
                name: TSHIRT.to_string(),
                size: Some("S".to_string()),
                design: Some("Class of 2025".to_string()),
                predesigned_id: None,
            }
        );
    }

    #[test]
    fn test_novelty_size_scoped_to_phrase() {
        let d = parse("AquaStrike Elite Pro, size: Large");
        assert_eq!(d, ProductDescriptor { size: Some("Large".into()), ..ProductDescriptor::named("AquaStrike Elite Pro") });

        let d = parse("Play Gun Set Pistol");
        assert_eq!(d.name, "Play Gun Set Pistol");
        assert!(d.size.is_none() && d.design.is_none());
    }

    #[test]
    fn test_after_order_annotation_is_dropped() {
        let d = parse("Designed & Custom White T-Shirt, size: L, design: Front Custom Design (after order placement we contact you)");
        assert_eq!(d.design.as_deref(), Some("Front Custom Design"));
        assert!(d.predesigned_id.is_none());
    }

    #[test]
    fn test_predesigned_id_resolved() {
        let d = parse("Designed & Custom White T-Shirt, size: XL, design: Results dey");
        assert_eq!(d.predesigned_id.as_deref(), Some("results-dey"));
    }

    #[test]
    fn test_size_without_name_marker_keeps_full_name() {
        let d = parse("Designed & Custom White T-Shirt size: M");
        assert_eq!(d.name, "Designed & Custom White T-Shirt size: M");
        assert_eq!(d.size.as_deref(), Some("M"));
    }

    #[test]
    fn test_unrecognized_entry() {
        let d = parse("  Mystery box  ");
        assert_eq!(d, ProductDescriptor::named("Mystery box"));
    }

    #[test]
    fn test_case_insensitive_fields() {
        let d = parse("Designed & Custom White T-Shirt, SIZE: s, Design: No be beans");
        assert_eq!(d.size.as_deref(), Some("s"));
        assert_eq!(d.design.as_deref(), Some("No be beans"));
        assert_eq!(d.predesigned_id.as_deref(), Some("no-be-beans"));
        // ", size:" marker is matched as written
        assert_eq!(d.name, "Designed & Custom White T-Shirt, SIZE: s, Design: No be beans");
    }
}
