//! Predesigned template registry

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// A predesigned print template
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Template {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), path: path.into(), url: None }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Read access to the predesigned templates known to the shop.
///
/// A failed or empty lookup is "no match"; callers never treat it as fatal.
pub trait TemplateRegistry: Send + Sync {
    fn lookup(&self, name: &str) -> Option<Template>;
    fn all(&self) -> Vec<Template>;
}

/// Case-insensitive lookup: exact name or id first, then containment in either direction.
pub fn find_template<'a>(templates: &'a [Template], query: &str) -> Option<&'a Template> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    let exact = templates.iter().find(|t| t.name.to_lowercase() == query || t.id.to_lowercase() == query);
    if exact.is_some() {
        return exact;
    }

    templates.iter().find(|t| {
        let name = t.name.trim().to_lowercase();
        let id = t.id.trim().to_lowercase();
        if name.is_empty() || id.is_empty() {
            return false;
        }
        query.contains(&id) || query.contains(&name) || name.contains(&query)
    })
}

/// Templates shipped with the service, used until (and alongside) the stored ones.
pub fn default_templates() -> Vec<Template> {
    [
        ("class-of-2025", "Class of 2025"),
        ("deserve-an-award", "5 years later... I deserve an award"),
        ("made-in-abuad", "Made in ABUAD, upgraded for the world"),
        ("lawyer-in-progress", "Lawyer in progress – no objection!"),
        ("coding-my-way", "Coding my way to the future – ABUAD CS"),
        ("results-dey", "Results dey, degrees dey, no wahala!"),
        ("no-be-beans", "No be beans! Graduate mode activated"),
        ("plain-white", "Plain white t-shirt"),
    ]
    .into_iter()
    .map(|(id, name)| Template::new(id, name, format!("yhe/predesigned/{id}")))
    .collect()
}

/// In-memory read-through cache of templates.
///
/// Starts from [`default_templates`]; [`TemplateCatalog::refresh`] layers stored templates
/// on top, keeping any default whose id the store does not override.
pub struct TemplateCatalog {
    defaults: Vec<Template>,
    entries: RwLock<Vec<Template>>,
}

impl TemplateCatalog {
    pub fn new(defaults: Vec<Template>) -> Self {
        Self { entries: RwLock::new(defaults.clone()), defaults }
    }

    pub fn with_defaults() -> Self { Self::new(default_templates()) }

    pub fn refresh(&self, stored: Vec<Template>) {
        let mut merged = stored;
        for template in &self.defaults {
            if !merged.iter().any(|t| t.id == template.id) {
                merged.push(template.clone());
            }
        }
        match self.entries.write() {
            Ok(mut entries) => {
                tracing::debug!(count = merged.len(), "template catalog refreshed");
                *entries = merged;
            }
            Err(e) => tracing::warn!("template catalog lock poisoned, keeping previous entries: {}", e),
        }
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self { Self::with_defaults() }
}

impl TemplateRegistry for TemplateCatalog {
    fn lookup(&self, name: &str) -> Option<Template> {
        let entries = self.entries.read().ok()?;
        find_template(&entries, name).cloned()
    }

    fn all(&self) -> Vec<Template> {
        self.entries.read().map(|e| e.clone()).unwrap_or_else(|_| self.defaults.clone())
    }
}
