//! Item filters shared by the catalog lookups and the HTTP query string.

use serde::{Deserialize, Serialize};

use crate::item::{Classification, InventoryItem, Specialty};

/// Conjunction of optional filters. An empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuery {
    pub category: Option<String>,
    pub classification: Option<Classification>,
    pub specialty: Option<Specialty>,
    pub text: Option<String>,
    #[serde(default)]
    pub low_stock_only: bool,
}

impl ItemQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn specialty(mut self, specialty: Specialty) -> Self {
        self.specialty = Some(specialty);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn low_stock_only(mut self, on: bool) -> Self {
        self.low_stock_only = on;
        self
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        if let Some(category) = &self.category {
            if !category_matches(item, category) {
                return false;
            }
        }
        if let Some(classification) = self.classification {
            if item.classification != classification {
                return false;
            }
        }
        if let Some(specialty) = self.specialty {
            if !item.serves(specialty) {
                return false;
            }
        }
        if let Some(text) = &self.text {
            if !text_matches(item, &normalize_needle(text)) {
                return false;
            }
        }
        if self.low_stock_only && !item.is_low_stock() {
            return false;
        }
        true
    }
}

/// Trimmed, case-insensitive category equality.
pub(crate) fn category_matches(item: &InventoryItem, category: &str) -> bool {
    item.category.trim().to_lowercase() == category.trim().to_lowercase()
}

pub(crate) fn normalize_needle(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Substring match over name, SKU, category and supplier.
///
/// `needle` must already be normalized; an empty needle matches every item.
pub(crate) fn text_matches(item: &InventoryItem, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [&item.name, &item.sku, &item.category, &item.supplier]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}
