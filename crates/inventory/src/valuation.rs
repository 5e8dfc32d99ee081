//! Inventory valuation: units on hand × unit cost, overall and per category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use medcat_core::{Currency, Money};

use crate::item::InventoryItem;

/// Value held in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryValuation {
    pub category: String,
    pub items: usize,
    pub units: u64,
    /// Total value in smallest currency unit (saturating).
    pub value_cents: u64,
    pub low_stock_items: usize,
}

/// Summary of total inventory value for a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub currency: Currency,
    pub total_items: usize,
    pub total_units: u64,
    /// Total value in smallest currency unit (saturating).
    pub total_value_cents: u64,
    pub low_stock_items: usize,
    /// Sorted by category name.
    pub by_category: Vec<CategoryValuation>,
}

impl ValuationSummary {
    pub fn from_items(currency: Currency, items: &[InventoryItem]) -> Self {
        let mut by_category: BTreeMap<&str, CategoryValuation> = BTreeMap::new();

        for item in items {
            let value = u64::from(item.current_stock).saturating_mul(item.unit_cost_cents);
            let entry = by_category
                .entry(item.category.as_str())
                .or_insert_with(|| CategoryValuation {
                    category: item.category.clone(),
                    items: 0,
                    units: 0,
                    value_cents: 0,
                    low_stock_items: 0,
                });
            entry.items += 1;
            entry.units += u64::from(item.current_stock);
            entry.value_cents = entry.value_cents.saturating_add(value);
            if item.is_low_stock() {
                entry.low_stock_items += 1;
            }
        }

        let by_category: Vec<CategoryValuation> = by_category.into_values().collect();

        Self {
            currency,
            total_items: items.len(),
            total_units: by_category.iter().map(|c| c.units).sum(),
            total_value_cents: by_category
                .iter()
                .fold(0u64, |acc, c| acc.saturating_add(c.value_cents)),
            low_stock_items: by_category.iter().map(|c| c.low_stock_items).sum(),
            by_category,
        }
    }

    /// Total value as money; values beyond `i64::MAX` cents saturate.
    pub fn total_value(&self) -> Money {
        Money::new(
            i64::try_from(self.total_value_cents).unwrap_or(i64::MAX),
            self.currency,
        )
    }
}
