use serde::Deserialize;

use medcat_core::{Currency, format_currency};
use medcat_inventory::{
    Classification, InventoryItem, ItemQuery, Specialty, ValuationSummary,
};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub delta: i64,
}

/// `GET /items` query string. Everything arrives as text so that bad values
/// produce our own `invalid_query` errors instead of extractor rejections.
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsParams {
    pub category: Option<String>,
    pub classification: Option<String>,
    pub specialty: Option<String>,
    pub q: Option<String>,
    pub low_stock: Option<String>,
}

impl ListItemsParams {
    pub fn to_query(&self) -> Result<ItemQuery, axum::response::Response> {
        let mut query = ItemQuery::new();

        if let Some(category) = non_blank(&self.category) {
            query = query.category(category);
        }
        if let Some(raw) = non_blank(&self.classification) {
            let classification: Classification = raw
                .parse()
                .map_err(|e: medcat_core::DomainError| errors::invalid_query(e.to_string()))?;
            query = query.classification(classification);
        }
        if let Some(raw) = non_blank(&self.specialty) {
            let specialty: Specialty = raw
                .parse()
                .map_err(|e: medcat_core::DomainError| errors::invalid_query(e.to_string()))?;
            query = query.specialty(specialty);
        }
        if let Some(text) = non_blank(&self.q) {
            query = query.text(text);
        }
        if let Some(raw) = non_blank(&self.low_stock) {
            let on = match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => return Err(errors::invalid_query("low_stock must be true or false")),
            };
            query = query.low_stock_only(on);
        }

        Ok(query)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn item_to_json(item: &InventoryItem, currency: Currency) -> serde_json::Value {
    serde_json::json!({
        "id": item.id.get(),
        "sku": item.sku,
        "name": item.name,
        "category": item.category,
        "classification": item.classification.as_str(),
        "specialties": item.specialties.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        "supplier": item.supplier,
        "unit_of_measure": item.unit_of_measure,
        "storage_location": item.storage_location,
        "current_stock": item.current_stock,
        "reorder_point": item.reorder_point,
        "par_level": item.par_level,
        "low_stock": item.is_low_stock(),
        "reorder_quantity": item.reorder_quantity(),
        "unit_cost_cents": item.unit_cost_cents,
        "unit_cost": item.unit_cost(currency).format(),
        "contacts": item.contacts,
    })
}

pub fn items_to_json(items: &[&InventoryItem], currency: Currency) -> serde_json::Value {
    serde_json::json!({
        "count": items.len(),
        "items": items.iter().map(|item| item_to_json(item, currency)).collect::<Vec<_>>(),
    })
}

pub fn valuation_to_json(summary: &ValuationSummary) -> serde_json::Value {
    let currency = summary.currency;
    let clamp = |cents: u64| i64::try_from(cents).unwrap_or(i64::MAX);

    serde_json::json!({
        "currency": currency.code(),
        "total_items": summary.total_items,
        "total_units": summary.total_units,
        "total_value_cents": summary.total_value_cents,
        "total_value": summary.total_value().format(),
        "low_stock_items": summary.low_stock_items,
        "by_category": summary.by_category.iter().map(|c| serde_json::json!({
            "category": c.category,
            "items": c.items,
            "units": c.units,
            "value_cents": c.value_cents,
            "value": format_currency(clamp(c.value_cents), currency),
            "low_stock_items": c.low_stock_items,
        })).collect::<Vec<_>>(),
    })
}
