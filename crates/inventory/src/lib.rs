//! Surgical inventory catalog.
//!
//! Holds the stocked records (instrument trays, implants, consumables, drapes,
//! ...) organized by specialty, and the lookups over them. Pure domain logic:
//! the only IO is reading an optional external catalog file.

pub mod catalog;
pub mod item;
pub mod query;
pub mod valuation;

pub use catalog::{Catalog, CatalogDocument, CatalogError};
pub use item::{Classification, Contact, InventoryItem, Specialty};
pub use query::ItemQuery;
pub use valuation::{CategoryValuation, ValuationSummary};
