//! The catalog: every stocked record plus the lookups over it.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use medcat_core::{Currency, DomainError, DomainResult, ItemId, format_currency};

use crate::item::{Classification, InventoryItem, Specialty};
use crate::query::{ItemQuery, category_matches, normalize_needle, text_matches};
use crate::valuation::ValuationSummary;

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

/// On-disk shape of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub currency: Currency,
    pub items: Vec<InventoryItem>,
}

#[derive(Serialize)]
struct CatalogDocumentRef<'a> {
    currency: Currency,
    items: &'a [InventoryItem],
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(#[from] DomainError),
}

/// Validated, id-ordered set of inventory records.
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: Currency,
    items: Vec<InventoryItem>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog, validating every record.
    ///
    /// Duplicate record numbers and duplicate SKUs (case-insensitive) are
    /// rejected as conflicts.
    pub fn new(currency: Currency, mut items: Vec<InventoryItem>) -> DomainResult<Self> {
        items.sort_by_key(|item| item.id);

        let mut index = HashMap::with_capacity(items.len());
        let mut skus = HashSet::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            item.validate()?;
            if index.insert(item.id, pos).is_some() {
                return Err(DomainError::conflict(format!("duplicate item id {}", item.id)));
            }
            if !skus.insert(item.sku.trim().to_lowercase()) {
                return Err(DomainError::conflict(format!("duplicate sku {}", item.sku)));
            }
        }

        Ok(Self {
            currency,
            items,
            index,
        })
    }

    /// The catalog compiled into this crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        let catalog = Self::from_json_str(EMBEDDED_CATALOG)?;
        tracing::debug!(items = catalog.len(), "loaded embedded catalog");
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Ok(Self::try_from(doc)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            items = catalog.len(),
            "loaded catalog from file"
        );
        Ok(catalog)
    }

    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&CatalogDocumentRef {
            currency: self.currency,
            items: &self.items,
        })?)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter()
    }

    pub fn get(&self, id: ItemId) -> Option<&InventoryItem> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    pub fn by_category(&self, category: &str) -> Vec<&InventoryItem> {
        self.items
            .iter()
            .filter(|item| category_matches(item, category))
            .collect()
    }

    pub fn by_classification(&self, classification: Classification) -> Vec<&InventoryItem> {
        self.items
            .iter()
            .filter(|item| item.classification == classification)
            .collect()
    }

    pub fn by_specialty(&self, specialty: Specialty) -> Vec<&InventoryItem> {
        self.items
            .iter()
            .filter(|item| item.serves(specialty))
            .collect()
    }

    /// Case-insensitive substring search. A blank query returns everything.
    pub fn search(&self, query: &str) -> Vec<&InventoryItem> {
        let needle = normalize_needle(query);
        self.items
            .iter()
            .filter(|item| text_matches(item, &needle))
            .collect()
    }

    pub fn low_stock(&self) -> Vec<&InventoryItem> {
        self.items.iter().filter(|item| item.is_low_stock()).collect()
    }

    pub fn query(&self, query: &ItemQuery) -> Vec<&InventoryItem> {
        self.items.iter().filter(|item| query.matches(item)).collect()
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|item| item.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct suppliers, sorted.
    pub fn suppliers(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|item| item.supplier.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every specialty with the number of items tagged for it.
    pub fn specialty_counts(&self) -> Vec<(Specialty, usize)> {
        Specialty::ALL
            .into_iter()
            .map(|sp| (sp, self.items.iter().filter(|item| item.serves(sp)).count()))
            .collect()
    }

    /// Unit cost of an item in the catalog currency, formatted.
    pub fn format_cost(&self, item: &InventoryItem) -> String {
        format_currency(item.unit_cost(self.currency).minor, self.currency)
    }

    pub fn valuation(&self) -> ValuationSummary {
        ValuationSummary::from_items(self.currency, &self.items)
    }

    /// Apply a signed stock movement to one item.
    pub fn adjust_stock(&mut self, id: ItemId, delta: i64) -> DomainResult<&InventoryItem> {
        let pos = *self.index.get(&id).ok_or_else(DomainError::not_found)?;

        if delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }

        let item = &mut self.items[pos];
        let new_stock = i64::from(item.current_stock)
            .checked_add(delta)
            .ok_or_else(|| DomainError::invariant("stock exceeds the maximum representable quantity"))?;
        if new_stock < 0 {
            return Err(DomainError::invariant("stock cannot go negative"));
        }
        let new_stock = u32::try_from(new_stock)
            .map_err(|_| DomainError::invariant("stock exceeds the maximum representable quantity"))?;

        let was_low = item.is_low_stock();
        item.current_stock = new_stock;

        tracing::info!(
            item_id = %id,
            sku = %item.sku,
            delta,
            stock = new_stock,
            "stock adjusted"
        );
        if !was_low && item.is_low_stock() {
            tracing::warn!(
                item_id = %id,
                sku = %item.sku,
                reorder_point = item.reorder_point,
                "item fell to reorder point"
            );
        }

        Ok(&self.items[pos])
    }
}

impl TryFrom<CatalogDocument> for Catalog {
    type Error = DomainError;

    fn try_from(doc: CatalogDocument) -> Result<Self, Self::Error> {
        Self::new(doc.currency, doc.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::tests::sample_item;
    use proptest::prelude::*;

    fn small_catalog() -> Catalog {
        let mut tray = sample_item(1);
        tray.name = "Cardiac Open Heart Major Tray".to_string();
        tray.category = "Instrument Tray".to_string();
        tray.classification = Classification::Specific;
        tray.specialties = vec![Specialty::Cardiac];
        tray.supplier = "V. Mueller".to_string();
        tray.current_stock = 1;
        tray.reorder_point = 2;
        tray.par_level = 6;

        let mut valve = sample_item(2);
        valve.name = "Mechanical Aortic Valve 23mm".to_string();
        valve.category = "Implant".to_string();
        valve.classification = Classification::Specific;
        valve.specialties = vec![Specialty::Cardiac];
        valve.supplier = "Abbott".to_string();

        let gown = sample_item(3);

        let mut mesh = sample_item(4);
        mesh.name = "Polypropylene Hernia Mesh 15x15cm".to_string();
        mesh.category = "Implant".to_string();
        mesh.current_stock = 3;

        // Out of order on purpose; the catalog sorts by id.
        Catalog::new(Currency::Usd, vec![mesh, gown, valve, tray]).unwrap()
    }

    fn ids(items: &[&InventoryItem]) -> Vec<u32> {
        items.iter().map(|item| item.id.get()).collect()
    }

    #[test]
    fn lookups_preserve_id_order() {
        let catalog = small_catalog();
        assert_eq!(ids(&catalog.iter().collect::<Vec<_>>()), vec![1, 2, 3, 4]);
        assert_eq!(ids(&catalog.by_category("implant")), vec![2, 4]);
        assert_eq!(ids(&catalog.by_category("Drape")), Vec::<u32>::new());
        assert_eq!(ids(&catalog.by_classification(Classification::Specific)), vec![1, 2]);
        assert_eq!(ids(&catalog.by_classification(Classification::Basic)), vec![3, 4]);
        assert_eq!(ids(&catalog.by_specialty(Specialty::Cardiac)), vec![1, 2]);
        assert_eq!(ids(&catalog.low_stock()), vec![1, 4]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let catalog = small_catalog();
        assert_eq!(ids(&catalog.search("VALVE")), vec![2]);
        assert_eq!(ids(&catalog.search("  mueller ")), vec![1]);
        assert_eq!(ids(&catalog.search("tst-00003")), vec![3]);
        assert_eq!(catalog.search("").len(), 4);
        assert!(catalog.search("no such thing").is_empty());
    }

    #[test]
    fn get_and_distinct_values() {
        let catalog = small_catalog();
        let id = ItemId::new(2).unwrap();
        assert_eq!(catalog.get(id).unwrap().supplier, "Abbott");
        assert!(catalog.get(ItemId::new(99).unwrap()).is_none());

        assert_eq!(catalog.categories(), vec!["Consumable", "Implant", "Instrument Tray"]);
        assert_eq!(catalog.suppliers(), vec!["Abbott", "Medline", "V. Mueller"]);

        let counts: HashMap<_, _> = catalog.specialty_counts().into_iter().collect();
        assert_eq!(counts[&Specialty::Cardiac], 2);
        assert_eq!(counts[&Specialty::General], 2);
        assert_eq!(counts[&Specialty::Spine], 0);
    }

    #[test]
    fn new_rejects_duplicates() {
        let err = Catalog::new(Currency::Usd, vec![sample_item(1), sample_item(1)]).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(msg) if msg.contains("id")));

        let mut twin = sample_item(2);
        twin.sku = "tst-00001".to_string();
        let err = Catalog::new(Currency::Usd, vec![sample_item(1), twin]).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(msg) if msg.contains("sku")));
    }

    #[test]
    fn new_rejects_invalid_items() {
        let mut bad = sample_item(1);
        bad.supplier.clear();
        assert!(matches!(
            Catalog::new(Currency::Usd, vec![bad]),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn adjust_stock_applies_deltas_and_guards_invariants() {
        let mut catalog = small_catalog();
        let id = ItemId::new(3).unwrap();

        let item = catalog.adjust_stock(id, -6).unwrap();
        assert_eq!(item.current_stock, 4);
        assert!(item.is_low_stock());

        assert_eq!(catalog.adjust_stock(id, 16).unwrap().current_stock, 20);

        assert!(matches!(catalog.adjust_stock(id, 0), Err(DomainError::Validation(_))));
        assert!(matches!(
            catalog.adjust_stock(id, -21),
            Err(DomainError::InvariantViolation(_))
        ));
        assert!(matches!(
            catalog.adjust_stock(id, i64::from(u32::MAX)),
            Err(DomainError::InvariantViolation(_))
        ));
        assert!(matches!(
            catalog.adjust_stock(ItemId::new(404).unwrap(), 1),
            Err(DomainError::NotFound)
        ));

        // Failed adjustments leave stock untouched.
        assert_eq!(catalog.get(id).unwrap().current_stock, 20);
    }

    #[test]
    fn adjust_stock_rejects_extreme_deltas() {
        let mut catalog = small_catalog();
        let id = ItemId::new(2).unwrap();

        assert!(matches!(
            catalog.adjust_stock(id, i64::MAX),
            Err(DomainError::InvariantViolation(_))
        ));
        assert!(matches!(
            catalog.adjust_stock(id, i64::MIN),
            Err(DomainError::InvariantViolation(_))
        ));
        assert_eq!(catalog.get(id).unwrap().current_stock, 10);
    }

    #[test]
    fn json_document_round_trips() {
        let catalog = small_catalog();
        let json = catalog.to_json_pretty().unwrap();
        let back = Catalog::from_json_str(&json).unwrap();
        assert_eq!(back.len(), catalog.len());
        assert_eq!(back.currency(), Currency::Usd);
        assert_eq!(back.iter().collect::<Vec<_>>(), catalog.iter().collect::<Vec<_>>());
    }

    #[test]
    fn loader_reports_parse_and_io_errors() {
        assert!(matches!(Catalog::from_json_str("{"), Err(CatalogError::Parse(_))));
        assert!(matches!(
            Catalog::from_json_str(r#"{"items": [{"id": 0}]}"#),
            Err(CatalogError::Parse(_))
        ));
        assert!(matches!(
            Catalog::from_path("/definitely/not/here.json"),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn missing_currency_defaults_to_usd() {
        let json = serde_json::json!({
            "items": [serde_json::to_value(sample_item(1)).unwrap()]
        })
        .to_string();
        let catalog = Catalog::from_json_str(&json).unwrap();
        assert_eq!(catalog.currency(), Currency::Usd);
        assert_eq!(catalog.format_cost(catalog.get(ItemId::new(1).unwrap()).unwrap()), "$12.50");
    }

    fn arb_item(id: u32) -> impl Strategy<Value = InventoryItem> {
        (
            prop::sample::select(vec!["Implant", "Drape", "Suture", "Consumable"]),
            prop::bool::ANY,
            prop::sample::subsequence(Specialty::ALL.to_vec(), 1..4),
            0u32..50,
            0u32..25,
            "[a-z]{3,12}",
        )
            .prop_map(move |(category, specific, specialties, stock, rop, word)| {
                let mut item = sample_item(id);
                item.name = format!("{word} {id}");
                item.category = category.to_string();
                item.classification = if specific {
                    Classification::Specific
                } else {
                    Classification::Basic
                };
                item.specialties = specialties;
                item.current_stock = stock;
                item.reorder_point = rop;
                item.par_level = rop + 25;
                item
            })
    }

    fn arb_catalog() -> impl Strategy<Value = Catalog> {
        (1usize..30)
            .prop_flat_map(|n| (1..=n as u32).map(arb_item).collect::<Vec<_>>())
            .prop_map(|items| Catalog::new(Currency::Usd, items).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the combined query equals the intersection of the single filters.
        #[test]
        fn query_is_intersection_of_filters(
            catalog in arb_catalog(),
            category in prop::sample::select(vec!["implant", "DRAPE", "Suture"]),
            specialty in prop::sample::select(Specialty::ALL.to_vec()),
            low in prop::bool::ANY,
        ) {
            let q = ItemQuery::new()
                .category(category)
                .specialty(specialty)
                .low_stock_only(low);
            let combined = ids(&catalog.query(&q));

            let by_cat: HashSet<u32> = ids(&catalog.by_category(category)).into_iter().collect();
            let by_sp: HashSet<u32> = ids(&catalog.by_specialty(specialty)).into_iter().collect();
            let low_set: HashSet<u32> = ids(&catalog.low_stock()).into_iter().collect();

            let expected: Vec<u32> = catalog
                .iter()
                .map(|item| item.id.get())
                .filter(|id| by_cat.contains(id) && by_sp.contains(id) && (!low || low_set.contains(id)))
                .collect();
            prop_assert_eq!(combined, expected);
        }

        /// Property: low stock returns exactly the items at or under their reorder point.
        #[test]
        fn low_stock_matches_threshold(catalog in arb_catalog()) {
            let low = catalog.low_stock();
            for item in &low {
                prop_assert!(item.current_stock <= item.reorder_point);
            }
            let expected = catalog.iter().filter(|i| i.current_stock <= i.reorder_point).count();
            prop_assert_eq!(low.len(), expected);
        }

        /// Property: any delta either applies exactly or fails leaving stock untouched.
        #[test]
        fn adjust_stock_never_panics(
            catalog in arb_catalog(),
            delta in prop_oneof![
                any::<i64>(),
                Just(i64::MAX),
                Just(i64::MIN),
                (i64::MAX - 64)..=i64::MAX,
                i64::MIN..=(i64::MIN + 64),
                -100i64..100,
            ],
        ) {
            let mut catalog = catalog;
            let id = ItemId::new(1).unwrap();
            let before = catalog.get(id).unwrap().current_stock;

            match catalog.adjust_stock(id, delta).map(|item| item.current_stock) {
                Ok(stock) => {
                    prop_assert_eq!(i64::from(stock), i64::from(before) + delta);
                }
                Err(err) => {
                    prop_assert!(matches!(
                        err,
                        DomainError::Validation(_) | DomainError::InvariantViolation(_)
                    ));
                    prop_assert_eq!(catalog.get(id).unwrap().current_stock, before);
                }
            }
        }

        /// Property: search never invents items and blank queries return the catalog.
        #[test]
        fn search_is_a_subset(catalog in arb_catalog(), needle in "[a-zA-Z ]{0,4}") {
            let hits = catalog.search(&needle);
            prop_assert!(hits.len() <= catalog.len());
            if needle.trim().is_empty() {
                prop_assert_eq!(hits.len(), catalog.len());
            }
            for item in hits {
                prop_assert!(catalog.get(item.id).is_some());
            }
        }
    }
}
