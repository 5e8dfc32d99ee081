use core::str::FromStr;
use serde::{Deserialize, Serialize};

use medcat_core::{Currency, DomainError, DomainResult, Entity, ItemId, Money};

/// Procurement tag on an item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Generic/commodity stock usable across departments.
    Basic,
    /// Specialty-tied stock.
    Specific,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Basic => "Basic",
            Classification::Specific => "Specific",
        }
    }
}

impl FromStr for Classification {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Classification::Basic),
            "specific" => Ok(Classification::Specific),
            _ => Err(DomainError::validation(
                "classification must be one of: basic, specific",
            )),
        }
    }
}

/// Surgical department an item is stocked for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Specialty {
    Cardiac,
    Vascular,
    Thoracic,
    Orthopedic,
    Spine,
    Neurosurgery,
    General,
    Gynecology,
    Urology,
    #[serde(rename = "ENT")]
    Ent,
    Ophthalmology,
    Plastics,
}

impl Specialty {
    pub const ALL: [Specialty; 12] = [
        Specialty::Cardiac,
        Specialty::Vascular,
        Specialty::Thoracic,
        Specialty::Orthopedic,
        Specialty::Spine,
        Specialty::Neurosurgery,
        Specialty::General,
        Specialty::Gynecology,
        Specialty::Urology,
        Specialty::Ent,
        Specialty::Ophthalmology,
        Specialty::Plastics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Specialty::Cardiac => "Cardiac",
            Specialty::Vascular => "Vascular",
            Specialty::Thoracic => "Thoracic",
            Specialty::Orthopedic => "Orthopedic",
            Specialty::Spine => "Spine",
            Specialty::Neurosurgery => "Neurosurgery",
            Specialty::General => "General",
            Specialty::Gynecology => "Gynecology",
            Specialty::Urology => "Urology",
            Specialty::Ent => "ENT",
            Specialty::Ophthalmology => "Ophthalmology",
            Specialty::Plastics => "Plastics",
        }
    }
}

impl core::fmt::Display for Specialty {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        let found = match key.as_str() {
            "ortho" | "orthopaedic" | "orthopedics" => Some(Specialty::Orthopedic),
            "neuro" => Some(Specialty::Neurosurgery),
            "gyn" | "gyne" | "obgyn" => Some(Specialty::Gynecology),
            "general surgery" => Some(Specialty::General),
            "plastic" | "plastic surgery" => Some(Specialty::Plastics),
            "cardiothoracic" => Some(Specialty::Thoracic),
            _ => Specialty::ALL
                .into_iter()
                .find(|sp| sp.as_str().to_lowercase() == key),
        };
        found.ok_or_else(|| DomainError::validation(format!("unknown specialty '{}'", s.trim())))
    }
}

/// Supplier-side person to call about an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub role: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// One stocked product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub classification: Classification,
    pub specialties: Vec<Specialty>,
    pub supplier: String,
    pub unit_of_measure: String,
    pub storage_location: String,
    pub current_stock: u32,
    pub reorder_point: u32,
    pub par_level: u32,
    /// Unit cost in smallest currency unit (e.g., cents).
    pub unit_cost_cents: u64,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl InventoryItem {
    /// Stock has fallen to (or below) the reorder point.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.reorder_point
    }

    /// Units needed to get back to par; zero unless the item is low.
    pub fn reorder_quantity(&self) -> u32 {
        if self.is_low_stock() {
            self.par_level.saturating_sub(self.current_stock)
        } else {
            0
        }
    }

    pub fn serves(&self, specialty: Specialty) -> bool {
        self.specialties.contains(&specialty)
    }

    /// Costs above `i64::MAX` cents saturate.
    pub fn unit_cost(&self, currency: Currency) -> Money {
        Money::new(
            i64::try_from(self.unit_cost_cents).unwrap_or(i64::MAX),
            currency,
        )
    }

    /// Value of the units on hand (saturating).
    pub fn stock_value(&self, currency: Currency) -> Money {
        let cost = self.unit_cost(currency);
        cost.checked_mul(u64::from(self.current_stock))
            .unwrap_or(Money::new(i64::MAX, currency))
    }

    pub fn validate(&self) -> DomainResult<()> {
        let required = [
            ("name", &self.name),
            ("sku", &self.sku),
            ("category", &self.category),
            ("supplier", &self.supplier),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "item {}: {field} cannot be empty",
                    self.id
                )));
            }
        }

        if self.reorder_point > self.par_level {
            return Err(DomainError::invariant(format!(
                "item {}: reorder point {} exceeds par level {}",
                self.id, self.reorder_point, self.par_level
            )));
        }

        if self.classification == Classification::Specific && self.specialties.is_empty() {
            return Err(DomainError::invariant(format!(
                "item {}: specific items must name at least one specialty",
                self.id
            )));
        }

        Ok(())
    }
}
