//! `medcat-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP, no storage).

pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{Entity, ItemId};
pub use money::{Currency, Money, format_currency};
pub use value_object::ValueObject;
