//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// - **Value Object**: no identity (`Money { minor: 1250, currency: Usd }`)
/// - **Entity**: has identity (an inventory item with record number 42)
///
/// Value objects are immutable. To "modify" one, build a new one.
///
/// ```ignore
/// let a = Money::usd(100);
/// let b = Money::usd(100);
/// assert_eq!(a, b); // equal by value, not identity
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
