//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — they have no
/// identity of their own. A `(size, stock)` variant or a cart line key is a
/// value object; a clothing item with an `ItemId` is an entity.
///
/// To "modify" a value object, build a new one. The trait only requires what
/// value semantics imply:
/// - `Clone`: values are copied, not referenced
/// - `PartialEq`: values are compared field-by-field
/// - `Debug`: values show up in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
