//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are never mutated in place: filter
/// criteria built from a form submission, or the set of distinct locations
/// offered by the sidebar, are compared purely by their contents.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
