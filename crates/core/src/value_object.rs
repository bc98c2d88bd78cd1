//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity** and are **immutable**: aggregation results
/// (buckets, map centres, summaries) are produced fresh on every call and two
/// results with the same attribute values are interchangeable.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct GeoCenter { country_name: String, longitude: f64, latitude: f64 }
///
/// impl ValueObject for GeoCenter {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
