use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use humidor_core::CigarId;

/// A cigar record from the user's inventory.
///
/// Owned by the persistence layer; the engine only reads it. Every field is
/// read leniently: a value of the wrong shape is treated as absent instead of
/// failing the snapshot. Numeric fields are kept as stored (possibly negative,
/// possibly missing) and coerced when aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Opaque storage key. Records created here get a [`CigarId`].
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub wrapper: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub strength: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub binder: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub filler: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub humidor_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub added_at: Option<DateTime<Utc>>,
}

impl InventoryItem {
    /// New record with the persistence defaults (quantity 1, price 0).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CigarId::new().to_string(),
            name: name.into(),
            brand: None,
            country: None,
            wrapper: None,
            strength: None,
            binder: None,
            filler: None,
            size: None,
            humidor_id: None,
            quantity: Some(1.0),
            price: Some(0.0),
            added_at: None,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_wrapper(mut self, wrapper: impl Into<String>) -> Self {
        self.wrapper = Some(wrapper.into());
        self
    }

    pub fn with_strength(mut self, strength: impl Into<String>) -> Self {
        self.strength = Some(strength.into());
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Quantity as a non-negative whole number of units.
    ///
    /// Missing, negative or non-finite quantities count as 0.
    pub fn units(&self) -> u64 {
        match self.quantity {
            Some(q) if q.is_finite() && q >= 0.0 => q.trunc() as u64,
            _ => 0,
        }
    }

    /// Price per unit; missing, negative or non-finite prices count as 0.
    pub fn unit_price(&self) -> f64 {
        match self.price {
            Some(p) if p.is_finite() && p >= 0.0 => p,
            _ => 0.0,
        }
    }

    /// `unit_price * units`, never negative.
    pub fn line_value(&self) -> f64 {
        self.unit_price() * self.units() as f64
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Accept numbers and numeric strings; anything else (null, objects, garbage
/// text) is treated as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawScalar::deserialize(deserializer)? {
        RawScalar::Number(n) => Some(n),
        RawScalar::Text(s) => s.trim().parse::<f64>().ok(),
        RawScalar::Other(_) => None,
    })
}

/// Strings only; numbers, booleans, objects and null are treated as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawScalar::deserialize(deserializer)? {
        RawScalar::Text(s) => Some(s),
        RawScalar::Number(_) | RawScalar::Other(_) => None,
    })
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Document-store keys are opaque; numeric keys are kept as their text.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
        Other(serde::de::IgnoredAny),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
        RawId::Other(_) => String::new(),
    })
}

/// RFC 3339 timestamps; anything unparsable is treated as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?
        .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .map(|at| at.with_timezone(&Utc)))
}
