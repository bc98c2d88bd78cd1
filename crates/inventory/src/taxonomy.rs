//! Classification taxonomies.
//!
//! Maps a raw field value to the bucket it is browsed under. Three dimensions
//! with deliberately different fallback rules:
//! - strength: exact, case-sensitive match against a fixed list; no match is excluded.
//! - country: case-insensitive match against a closed catalog; everything else
//!   (including a missing country) folds into `Other Countries`.
//! - wrapper: open-ended; every distinct value is its own bucket, empty is `Unknown`.

use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;

/// Label and key used for missing classification values.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Wrapper,
    Strength,
    Country,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Wrapper, Dimension::Strength, Dimension::Country];

    /// Fixed catalog for this dimension; `None` for the dynamic wrapper dimension.
    pub fn taxonomy(self) -> Option<&'static [TaxonomyEntry]> {
        match self {
            Dimension::Wrapper => None,
            Dimension::Strength => Some(STRENGTH_TAXONOMY),
            Dimension::Country => Some(COUNTRY_TAXONOMY),
        }
    }

    /// The raw value of this dimension's field on `item`.
    pub fn raw_value(self, item: &InventoryItem) -> Option<&str> {
        match self {
            Dimension::Wrapper => item.wrapper.as_deref(),
            Dimension::Strength => item.strength.as_deref(),
            Dimension::Country => item.country.as_deref(),
        }
    }

    /// Bucket key for `item`, or `None` when the item is excluded from this dimension.
    pub fn classify_item(self, item: &InventoryItem) -> Option<String> {
        classify(self, self.raw_value(item))
    }
}

impl core::fmt::Display for Dimension {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Dimension::Wrapper => "wrapper",
            Dimension::Strength => "strength",
            Dimension::Country => "country",
        })
    }
}

/// One fixed bucket: display label plus the value items are matched against.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TaxonomyEntry {
    pub label: &'static str,
    pub filter_value: &'static str,
}

const fn entry(label: &'static str, filter_value: &'static str) -> TaxonomyEntry {
    TaxonomyEntry {
        label,
        filter_value,
    }
}

pub const STRENGTH_TAXONOMY: &[TaxonomyEntry] = &[
    entry("Mild", "Mild"),
    entry("Mild-Medium", "Mild-Medium"),
    entry("Medium", "Medium"),
    entry("Medium-Full", "Medium-Full"),
    entry("Full", "Full"),
];

/// Catch-all country bucket. Always last in [`COUNTRY_TAXONOMY`].
pub const OTHER_COUNTRIES: TaxonomyEntry = entry("Other Countries", "Other");

pub const COUNTRY_TAXONOMY: &[TaxonomyEntry] = &[
    entry("Cuba", "Cuba"),
    entry("Dominican Republic", "Dominican Republic"),
    entry("Nicaragua", "Nicaragua"),
    entry("Honduras", "Honduras"),
    entry("Mexico", "Mexico"),
    entry("United States", "United States"),
    entry("Ecuador", "Ecuador"),
    entry("Brazil", "Brazil"),
    entry("Costa Rica", "Costa Rica"),
    entry("Panama", "Panama"),
    entry("Peru", "Peru"),
    entry("Colombia", "Colombia"),
    entry("Philippines", "Philippines"),
    entry("Indonesia", "Indonesia"),
    entry("Cameroon", "Cameroon"),
    OTHER_COUNTRIES,
];

/// Catalogued countries, without the catch-all.
pub fn catalog_countries() -> &'static [TaxonomyEntry] {
    &COUNTRY_TAXONOMY[..COUNTRY_TAXONOMY.len() - 1]
}

/// Classify a raw value into a bucket key for `dimension`.
///
/// Pure and stable. Returns `None` only for strength values outside the
/// taxonomy; country and wrapper always resolve to some bucket.
pub fn classify(dimension: Dimension, raw: Option<&str>) -> Option<String> {
    match dimension {
        Dimension::Strength => {
            let raw = raw?;
            STRENGTH_TAXONOMY
                .iter()
                .find(|e| e.filter_value == raw)
                .map(|e| e.filter_value.to_string())
        }
        Dimension::Country => Some(classify_country(raw.unwrap_or(UNKNOWN)).to_string()),
        Dimension::Wrapper => Some(match raw {
            Some(w) if !w.is_empty() => w.to_string(),
            _ => UNKNOWN.to_string(),
        }),
    }
}

fn classify_country(raw: &str) -> &'static str {
    catalog_countries()
        .iter()
        .find(|e| e.filter_value.eq_ignore_ascii_case(raw))
        .map_or(OTHER_COUNTRIES.filter_value, |e| e.filter_value)
}
