//! Browse-by views and headline totals.
//!
//! Every function here is a pure function of the snapshot it is given. Nothing
//! is cached between calls: callers recompute whenever the snapshot or the
//! active dimension changes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use humidor_core::ValueObject;

use crate::aggregate::{self, BucketCounts};
use crate::item::InventoryItem;
use crate::taxonomy::{self, Dimension, TaxonomyEntry};

/// One row of a browse-by list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBucket {
    pub label: String,
    /// Value to filter the inventory by when the bucket is selected.
    pub filter_value: String,
    pub quantity: u64,
}

impl ValueObject for CategoryBucket {}

impl CategoryBucket {
    fn from_entry(entry: &TaxonomyEntry, quantity: u64) -> Self {
        Self {
            label: entry.label.to_string(),
            filter_value: entry.filter_value.to_string(),
            quantity,
        }
    }
}

/// Headline totals for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    /// Number of records, regardless of quantity.
    pub item_count: usize,
    pub total_units: u64,
    /// `Σ price * quantity`.
    pub total_value: f64,
    pub distinct_brands: usize,
}

impl ValueObject for InventorySummary {}

/// All three browse views plus totals, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseViews {
    pub wrapper: Vec<CategoryBucket>,
    pub strength: Vec<CategoryBucket>,
    pub country: Vec<CategoryBucket>,
    pub summary: InventorySummary,
    /// Country bucket with the most units; drives the default map viewport.
    pub top_country: Option<String>,
}

impl BrowseViews {
    pub fn compute(items: &[InventoryItem]) -> Self {
        let views = Self {
            wrapper: buckets(items, Dimension::Wrapper),
            strength: buckets(items, Dimension::Strength),
            country: buckets(items, Dimension::Country),
            summary: summary(items),
            top_country: top_bucket(items, Dimension::Country),
        };
        tracing::debug!(
            items = items.len(),
            wrapper_buckets = views.wrapper.len(),
            strength_buckets = views.strength.len(),
            country_buckets = views.country.len(),
            "computed browse views"
        );
        views
    }

    pub fn for_dimension(&self, dimension: Dimension) -> &[CategoryBucket] {
        match dimension {
            Dimension::Wrapper => &self.wrapper,
            Dimension::Strength => &self.strength,
            Dimension::Country => &self.country,
        }
    }
}

/// Unit totals per bucket key for `dimension`, in first-seen order.
pub fn counts(items: &[InventoryItem], dimension: Dimension) -> BucketCounts {
    aggregate::count(items, |item| dimension.classify_item(item))
}

/// Ordered, non-empty buckets for `dimension`.
///
/// Strength and country follow their fixed taxonomy order (`Other Countries`
/// last); wrapper buckets are sorted alphabetically by label.
pub fn buckets(items: &[InventoryItem], dimension: Dimension) -> Vec<CategoryBucket> {
    let counts = counts(items, dimension);

    match dimension.taxonomy() {
        Some(taxonomy) => taxonomy
            .iter()
            .map(|entry| CategoryBucket::from_entry(entry, counts.get(entry.filter_value)))
            .filter(|b| b.quantity > 0)
            .collect(),
        None => {
            let mut out: Vec<CategoryBucket> = counts
                .iter()
                .filter(|(_, units)| *units > 0)
                .map(|(key, units)| CategoryBucket {
                    label: key.to_string(),
                    filter_value: key.to_string(),
                    quantity: units,
                })
                .collect();
            out.sort_by(|a, b| a.label.cmp(&b.label));
            out
        }
    }
}

/// Bucket key with the most units; ties go to the bucket seen first in the
/// snapshot. `None` when no bucket holds any units.
pub fn top_bucket(items: &[InventoryItem], dimension: Dimension) -> Option<String> {
    counts(items, dimension)
        .top()
        .map(|(key, _)| key.to_string())
}

pub fn summary(items: &[InventoryItem]) -> InventorySummary {
    let distinct_brands = items
        .iter()
        .filter_map(|i| i.brand.as_deref())
        .filter(|b| !b.is_empty())
        .collect::<HashSet<_>>()
        .len();

    InventorySummary {
        item_count: items.len(),
        total_units: aggregate::sum_units(items),
        total_value: aggregate::sum(items, InventoryItem::line_value),
        distinct_brands,
    }
}

/// Items listed under the bucket keyed `filter_value`.
///
/// Uses the same classification as the bucket lists, so selecting
/// `Other Countries` yields every uncatalogued or missing country and the
/// `Unknown` wrapper bucket yields items without a wrapper.
pub fn filter_by_bucket<'a>(
    items: &'a [InventoryItem],
    dimension: Dimension,
    filter_value: &str,
) -> Vec<&'a InventoryItem> {
    let wanted = match dimension {
        Dimension::Country => taxonomy::classify(Dimension::Country, Some(filter_value))
            .unwrap_or_else(|| taxonomy::OTHER_COUNTRIES.filter_value.to_string()),
        _ => filter_value.to_string(),
    };

    items
        .iter()
        .filter(|item| dimension.classify_item(item).as_deref() == Some(wanted.as_str()))
        .collect()
}
