//! Generic count/sum reducers over an inventory snapshot.

use std::collections::HashMap;

use crate::item::InventoryItem;

/// Unit totals per bucket key, remembering the order keys were first seen.
///
/// First-seen order is what tie-breaks [`BucketCounts::top`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketCounts {
    order: Vec<String>,
    totals: HashMap<String, u64>,
}

impl BucketCounts {
    fn add(&mut self, key: String, units: u64) {
        match self.totals.get_mut(&key) {
            Some(total) => *total = total.saturating_add(units),
            None => {
                self.order.push(key.clone());
                self.totals.insert(key, units);
            }
        }
    }

    /// Units for `key`; 0 when the key never appeared.
    pub fn get(&self, key: &str) -> u64 {
        self.totals.get(key).copied().unwrap_or(0)
    }

    /// `(key, units)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.order.iter().map(|k| (k.as_str(), self.get(k)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.totals.values().fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    /// Key with the highest total. Only a strictly greater total displaces the
    /// running maximum, so the first-seen key wins ties. Zero-unit keys are never
    /// returned.
    pub fn top(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (key, units) in self.iter() {
            let current = best.map_or(0, |(_, u)| u);
            if units > current {
                best = Some((key, units));
            }
        }
        best
    }
}

/// Add each item's units to the bucket chosen by `key_fn`.
///
/// Items for which `key_fn` returns `None` are excluded.
pub fn count<'a, I, F>(items: I, mut key_fn: F) -> BucketCounts
where
    I: IntoIterator<Item = &'a InventoryItem>,
    F: FnMut(&InventoryItem) -> Option<String>,
{
    let mut counts = BucketCounts::default();
    for item in items {
        if let Some(key) = key_fn(item) {
            counts.add(key, item.units());
        }
    }
    counts
}

/// Total of `value_fn` across items. Negative or non-finite contributions are
/// dropped so the result is always a finite, non-negative number.
pub fn sum<'a, I, F>(items: I, value_fn: F) -> f64
where
    I: IntoIterator<Item = &'a InventoryItem>,
    F: FnMut(&InventoryItem) -> f64,
{
    let total = items
        .into_iter()
        .map(value_fn)
        .filter(|v| v.is_finite() && *v > 0.0)
        .sum::<f64>();
    if total.is_finite() { total } else { f64::MAX }
}

/// `Σ units` as an integer.
pub fn sum_units<'a, I>(items: I) -> u64
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    items
        .into_iter()
        .fold(0u64, |acc, item| acc.saturating_add(item.units()))
}
