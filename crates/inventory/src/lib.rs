//! Inventory analytics.
//!
//! Turns a flat, user-editable inventory snapshot into the categorized views
//! used for browsing and map display. Everything here is deterministic and
//! side-effect free (no IO, no storage): inputs are borrowed snapshots and every
//! call returns freshly built values.

pub mod aggregate;
pub mod analytics;
pub mod geo;
pub mod item;
pub mod taxonomy;

pub use aggregate::BucketCounts;
pub use analytics::{BrowseViews, CategoryBucket, InventorySummary};
pub use geo::{GeoCenter, MapViewport, PositionUpdate};
pub use item::InventoryItem;
pub use taxonomy::{Dimension, TaxonomyEntry};
