//! Map centres per country and the map viewport state.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use humidor_core::{EngineConfig, ValueObject};

use crate::analytics;
use crate::item::InventoryItem;
use crate::taxonomy::Dimension;

/// Projection centre for a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCenter {
    pub country_name: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl ValueObject for GeoCenter {}

impl GeoCenter {
    fn from_row(row: &(&str, f64, f64)) -> Self {
        Self {
            country_name: row.0.to_string(),
            longitude: row.1,
            latitude: row.2,
        }
    }

    /// `[longitude, latitude]`, the order map libraries expect.
    pub fn coordinates(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Country used when a name has no entry in [`GEO_CENTERS`].
pub const FALLBACK_COUNTRY: &str = "United States";

/// `(country, longitude, latitude)`.
const GEO_CENTERS: &[(&str, f64, f64)] = &[
    ("Cuba", -79.5, 21.5),
    ("Dominican Republic", -70.2, 18.7),
    ("Nicaragua", -85.2, 12.9),
    ("Honduras", -86.2, 15.2),
    ("Mexico", -102.5, 23.6),
    ("United States", -98.6, 39.8),
    ("Ecuador", -78.2, -1.8),
    ("Brazil", -51.9, -14.2),
    ("Costa Rica", -84.0, 9.7),
    ("Panama", -80.8, 8.5),
    ("Peru", -75.0, -9.2),
    ("Colombia", -74.3, 4.6),
    ("Philippines", 121.8, 12.9),
    ("Indonesia", 113.9, -0.8),
    ("Cameroon", 12.4, 7.4),
];

const FALLBACK_CENTER: (&str, f64, f64) = (FALLBACK_COUNTRY, -98.6, 39.8);

/// Exact-match lookup of a country's map centre; unknown names get the
/// United States centre.
pub fn center_for(country_name: &str) -> GeoCenter {
    let row = GEO_CENTERS
        .iter()
        .find(|row| row.0 == country_name)
        .unwrap_or(&FALLBACK_CENTER);
    GeoCenter::from_row(row)
}

/// Whether [`MapViewport::on_position_change`] took the new position.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum PositionUpdate {
    Accepted,
    /// Input was malformed; the previous centre is kept.
    Rejected(String),
}

/// Map viewport: current centre/zoom plus the initial pair restored by `reset`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewport {
    center: GeoCenter,
    zoom: f64,
    initial_center: GeoCenter,
    initial_zoom: f64,
    config: EngineConfig,
}

impl MapViewport {
    pub fn new(center: GeoCenter, config: EngineConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(error) => {
                tracing::warn!(%error, "invalid map configuration; using defaults");
                EngineConfig::default()
            }
        };
        let zoom = config.clamp_zoom(config.initial_zoom);
        Self {
            initial_center: center.clone(),
            initial_zoom: zoom,
            center,
            zoom,
            config,
        }
    }

    /// Viewport centred on the country holding the most units.
    pub fn for_inventory(items: &[InventoryItem], config: EngineConfig) -> Self {
        let country = analytics::top_bucket(items, Dimension::Country)
            .unwrap_or_else(|| FALLBACK_COUNTRY.to_string());
        Self::new(center_for(&country), config)
    }

    pub fn center(&self) -> &GeoCenter {
        &self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.zoom = self.config.clamp_zoom(self.zoom + self.config.zoom_step);
        self.zoom
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.zoom = self.config.clamp_zoom(self.zoom - self.config.zoom_step);
        self.zoom
    }

    /// Restore the centre and zoom computed at construction.
    pub fn reset(&mut self) {
        self.center = self.initial_center.clone();
        self.zoom = self.initial_zoom;
    }

    /// Accept a new centre reported by the map widget.
    ///
    /// Valid shapes are `[lng, lat]` or an object carrying that pair under
    /// `coordinates`. Anything else is logged and ignored. An accepted pan
    /// clears `country_name`; [`MapViewport::reset`] brings it back.
    pub fn on_position_change(&mut self, position: &JsonValue) -> PositionUpdate {
        match parse_position(position) {
            Ok([longitude, latitude]) => {
                self.center = GeoCenter {
                    country_name: String::new(),
                    longitude,
                    latitude,
                };
                PositionUpdate::Accepted
            }
            Err(reason) => {
                tracing::warn!(%position, %reason, "ignoring malformed map position");
                PositionUpdate::Rejected(reason)
            }
        }
    }
}

fn parse_position(position: &JsonValue) -> Result<[f64; 2], String> {
    let pair = match position {
        JsonValue::Array(_) => position,
        JsonValue::Object(map) => map
            .get("coordinates")
            .ok_or_else(|| "object has no `coordinates` field".to_string())?,
        other => return Err(format!("expected array or object, got {other}")),
    };

    let values = pair
        .as_array()
        .ok_or_else(|| "`coordinates` is not an array".to_string())?;
    if values.len() != 2 {
        return Err(format!("expected 2 coordinates, got {}", values.len()));
    }

    let mut out = [0.0; 2];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = value
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("coordinate {value} is not a finite number"))?;
    }
    Ok(out)
}
