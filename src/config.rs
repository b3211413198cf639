//! Warehouse geometry and timing configuration.
//!
//! Construct-once, read-many. A running optimizer replaces its
//! configuration wholesale between calls via [`WarehouseConfig::apply`];
//! validation happens at optimization time, not at update time, since a
//! bad value only matters once a call depends on it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::OptimizeError;

/// Default aisle-to-aisle spacing in spatial units.
const DEFAULT_AISLE_WIDTH: f64 = 3.0;

/// Default shelf-to-shelf spacing along an aisle.
const DEFAULT_SHELF_DEPTH: f64 = 1.5;

/// Default vertical spacing between shelf levels.
const DEFAULT_SHELF_HEIGHT: f64 = 0.5;

/// Default walking speed in spatial units per second.
const DEFAULT_WALKING_SPEED: f64 = 1.5;

/// Default fixed cost per pick stop, in seconds.
const DEFAULT_PICK_TIME_SECS: f64 = 15.0;

/// Default cost of crossing between zones, in spatial units.
const DEFAULT_ZONE_TRANSITION_PENALTY: f64 = 10.0;

/// Layout of a single zone: the aisles it spans and its anchor point on
/// the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    /// Inclusive `(first, last)` aisle numbers belonging to the zone.
    pub aisle_range: (u32, u32),
    /// Reference `(x, y)` coordinate of the zone entrance.
    pub anchor: (f64, f64),
}

/// Warehouse geometry and timing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseConfig {
    pub aisle_width: f64,
    pub shelf_depth: f64,
    pub shelf_height: f64,
    /// Walking speed in spatial units per second.
    pub walking_speed: f64,
    /// Fixed handling cost per pick stop, in seconds.
    pub pick_time_secs: f64,
    /// Added once to any distance between bins in different zones.
    pub zone_transition_penalty: f64,
    /// Per-zone layout, keyed by zone letter. Ordered so iteration over
    /// zones stays deterministic.
    pub zone_layout: BTreeMap<char, ZoneSpec>,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            aisle_width: DEFAULT_AISLE_WIDTH,
            shelf_depth: DEFAULT_SHELF_DEPTH,
            shelf_height: DEFAULT_SHELF_HEIGHT,
            walking_speed: DEFAULT_WALKING_SPEED,
            pick_time_secs: DEFAULT_PICK_TIME_SECS,
            zone_transition_penalty: DEFAULT_ZONE_TRANSITION_PENALTY,
            zone_layout: default_zone_layout(),
        }
    }
}

fn default_zone_layout() -> BTreeMap<char, ZoneSpec> {
    ('A'..='D')
        .enumerate()
        .map(|(index, zone)| {
            (
                zone,
                ZoneSpec {
                    aisle_range: (1, 12),
                    anchor: (0.0, index as f64),
                },
            )
        })
        .collect()
}

impl WarehouseConfig {
    /// Applies a partial update.
    ///
    /// Top-level fields shallow-merge: only fields present in the patch
    /// change. `zone_layout` is the one nested structure and is replaced
    /// as a whole map: zones are never merged individually.
    pub fn apply(&mut self, patch: WarehouseConfigPatch) {
        if let Some(value) = patch.aisle_width {
            self.aisle_width = value;
        }
        if let Some(value) = patch.shelf_depth {
            self.shelf_depth = value;
        }
        if let Some(value) = patch.shelf_height {
            self.shelf_height = value;
        }
        if let Some(value) = patch.walking_speed {
            self.walking_speed = value;
        }
        if let Some(value) = patch.pick_time_secs {
            self.pick_time_secs = value;
        }
        if let Some(value) = patch.zone_transition_penalty {
            self.zone_transition_penalty = value;
        }
        if let Some(layout) = patch.zone_layout {
            self.zone_layout = layout;
        }
    }

    /// Checks that every field an optimization depends on is usable.
    pub fn validate(&self) -> Result<(), OptimizeError> {
        let positive = [
            ("aisle_width", self.aisle_width),
            ("shelf_depth", self.shelf_depth),
            ("shelf_height", self.shelf_height),
            ("walking_speed", self.walking_speed),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(OptimizeError::InvalidConfig {
                    reason: format!("{name} must be positive, got {value}"),
                });
            }
        }
        if self.pick_time_secs < 0.0 {
            return Err(OptimizeError::InvalidConfig {
                reason: format!("pick_time_secs must not be negative, got {}", self.pick_time_secs),
            });
        }
        if self.zone_transition_penalty < 0.0 {
            return Err(OptimizeError::InvalidConfig {
                reason: format!(
                    "zone_transition_penalty must not be negative, got {}",
                    self.zone_transition_penalty
                ),
            });
        }
        for (zone, spec) in &self.zone_layout {
            let (first, last) = spec.aisle_range;
            if first > last {
                return Err(OptimizeError::InvalidConfig {
                    reason: format!("zone {zone} has inverted aisle range ({first}, {last})"),
                });
            }
        }
        Ok(())
    }
}

/// Partial configuration update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseConfigPatch {
    pub aisle_width: Option<f64>,
    pub shelf_depth: Option<f64>,
    pub shelf_height: Option<f64>,
    pub walking_speed: Option<f64>,
    pub pick_time_secs: Option<f64>,
    pub zone_transition_penalty: Option<f64>,
    /// Replaces the whole layout when present; see [`WarehouseConfig::apply`].
    pub zone_layout: Option<BTreeMap<char, ZoneSpec>>,
}
