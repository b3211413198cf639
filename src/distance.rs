//! Warehouse distance model.
//!
//! Travel cost between bins is Manhattan-style over aisle and shelf
//! spans, with a flat penalty added once when the bins sit in different
//! zones. Distances feed a symmetric matrix built once per optimization
//! call.

use crate::config::WarehouseConfig;
use crate::location::BinLocation;

/// Travel distance between two bins in spatial units.
pub fn distance(a: &BinLocation, b: &BinLocation, config: &WarehouseConfig) -> f64 {
    let aisle_span = a.aisle().abs_diff(b.aisle()) as f64;
    let shelf_span = a.shelf().abs_diff(b.shelf()) as f64;
    let mut cost = aisle_span * config.aisle_width + shelf_span * config.shelf_depth;
    // the zone penalty is flat: added once per pair, never per aisle
    if a.zone() != b.zone() {
        cost += config.zone_transition_penalty;
    }
    cost
}

/// Converts a distance to travel time in milliseconds.
///
/// Assumes a validated configuration (positive `walking_speed`);
/// [`crate::solver::RouteOptimizer::optimize_route`] checks this at entry.
pub fn travel_time_ms(distance: f64, config: &WarehouseConfig) -> f64 {
    distance / config.walking_speed * 1000.0
}

/// Pairwise distances over an ordered location list.
///
/// Exactly symmetric with a zero diagonal: the upper triangle is computed
/// once and mirrored, never recomputed for the opposite entry.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    entries: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    pub fn build(locations: &[BinLocation], config: &WarehouseConfig) -> Self {
        let n = locations.len();
        let mut entries = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i + 1..n {
                let d = distance(&locations[i], &locations[j], config);
                entries[i][j] = d;
                entries[j][i] = d;
            }
        }
        Self { entries }
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.entries[from][to]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
