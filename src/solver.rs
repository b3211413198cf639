//! Pick-route solver: strategy selection, tour construction, 2-opt improvement.
//!
//! All working state (distance matrix, visited sets, candidate tours) is
//! call-local, so concurrent hosts can run optimizations independently.
//! The optimizer holds only the read-only warehouse configuration.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{WarehouseConfig, WarehouseConfigPatch};
use crate::distance::DistanceMatrix;
use crate::error::OptimizeError;
use crate::location::{BinLocation, SlotKey};
use crate::route::{self, OptimizedRoute};
use crate::task::PickTask;

/// Largest task count still routed with nearest neighbor + 2-opt.
///
/// The selection thresholds below are empirical tuning constants; treat
/// them as open parameters, not derived values.
pub const TSP_TASK_LIMIT: usize = 10;

/// Zone spread above which zone clustering takes over.
pub const ZONE_SPREAD_LIMIT: usize = 2;

/// Aisle spread above which the S-shape sweep takes over.
pub const AISLE_SPREAD_LIMIT: usize = 3;

/// Default cap on 2-opt improvement passes.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Improvement smaller than this is treated as float noise, not progress.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Routing strategy. Selected from the task list unless forced via
/// [`OptimizeOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Nearest-neighbor construction plus 2-opt improvement.
    Tsp,
    /// Nearest-neighbor construction only.
    Nearest,
    /// Aisle-by-aisle S-shape sweep.
    Aisle,
    /// Zone clustering with a nearest-neighbor walk inside each zone.
    Zone,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Tsp => "tsp",
            Algorithm::Nearest => "nearest",
            Algorithm::Aisle => "aisle",
            Algorithm::Zone => "zone",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call solver options.
#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Forced strategy; `None` selects by task count and zone/aisle spread.
    pub algorithm: Option<Algorithm>,
    /// Cap on 2-opt improvement passes. Hitting it is not an error: the
    /// best tour found so far is kept and a diagnostic is logged.
    pub max_iterations: usize,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            algorithm: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// A distinct physical bin plus the input tasks stored there, in input
/// order. Tours walk slots, not tasks, so a shared bin is visited once.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) bin: BinLocation,
    pub(crate) task_indices: Vec<usize>,
}

/// Warehouse pick-route optimizer.
///
/// Stateless across calls apart from the configuration. Replacing the
/// configuration is a wholesale swap and must be ordered before any
/// subsequent call by the embedding host; the optimizer takes no locks.
#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer {
    config: WarehouseConfig,
}

impl RouteOptimizer {
    pub fn new(config: WarehouseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WarehouseConfig {
        &self.config
    }

    /// Applies a partial configuration update; see [`WarehouseConfig::apply`]
    /// for the merge rules. The new values are validated on the next
    /// optimization call, not here.
    pub fn update_config(&mut self, patch: WarehouseConfigPatch) {
        self.config.apply(patch);
    }

    /// Computes an ordered pick route over `tasks` from `start_location`
    /// (usually [`crate::location::DEPOT`]).
    ///
    /// Any unparseable bin or start location aborts the whole call; no
    /// partial route is returned.
    pub fn optimize_route(
        &self,
        tasks: &[PickTask],
        start_location: &str,
        options: &OptimizeOptions,
    ) -> Result<OptimizedRoute, OptimizeError> {
        let started_at = Instant::now();
        self.config.validate()?;

        let start = BinLocation::parse(start_location)?;
        let slots = group_tasks_by_bin(tasks)?;

        if tasks.is_empty() {
            debug!("no tasks to optimize, returning empty route");
        }

        let algorithm = options
            .algorithm
            .unwrap_or_else(|| select_algorithm(tasks.len(), &slots));

        // index 0 = start, 1.. = distinct bins in first-appearance order
        let mut locations = Vec::with_capacity(slots.len() + 1);
        locations.push(start.clone());
        locations.extend(slots.iter().map(|slot| slot.bin.clone()));
        let matrix = DistanceMatrix::build(&locations, &self.config);

        let tour = match algorithm {
            Algorithm::Tsp => {
                let initial = nearest_neighbor_tour(&matrix);
                two_opt(initial, &matrix, options.max_iterations)
            }
            Algorithm::Nearest => nearest_neighbor_tour(&matrix),
            Algorithm::Aisle => s_shape_tour(&start, &slots),
            Algorithm::Zone => zone_tour(&start, &slots, &matrix),
        };

        let result = route::assemble(tasks, &slots, &tour, &start, &matrix, &self.config, algorithm);
        info!(
            "pick route optimized: algorithm={} tasks={} bins={} distance={:.1} time_ms={}",
            algorithm,
            result.tasks.len(),
            slots.len(),
            result.total_distance,
            started_at.elapsed().as_millis(),
        );
        Ok(result)
    }
}

/// Groups tasks by physical bin, preserving first-appearance order of the
/// bins and input order of the tasks within each.
fn group_tasks_by_bin(tasks: &[PickTask]) -> Result<Vec<Slot>, OptimizeError> {
    let mut slots: Vec<Slot> = Vec::new();
    let mut index_by_key: HashMap<SlotKey, usize> = HashMap::new();

    for (task_index, task) in tasks.iter().enumerate() {
        let bin = BinLocation::parse(&task.bin_location)?;
        match index_by_key.entry(bin.slot_key()) {
            Entry::Occupied(entry) => slots[*entry.get()].task_indices.push(task_index),
            Entry::Vacant(entry) => {
                entry.insert(slots.len());
                slots.push(Slot {
                    bin,
                    task_indices: vec![task_index],
                });
            }
        }
    }

    Ok(slots)
}

/// Picks a strategy from task count and zone/aisle spread.
///
/// The checks are a fixed priority: zone spread dominates aisle spread
/// because cross-zone travel is costlier than cross-aisle travel.
fn select_algorithm(task_count: usize, slots: &[Slot]) -> Algorithm {
    let zones: BTreeSet<char> = slots.iter().map(|slot| slot.bin.zone()).collect();
    let aisles: BTreeSet<u32> = slots.iter().map(|slot| slot.bin.aisle()).collect();

    let algorithm = if task_count <= TSP_TASK_LIMIT {
        Algorithm::Tsp
    } else if zones.len() > ZONE_SPREAD_LIMIT {
        Algorithm::Zone
    } else if aisles.len() > AISLE_SPREAD_LIMIT {
        Algorithm::Aisle
    } else {
        Algorithm::Nearest
    };
    debug!(
        "selected {} for {} tasks ({} zones, {} aisles)",
        algorithm,
        task_count,
        zones.len(),
        aisles.len(),
    );
    algorithm
}

/// Greedy nearest-neighbor walk over all bins, starting at index 0.
///
/// Ties break toward the lowest index, keeping the walk deterministic.
fn nearest_neighbor_tour(matrix: &DistanceMatrix) -> Vec<usize> {
    let n = matrix.len();
    let mut tour = Vec::with_capacity(n.saturating_sub(1));
    let mut visited = vec![false; n];
    visited[0] = true;
    let mut current = 0;

    for _ in 1..n {
        let mut best: Option<(usize, f64)> = None;
        for candidate in 1..n {
            if visited[candidate] {
                continue;
            }
            let d = matrix.get(current, candidate);
            if best.is_none_or(|(_, best_distance)| d < best_distance) {
                best = Some((candidate, d));
            }
        }

        // cannot fail over a complete matrix, but never loop on it
        let Some((next, _)) = best else { break };
        visited[next] = true;
        tour.push(next);
        current = next;
    }

    tour
}

/// Total tour distance including the start and return-to-start legs.
fn tour_distance(tour: &[usize], matrix: &DistanceMatrix) -> f64 {
    let mut total = 0.0;
    let mut previous = 0;
    for &stop in tour {
        total += matrix.get(previous, stop);
        previous = stop;
    }
    total + matrix.get(previous, 0)
}

/// 2-opt local search: reverse a tour segment whenever doing so strictly
/// shortens the full tour, until a pass makes no improvement or the pass
/// cap is hit.
///
/// Tour distance is recomputed by summation per candidate, not by an
/// incremental edge delta.
fn two_opt(mut tour: Vec<usize>, matrix: &DistanceMatrix, max_passes: usize) -> Vec<usize> {
    if tour.len() < 2 {
        return tour;
    }

    let mut converged = false;
    for _ in 0..max_passes {
        let mut improved = false;
        for i in 0..tour.len() - 1 {
            for j in i + 1..tour.len() {
                let before = tour_distance(&tour, matrix);
                tour[i..=j].reverse();
                if tour_distance(&tour, matrix) + IMPROVEMENT_EPSILON < before {
                    improved = true;
                } else {
                    tour[i..=j].reverse();
                }
            }
        }
        if !improved {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!("2-opt stopped at the {max_passes} pass cap before convergence");
    }
    tour
}

/// Aisle-by-aisle S-shape sweep.
///
/// Aisles are visited in order of distance from the start's aisle. Within
/// an aisle, bins are walked low-to-high or high-to-low depending on which
/// end is closer to where the previous aisle left the walker, so no aisle
/// is entered and backtracked.
fn s_shape_tour(start: &BinLocation, slots: &[Slot]) -> Vec<usize> {
    let mut by_aisle: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (index, slot) in slots.iter().enumerate() {
        by_aisle.entry(slot.bin.aisle()).or_default().push(index + 1);
    }

    let entry_aisle = start.aisle();
    let mut aisles: Vec<u32> = by_aisle.keys().copied().collect();
    aisles.sort_by_key(|aisle| (aisle.abs_diff(entry_aisle), *aisle));

    let mut tour = Vec::with_capacity(slots.len());
    let mut current_shelf = start.shelf();
    for aisle in aisles {
        let mut stops = by_aisle.remove(&aisle).unwrap_or_default();
        stops.sort_by_key(|&stop| slots[stop - 1].bin.shelf());

        let low = slots[stops[0] - 1].bin.shelf();
        let high = slots[stops[stops.len() - 1] - 1].bin.shelf();
        if current_shelf.abs_diff(high) < current_shelf.abs_diff(low) {
            stops.reverse();
        }

        current_shelf = slots[stops[stops.len() - 1] - 1].bin.shelf();
        tour.extend(stops);
    }
    tour
}

/// Zone clustering: visit zones outward from the start's zone, running a
/// nearest-neighbor walk inside each, seeded from the previous zone's
/// exit bin.
fn zone_tour(start: &BinLocation, slots: &[Slot], matrix: &DistanceMatrix) -> Vec<usize> {
    let mut by_zone: BTreeMap<char, Vec<usize>> = BTreeMap::new();
    for (index, slot) in slots.iter().enumerate() {
        by_zone.entry(slot.bin.zone()).or_default().push(index + 1);
    }

    let start_zone = start.zone_index();
    let mut zones: Vec<char> = by_zone.keys().copied().collect();
    zones.sort_by_key(|zone| ((*zone as u32 - 'A' as u32).abs_diff(start_zone), *zone));

    let mut tour = Vec::with_capacity(slots.len());
    let mut current = 0;
    for zone in zones {
        let members = &by_zone[&zone];
        let mut visited = vec![false; members.len()];
        for _ in 0..members.len() {
            let mut best: Option<(usize, f64)> = None;
            for (position, &stop) in members.iter().enumerate() {
                if visited[position] {
                    continue;
                }
                let d = matrix.get(current, stop);
                if best.is_none_or(|(_, best_distance)| d < best_distance) {
                    best = Some((position, d));
                }
            }
            let Some((position, _)) = best else { break };
            visited[position] = true;
            tour.push(members[position]);
            current = members[position];
        }
    }
    tour
}
