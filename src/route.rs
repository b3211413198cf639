//! Route assembly: mapping a bin tour back onto tasks.
//!
//! The solver works over distinct bins; this module expands the chosen
//! tour back to one annotated entry per input task, builds the waypoint
//! list, and aggregates distance and time.

use serde::{Deserialize, Serialize};

use crate::config::WarehouseConfig;
use crate::distance::{travel_time_ms, DistanceMatrix};
use crate::location::BinLocation;
use crate::solver::{Algorithm, Slot};
use crate::task::PickTask;

/// A pick task annotated with its place in the route.
///
/// Tasks sharing a bin repeat the same leg endpoints; only the first of
/// them carries the incremental leg distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedPickTask {
    #[serde(flatten)]
    pub task: PickTask,
    /// 1-based position in the pick sequence.
    pub sequence: u32,
    pub from_location: String,
    pub to_location: String,
    /// Incremental travel distance for this leg, in spatial units.
    pub distance: f64,
    /// Travel time for the leg plus the fixed pick time, in milliseconds.
    pub estimated_time_ms: f64,
}

/// Role of a waypoint along the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointKind {
    Start,
    Pickup,
    End,
}

/// A point along the route, for the picking UI to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub location: String,
    pub kind: WaypointKind,
    /// 0-based position along the route, start included.
    pub sequence: u32,
    pub coordinates: (f64, f64, f64),
}

/// An optimized pick route. Owns its task list; built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedRoute {
    pub tasks: Vec<OptimizedPickTask>,
    /// Sum of all legs including the return to the start, in spatial units.
    pub total_distance: f64,
    /// Sum of all per-task times, in milliseconds.
    pub estimated_time_ms: f64,
    /// Start, one pickup per visited bin, and the return to start.
    pub waypoints: Vec<Waypoint>,
    /// The strategy that actually ran.
    pub algorithm: Algorithm,
}

/// Expands a bin tour into the final route.
///
/// `tour` holds matrix indices (0 = start); tasks at each bin are emitted
/// in input order with a strictly increasing sequence counter.
pub(crate) fn assemble(
    tasks: &[PickTask],
    slots: &[Slot],
    tour: &[usize],
    start: &BinLocation,
    matrix: &DistanceMatrix,
    config: &WarehouseConfig,
    algorithm: Algorithm,
) -> OptimizedRoute {
    let pick_time_ms = config.pick_time_secs * 1000.0;

    let mut out_tasks = Vec::with_capacity(tasks.len());
    let mut waypoints = Vec::with_capacity(tour.len() + 2);
    waypoints.push(Waypoint {
        location: start.canonical().to_string(),
        kind: WaypointKind::Start,
        sequence: 0,
        coordinates: start.coordinates(config),
    });

    let mut total_distance = 0.0;
    let mut total_time_ms = 0.0;
    let mut sequence = 0u32;
    let mut previous = 0;
    let mut previous_name = start.canonical().to_string();

    for (stop_number, &stop) in tour.iter().enumerate() {
        let slot = &slots[stop - 1];
        let leg = matrix.get(previous, stop);
        total_distance += leg;

        waypoints.push(Waypoint {
            location: slot.bin.canonical().to_string(),
            kind: WaypointKind::Pickup,
            sequence: (stop_number + 1) as u32,
            coordinates: slot.bin.coordinates(config),
        });

        // the first task at the bin carries the leg, co-located ones cost 0
        let mut leg_remaining = leg;
        for &task_index in &slot.task_indices {
            sequence += 1;
            let distance = leg_remaining;
            leg_remaining = 0.0;
            let estimated_time_ms = travel_time_ms(distance, config) + pick_time_ms;
            total_time_ms += estimated_time_ms;
            out_tasks.push(OptimizedPickTask {
                task: tasks[task_index].clone(),
                sequence,
                from_location: previous_name.clone(),
                to_location: slot.bin.canonical().to_string(),
                distance,
                estimated_time_ms,
            });
        }

        previous = stop;
        previous_name = slot.bin.canonical().to_string();
    }

    // closing leg back to the start contributes distance only
    total_distance += matrix.get(previous, 0);

    waypoints.push(Waypoint {
        location: start.canonical().to_string(),
        kind: WaypointKind::End,
        sequence: (tour.len() + 1) as u32,
        coordinates: start.coordinates(config),
    });

    OptimizedRoute {
        tasks: out_tasks,
        total_distance,
        estimated_time_ms: total_time_ms,
        waypoints,
        algorithm,
    }
}
