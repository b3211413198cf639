//! Warehouse pick-list fixtures.
//!
//! Bin addresses are chosen so expected distances stay round numbers
//! under the default configuration.

use pick_planner::task::{PickTask, Priority};

/// Builds a task with sensible defaults for the given bin.
pub fn task(task_id: &str, bin_location: &str) -> PickTask {
    PickTask::new(
        task_id,
        format!("order-{task_id}"),
        format!("SKU-{task_id}"),
        1,
        bin_location,
    )
}

/// Same as [`task`] with an explicit priority.
pub fn task_with_priority(task_id: &str, bin_location: &str, priority: Priority) -> PickTask {
    let mut built = task(task_id, bin_location);
    built.priority = priority;
    built
}

/// Three bins in zone A: two in aisle 1, one in aisle 2.
pub fn single_zone_run() -> Vec<PickTask> {
    vec![task("t1", "A-1-1"), task("t2", "A-1-2"), task("t3", "A-2-1")]
}

/// Fifteen tasks spread over four zones and more than three aisles, so
/// both the zone and aisle spread thresholds are exceeded at once.
pub fn multi_zone_pick_list() -> Vec<PickTask> {
    vec![
        task("m01", "A-1-1"),
        task("m02", "A-2-2"),
        task("m03", "A-3-3"),
        task("m04", "A-4-4"),
        task("m05", "B-4-1"),
        task("m06", "B-5-2"),
        task("m07", "B-6-3"),
        task("m08", "B-7-4"),
        task("m09", "C-7-1"),
        task("m10", "C-8-2"),
        task("m11", "C-9-3"),
        task("m12", "C-10-4"),
        task("m13", "D-10-1"),
        task("m14", "D-11-2"),
        task("m15", "D-12-3"),
    ]
}

/// Six bins across three aisles with shelves picked so the S-shape sweep
/// has one distinct expected visiting order.
pub fn three_aisle_sweep() -> Vec<PickTask> {
    vec![
        task("s1", "A-1-1"),
        task("s2", "A-1-3"),
        task("s3", "A-2-2"),
        task("s4", "A-2-5"),
        task("s5", "A-3-1"),
        task("s6", "A-3-4"),
    ]
}
