//! Pick task input model.
//!
//! Tasks are produced by the order/pick-task subsystem and are immutable
//! inputs here: the optimizer reorders and annotates copies, never the
//! originals.

use serde::{Deserialize, Serialize};

/// Urgency of a pick task. Carried through to the output unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

/// A single item to be picked from a bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickTask {
    pub task_id: String,
    pub order_id: String,
    pub sku: String,
    pub quantity: u32,
    /// Bin location string, e.g. `"A-3-12"` or `"B-01-4L"`.
    pub bin_location: String,
    #[serde(default)]
    pub priority: Priority,
    /// Item weight, if the upstream system tracks it.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl PickTask {
    pub fn new(
        task_id: impl Into<String>,
        order_id: impl Into<String>,
        sku: impl Into<String>,
        quantity: u32,
        bin_location: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            order_id: order_id.into(),
            sku: sku.into(),
            quantity,
            bin_location: bin_location.into(),
            priority: Priority::Normal,
            weight: None,
        }
    }
}
