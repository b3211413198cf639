//! Test fixtures for pick-planner.
//!
//! Provides warehouse test data including:
//! - Task builders with sensible defaults
//! - Canned pick lists with known geometry

pub mod warehouse;

pub use warehouse::*;
