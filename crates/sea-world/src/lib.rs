//! Sea simulation engine.
//!
//! This module implements the bounded 2D grid where predators hunt victims,
//! plus the day-by-day update rules that drive it.

pub mod grid;
pub mod render;
pub mod simulation;

pub use grid::Grid;
pub use simulation::{DayStats, RunOutcome, RunSummary, Sea, StepOutcome};
