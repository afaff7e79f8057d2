//! Scenario sweeps over the factoring engine.
//!
//! Each scenario re-runs [`crate::factoring::compute_factoring_cost`] from a
//! fresh parameter value with one input changed. Output order always follows
//! input order, because charts plot the points as given.

pub mod grid;
pub mod sweep;

pub use grid::{tenor_rate_grid, SensitivityGrid};
pub use sweep::{
    rate_label, sweep_by_interest_rate, sweep_by_tenor, sweep_metric_by_interest_rate,
    sweep_metric_by_tenor, tenor_label, ScenarioPoint, DEFAULT_RATE_SCENARIOS,
    DEFAULT_TENOR_SCENARIOS,
};
