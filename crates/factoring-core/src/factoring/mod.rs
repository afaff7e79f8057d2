pub mod cost;
pub mod params;

pub use cost::{analyze_factoring, compute_factoring_cost, FactoringMetric, FactoringResult};
pub use params::{InterestConvention, TransactionParameters};
