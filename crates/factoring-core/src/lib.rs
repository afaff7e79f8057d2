//! Cash-flow economics of a single invoice-factoring transaction.
//!
//! The [`factoring`] engine maps [`factoring::TransactionParameters`] to a
//! [`factoring::FactoringResult`]. The optional modules reuse that engine:
//! [`lc_comparison`] prices a letter of credit as the alternate instrument and
//! [`sensitivity`] sweeps tenor and interest-rate scenarios.
//!
//! Every operation is pure. Amounts and rates are `rust_decimal::Decimal`.

pub mod error;
pub mod factoring;
pub mod types;

#[cfg(feature = "lc_comparison")]
pub mod lc_comparison;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

pub use error::FactoringError;
pub use types::*;

/// Standard result type for all factoring operations
pub type FactoringEngineResult<T> = Result<T, FactoringError>;
