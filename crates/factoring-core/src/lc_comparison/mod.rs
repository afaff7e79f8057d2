//! Letter of credit as the alternate financing instrument.
//!
//! [`pricing`] prices the L/C on the same receivable and tenor as the
//! factoring deal; [`comparison`] puts the two side by side.

pub mod comparison;
pub mod pricing;

pub use comparison::{compare_instruments, CheaperInstrument, InstrumentComparison};
pub use pricing::{compute_lc_cost, LcComparisonInput, LcComparisonResult, LcRates};
