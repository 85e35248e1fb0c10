pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "amortisation")]
pub mod amortisation;

#[cfg(feature = "dashboard")]
pub mod dashboard;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
