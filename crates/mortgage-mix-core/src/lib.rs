pub mod affordability;
pub mod amortization;
pub mod error;
pub mod mix;
pub mod rates;
pub mod savings;
pub mod types;

pub use error::MortgageMixError;
pub use types::*;

/// Standard result type for all mortgage-mix operations
pub type MortgageMixResult<T> = Result<T, MortgageMixError>;
