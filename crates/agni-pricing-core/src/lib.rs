pub mod error;
pub mod resource;
pub mod types;

#[cfg(feature = "pricing")]
pub mod pricing;

#[cfg(feature = "regulatory")]
pub mod regulatory;

#[cfg(feature = "incentives")]
pub mod incentives;

#[cfg(feature = "fta")]
pub mod fta;

#[cfg(feature = "proforma")]
pub mod proforma;

#[cfg(feature = "deep_link")]
pub mod deep_link;

#[cfg(feature = "recalc")]
pub mod recalc;

pub use error::AgniError;
pub use types::*;

/// Standard result type for all pricing operations
pub type AgniResult<T> = Result<T, AgniError>;
