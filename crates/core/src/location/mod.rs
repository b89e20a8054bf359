//! Location fixes, staleness handling and modem GNSS parsing.

pub mod cgnsinf;
pub mod fix;

pub use cgnsinf::parse_cgnsinf;
pub use fix::{LocationCache, LocationFix};
