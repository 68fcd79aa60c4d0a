//! Example action handlers
//!
//! Hardcoded sample data standing in for the application lookup.

mod identitet;
mod rettighet;

pub use self::identitet::GetAllIdentitetHandler;
pub use self::rettighet::GetAllRettighetHandler;

/// Lookup field for system ids
const SYSTEM_ID_FIELD: &str = "systemid";
