//! Command implementations.

mod health;
mod run;
mod validate;

pub use health::run_health;
pub use run::run_pipeline;
pub use validate::run_validate;
