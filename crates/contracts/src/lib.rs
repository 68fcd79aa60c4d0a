//! # Contracts
//!
//! Frozen interface contracts shared by every adapter crate: the event envelope,
//! payload records, health records, the action enum, the adapter configuration
//! blueprint and the collaborator traits the dispatcher is written against.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Correlation model
//! - `corr_id` identifies one request/response unit of work
//! - responses are derived from requests and keep `corr_id`, `org_id`, `source`,
//!   `client`, `action` and `time`

mod action;
mod blueprint;
mod error;
mod event;
mod health;
mod probe;
mod resource;
mod sink;
mod verifier;

pub use action::TilgangerAction;
pub use blueprint::*;
pub use error::*;
pub use event::*;
pub use health::{Health, HealthStatus};
pub use probe::{HealthProbe, LocalHealthProbe};
pub use resource::*;
pub use sink::*;
pub use verifier::{EventVerifier, LocalEventVerifier};
