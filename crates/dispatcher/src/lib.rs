//! # Dispatcher
//!
//! Event handling core of the adapter.
//!
//! Responsible for:
//! - classifying inbound events (health check vs. action)
//! - verification, action routing through the handler registry
//! - health check responses
//! - posting responses to outputs without blocking the caller

pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod health;
pub mod mock;
pub mod outputs;
pub mod probe;
pub mod registry;
pub mod router;
pub mod verifier;

pub use contracts::{InboundEvent, ResponseEvent, ResponseOutput, ResponseSink};
pub use dispatcher::{create_dispatcher, AdapterDispatcher, DispatchOutcome, EventDispatcher};
pub use error::DispatchError;
pub use health::{HealthCheckResponder, UNHEALTHY_MESSAGE};
pub use mock::RecordingSink;
pub use outputs::{FileOutput, LogOutput};
pub use probe::{AlwaysHealthy, ConfiguredProbe, StaticProbe, TcpProbe};
pub use registry::{ActionHandler, HandlerRegistry, ResponseData};
pub use router::{DeliverySnapshot, DeliveryStats, ResponseRouter};
pub use verifier::{StaticVerifier, SupportedActionsVerifier};
