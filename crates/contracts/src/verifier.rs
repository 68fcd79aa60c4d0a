//! EventVerifier trait - acceptance check before dispatch

use crate::{ContractError, EventStatus, InboundEvent};

/// Decides whether this adapter instance handles an event
///
/// Only `EventStatus::AdapterAccepted` lets the dispatcher proceed.
#[trait_variant::make(EventVerifier: Send)]
pub trait LocalEventVerifier {
    /// Verify the event and return the adapter status for it
    ///
    /// # Errors
    /// Returns a verification error when no status can be determined
    async fn verify_event(&self, event: &InboundEvent) -> Result<EventStatus, ContractError>;
}
