//! Response delivery interfaces
//!
//! `ResponseSink` is what the dispatcher posts to; `ResponseOutput` is one
//! concrete destination (log, file) behind a sink.

use crate::{ContractError, ResponseEvent};

/// Upstream channel receiving completed response events
///
/// Fire-and-forget: delivery failures are handled behind the sink.
pub trait ResponseSink: Send + Sync {
    /// Post a fully built response
    fn post_response(&self, event: ResponseEvent);
}

impl<S: ResponseSink + ?Sized> ResponseSink for std::sync::Arc<S> {
    fn post_response(&self, event: ResponseEvent) {
        (**self).post_response(event)
    }
}

/// Response output trait
///
/// All output implementations must implement this trait.
#[trait_variant::make(ResponseOutput: Send)]
pub trait LocalResponseOutput {
    /// Output name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one response event
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, event: &ResponseEvent) -> Result<(), ContractError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;

    /// Close output
    async fn close(&mut self) -> Result<(), ContractError>;
}
