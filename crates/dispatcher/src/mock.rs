//! In-memory response sink for tests and dry runs

use std::sync::{Arc, Mutex};

use contracts::{ResponseEvent, ResponseSink};

/// Records every posted response
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    responses: Arc<Mutex<Vec<ResponseEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of posted responses, in posting order
    pub fn responses(&self) -> Vec<ResponseEvent> {
        self.responses
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.responses.lock().map(|r| r.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResponseSink for RecordingSink {
    fn post_response(&self, event: ResponseEvent) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push(event);
        }
    }
}
