//! LogOutput - logs response summary via tracing

use contracts::{ContractError, ResponseEvent, ResponseOutput};
use tracing::{info, instrument};

/// Output that logs response summaries for debugging
pub struct LogOutput {
    name: String,
}

impl LogOutput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn log_response_summary(&self, event: &ResponseEvent) {
        info!(
            output = %self.name,
            corr_id = %event.corr_id(),
            action = %event.action(),
            status = ?event.status(),
            records = event.data_len(),
            message = event.message().unwrap_or_default(),
            "Response posted"
        );
    }
}

impl ResponseOutput for LogOutput {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_output_write",
        skip(self, event),
        fields(output = %self.name, corr_id = %event.corr_id())
    )]
    async fn write(&mut self, event: &ResponseEvent) -> Result<(), ContractError> {
        self.log_response_summary(event);
        Ok(())
    }

    #[instrument(name = "log_output_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        // Nothing to flush for log output
        Ok(())
    }

    #[instrument(name = "log_output_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        info!(output = %self.name, "LogOutput closed");
        Ok(())
    }
}
