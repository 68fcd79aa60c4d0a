//! Pipeline - feeds JSON-lines events through the dispatcher.

use std::time::Instant;

use anyhow::{Context, Result};
use contracts::{EventVerifier, HealthProbe, InboundEvent, ResponseSink};
use dispatcher::EventDispatcher;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, info, warn};

use super::PipelineStats;

/// Pipeline configuration
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Maximum number of events to dispatch (None = unlimited)
    pub max_events: Option<u64>,
}

/// Sequential event replay over one dispatcher
pub struct Pipeline<'a, V, S, P> {
    dispatcher: &'a EventDispatcher<V, S, P>,
    config: PipelineConfig,
}

impl<'a, V, S, P> Pipeline<'a, V, S, P>
where
    V: EventVerifier + Sync,
    S: ResponseSink,
    P: HealthProbe + Sync,
{
    pub fn new(dispatcher: &'a EventDispatcher<V, S, P>, config: PipelineConfig) -> Self {
        Self { dispatcher, config }
    }

    /// Dispatch every event in `reader` until EOF or `max_events`
    ///
    /// Blank lines are ignored. Lines that do not decode are logged and
    /// skipped; dispatch errors are logged and counted.
    pub async fn run<R: AsyncRead + Unpin>(&self, reader: R) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let mut stats = PipelineStats::default();
        let mut lines = BufReader::new(reader).lines();

        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read event input")?
        {
            if self
                .config
                .max_events
                .is_some_and(|max| stats.events >= max)
            {
                info!(max_events = stats.events, "Reached max events limit");
                break;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            stats.lines_read += 1;

            let event: InboundEvent = match serde_json::from_str(line) {
                Ok(event) => event,
                Err(e) => {
                    warn!(line = stats.lines_read, error = %e, "Skipping malformed event");
                    stats.malformed += 1;
                    continue;
                }
            };
            stats.events += 1;

            match self.dispatcher.handle(&event).await {
                Ok(outcome) => {
                    debug!(corr_id = %event.corr_id, ?outcome, "Event dispatched");
                    stats.record(outcome);
                }
                Err(e) => {
                    warn!(corr_id = %event.corr_id, action = %event.action, error = %e, "Dispatch failed");
                    stats.failed += 1;
                }
            }
        }

        stats.duration = start_time.elapsed();
        Ok(stats)
    }
}
