//! ResponseRouter - fans responses out to configured outputs
//!
//! Each output drains its own bounded queue on a separate task. Posting never
//! blocks the dispatcher; a full queue drops the response for that output
//! only, and a failing output never stops the others.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use contracts::{
    EventStatus, OutputConfig, OutputType, ResponseEvent, ResponseOutput, ResponseSink,
};
use observability::record_response_posted;

use crate::error::DispatchError;
use crate::outputs::{FileOutput, LogOutput};

/// Delivery counters of one output, split by response kind
#[derive(Debug, Default)]
pub struct DeliveryStats {
    responses: AtomicU64,
    rejections: AtomicU64,
    health_checks: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
}

impl DeliveryStats {
    fn record_written(&self, event: &ResponseEvent) {
        let counter = match event {
            ResponseEvent::Health(_) => &self.health_checks,
            ResponseEvent::Resources(e) if e.status == EventStatus::AdapterRejected => {
                &self.rejections
            }
            ResponseEvent::Resources(_) => &self.responses,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DeliverySnapshot {
        DeliverySnapshot {
            responses: self.responses.load(Ordering::Relaxed),
            rejections: self.rejections.load(Ordering::Relaxed),
            health_checks: self.health_checks.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`DeliveryStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliverySnapshot {
    /// ADAPTER_RESPONSE events written
    pub responses: u64,
    /// ADAPTER_REJECTED events written
    pub rejections: u64,
    /// Health check responses written
    pub health_checks: u64,
    /// Writes that returned an error
    pub failed: u64,
    /// Responses dropped on a full queue
    pub dropped: u64,
}

impl DeliverySnapshot {
    pub fn written(&self) -> u64 {
        self.responses + self.rejections + self.health_checks
    }
}

struct OutputWorker {
    name: String,
    tx: mpsc::Sender<ResponseEvent>,
    stats: Arc<DeliveryStats>,
    task: JoinHandle<()>,
}

impl OutputWorker {
    fn start<O: ResponseOutput + Send + 'static>(output: O, queue_capacity: usize) -> Self {
        let name = output.name().to_string();
        let (tx, rx) = mpsc::channel(queue_capacity);
        let stats = Arc::new(DeliveryStats::default());
        let task = tokio::spawn(drain(output, rx, Arc::clone(&stats)));

        Self {
            name,
            tx,
            stats,
            task,
        }
    }

    fn enqueue(&self, event: ResponseEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(output = %self.name, corr_id = %event.corr_id(), "Queue full, response dropped");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                error!(output = %self.name, "Output worker stopped unexpectedly");
            }
        }
    }

    async fn stop(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            error!(output = %self.name, error = ?e, "Output worker panicked");
        }
    }
}

#[instrument(name = "output_drain", skip_all, fields(output = %output.name()))]
async fn drain<O: ResponseOutput>(
    mut output: O,
    mut rx: mpsc::Receiver<ResponseEvent>,
    stats: Arc<DeliveryStats>,
) {
    while let Some(event) = rx.recv().await {
        match output.write(&event).await {
            Ok(()) => {
                stats.record_written(&event);
                record_response_posted(output.name(), true);
            }
            Err(e) => {
                stats.failed.fetch_add(1, Ordering::Relaxed);
                record_response_posted(output.name(), false);
                error!(corr_id = %event.corr_id(), error = %e, "Write failed");
            }
        }
    }

    if let Err(e) = output.flush().await {
        error!(error = %e, "Flush failed on shutdown");
    }
    if let Err(e) = output.close().await {
        error!(error = %e, "Close failed on shutdown");
    }
}

/// Response sink backed by one queue and task per output
#[derive(Default)]
pub struct ResponseRouter {
    outputs: Vec<OutputWorker>,
}

impl ResponseRouter {
    /// Router without outputs; responses are discarded until one is added
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a custom output. Must run inside a tokio runtime.
    pub fn add_output<O: ResponseOutput + Send + 'static>(&mut self, output: O, queue_capacity: usize) {
        self.outputs.push(OutputWorker::start(output, queue_capacity));
    }

    /// Build and start every configured output
    #[instrument(
        name = "response_router_from_configs",
        skip(configs),
        fields(output_count = configs.len())
    )]
    pub async fn from_configs(configs: &[OutputConfig]) -> Result<Self, DispatchError> {
        let mut router = Self::new();
        for config in configs {
            match config.output_type {
                OutputType::Log => {
                    router.add_output(LogOutput::new(&config.name), config.queue_capacity);
                }
                OutputType::File => {
                    let output = FileOutput::from_params(&config.name, &config.params)
                        .map_err(|e| DispatchError::output_creation(&config.name, e.to_string()))?;
                    router.add_output(output, config.queue_capacity);
                }
            }
        }
        if router.outputs.is_empty() {
            warn!("No outputs configured, responses will be discarded");
        }
        Ok(router)
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Delivery counters per output name
    pub fn stats(&self) -> Vec<(String, DeliverySnapshot)> {
        self.outputs
            .iter()
            .map(|w| (w.name.clone(), w.stats.snapshot()))
            .collect()
    }

    /// Drain and stop every output
    #[instrument(name = "response_router_shutdown", skip(self))]
    pub async fn shutdown(self) {
        for worker in self.outputs {
            worker.stop().await;
        }
        info!("Response router shutdown complete");
    }
}

impl ResponseSink for ResponseRouter {
    fn post_response(&self, event: ResponseEvent) {
        debug!(corr_id = %event.corr_id(), outputs = self.outputs.len(), "Routing response");
        for worker in &self.outputs {
            worker.enqueue(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ContractError, Health, InboundEvent, Resource};
    use std::collections::HashMap;
    use tokio::time::{sleep, Duration};

    struct StubOutput {
        name: &'static str,
        fail: bool,
        delay_ms: u64,
    }

    impl ResponseOutput for StubOutput {
        fn name(&self) -> &str {
            self.name
        }

        async fn write(&mut self, _event: &ResponseEvent) -> Result<(), ContractError> {
            if self.delay_ms > 0 {
                sleep(Duration::from_millis(self.delay_ms)).await;
            }
            if self.fail {
                return Err(ContractError::output_write(self.name, "unreachable"));
            }
            Ok(())
        }

        async fn flush(&mut self) -> Result<(), ContractError> {
            Ok(())
        }

        async fn close(&mut self) -> Result<(), ContractError> {
            Ok(())
        }
    }

    fn request() -> InboundEvent {
        InboundEvent::new("pwf.no", "tilganger", "vfs", "GET_ALL_IDENTITET")
    }

    fn resources(status: EventStatus) -> ResponseEvent {
        request().derive_response::<Resource>(status).into()
    }

    fn health() -> ResponseEvent {
        let mut event = InboundEvent::new_health_check("pwf.no", "tilganger", "vfs")
            .derive_response::<Health>(EventStatus::TempUpstreamQueue);
        event.add_data(Health::healthy("adapter"));
        event.into()
    }

    fn log_config(name: &str) -> OutputConfig {
        OutputConfig {
            name: name.to_string(),
            output_type: OutputType::Log,
            queue_capacity: 50,
            params: HashMap::new(),
        }
    }

    /// Stop the router and return the final counters
    async fn finish(router: ResponseRouter) -> Vec<DeliverySnapshot> {
        let stats: Vec<_> = router.outputs.iter().map(|w| Arc::clone(&w.stats)).collect();
        router.shutdown().await;
        stats.iter().map(|s| s.snapshot()).collect()
    }

    #[tokio::test]
    async fn test_fanout_counts_by_kind() {
        let router = ResponseRouter::from_configs(&[log_config("log1"), log_config("log2")])
            .await
            .unwrap();
        assert_eq!(router.output_count(), 2);

        router.post_response(resources(EventStatus::AdapterResponse));
        router.post_response(resources(EventStatus::AdapterResponse));
        router.post_response(resources(EventStatus::AdapterRejected));
        router.post_response(health());

        let expected = DeliverySnapshot {
            responses: 2,
            rejections: 1,
            health_checks: 1,
            failed: 0,
            dropped: 0,
        };
        assert_eq!(finish(router).await, vec![expected, expected]);
    }

    #[tokio::test]
    async fn test_full_queue_drops_for_that_output_only() {
        let mut router = ResponseRouter::new();
        router.add_output(
            StubOutput {
                name: "slow",
                fail: false,
                delay_ms: 100,
            },
            2,
        );
        router.add_output(
            StubOutput {
                name: "fast",
                fail: false,
                delay_ms: 0,
            },
            20,
        );

        for _ in 0..10 {
            router.post_response(resources(EventStatus::AdapterResponse));
        }

        let stats = finish(router).await;
        assert!(stats[0].dropped > 0);
        assert_eq!(stats[0].written() + stats[0].dropped, 10);
        assert_eq!(stats[1].dropped, 0);
        assert_eq!(stats[1].responses, 10);
    }

    #[tokio::test]
    async fn test_failing_output_keeps_draining() {
        let mut router = ResponseRouter::new();
        router.add_output(
            StubOutput {
                name: "failing",
                fail: true,
                delay_ms: 0,
            },
            10,
        );

        for _ in 0..3 {
            router.post_response(health());
        }

        let stats = finish(router).await;
        assert_eq!(stats[0].failed, 3);
        assert_eq!(stats[0].written(), 0);
    }

    #[tokio::test]
    async fn test_empty_router_discards() {
        let router = ResponseRouter::from_configs(&[]).await.unwrap();
        router.post_response(health());
        assert!(router.stats().is_empty());
        router.shutdown().await;
    }
}
