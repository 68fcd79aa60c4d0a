//! Pipeline statistics.

use std::time::Duration;

use contracts::{EventStatus, HealthStatus};
use dispatcher::{DeliverySnapshot, DispatchOutcome};

/// Statistics from a replay run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Non-empty lines read from the input
    pub lines_read: u64,

    /// Lines that did not decode as an event
    pub malformed: u64,

    /// Events handed to the dispatcher
    pub events: u64,

    /// Action responses with status ADAPTER_RESPONSE
    pub responded: u64,

    /// Action responses with status ADAPTER_REJECTED
    pub rejected: u64,

    /// Health checks answered
    pub health_checks: u64,

    /// Health checks answered as unhealthy
    pub unhealthy: u64,

    /// Events dropped by verification
    pub not_accepted: u64,

    /// Dispatch calls that returned an error
    pub failed: u64,

    /// Total duration of the run
    pub duration: Duration,

    /// Per-output delivery counters, filled in after the run
    pub outputs: Vec<(String, DeliverySnapshot)>,
}

impl PipelineStats {
    /// Count one dispatch outcome
    pub fn record(&mut self, outcome: DispatchOutcome) {
        match outcome {
            DispatchOutcome::Responded { status, .. } => {
                if status == EventStatus::AdapterRejected {
                    self.rejected += 1;
                } else {
                    self.responded += 1;
                }
            }
            DispatchOutcome::HealthChecked(status) => {
                self.health_checks += 1;
                if status == HealthStatus::ApplicationUnhealthy {
                    self.unhealthy += 1;
                }
            }
            DispatchOutcome::NotAccepted(_) => self.not_accepted += 1,
        }
    }

    /// Dispatched events per second
    pub fn events_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.events as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Dispatch Statistics ===\n");

        println!("Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Lines read: {}", self.lines_read);
        println!("   ├─ Malformed lines: {}", self.malformed);
        println!("   ├─ Events dispatched: {}", self.events);
        println!("   └─ Events/s: {:.2}", self.events_per_sec());

        println!("\nOutcomes");
        println!("   ├─ Responses: {}", self.responded);
        println!("   ├─ Rejections: {}", self.rejected);
        println!(
            "   ├─ Health checks: {} ({} unhealthy)",
            self.health_checks, self.unhealthy
        );
        println!("   ├─ Not accepted: {}", self.not_accepted);
        println!("   └─ Failed: {}", self.failed);

        if !self.outputs.is_empty() {
            println!("\nOutputs");
            for (name, snapshot) in &self.outputs {
                println!(
                    "   ├─ {}: responses={} rejections={} health={} failed={} dropped={}",
                    name,
                    snapshot.responses,
                    snapshot.rejections,
                    snapshot.health_checks,
                    snapshot.failed,
                    snapshot.dropped
                );
            }
        }

        println!();
    }
}
