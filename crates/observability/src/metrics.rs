//! Adapter metrics
//!
//! Counters for inbound events, responses, health checks and output writes.

use contracts::{EventStatus, HealthStatus};
use metrics::counter;

/// Record an inbound event
pub fn record_event_received(action: &str) {
    counter!(
        "tilganger_adapter_events_received_total",
        "action" => action.to_string()
    )
    .increment(1);
}

/// Record a posted action response
pub fn record_response(action: &str, status: EventStatus) {
    counter!(
        "tilganger_adapter_responses_total",
        "action" => action.to_string(),
        "status" => status_label(status)
    )
    .increment(1);
}

/// Record an event dropped by verification
pub fn record_event_dropped(status: EventStatus) {
    counter!(
        "tilganger_adapter_events_dropped_total",
        "status" => status_label(status)
    )
    .increment(1);
}

/// Record a health check outcome
pub fn record_health_check(status: HealthStatus) {
    let label = match status {
        HealthStatus::ApplicationHealthy => "healthy",
        HealthStatus::ApplicationUnhealthy => "unhealthy",
    };
    counter!("tilganger_adapter_health_checks_total", "status" => label).increment(1);
}

/// Record a response write on one output
pub fn record_response_posted(output: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "tilganger_adapter_responses_posted_total",
        "output" => output.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Metric label for an event status
pub fn status_label(status: EventStatus) -> &'static str {
    match status {
        EventStatus::New => "new",
        EventStatus::DeliveredToAdapter => "delivered_to_adapter",
        EventStatus::AdapterAccepted => "adapter_accepted",
        EventStatus::AdapterRejected => "adapter_rejected",
        EventStatus::AdapterResponse => "adapter_response",
        EventStatus::TempUpstreamQueue => "temp_upstream_queue",
        EventStatus::UpstreamQueue => "upstream_queue",
        EventStatus::SentToClient => "sent_to_client",
    }
}
