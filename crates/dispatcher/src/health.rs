//! HealthCheckResponder - answers synthetic health check events

use contracts::{
    Event, EventStatus, Health, HealthProbe, HealthStatus, InboundEvent, ResponseSink,
};
use observability::record_health_check;
use tracing::{info, instrument, warn};

/// Message set on the response when the probe fails
pub const UNHEALTHY_MESSAGE: &str = "The adapter is unable to communicate with the application.";

/// Builds and posts health check responses
///
/// Stateless: every check runs the probe once, no retry.
pub struct HealthCheckResponder<P> {
    probe: P,
    component: String,
}

impl<P: HealthProbe + Sync> HealthCheckResponder<P> {
    pub fn new(probe: P, component: impl Into<String>) -> Self {
        Self {
            probe,
            component: component.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Run the probe and build the response for `event`
    pub async fn build_response(&self, event: &InboundEvent) -> Event<Health> {
        let mut response = event.derive_response(EventStatus::TempUpstreamQueue);

        if self.probe.check().await {
            response.add_data(Health::healthy(&self.component));
        } else {
            response.add_data(Health::unhealthy(&self.component));
            response.message = Some(UNHEALTHY_MESSAGE.to_string());
        }

        response
    }

    /// Build the health response and post it to `sink`
    #[instrument(
        name = "health_check_respond",
        skip(self, event, sink),
        fields(corr_id = %event.corr_id, probe = self.probe.name())
    )]
    pub async fn post_health_check_response<S: ResponseSink>(
        &self,
        event: &InboundEvent,
        sink: &S,
    ) -> HealthStatus {
        let response = self.build_response(event).await;
        let status = response
            .data
            .first()
            .map(|h| h.status)
            .unwrap_or(HealthStatus::ApplicationUnhealthy);

        match status {
            HealthStatus::ApplicationHealthy => {
                info!(component = %self.component, "Health check passed")
            }
            HealthStatus::ApplicationUnhealthy => {
                warn!(component = %self.component, "Health check failed")
            }
        }
        record_health_check(status);

        sink.post_response(response.into());
        status
    }
}
