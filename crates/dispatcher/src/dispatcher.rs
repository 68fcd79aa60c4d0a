//! EventDispatcher - classify, verify, route, respond

use contracts::{
    AdapterBlueprint, Event, EventStatus, EventVerifier, HealthProbe, HealthStatus, InboundEvent,
    Resource, ResponseSink, TilgangerAction, UnknownActionPolicy,
};
use observability::{record_event_dropped, record_event_received, record_response};
use tracing::{debug, info, instrument, warn};

use crate::error::DispatchError;
use crate::health::HealthCheckResponder;
use crate::probe::ConfiguredProbe;
use crate::registry::{HandlerRegistry, ResponseData};
use crate::router::ResponseRouter;
use crate::verifier::SupportedActionsVerifier;

/// What `handle` did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// An action response was posted
    Responded { status: EventStatus, records: usize },
    /// A health check response was posted
    HealthChecked(HealthStatus),
    /// Verification did not accept the event, nothing was posted
    NotAccepted(EventStatus),
}

/// Dispatches inbound events to action handlers and posts responses
///
/// Holds no per-event state; `handle` may run concurrently through `&self`.
pub struct EventDispatcher<V, S, P> {
    verifier: V,
    sink: S,
    registry: HandlerRegistry,
    health: HealthCheckResponder<P>,
    unknown_action_policy: UnknownActionPolicy,
}

impl<V, S, P> EventDispatcher<V, S, P>
where
    V: EventVerifier + Sync,
    S: ResponseSink,
    P: HealthProbe + Sync,
{
    pub fn new(
        verifier: V,
        sink: S,
        registry: HandlerRegistry,
        health: HealthCheckResponder<P>,
    ) -> Self {
        Self {
            verifier,
            sink,
            registry,
            health,
            unknown_action_policy: UnknownActionPolicy::default(),
        }
    }

    /// Set how unparseable action strings are answered
    pub fn with_unknown_action_policy(mut self, policy: UnknownActionPolicy) -> Self {
        self.unknown_action_policy = policy;
        self
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the dispatcher, returning its sink (for shutdown)
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Handle one inbound event
    ///
    /// Posts at most one response. Health checks bypass verification.
    ///
    /// # Errors
    /// - verifier failure
    /// - unparseable action under `UnknownActionPolicy::Fail`
    #[instrument(
        name = "dispatcher_handle",
        skip(self, event),
        fields(corr_id = %event.corr_id, action = %event.action, org_id = %event.org_id)
    )]
    pub async fn handle(&self, event: &InboundEvent) -> Result<DispatchOutcome, DispatchError> {
        record_event_received(&event.action);

        if event.is_health_check() {
            let status = self
                .health
                .post_health_check_response(event, &self.sink)
                .await;
            return Ok(DispatchOutcome::HealthChecked(status));
        }

        let verified = self
            .verifier
            .verify_event(event)
            .await
            .map_err(DispatchError::Verification)?;

        if verified != EventStatus::AdapterAccepted {
            debug!(status = ?verified, "Event not accepted, dropping");
            record_event_dropped(verified);
            return Ok(DispatchOutcome::NotAccepted(verified));
        }

        let response = match event.action.parse::<TilgangerAction>() {
            Ok(action) => self.respond(action, event),
            Err(_) => self.unknown_action(event)?,
        };

        let status = response.status;
        let records = response.data.len();
        info!(status = ?status, records, "Posting response");
        record_response(&event.action, status);

        self.sink.post_response(response.into());
        Ok(DispatchOutcome::Responded { status, records })
    }

    fn respond(&self, action: TilgangerAction, event: &InboundEvent) -> Event<Resource> {
        let mut response = event.derive_response(EventStatus::AdapterResponse);

        match self.registry.get(action) {
            Some(handler) => {
                handler.produce(event, &mut ResponseData::new(&mut response.data));
            }
            None => {
                debug!(action = %action, "No handler registered");
                response.status = EventStatus::AdapterRejected;
            }
        }

        response
    }

    fn unknown_action(&self, event: &InboundEvent) -> Result<Event<Resource>, DispatchError> {
        match self.unknown_action_policy {
            UnknownActionPolicy::Reject => {
                warn!("Unknown action, rejecting");
                let mut response = event.derive_response(EventStatus::AdapterRejected);
                response.message = Some(format!("unsupported action: {}", event.action));
                Ok(response)
            }
            UnknownActionPolicy::Fail => Err(DispatchError::UnknownAction {
                action: event.action.clone(),
            }),
        }
    }
}

/// Dispatcher assembled from an [`AdapterBlueprint`]
pub type AdapterDispatcher = EventDispatcher<SupportedActionsVerifier, ResponseRouter, ConfiguredProbe>;

/// Convenience function to build a dispatcher with the example handlers
#[instrument(name = "dispatcher_create", skip(blueprint), fields(adapter = %blueprint.adapter.name))]
pub async fn create_dispatcher(
    blueprint: &AdapterBlueprint,
) -> Result<AdapterDispatcher, DispatchError> {
    let registry = HandlerRegistry::with_examples();
    let verifier = SupportedActionsVerifier::from_config(&blueprint.verification);
    let probe = ConfiguredProbe::from_config(&blueprint.health)?;
    let health = HealthCheckResponder::new(probe, &blueprint.adapter.health_component);
    let router = ResponseRouter::from_configs(&blueprint.outputs).await?;

    info!(
        handlers = registry.len(),
        outputs = router.output_count(),
        policy = ?blueprint.adapter.unknown_action_policy,
        "Dispatcher created"
    );

    Ok(EventDispatcher::new(verifier, router, registry, health)
        .with_unknown_action_policy(blueprint.adapter.unknown_action_policy))
}
