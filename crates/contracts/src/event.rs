//! Event - the envelope exchanged with the provider
//!
//! One event is one request/response unit of work. Requests arrive with
//! arbitrary JSON data; responses carry typed resources or health records.

use serde::{Deserialize, Serialize};

use crate::{Health, Resource};

/// Action name used by the provider for synthetic health checks
pub const HEALTH_ACTION: &str = "HEALTH";

/// Inbound request event (data is left undecoded)
pub type InboundEvent = Event<serde_json::Value>;

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Created by a consumer, not yet delivered
    #[default]
    New,
    /// Handed to the adapter by the provider
    DeliveredToAdapter,
    /// Adapter will handle the event
    AdapterAccepted,
    /// Adapter refused the event
    AdapterRejected,
    /// Adapter produced a response
    AdapterResponse,
    /// Health check response waiting for the upstream queue
    TempUpstreamQueue,
    /// Response queued upstream
    UpstreamQueue,
    /// Response delivered to the consumer
    SentToClient,
}

impl EventStatus {
    /// Whether the adapter may move an event from `self` to `next`
    ///
    /// Adapter-side transitions are one-directional: an accepted request ends
    /// as a response or a rejection, a delivered request is accepted, rejected
    /// or (health checks) queued upstream.
    pub fn can_transition_to(self, next: EventStatus) -> bool {
        use EventStatus::*;
        matches!(
            (self, next),
            (New | DeliveredToAdapter, AdapterAccepted)
                | (New | DeliveredToAdapter, AdapterRejected)
                | (New | DeliveredToAdapter, TempUpstreamQueue)
                | (AdapterAccepted, AdapterResponse)
                | (AdapterAccepted, AdapterRejected)
        )
    }
}

/// Generic event envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event<T> {
    /// Correlation id shared by a request and its responses
    pub corr_id: String,

    /// Requested action (see [`crate::TilgangerAction`])
    pub action: String,

    /// Lifecycle status
    #[serde(default)]
    pub status: EventStatus,

    /// Creation time of the request (epoch millis)
    pub time: i64,

    /// Organisation the event belongs to
    pub org_id: String,

    /// Source system
    #[serde(default)]
    pub source: String,

    /// Consumer that issued the request
    #[serde(default)]
    pub client: String,

    /// Human-readable message (rejections, failed health checks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Marks a synthetic health check request
    #[serde(default)]
    pub health_check: bool,

    /// Ordered payload records
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Event<T> {
    /// Create a new request event with a fresh correlation id
    pub fn new(
        org_id: impl Into<String>,
        source: impl Into<String>,
        client: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            corr_id: uuid::Uuid::new_v4().to_string(),
            action: action.into(),
            status: EventStatus::New,
            time: chrono::Utc::now().timestamp_millis(),
            org_id: org_id.into(),
            source: source.into(),
            client: client.into(),
            message: None,
            health_check: false,
            data: Vec::new(),
        }
    }

    /// Create a health check request
    pub fn new_health_check(
        org_id: impl Into<String>,
        source: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let mut event = Self::new(org_id, source, client, HEALTH_ACTION);
        event.health_check = true;
        event
    }

    /// Whether this is a health check request
    ///
    /// True when the `healthCheck` flag is set. Providers that only send the
    /// reserved action name [`HEALTH_ACTION`] without the flag are treated the
    /// same way; that action never names a [`crate::TilgangerAction`].
    pub fn is_health_check(&self) -> bool {
        self.health_check || self.action == HEALTH_ACTION
    }

    /// Derive a response envelope
    ///
    /// Keeps the correlation identity, sets `status`, clears message and data.
    pub fn derive_response<U>(&self, status: EventStatus) -> Event<U> {
        Event {
            corr_id: self.corr_id.clone(),
            action: self.action.clone(),
            status,
            time: self.time,
            org_id: self.org_id.clone(),
            source: self.source.clone(),
            client: self.client.clone(),
            message: None,
            health_check: self.health_check,
            data: Vec::new(),
        }
    }

    /// Append a payload record
    pub fn add_data(&mut self, item: T) {
        self.data.push(item);
    }

    /// Whether `other` belongs to the same unit of work
    pub fn same_correlation<U>(&self, other: &Event<U>) -> bool {
        self.corr_id == other.corr_id
            && self.org_id == other.org_id
            && self.source == other.source
            && self.client == other.client
            && self.action == other.action
    }
}

/// Response produced by the adapter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseEvent {
    /// Health check response
    Health(Event<Health>),
    /// Action response carrying resources
    Resources(Event<Resource>),
}

impl ResponseEvent {
    pub fn corr_id(&self) -> &str {
        match self {
            Self::Health(e) => &e.corr_id,
            Self::Resources(e) => &e.corr_id,
        }
    }

    pub fn action(&self) -> &str {
        match self {
            Self::Health(e) => &e.action,
            Self::Resources(e) => &e.action,
        }
    }

    pub fn status(&self) -> EventStatus {
        match self {
            Self::Health(e) => e.status,
            Self::Resources(e) => e.status,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Health(e) => e.message.as_deref(),
            Self::Resources(e) => e.message.as_deref(),
        }
    }

    /// Number of payload records
    pub fn data_len(&self) -> usize {
        match self {
            Self::Health(e) => e.data.len(),
            Self::Resources(e) => e.data.len(),
        }
    }
}

impl From<Event<Health>> for ResponseEvent {
    fn from(event: Event<Health>) -> Self {
        Self::Health(event)
    }
}

impl From<Event<Resource>> for ResponseEvent {
    fn from(event: Event<Resource>) -> Self {
        Self::Resources(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_response_keeps_correlation() {
        let mut request = InboundEvent::new("pwf.no", "tilganger", "client", "GET_ALL_IDENTITET");
        request.status = EventStatus::AdapterAccepted;
        request.message = Some("hello".into());
        request.add_data(serde_json::json!({"query": "x"}));

        let response: Event<Resource> = request.derive_response(EventStatus::AdapterResponse);

        assert!(request.same_correlation(&response));
        assert_eq!(response.time, request.time);
        assert_eq!(response.status, EventStatus::AdapterResponse);
        assert!(response.message.is_none());
        assert!(response.data.is_empty());
    }

    #[test]
    fn test_health_check_detection() {
        let health = InboundEvent::new_health_check("pwf.no", "tilganger", "client");
        assert!(health.is_health_check());

        let mut by_action = InboundEvent::new("pwf.no", "tilganger", "client", HEALTH_ACTION);
        by_action.health_check = false;
        assert!(by_action.is_health_check());

        let mut flagged = InboundEvent::new("pwf.no", "tilganger", "client", "GET_ALL_RETTIGHET");
        flagged.health_check = true;
        assert!(flagged.is_health_check());

        let regular = InboundEvent::new("pwf.no", "tilganger", "client", "GET_ALL_RETTIGHET");
        assert!(!regular.is_health_check());
        assert!(HEALTH_ACTION.parse::<crate::TilgangerAction>().is_err());
    }

    #[test]
    fn test_fresh_correlation_ids() {
        let a = InboundEvent::new("pwf.no", "s", "c", "GET_ALL_IDENTITET");
        let b = InboundEvent::new("pwf.no", "s", "c", "GET_ALL_IDENTITET");
        assert_ne!(a.corr_id, b.corr_id);
    }

    #[test]
    fn test_status_transitions() {
        use EventStatus::*;
        assert!(AdapterAccepted.can_transition_to(AdapterResponse));
        assert!(AdapterAccepted.can_transition_to(AdapterRejected));
        assert!(DeliveredToAdapter.can_transition_to(TempUpstreamQueue));
        assert!(!AdapterResponse.can_transition_to(AdapterAccepted));
        assert!(!AdapterRejected.can_transition_to(AdapterResponse));
        assert!(!AdapterAccepted.can_transition_to(TempUpstreamQueue));
    }

    #[test]
    fn test_decode_provider_json() {
        let json = r#"{
            "corrId": "c0ffee",
            "action": "GET_ALL_RETTIGHET",
            "status": "DELIVERED_TO_ADAPTER",
            "time": 1700000000000,
            "orgId": "pwf.no",
            "source": "tilganger",
            "client": "vfs"
        }"#;
        let event: InboundEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.corr_id, "c0ffee");
        assert_eq!(event.status, EventStatus::DeliveredToAdapter);
        assert!(!event.health_check);
        assert!(event.data.is_empty());
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let request = InboundEvent::new("pwf.no", "tilganger", "vfs", "GET_ALL_IDENTITET");
        let response: ResponseEvent = request
            .derive_response::<Resource>(EventStatus::AdapterRejected)
            .into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["corrId"], request.corr_id.as_str());
        assert_eq!(value["status"], "ADAPTER_REJECTED");
        assert!(value.get("message").is_none());
    }
}
