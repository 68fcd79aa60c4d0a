//! Local event verifiers

use std::collections::HashSet;

use contracts::{
    ContractError, EventStatus, EventVerifier, InboundEvent, TilgangerAction, VerificationConfig,
};
use tracing::{debug, instrument};

/// Accepts events for supported actions from allowed organisations
///
/// The organisation filter applies to every event. Action strings that do
/// not parse are accepted here and left to the dispatcher's unknown action
/// policy; a supported action without a handler is answered as rejected by
/// the dispatcher.
#[derive(Debug, Clone)]
pub struct SupportedActionsVerifier {
    supported: HashSet<TilgangerAction>,
    org_ids: HashSet<String>,
}

impl SupportedActionsVerifier {
    /// Create a verifier; empty `org_ids` allows every organisation
    pub fn new(
        supported: impl IntoIterator<Item = TilgangerAction>,
        org_ids: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            supported: supported.into_iter().collect(),
            org_ids: org_ids.into_iter().collect(),
        }
    }

    /// Build from config; no listed actions means every known action
    pub fn from_config(config: &VerificationConfig) -> Self {
        let supported = if config.supported_actions.is_empty() {
            TilgangerAction::ALL.to_vec()
        } else {
            config.supported_actions.clone()
        };
        Self::new(supported, config.org_ids.iter().cloned())
    }

    fn org_allowed(&self, org_id: &str) -> bool {
        self.org_ids.is_empty() || self.org_ids.contains(org_id)
    }

    fn status_for(&self, event: &InboundEvent) -> EventStatus {
        if !self.org_allowed(&event.org_id) {
            return EventStatus::AdapterRejected;
        }
        match event.action.parse::<TilgangerAction>() {
            Ok(action) if !self.supported.contains(&action) => EventStatus::AdapterRejected,
            _ => EventStatus::AdapterAccepted,
        }
    }
}

impl EventVerifier for SupportedActionsVerifier {
    #[instrument(
        name = "supported_actions_verify",
        skip(self, event),
        fields(corr_id = %event.corr_id, org_id = %event.org_id)
    )]
    async fn verify_event(&self, event: &InboundEvent) -> Result<EventStatus, ContractError> {
        let status = self.status_for(event);
        debug!(action = %event.action, status = ?status, "Event verified");
        Ok(status)
    }
}

/// Verifier returning a fixed status
#[derive(Debug, Clone, Copy)]
pub struct StaticVerifier {
    status: EventStatus,
}

impl StaticVerifier {
    pub fn new(status: EventStatus) -> Self {
        Self { status }
    }

    pub fn accept_all() -> Self {
        Self::new(EventStatus::AdapterAccepted)
    }
}

impl EventVerifier for StaticVerifier {
    async fn verify_event(&self, _event: &InboundEvent) -> Result<EventStatus, ContractError> {
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(org_id: &str, action: &str) -> InboundEvent {
        InboundEvent::new(org_id, "tilganger", "vfs", action)
    }

    #[tokio::test]
    async fn test_supported_action_accepted() {
        let verifier = SupportedActionsVerifier::new([TilgangerAction::GetAllIdentitet], Vec::new());
        let status = verifier
            .verify_event(&event("pwf.no", "GET_ALL_IDENTITET"))
            .await
            .unwrap();
        assert_eq!(status, EventStatus::AdapterAccepted);
    }

    #[tokio::test]
    async fn test_unsupported_action_rejected() {
        let verifier = SupportedActionsVerifier::new([TilgangerAction::GetAllIdentitet], Vec::new());
        let status = verifier
            .verify_event(&event("pwf.no", "GET_ALL_RETTIGHET"))
            .await
            .unwrap();
        assert_eq!(status, EventStatus::AdapterRejected);
    }

    #[tokio::test]
    async fn test_unparseable_action_passes_through() {
        let verifier = SupportedActionsVerifier::new([TilgangerAction::GetAllIdentitet], Vec::new());
        let status = verifier
            .verify_event(&event("pwf.no", "UNKNOWN_ACTION"))
            .await
            .unwrap();
        assert_eq!(status, EventStatus::AdapterAccepted);
    }

    #[tokio::test]
    async fn test_org_filter() {
        let verifier = SupportedActionsVerifier::new(
            [TilgangerAction::GetAllIdentitet],
            ["pwf.no".to_string()],
        );
        let other = verifier
            .verify_event(&event("rogfk.no", "GET_ALL_IDENTITET"))
            .await
            .unwrap();
        assert_eq!(other, EventStatus::AdapterRejected);
    }

    #[tokio::test]
    async fn test_org_filter_applies_to_unparseable_actions() {
        let verifier = SupportedActionsVerifier::new(
            [TilgangerAction::GetAllIdentitet],
            ["pwf.no".to_string()],
        );
        let status = verifier
            .verify_event(&event("rogfk.no", "UNKNOWN_ACTION"))
            .await
            .unwrap();
        assert_eq!(status, EventStatus::AdapterRejected);
    }

    #[tokio::test]
    async fn test_from_config_accepts_every_known_action() {
        let verifier = SupportedActionsVerifier::from_config(&VerificationConfig::default());
        assert_eq!(verifier.supported.len(), TilgangerAction::ALL.len());

        // No handler is registered for updates; acceptance leaves the reply to the dispatcher
        let status = verifier
            .verify_event(&event("pwf.no", "UPDATE_IDENTITET"))
            .await
            .unwrap();
        assert_eq!(status, EventStatus::AdapterAccepted);
    }

    #[tokio::test]
    async fn test_static_verifier() {
        let verifier = StaticVerifier::new(EventStatus::AdapterRejected);
        let status = verifier
            .verify_event(&event("pwf.no", "GET_ALL_IDENTITET"))
            .await
            .unwrap();
        assert_eq!(status, EventStatus::AdapterRejected);
    }
}
