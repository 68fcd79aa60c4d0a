//! HealthProbe trait - adapter to application connectivity check

/// Connectivity probe injected into the health check responder
#[trait_variant::make(HealthProbe: Send)]
pub trait LocalHealthProbe {
    /// Probe name (used for logging)
    fn name(&self) -> &str;

    /// Returns `true` when the downstream application is reachable
    async fn check(&self) -> bool;
}
