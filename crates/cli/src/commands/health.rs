//! `health` command implementation.

use anyhow::{Context, Result};
use contracts::{HealthProbe, HealthStatus, InboundEvent, ResponseEvent, ResponseSink};
use dispatcher::{ConfiguredProbe, HealthCheckResponder, RecordingSink, ResponseRouter};

use crate::cli::HealthArgs;
use crate::error::CliError;

const HEALTH_SOURCE: &str = "tilganger-adapter-cli";
const HEALTH_CLIENT: &str = "cli";

/// Forwards to `inner` and keeps a copy for printing
struct CapturingSink<'a, S> {
    inner: &'a S,
    captured: RecordingSink,
}

impl<S: ResponseSink> ResponseSink for CapturingSink<'_, S> {
    fn post_response(&self, event: ResponseEvent) {
        self.captured.post_response(event.clone());
        self.inner.post_response(event);
    }
}

/// Answer `request` through the responder, posting to `sink`
///
/// Returns the probe outcome and the posted response.
async fn post_and_capture<P, S>(
    responder: &HealthCheckResponder<P>,
    request: &InboundEvent,
    sink: &S,
) -> (HealthStatus, Option<ResponseEvent>)
where
    P: HealthProbe + Sync,
    S: ResponseSink,
{
    let capturing = CapturingSink {
        inner: sink,
        captured: RecordingSink::new(),
    };
    let status = responder.post_health_check_response(request, &capturing).await;
    (status, capturing.captured.responses().into_iter().next())
}

/// Execute the `health` command
///
/// Runs the configured probe once, posts the response to the configured
/// outputs and prints it.
pub async fn run_health(args: &HealthArgs) -> Result<()> {
    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let org_id = args
        .org_id
        .clone()
        .or_else(|| blueprint.verification.org_ids.first().cloned())
        .unwrap_or_default();

    let probe = ConfiguredProbe::from_config(&blueprint.health)?;
    let responder = HealthCheckResponder::new(probe, &blueprint.adapter.health_component);
    let router = ResponseRouter::from_configs(&blueprint.outputs)
        .await
        .context("Failed to start outputs")?;

    let request = InboundEvent::new_health_check(org_id, HEALTH_SOURCE, HEALTH_CLIENT);
    let (status, response) = post_and_capture(&responder, &request, &router).await;
    router.shutdown().await;

    if args.json {
        let json =
            serde_json::to_string_pretty(&response).context("Failed to serialize health response")?;
        println!("{}", json);
    } else if status == HealthStatus::ApplicationHealthy {
        println!("✓ {} is healthy", responder.component());
    } else {
        println!("✗ {} is unhealthy", responder.component());
        if let Some(message) = response.as_ref().and_then(|r| r.message()) {
            println!("\n  {}", message);
        }
    }

    match status {
        HealthStatus::ApplicationHealthy => Ok(()),
        HealthStatus::ApplicationUnhealthy => {
            Err(CliError::unhealthy(responder.component()).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::EventStatus;
    use dispatcher::{StaticProbe, UNHEALTHY_MESSAGE};

    #[tokio::test]
    async fn test_unhealthy_check_reaches_sink_and_caller() {
        let responder = HealthCheckResponder::new(StaticProbe(false), "tilganger");
        let downstream = RecordingSink::new();
        let request = InboundEvent::new_health_check("pwf.no", HEALTH_SOURCE, HEALTH_CLIENT);

        let (status, response) = post_and_capture(&responder, &request, &downstream).await;

        assert_eq!(status, HealthStatus::ApplicationUnhealthy);
        let response = response.unwrap();
        assert_eq!(response.corr_id(), request.corr_id);
        assert_eq!(response.status(), EventStatus::TempUpstreamQueue);
        assert_eq!(response.message(), Some(UNHEALTHY_MESSAGE));

        let posted = downstream.responses();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].corr_id(), request.corr_id);
    }

    #[tokio::test]
    async fn test_healthy_check() {
        let responder = HealthCheckResponder::new(StaticProbe(true), "tilganger");
        let downstream = RecordingSink::new();
        let request = InboundEvent::new_health_check("pwf.no", HEALTH_SOURCE, HEALTH_CLIENT);

        let (status, response) = post_and_capture(&responder, &request, &downstream).await;

        assert_eq!(status, HealthStatus::ApplicationHealthy);
        assert!(response.unwrap().message().is_none());
        assert_eq!(downstream.len(), 1);
    }
}
