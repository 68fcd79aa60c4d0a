//! # Integration Tests
//!
//! Integration and end-to-end tests.
//!
//! Covers:
//! - wire format snapshots of the event contract
//! - config -> dispatcher -> file output round trips
//! - health checks against a real TCP probe

#[cfg(test)]
mod contract_tests {
    use contracts::{Event, EventStatus, Health, InboundEvent, ResponseEvent};
    use serde_json::json;

    #[test]
    fn test_inbound_event_wire_format() {
        let raw = json!({
            "corrId": "c-1",
            "action": "GET_ALL_IDENTITET",
            "status": "DELIVERED_TO_ADAPTER",
            "time": 1_700_000_000_000i64,
            "orgId": "pwf.no",
            "source": "tilganger",
            "client": "vigo",
            "data": [{ "anything": true }]
        });

        let event: InboundEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.corr_id, "c-1");
        assert_eq!(event.status, EventStatus::DeliveredToAdapter);
        assert!(!event.is_health_check());
        assert_eq!(event.data.len(), 1);
    }

    #[test]
    fn test_health_response_wire_format() {
        let request = InboundEvent::new_health_check("pwf.no", "tilganger", "vigo");
        let mut response: Event<Health> = request.derive_response(EventStatus::TempUpstreamQueue);
        response.add_data(Health::healthy("adapter"));

        let value = serde_json::to_value(ResponseEvent::from(response)).unwrap();
        assert_eq!(value["corrId"], json!(request.corr_id));
        assert_eq!(value["status"], json!("TEMP_UPSTREAM_QUEUE"));
        assert_eq!(value["healthCheck"], json!(true));
        assert_eq!(value["data"][0]["status"], json!("APPLICATION_HEALTHY"));
        assert!(value.get("message").is_none());
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::path::Path;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{EventStatus, HealthStatus, InboundEvent};
    use dispatcher::{create_dispatcher, DispatchOutcome, UNHEALTHY_MESSAGE};
    use serde_json::Value;

    fn config(base_path: &Path, extra: &str) -> String {
        format!(
            r#"
[adapter]
name = "tilganger-adapter"
health_component = "tilganger"
{extra}

[verification]
org_ids = ["pwf.no"]

[[outputs]]
name = "file"
output_type = "file"

[outputs.params]
base_path = "{}"

[[outputs]]
name = "log"
output_type = "log"
"#,
            base_path.display()
        )
    }

    /// Every JSON line written under `dir`
    fn read_responses(dir: &Path) -> Vec<Value> {
        let mut lines = Vec::new();
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.extension().is_some_and(|e| e == "jsonl") {
                let content = std::fs::read_to_string(&path).unwrap();
                lines.extend(
                    content
                        .lines()
                        .map(|l| serde_json::from_str::<Value>(l).unwrap()),
                );
            }
        }
        lines
    }

    fn event(org_id: &str, action: &str) -> InboundEvent {
        InboundEvent::new(org_id, "tilganger", "vigo", action)
    }

    /// Config -> dispatcher -> FileOutput, checked on disk
    #[tokio::test]
    async fn test_e2e_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let blueprint =
            ConfigLoader::load_from_str(&config(dir.path(), ""), ConfigFormat::Toml).unwrap();
        let dispatcher = create_dispatcher(&blueprint).await.unwrap();

        let identities = event("pwf.no", "GET_ALL_IDENTITET");
        let rights = event("pwf.no", "GET_ALL_RETTIGHET");
        let update = event("pwf.no", "UPDATE_IDENTITET");
        let foreign = event("other.no", "GET_ALL_IDENTITET");
        let unknown = event("pwf.no", "DELETE_EVERYTHING");

        assert_eq!(
            dispatcher.handle(&identities).await.unwrap(),
            DispatchOutcome::Responded {
                status: EventStatus::AdapterResponse,
                records: 2
            }
        );
        assert_eq!(
            dispatcher.handle(&rights).await.unwrap(),
            DispatchOutcome::Responded {
                status: EventStatus::AdapterResponse,
                records: 2
            }
        );
        // Known action without a handler: answered, not dropped
        assert_eq!(
            dispatcher.handle(&update).await.unwrap(),
            DispatchOutcome::Responded {
                status: EventStatus::AdapterRejected,
                records: 0
            }
        );
        assert_eq!(
            dispatcher.handle(&foreign).await.unwrap(),
            DispatchOutcome::NotAccepted(EventStatus::AdapterRejected)
        );
        assert_eq!(
            dispatcher.handle(&unknown).await.unwrap(),
            DispatchOutcome::Responded {
                status: EventStatus::AdapterRejected,
                records: 0
            }
        );

        let router = dispatcher.into_sink();
        router.shutdown().await;

        let responses = read_responses(dir.path());
        assert_eq!(responses.len(), 4);

        let by_corr = |corr_id: &str| {
            responses
                .iter()
                .find(|r| r["corrId"] == Value::from(corr_id))
                .cloned()
                .unwrap()
        };

        let identity_response = by_corr(&identities.corr_id);
        assert_eq!(identity_response["status"], "ADAPTER_RESPONSE");
        assert_eq!(identity_response["orgId"], "pwf.no");
        assert_eq!(identity_response["time"], Value::from(identities.time));
        assert_eq!(identity_response["data"].as_array().unwrap().len(), 2);

        let rights_response = by_corr(&rights.corr_id);
        assert_eq!(rights_response["data"][0]["resource"]["navn"], "Batcave");

        let unhandled = by_corr(&update.corr_id);
        assert_eq!(unhandled["status"], "ADAPTER_REJECTED");
        assert!(unhandled["data"].as_array().unwrap().is_empty());

        let rejected = by_corr(&unknown.corr_id);
        assert_eq!(rejected["status"], "ADAPTER_REJECTED");
        assert_eq!(rejected["message"], "unsupported action: DELETE_EVERYTHING");
        assert!(rejected["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_e2e_fail_policy_posts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let blueprint = ConfigLoader::load_from_str(
            &config(dir.path(), r#"unknown_action_policy = "fail""#),
            ConfigFormat::Toml,
        )
        .unwrap();
        let dispatcher = create_dispatcher(&blueprint).await.unwrap();

        let result = dispatcher.handle(&event("pwf.no", "DELETE_EVERYTHING")).await;
        assert!(result.is_err());

        dispatcher.into_sink().shutdown().await;
        assert!(read_responses(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_e2e_tcp_health_probe() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let healthy_addr = listener.local_addr().unwrap();

        let closed = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let closed_addr = closed.local_addr().unwrap();
        drop(closed);

        for (addr, expected) in [
            (healthy_addr, HealthStatus::ApplicationHealthy),
            (closed_addr, HealthStatus::ApplicationUnhealthy),
        ] {
            let dir = tempfile::tempdir().unwrap();
            let health = format!(
                "\n[health]\nprobe = \"tcp\"\naddr = \"{}\"\ntimeout_ms = 500\n",
                addr
            );
            let content = format!("{}{}", config(dir.path(), ""), health);
            let blueprint = ConfigLoader::load_from_str(&content, ConfigFormat::Toml).unwrap();
            let dispatcher = create_dispatcher(&blueprint).await.unwrap();

            // Health checks bypass verification, even for foreign orgs
            let request = InboundEvent::new_health_check("other.no", "tilganger", "vigo");
            assert_eq!(
                dispatcher.handle(&request).await.unwrap(),
                DispatchOutcome::HealthChecked(expected)
            );

            dispatcher.into_sink().shutdown().await;
            let responses = read_responses(dir.path());
            assert_eq!(responses.len(), 1);

            let response = &responses[0];
            assert_eq!(response["corrId"], Value::from(request.corr_id.as_str()));
            assert_eq!(response["status"], "TEMP_UPSTREAM_QUEUE");
            assert_eq!(response["data"][0]["component"], "tilganger");
            if expected == HealthStatus::ApplicationHealthy {
                assert!(response.get("message").is_none());
            } else {
                assert_eq!(response["message"], UNHEALTHY_MESSAGE);
            }
        }

        drop(listener);
    }
}
