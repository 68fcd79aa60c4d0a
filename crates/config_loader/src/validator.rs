//! Config validation
//!
//! Rules:
//! - adapter name and health component are non-empty
//! - org ids are non-empty strings
//! - tcp probe has a parseable `addr`, timeout > 0
//! - output names are non-empty and unique

use std::collections::HashSet;
use std::net::SocketAddr;

use contracts::{AdapterBlueprint, ContractError, ProbeType};

/// Validate an AdapterBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &AdapterBlueprint) -> Result<(), ContractError> {
    validate_adapter(blueprint)?;
    validate_org_ids(blueprint)?;
    validate_health(blueprint)?;
    validate_outputs(blueprint)?;
    Ok(())
}

fn validate_adapter(blueprint: &AdapterBlueprint) -> Result<(), ContractError> {
    if blueprint.adapter.name.trim().is_empty() {
        return Err(ContractError::config_validation(
            "adapter.name",
            "adapter name cannot be empty",
        ));
    }
    if blueprint.adapter.health_component.trim().is_empty() {
        return Err(ContractError::config_validation(
            "adapter.health_component",
            "health component cannot be empty",
        ));
    }
    Ok(())
}

fn validate_org_ids(blueprint: &AdapterBlueprint) -> Result<(), ContractError> {
    for (idx, org_id) in blueprint.verification.org_ids.iter().enumerate() {
        if org_id.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("verification.org_ids[{}]", idx),
                "org id cannot be empty",
            ));
        }
    }
    Ok(())
}

fn validate_health(blueprint: &AdapterBlueprint) -> Result<(), ContractError> {
    let health = &blueprint.health;

    if health.timeout_ms == 0 {
        return Err(ContractError::config_validation(
            "health.timeout_ms",
            "timeout_ms must be > 0",
        ));
    }

    if health.probe == ProbeType::Tcp {
        let addr = health.addr.as_deref().ok_or_else(|| {
            ContractError::config_validation("health.addr", "tcp probe requires 'addr'")
        })?;
        addr.parse::<SocketAddr>().map_err(|e| {
            ContractError::config_validation(
                "health.addr",
                format!("invalid address '{}': {}", addr, e),
            )
        })?;
    }

    Ok(())
}

fn validate_outputs(blueprint: &AdapterBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (idx, output) in blueprint.outputs.iter().enumerate() {
        if output.name.is_empty() {
            return Err(ContractError::config_validation(
                format!("outputs[{}].name", idx),
                "output name cannot be empty",
            ));
        }
        if !seen.insert(&output.name) {
            return Err(ContractError::config_validation(
                format!("outputs[name={}]", output.name),
                "duplicate output name",
            ));
        }
        if output.queue_capacity == 0 {
            return Err(ContractError::config_validation(
                format!("outputs[{}].queue_capacity", output.name),
                "queue_capacity must be > 0",
            ));
        }
    }
    Ok(())
}
