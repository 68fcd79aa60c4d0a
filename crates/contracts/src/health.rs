//! Health records attached to health check responses

use serde::{Deserialize, Serialize};

/// Outcome of a connectivity probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    ApplicationHealthy,
    ApplicationUnhealthy,
}

/// Health of one named component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub component: String,
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Health {
    pub fn healthy(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::ApplicationHealthy,
            message: None,
        }
    }

    pub fn unhealthy(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::ApplicationUnhealthy,
            message: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::ApplicationHealthy
    }
}
