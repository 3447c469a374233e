//! Liveness report: uptime plus which upstream providers are configured

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

/// Health status for a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// Component health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall service health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub version: String,
    pub components: Vec<ComponentHealth>,
}

/// Provider credentials as seen at startup
#[derive(Debug, Clone)]
struct ProviderState {
    name: &'static str,
    configured: bool,
    /// Whether the service is usable at all without this provider
    required: bool,
}

#[derive(Debug, Clone)]
pub struct HealthState {
    started_at: DateTime<Utc>,
    providers: Vec<ProviderState>,
}

impl HealthState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            started_at: Utc::now(),
            providers: vec![
                ProviderState {
                    name: "football_data",
                    configured: !config.football_data.api_token.is_empty(),
                    required: true,
                },
                ProviderState {
                    name: "odds_api",
                    configured: !config.odds.api_key.is_empty(),
                    required: false,
                },
                ProviderState {
                    name: "chat",
                    configured: config.assistant.is_configured(),
                    required: false,
                },
            ],
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// A missing optional key degrades the service, a missing fixture key
    /// leaves it unable to answer most requests.
    pub fn report(&self) -> HealthResponse {
        let mut overall = HealthStatus::Healthy;

        let components = self
            .providers
            .iter()
            .map(|p| {
                let status = match (p.configured, p.required) {
                    (true, _) => HealthStatus::Healthy,
                    (false, false) => HealthStatus::Degraded,
                    (false, true) => HealthStatus::Unhealthy,
                };
                overall = worst(overall, status);
                ComponentHealth {
                    name: p.name.to_string(),
                    status,
                    message: (!p.configured).then(|| "API key not configured".to_string()),
                }
            })
            .collect();

        let now = Utc::now();
        HealthResponse {
            status: overall,
            timestamp: now,
            uptime_seconds: (now - self.started_at).num_seconds().max(0) as u64,
            version: env!("CARGO_PKG_VERSION").to_string(),
            components,
        }
    }
}

fn worst(a: HealthStatus, b: HealthStatus) -> HealthStatus {
    use HealthStatus::*;
    match (a, b) {
        (Unhealthy, _) | (_, Unhealthy) => Unhealthy,
        (Degraded, _) | (_, Degraded) => Degraded,
        _ => Healthy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_service_is_unhealthy() {
        let report = HealthState::new(&AppConfig::default()).report();
        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert_eq!(report.components.len(), 3);
        assert!(report.components.iter().all(|c| c.message.is_some()));
    }

    #[test]
    fn test_missing_optional_keys_degrade() {
        let mut config = AppConfig::default();
        config.football_data.api_token = "token".into();
        let report = HealthState::new(&config).report();

        assert_eq!(report.status, HealthStatus::Degraded);
        assert!(report.components[0].status.is_healthy());

        config.odds.api_key = "key".into();
        config.assistant.api_key = "key".into();
        assert!(HealthState::new(&config).report().status.is_healthy());
    }
}
