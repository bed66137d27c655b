//! Best-effort push notification gateway.
//!
//! State transitions emit named events to named channels. Delivery is
//! at-most-once: errors and timeouts are logged and swallowed, and must
//! never fail or delay the transition that triggered them.

use std::time::Duration;

use serde_json::{Value, json};
use tracing::{debug, info, warn};

/// Push gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct PushConfig {
    /// HTTP endpoint events are POSTed to. Empty disables the gateway.
    pub endpoint: String,
    /// Application key sent as the `X-App-Key` header.
    pub app_key: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl From<crate::config::PushSettings> for PushConfig {
    fn from(settings: crate::config::PushSettings) -> Self {
        Self {
            endpoint: settings.endpoint,
            app_key: settings.app_key,
            timeout_ms: settings.timeout_ms,
        }
    }
}

/// Fire-and-forget event publisher.
#[derive(Debug, Clone)]
pub struct PushGateway {
    config: PushConfig,
    client: reqwest::Client,
}

impl PushGateway {
    /// Creates a gateway from configuration.
    #[must_use]
    pub fn new(config: PushConfig) -> Self {
        let timeout = if config.timeout_ms == 0 {
            2000
        } else {
            config.timeout_ms
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout))
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    /// Creates a disabled gateway that drops every event.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(PushConfig::default())
    }

    /// Returns whether an endpoint is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.config.endpoint.is_empty()
    }

    /// Emits an event to a channel. Never fails.
    ///
    /// Transport errors are logged at warn level and dropped; the caller
    /// must not treat emission as part of its own success criteria.
    pub async fn trigger(&self, channel: &str, event: &str, payload: Value) {
        if !self.is_enabled() {
            debug!(channel, event, "push gateway disabled, dropping event");
            return;
        }

        let body = json!({
            "channel": channel,
            "event": event,
            "data": payload,
        });

        let result = self
            .client
            .post(&self.config.endpoint)
            .header("X-App-Key", &self.config.app_key)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!(channel, event, "push event delivered");
            }
            Ok(response) => {
                warn!(
                    channel,
                    event,
                    status = %response.status(),
                    "push gateway rejected event"
                );
            }
            Err(e) => {
                warn!(channel, event, error = %e, "failed to push event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_gateway() {
        let gateway = PushGateway::disabled();
        assert!(!gateway.is_enabled());
    }

    #[test]
    fn test_enabled_gateway() {
        let gateway = PushGateway::new(PushConfig {
            endpoint: "http://localhost:9999/events".to_string(),
            app_key: "key".to_string(),
            timeout_ms: 100,
        });
        assert!(gateway.is_enabled());
    }

    #[tokio::test]
    async fn test_trigger_disabled_is_noop() {
        let gateway = PushGateway::disabled();
        // Must return without error even though nothing is configured.
        gateway.trigger("budget-requests", "new-request", json!({})).await;
    }

    #[tokio::test]
    async fn test_trigger_unreachable_endpoint_swallowed() {
        let gateway = PushGateway::new(PushConfig {
            endpoint: "http://127.0.0.1:1/events".to_string(),
            app_key: String::new(),
            timeout_ms: 100,
        });
        // Connection refused must be swallowed, not propagated.
        gateway
            .trigger("budget-requests", "request-approved", json!({"id": 1}))
            .await;
    }
}
