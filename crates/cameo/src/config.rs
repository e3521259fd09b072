//! Server configuration.
//!
//! Every field has a default. [`ServerConfig::from_env`] layers
//! environment overrides on top; a value that is empty or does not parse
//! is logged and the default is kept.

use std::time::Duration;

use cameo_session::RegistryConfig;
use serde::Deserialize;

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on. `CAMEO_HOST`.
    pub host: String,
    /// TCP port. `PORT`.
    pub port: u16,
    /// How long a game may wait for its second player. `CAMEO_WAITING_TTL_SECS`.
    pub waiting_ttl_secs: u64,
    /// How often waiting games are checked for expiry. `CAMEO_SWEEP_INTERVAL_SECS`.
    pub sweep_interval_secs: u64,
    /// Upper bound on live games. `CAMEO_MAX_SESSIONS`.
    pub max_sessions: usize,
    /// Candidate codes tried per create before giving up.
    pub code_retry_budget: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let registry = RegistryConfig::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            waiting_ttl_secs: 600,
            sweep_interval_secs: 30,
            max_sessions: registry.max_sessions,
            code_retry_budget: registry.code_retry_budget,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("CAMEO_HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        override_parsed(&lookup, "PORT", &mut config.port, |_| true);
        override_parsed(&lookup, "CAMEO_WAITING_TTL_SECS", &mut config.waiting_ttl_secs, |n| *n > 0);
        override_parsed(&lookup, "CAMEO_SWEEP_INTERVAL_SECS", &mut config.sweep_interval_secs, |n| *n > 0);
        override_parsed(&lookup, "CAMEO_MAX_SESSIONS", &mut config.max_sessions, |n| *n > 0);

        config
    }

    /// `host:port`, ready for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn waiting_ttl(&self) -> Duration {
        Duration::from_secs(self.waiting_ttl_secs)
    }

    /// Never zero, since a zero period would make the sweep timer panic.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }

    /// The registry's slice of this config.
    pub fn registry(&self) -> RegistryConfig {
        RegistryConfig {
            max_sessions: self.max_sessions,
            code_retry_budget: self.code_retry_budget,
        }
    }
}

fn override_parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    slot: &mut T,
    valid: impl Fn(&T) -> bool,
) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => *slot = value,
        _ => tracing::warn!(key, value = %raw, "ignoring invalid config value, keeping default"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_listens_on_port_3000() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.waiting_ttl(), Duration::from_secs(600));
        assert_eq!(config.sweep_interval(), Duration::from_secs(30));
        assert_eq!(config.max_sessions, 450_000);
    }

    #[test]
    fn test_from_lookup_applies_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("CAMEO_HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("CAMEO_WAITING_TTL_SECS", "60"),
            ("CAMEO_SWEEP_INTERVAL_SECS", "5"),
            ("CAMEO_MAX_SESSIONS", "10"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.waiting_ttl_secs, 60);
        assert_eq!(config.sweep_interval_secs, 5);
        assert_eq!(config.registry().max_sessions, 10);
    }

    #[test]
    fn test_from_lookup_invalid_values_keep_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("CAMEO_HOST", "  "),
            ("PORT", "eighty"),
            ("CAMEO_WAITING_TTL_SECS", "0"),
            ("CAMEO_SWEEP_INTERVAL_SECS", "-3"),
            ("CAMEO_MAX_SESSIONS", ""),
        ]));
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_deserialize_partial_json_fills_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"port": 4000}"#).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.code_retry_budget, 64);
    }

    #[test]
    fn test_sweep_interval_never_zero() {
        let config = ServerConfig {
            sweep_interval_secs: 0,
            ..ServerConfig::default()
        };
        assert_eq!(config.sweep_interval(), Duration::from_secs(1));
    }
}
