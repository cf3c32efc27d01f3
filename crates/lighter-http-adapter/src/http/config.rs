/*
[INPUT]:  Defaults, YAML documents
[OUTPUT]: ClientConfig consumed by the transport builder and client session
[POS]:    HTTP layer - client configuration
[UPDATE]: When adding connection options or keep-alive tunables
*/

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::{LighterError, Result};

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Overall per-request timeout
    #[serde(with = "duration_ms")]
    pub timeout: Duration,
    /// Connect timeout, TLS handshake included
    #[serde(with = "duration_ms")]
    pub connect_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    #[serde(with = "duration_ms")]
    pub pool_idle_timeout: Duration,
    #[serde(with = "duration_ms")]
    pub tcp_keepalive: Duration,
    /// Fixed proxy for every scheme, e.g. `http://10.0.0.2:3128`
    pub proxy: Option<String>,
    /// Sent as the `Channel-Name` header on transaction submission
    pub channel_name: String,
    pub fat_finger_protection: bool,
    /// Cadence of the keep-alive driver
    #[serde(with = "duration_ms")]
    pub keep_alive_interval: Duration,
    /// Idle time after which a keep-alive tick issues a probe
    #[serde(with = "duration_ms")]
    pub keep_alive_idle: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(5),
            pool_max_idle_per_host: 50,
            pool_idle_timeout: Duration::from_secs(120),
            tcp_keepalive: Duration::from_secs(120),
            proxy: None,
            channel_name: String::new(),
            fat_finger_protection: true,
            keep_alive_interval: Duration::from_secs(10),
            keep_alive_idle: Duration::from_secs(60),
        }
    }
}

impl ClientConfig {
    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|err| LighterError::Config(format!("parse client config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| {
            LighterError::Config(format!("read client config {}: {err}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Reject values the keep-alive driver cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.keep_alive_interval.is_zero() {
            return Err(LighterError::Config(
                "keep_alive_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Durations as integer milliseconds
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).map_err(serde::ser::Error::custom)?;
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_transport_parameters() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.pool_max_idle_per_host, 50);
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(120));
        assert_eq!(config.tcp_keepalive, Duration::from_secs(120));
        assert!(config.fat_finger_protection);
        assert!(config.channel_name.is_empty());
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ClientConfig::from_yaml_str(
            "channel_name: mm-bot\nfat_finger_protection: false\ntimeout: 1500\n",
        )
        .expect("parse yaml");

        assert_eq!(config.channel_name, "mm-bot");
        assert!(!config.fat_finger_protection);
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.keep_alive_idle, Duration::from_secs(60));
        assert_eq!(config.keep_alive_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = ClientConfig::from_yaml_str("timeout: soon").unwrap_err();
        assert!(matches!(err, LighterError::Config(_)));
    }

    #[test]
    fn test_zero_keep_alive_interval_rejected() {
        let err = ClientConfig::from_yaml_str("keep_alive_interval: 0\nkeep_alive_idle: 0\n")
            .unwrap_err();
        assert!(matches!(err, LighterError::Config(_)));

        let config = ClientConfig {
            keep_alive_interval: Duration::ZERO,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_keep_alive_idle_accepted() {
        let config = ClientConfig::from_yaml_str("keep_alive_idle: 0\n").expect("parse yaml");
        assert_eq!(config.keep_alive_idle, Duration::ZERO);
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "proxy: http://127.0.0.1:3128").expect("write yaml");
        writeln!(file, "pool_max_idle_per_host: 8").expect("write yaml");

        let config = ClientConfig::from_yaml_file(file.path()).expect("load yaml");
        assert_eq!(config.proxy.as_deref(), Some("http://127.0.0.1:3128"));
        assert_eq!(config.pool_max_idle_per_host, 8);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = ClientConfig::from_yaml_file("/nonexistent/lighter.yaml").unwrap_err();
        assert!(matches!(err, LighterError::Config(_)));
    }
}
