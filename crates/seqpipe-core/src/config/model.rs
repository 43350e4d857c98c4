//! Client configuration model

use super::address::ServerAddress;
use super::defaults;
use crate::error::{SeqpipeError, SeqpipeResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration
///
/// Every field is optional so that partial sources (a config file that only
/// defines aliases, an environment that only sets the server) merge cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Default server address or alias
    pub server: Option<String>,
    /// Shorthand name to server address
    pub aliases: BTreeMap<String, String>,
    /// Root directory for stage output
    pub output_dir: Option<PathBuf>,
    /// Control-plane request timeout; `0` disables it
    pub http_timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Configuration with only the built-in defaults
    pub fn builtin() -> Self {
        Self {
            aliases: defaults::BUILTIN_ALIASES
                .iter()
                .map(|(name, addr)| (name.to_string(), addr.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Merge another config on top of this one; set fields in `other` win
    pub fn merge(&mut self, other: ClientConfig) {
        if other.server.is_some() {
            self.server = other.server;
        }
        self.aliases.extend(other.aliases);
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.http_timeout_secs.is_some() {
            self.http_timeout_secs = other.http_timeout_secs;
        }
    }

    /// Resolve a server name through the alias table and parse it
    pub fn resolve_server(&self, name: Option<&str>) -> SeqpipeResult<ServerAddress> {
        let name = name.or(self.server.as_deref()).ok_or_else(|| {
            SeqpipeError::config("no server given; pass --server or set SEQPIPE_SERVER")
        })?;
        let target = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        ServerAddress::parse(target)
    }

    /// Effective control-plane timeout, `None` when disabled
    pub fn http_timeout(&self) -> Option<Duration> {
        match self.http_timeout_secs {
            None => Some(defaults::http_request_timeout()),
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }

    /// Check the configuration for values that can never work
    pub fn validate(&self) -> SeqpipeResult<()> {
        for (name, addr) in &self.aliases {
            if name.trim().is_empty() {
                return Err(SeqpipeError::config("alias names must not be empty"));
            }
            ServerAddress::parse(addr).map_err(|e| {
                SeqpipeError::config(format!("alias '{}' is not a valid address: {}", name, e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_local_alias() {
        let config = ClientConfig::builtin();
        let addr = config.resolve_server(Some("local")).unwrap();
        assert_eq!(addr.http_base().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_unaliased_name_is_parsed_directly() {
        let config = ClientConfig::builtin();
        let addr = config.resolve_server(Some("seq.lab:9000")).unwrap();
        assert_eq!(addr.websocket_url().as_str(), "ws://seq.lab:9000/");
    }

    #[test]
    fn test_missing_server_is_config_error() {
        let config = ClientConfig::builtin();
        let err = config.resolve_server(None).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG");
    }

    #[test]
    fn test_merge_overrides_set_fields_only() {
        let mut base = ClientConfig::builtin();
        base.output_dir = Some(PathBuf::from("/data/out"));

        let mut overlay = ClientConfig::default();
        overlay.server = Some("cluster".to_string());
        overlay
            .aliases
            .insert("cluster".to_string(), "https://cluster.lab".to_string());

        base.merge(overlay);
        assert_eq!(base.server.as_deref(), Some("cluster"));
        assert_eq!(base.output_dir, Some(PathBuf::from("/data/out")));
        assert!(base.aliases.contains_key("local"));
        assert!(base.aliases.contains_key("cluster"));
    }

    #[test]
    fn test_http_timeout() {
        let mut config = ClientConfig::default();
        assert_eq!(config.http_timeout(), Some(Duration::from_secs(30)));
        config.http_timeout_secs = Some(0);
        assert_eq!(config.http_timeout(), None);
        config.http_timeout_secs = Some(5);
        assert_eq!(config.http_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_validate_rejects_bad_alias() {
        let mut config = ClientConfig::builtin();
        config
            .aliases
            .insert("broken".to_string(), "gopher://nowhere".to_string());
        assert!(config.validate().is_err());
    }
}
