//! Configuration loading and management

use super::defaults;
use super::model::ClientConfig;
use crate::error::{SeqpipeError, SeqpipeResult};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Configuration from a JSON file; missing optional files are skipped
    File { path: PathBuf, required: bool },
    /// Configuration from `SEQPIPE_*` environment variables
    Environment,
    /// Values given on the command line
    CommandLine(ClientConfig),
    /// Built-in defaults
    Default,
}

/// Configuration loader with support for multiple sources
///
/// Sources are applied in the order they were added, later ones winning.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader for the standard lookup order: defaults, config file,
    /// environment. An explicit path must exist; discovered ones may not.
    pub fn discover(explicit: Option<&Path>) -> Self {
        let loader = Self::new().with_defaults();
        let loader = match explicit {
            Some(path) => loader.with_file(path, true),
            None => match default_config_path() {
                Some(path) => loader.with_file(path, false),
                None => loader,
            },
        };
        loader.with_env()
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(self, path: P, required: bool) -> Self {
        self.add_source(ConfigSource::File {
            path: path.as_ref().to_path_buf(),
            required,
        })
    }

    /// Add environment variables source
    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    /// Add command line overrides
    pub fn with_args(self, args: ClientConfig) -> Self {
        self.add_source(ConfigSource::CommandLine(args))
    }

    /// Add default configuration source
    pub fn with_defaults(self) -> Self {
        self.add_source(ConfigSource::Default)
    }

    /// Load configuration from all sources
    pub fn load(self) -> SeqpipeResult<ClientConfig> {
        let mut config = ClientConfig::default();
        for source in self.sources {
            let layer = load_from_source(source)?;
            config.merge(layer);
        }
        config.validate()?;
        tracing::debug!(server = ?config.server, aliases = config.aliases.len(), "Loaded configuration");
        Ok(config)
    }
}

fn load_from_source(source: ConfigSource) -> SeqpipeResult<ClientConfig> {
    match source {
        ConfigSource::File { path, required } => load_from_file(&path, required),
        ConfigSource::Environment => load_from_env_with(|key| env::var(key).ok()),
        ConfigSource::CommandLine(args) => Ok(args),
        ConfigSource::Default => Ok(ClientConfig::builtin()),
    }
}

/// First existing config file among `./seqpipe.json` and the user config dir
pub fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    let user = dirs::config_dir()?
        .join(defaults::USER_CONFIG_DIR)
        .join(defaults::USER_CONFIG_FILE);
    user.is_file().then_some(user)
}

fn load_from_file(path: &Path, required: bool) -> SeqpipeResult<ClientConfig> {
    if !path.exists() {
        if required {
            return Err(SeqpipeError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        tracing::debug!("Config file {} not present, skipping", path.display());
        return Ok(ClientConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        SeqpipeError::config(format!("failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content)
        .map_err(|e| SeqpipeError::config(format!("failed to parse {}: {}", path.display(), e)))
}

/// Load configuration from `SEQPIPE_*` variables using the given lookup
pub(crate) fn load_from_env_with<F>(lookup: F) -> SeqpipeResult<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ClientConfig::default();

    if let Some(server) = lookup("SEQPIPE_SERVER") {
        config.server = Some(server);
    }
    if let Some(dir) = lookup("SEQPIPE_OUTPUT_DIR") {
        config.output_dir = Some(PathBuf::from(dir));
    }
    if let Some(secs) = lookup("SEQPIPE_HTTP_TIMEOUT_SECS") {
        let secs = secs
            .trim()
            .parse()
            .map_err(|_| SeqpipeError::config("Invalid SEQPIPE_HTTP_TIMEOUT_SECS value"))?;
        config.http_timeout_secs = Some(secs);
    }

    Ok(config)
}
