//! Built-in configuration defaults

use std::time::Duration;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "seqpipe.json";

/// Config file looked up under the user config directory
pub const USER_CONFIG_FILE: &str = "config.json";

/// Directory under the user config directory holding seqpipe settings
pub const USER_CONFIG_DIR: &str = "seqpipe";

/// Default timeout for control-plane HTTP requests (30 seconds)
pub const HTTP_REQUEST_SECS: u64 = 30;

/// Shorthand server aliases available without any config file
pub const BUILTIN_ALIASES: &[(&str, &str)] = &[("local", "http://localhost:8080")];

/// Get the default control-plane timeout as Duration
pub fn http_request_timeout() -> Duration {
    Duration::from_secs(HTTP_REQUEST_SECS)
}
