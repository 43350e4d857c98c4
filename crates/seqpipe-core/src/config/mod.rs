//! Configuration management
//!
//! Settings are layered: built-in defaults, a JSON config file, `SEQPIPE_*`
//! environment variables, then command-line flags.

pub mod address;
pub mod defaults;
pub mod loader;
pub mod model;

pub use address::ServerAddress;
pub use loader::{ConfigLoader, ConfigSource};
pub use model::ClientConfig;
