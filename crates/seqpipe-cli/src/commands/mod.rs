//! CLI commands

pub mod config;
pub mod pipelines;
pub mod run;

pub use run::RunArgs;
