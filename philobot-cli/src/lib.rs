//! Composition root pieces for the `philobot` binary: CLI, env config, and
//! the hosting-platform health listener.

pub mod cli;
pub mod config;
pub mod health;

pub use cli::{Cli, Commands};
pub use config::EnvConfig;
pub use health::serve_health;
