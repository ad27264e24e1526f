//! CLI tool for routing keys across store nodes.
//!
//! Provides commands for:
//! - Running a store node
//! - Putting and getting keys through the ring
//! - Dumping nodes and inspecting key placement
//! - A fixed demo batch against three local nodes

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
