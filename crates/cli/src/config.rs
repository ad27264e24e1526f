//! Command-line and environment configuration.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use corelib::{Node, NodeId};
use router::{Router, RouterConfig};

use crate::commands::Command;

/// Nodes used when none are configured.
pub const DEFAULT_NODES: [(u64, &str); 3] = [
    (0, "localhost:3000"),
    (1, "localhost:3001"),
    (2, "localhost:3002"),
];

/// Route keys across key-value store nodes with a consistent hash ring.
#[derive(Parser, Debug)]
#[command(name = "hashring", version)]
pub struct CliConfig {
    /// Store node as ID=HOST:PORT. Repeat or comma-separate for several.
    #[arg(
        short,
        long = "node",
        env = "RING_NODES",
        value_delimiter = ',',
        global = true
    )]
    pub nodes: Vec<Node>,

    /// Per-request timeout in milliseconds. Unset waits indefinitely.
    #[arg(long, env = "ROUTER_TIMEOUT_MS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Log filter, e.g. `info` or `router=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Configured nodes, or the three local defaults.
    pub fn nodes(&self) -> Vec<Node> {
        if self.nodes.is_empty() {
            DEFAULT_NODES
                .iter()
                .map(|(id, address)| Node::new(NodeId(*id), *address))
                .collect()
        } else {
            self.nodes.clone()
        }
    }

    pub fn router_config(&self) -> RouterConfig {
        RouterConfig::new()
            .with_nodes(self.nodes())
            .with_timeout(self.timeout_ms.map(Duration::from_millis))
    }

    pub fn run(self) -> anyhow::Result<()> {
        init_tracing(&self.log_level);

        if let Command::Serve { bind } = &self.command {
            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            return runtime
                .block_on(store::run(*bind))
                .with_context(|| format!("store node on {bind} stopped"));
        }

        let nodes = self.nodes();
        let router = Router::new(self.router_config())?;
        let result = self.command.execute(&router, &nodes);
        for line in &result.lines {
            println!("{line}");
        }
        Ok(())
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
