//! CLI subcommands.

use std::net::SocketAddr;

use clap::Subcommand;
use tracing::info;

use corelib::protocol;
use corelib::Node;
use router::Router;

/// Keys and values written by the demo batch.
const DEMO_PAIRS: [(&str, &str); 10] = [
    ("1", "a"),
    ("2", "b"),
    ("3", "c"),
    ("4", "d"),
    ("5", "e"),
    ("6", "f"),
    ("7", "g"),
    ("8", "h"),
    ("9", "i"),
    ("10", "j"),
];

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a store node.
    Serve {
        #[arg(long, env = "STORE_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
    /// Store VALUE under KEY on the owning node.
    Put { key: String, value: String },
    /// Fetch keys from their owning nodes.
    Get {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Dump nodes by address. Defaults to every configured node.
    GetAll { addresses: Vec<String> },
    /// Show which node owns each key, without contacting it.
    Locate {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Put keys 1..=10, read them back, then dump every node.
    Demo,
}

/// Lines a command wants printed on stdout.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub lines: Vec<String>,
}

impl CommandResult {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl Command {
    /// Run against `router`. `nodes` is the configured node list, used
    /// wherever every node has to be visited.
    ///
    /// `Serve` is handled by the caller and produces no output here.
    pub fn execute(&self, router: &Router, nodes: &[Node]) -> CommandResult {
        let mut out = CommandResult::default();
        match self {
            Command::Serve { .. } => {}
            Command::Put { key, value } => put(router, key, value, &mut out),
            Command::Get { keys } => {
                for key in keys {
                    get(router, key, &mut out);
                }
            }
            Command::GetAll { addresses } => {
                if addresses.is_empty() {
                    for node in nodes {
                        get_all(router, &node.address, &mut out);
                    }
                } else {
                    for address in addresses {
                        get_all(router, address, &mut out);
                    }
                }
            }
            Command::Locate { keys } => {
                for key in keys {
                    let node = router.locate(key);
                    out.push(format!(
                        "{key}\t{}\t{}\t{}",
                        node.id,
                        node.address,
                        router.ring().hash(key)
                    ));
                }
            }
            Command::Demo => demo(router, nodes, &mut out),
        }
        out
    }
}

fn put(router: &Router, key: &str, value: &str, out: &mut CommandResult) {
    let node = router.locate(key);
    let url = protocol::put_url(&node.address, key, value);
    if router.put(key, value) {
        out.push(format!("{url} PUT successful"));
    } else {
        out.push(format!("{url} PUT failed"));
    }
}

fn get(router: &Router, key: &str, out: &mut CommandResult) {
    if let Some(record) = router.get(key) {
        out.push(protocol::encode(&record));
    }
}

fn get_all(router: &Router, address: &str, out: &mut CommandResult) {
    if let Some(records) = router.get_all(address) {
        out.push(protocol::encode(&records));
    }
}

fn demo(router: &Router, nodes: &[Node], out: &mut CommandResult) {
    info!(nodes = nodes.len(), "running demo batch");

    out.push("Inserting data into cache:");
    for (key, value) in DEMO_PAIRS {
        put(router, key, value, out);
    }

    out.push("Retrieving single data from cache:");
    for (key, _) in DEMO_PAIRS {
        get(router, key, out);
    }

    out.push("Retrieving all data from cache:");
    for node in nodes {
        get_all(router, &node.address, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::NodeId;
    use router::RouterConfig;

    fn offline_router() -> (Router, Vec<Node>) {
        // Port 1 is privileged and unused, so every request is refused.
        let nodes = vec![
            Node::new(NodeId(0), "127.0.0.1:1"),
            Node::new(NodeId(1), "127.0.0.2:1"),
        ];
        let router = Router::new(RouterConfig::new().with_nodes(nodes.clone())).unwrap();
        (router, nodes)
    }

    #[test]
    fn test_locate_prints_owner() {
        let (router, nodes) = offline_router();
        let result = Command::Locate {
            keys: vec!["7".into()],
        }
        .execute(&router, &nodes);
        assert_eq!(result.lines.len(), 1);
        let owner = router.locate("7");
        assert!(result.lines[0].starts_with(&format!("7\t{}\t{}\t", owner.id, owner.address)));
    }

    #[test]
    fn test_failed_requests_print_nothing() {
        let (router, nodes) = offline_router();
        let get = Command::Get {
            keys: vec!["1".into(), "2".into()],
        };
        assert!(get.execute(&router, &nodes).lines.is_empty());
        let get_all = Command::GetAll { addresses: vec![] };
        assert!(get_all.execute(&router, &nodes).lines.is_empty());
    }

    #[test]
    fn test_demo_survives_dead_nodes() {
        let (router, nodes) = offline_router();
        let result = Command::Demo.execute(&router, &nodes);
        let failed = result.lines.iter().filter(|l| l.ends_with("PUT failed")).count();
        assert_eq!(failed, DEMO_PAIRS.len());
        assert_eq!(result.lines.len(), DEMO_PAIRS.len() + 3);
    }
}
