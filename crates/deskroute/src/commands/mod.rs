pub mod actions;
pub mod ask;
pub mod chat;
pub mod history;
pub mod init;
pub mod tickets;
pub mod traces;
pub mod version;

use deskroute_telemetry::Paths;
use std::path::Path;

/// `--home` wins over `DESKROUTE_HOME`, which wins over `~/.deskroute`
pub fn resolve_paths(home: Option<&Path>) -> anyhow::Result<Paths> {
    match home {
        Some(root) => Ok(Paths::with_root(root)),
        None => Ok(Paths::new()?),
    }
}
