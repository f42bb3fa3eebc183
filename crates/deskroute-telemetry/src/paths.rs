//! Path resolution for fixture and state files

use std::path::{Path, PathBuf};

/// Environment variable overriding the assistant home directory
pub const HOME_ENV: &str = "DESKROUTE_HOME";

/// Resolves standard paths for fixtures, stores and configuration
#[derive(Debug, Clone)]
pub struct Paths {
    pub root: PathBuf,
}

impl Paths {
    /// Resolve the home directory from `DESKROUTE_HOME`, falling back to `~/.deskroute`
    pub fn new() -> std::io::Result<Self> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(root));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self::with_root(home.join(".deskroute")))
    }

    /// Use an explicit home directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Get deskroute.json path (router tuning)
    pub fn config_file(&self) -> PathBuf {
        self.root.join("deskroute.json")
    }

    pub fn faqs_file(&self) -> PathBuf {
        self.data_dir().join("faqs.json")
    }

    pub fn emails_file(&self) -> PathBuf {
        self.data_dir().join("sample_emails.json")
    }

    pub fn tickets_file(&self) -> PathBuf {
        self.data_dir().join("tickets.json")
    }

    pub fn conversation_file(&self) -> PathBuf {
        self.data_dir().join("conversation_history.json")
    }

    pub fn trace_file(&self) -> PathBuf {
        self.data_dir().join("trace_log.json")
    }

    pub fn actions_config_file(&self) -> PathBuf {
        self.config_dir().join("actions_config.json")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
