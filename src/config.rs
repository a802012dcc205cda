//! Server configuration.
//!
//! Values come from an optional YAML file (named by `DOCSERVE_CONFIG`) and are
//! then overridden by the `PORT` and `DOCUMENT_ROOT` environment variables.
//! Every field has a default, so an empty file is a valid configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the YAML configuration file.
pub const CONFIG_ENV: &str = "DOCSERVE_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listener binds to
    pub host: String,

    /// Port the listener binds to
    pub port: u16,

    /// Directory all served and fallback files live under
    pub document_root: PathBuf,

    /// File served for targets ending in `/`
    pub default_index: String,

    /// Document served when the requested file cannot be read
    pub not_found_page: String,

    /// Document served for any method other than GET
    pub not_implemented_page: String,

    /// Maximum number of connections handled at once
    pub max_workers: usize,

    /// Maximum length of a request line, in bytes
    pub max_request_line: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8888,
            document_root: PathBuf::from("www"),
            default_index: "index.html".to_string(),
            not_found_page: "401.html".to_string(),
            not_implemented_page: "501.html".to_string(),
            max_workers: 100,
            max_request_line: 8192,
        }
    }
}

impl Config {
    /// Loads the configuration from the environment.
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(port) = std::env::var("PORT") {
            cfg.port = port
                .parse()
                .with_context(|| format!("invalid PORT value {port:?}"))?;
        }

        if let Ok(root) = std::env::var("DOCUMENT_ROOT") {
            cfg.document_root = PathBuf::from(root);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::from_yaml(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        // serde_yaml rejects an empty document, treat it as "all defaults"
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Checks the values a YAML file or environment could get wrong.
    ///
    /// The document root itself is checked when the request handler is built,
    /// since that needs the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            anyhow::bail!("max_workers must be at least 1");
        }
        if self.max_request_line == 0 {
            anyhow::bail!("max_request_line must be at least 1");
        }

        for (field, name) in [
            ("default_index", &self.default_index),
            ("not_found_page", &self.not_found_page),
            ("not_implemented_page", &self.not_implemented_page),
        ] {
            if name.is_empty() || name == "." || name == ".." || name.contains('/') {
                anyhow::bail!("{field} must be a plain file name, got {name:?}");
            }
        }

        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
