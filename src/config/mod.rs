//
//  argocd-rs
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Persistent CLI settings: named contexts, each pointing at one Argo CD
//! server with the account and session token used for it. The library
//! itself never reads this file; only the command-line front end does.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/argocd-rs/config.toml`
//! - **macOS**: `~/Library/Application Support/argocd-rs/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\argocd-rs\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! current_context = "argocd.example.com"
//!
//! [contexts."argocd.example.com"]
//! server = "https://argocd.example.com"
//! username = "admin"
//! auth_token = "eyJhbGciOi..."
//! strict_tls = true
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use argocd_rs::config::{Config, ContextConfig};
//!
//! let mut config = Config::load()?;
//! config.upsert_context(
//!     "prod",
//!     ContextConfig::new("https://argocd.example.com"),
//! );
//! config.use_context("prod")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "argocd-rs";

/// Global configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name of the context used when `--context` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,

    /// Contexts keyed by name.
    #[serde(default)]
    pub contexts: BTreeMap<String, ContextConfig>,
}

/// One Argo CD server and the credentials stored for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Server base URL, e.g. `https://argocd.example.com`.
    pub server: String,

    /// Account the token was issued to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Session or API token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Validate the server certificate even over https.
    #[serde(default)]
    pub strict_tls: bool,
}

impl ContextConfig {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            ..Default::default()
        }
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Returns the path to the configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", CONFIG_DIR_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the context called `name`.
    pub fn context(&self, name: &str) -> Option<&ContextConfig> {
        self.contexts.get(name)
    }

    /// Returns the current context and its name.
    pub fn current(&self) -> Option<(&str, &ContextConfig)> {
        let name = self.current_context.as_deref()?;
        self.contexts.get(name).map(|ctx| (name, ctx))
    }

    /// Inserts or replaces a context.
    ///
    /// The first context added becomes current.
    pub fn upsert_context(&mut self, name: impl Into<String>, context: ContextConfig) {
        let name = name.into();
        if self.current_context.is_none() {
            self.current_context = Some(name.clone());
        }
        self.contexts.insert(name, context);
    }

    /// Makes `name` the current context.
    pub fn use_context(&mut self, name: &str) -> Result<()> {
        if !self.contexts.contains_key(name) {
            bail!("Context '{}' does not exist", name);
        }
        self.current_context = Some(name.to_string());
        Ok(())
    }

    /// Removes a context, clearing `current_context` if it pointed at it.
    ///
    /// Returns the removed context.
    pub fn remove_context(&mut self, name: &str) -> Option<ContextConfig> {
        let removed = self.contexts.remove(name);
        if self.current_context.as_deref() == Some(name) {
            self.current_context = None;
        }
        removed
    }
}

/// Derives a context name from a server URL.
///
/// Strips the scheme and trailing slashes and lowercases the rest, so
/// `https://ArgoCD.example.com/` becomes `argocd.example.com`.
pub fn context_name_for(server: &str) -> String {
    let server = server.trim();
    let server = server.strip_prefix("https://").unwrap_or(server);
    let server = server.strip_prefix("http://").unwrap_or(server);
    server.trim_end_matches('/').to_lowercase()
}
