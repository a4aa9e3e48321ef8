//! Configuration management for errnotify
//!
//! This module defines the `Config` struct holding the one process-wide
//! setting this crate owns: the default notification routes. It uses the
//! `figment` crate to load configuration from a TOML file and merge it
//! with environment variables.

use crate::core::RouteMap;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// The configuration surface of the crate.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    /// Routes every notifiable error is delivered to, keyed by channel
    /// alias. Each entry is a single destination or a list of them:
    ///
    /// ```toml
    /// [default_routes]
    /// mail = "ops@example.com"
    /// slack = ["#alerts", "#oncall"]
    /// ```
    ///
    /// Defaults to an empty map: errors then only notify the routes they
    /// declare themselves.
    #[serde(default)]
    pub default_routes: RouteMap,
}

impl Config {
    /// Loads the configuration from the specified file.
    ///
    /// Sources are layered: built-in defaults, then the TOML file, then
    /// environment variables prefixed with `ERRNOTIFY_`. A missing file is
    /// not an error; the defaults apply.
    ///
    /// # Arguments
    /// * `config_path` - The path to the TOML configuration file.
    pub fn load(config_path: &str) -> Result<Self> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            // Allow overriding with environment variables, e.g. ERRNOTIFY_DEFAULT_ROUTES
            .merge(Env::prefixed("ERRNOTIFY_"))
            .extract()?;
        Ok(config)
    }
}
