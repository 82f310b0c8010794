//! Configuration for the skybrief service
//!
//! Every knob has a default suitable for local use; `SKYBRIEF_*` environment
//! variables override them.

use std::env;

use anyhow::{Context, Result};

/// Root configuration structure for the skybrief service
#[derive(Debug, Clone)]
pub struct SkybriefConfig {
    /// Inbound HTTP server settings
    pub server: ServerConfig,
    /// Upstream forecast client settings
    pub upstream: UpstreamConfig,
}

/// Inbound HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
}

/// Upstream forecast client settings
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the points API
    pub base_url: String,
    /// Descriptive client identifier sent with every outbound request
    pub user_agent: String,
    /// Bound on each outbound call, in seconds
    pub timeout_seconds: u64,
}

impl SkybriefConfig {
    /// Load configuration from the environment, falling back to defaults
    ///
    /// # Errors
    /// Fails when a set variable cannot be parsed into its typed form.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("SKYBRIEF_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid SKYBRIEF_PORT: {raw}"))?,
            Err(_) => default_port(),
        };

        let timeout_seconds = match env::var("SKYBRIEF_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid SKYBRIEF_TIMEOUT_SECONDS: {raw}"))?,
            Err(_) => default_timeout_seconds(),
        };

        Ok(Self {
            server: ServerConfig { port },
            upstream: UpstreamConfig {
                base_url: env::var("SKYBRIEF_UPSTREAM_BASE_URL")
                    .unwrap_or_else(|_| default_base_url()),
                user_agent: env::var("SKYBRIEF_USER_AGENT")
                    .unwrap_or_else(|_| default_user_agent()),
                timeout_seconds,
            },
        })
    }
}

impl Default for SkybriefConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: default_port(),
            },
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_user_agent() -> String {
    format!(
        "skybrief/{} (weather summary service; ops@skybrief.example)",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_timeout_seconds() -> u64 {
    8
}
