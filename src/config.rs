use std::net::{IpAddr, Ipv4Addr};

/// Application-level constants
pub const APP_NAME: &str = "Medgate";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "medgate=info,tower_http=warn"
}

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the HTTP server binds to.
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Base URL of the medical-answer service. None runs the backend in
    /// standalone mode with canned replies.
    pub answer_agent_url: Option<String>,
    /// Base URL of the specialist-recommendation service.
    pub specialist_agent_url: Option<String>,
    /// Per-request timeout for collaborator calls, in seconds.
    pub agent_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            answer_agent_url: None,
            specialist_agent_url: None,
            agent_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Read settings from `MEDGATE_*` environment variables, falling back
    /// to defaults (with a warning) on unset or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: parse_env("MEDGATE_BIND_ADDR", defaults.bind_addr),
            port: parse_env("MEDGATE_PORT", defaults.port),
            answer_agent_url: non_empty_env("MEDGATE_ANSWER_URL"),
            specialist_agent_url: non_empty_env("MEDGATE_SPECIALIST_URL"),
            agent_timeout_secs: parse_env("MEDGATE_AGENT_TIMEOUT_SECS", defaults.agent_timeout_secs),
        }
    }
}

fn parse_env<T: std::str::FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(%name, %raw, %default, "unparsable setting, using default");
                default
            }
        },
        Err(_) => default,
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
