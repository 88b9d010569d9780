use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_HOST: &str = "https://fitstagram.ackee.cz";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const HOST_VAR: &str = "FITSTAGRAM_HOST";
pub const TIMEOUT_VAR: &str = "FITSTAGRAM_TIMEOUT_SECS";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientConfig {
    /// Scheme and authority of the API, without trailing slash
    pub host: String,

    /// Upper bound on a single request, connection included
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> ClientConfig {
        ClientConfig::new(DEFAULT_HOST)
    }
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> ClientConfig {
        ClientConfig {
            host: normalize_host(host.into()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> ClientConfig {
        self.timeout = timeout;
        self
    }

    /// Defaults, overridden by `FITSTAGRAM_HOST` and `FITSTAGRAM_TIMEOUT_SECS` when set
    pub fn from_env() -> anyhow::Result<ClientConfig> {
        ClientConfig::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<ClientConfig> {
        let mut config = match lookup(HOST_VAR) {
            Some(host) => ClientConfig::new(host),
            None => ClientConfig::default(),
        };
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            let secs = secs
                .trim()
                .parse::<u64>()
                .with_context(|| format!("parsing {TIMEOUT_VAR} {secs:?} as a number of seconds"))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn normalize_host(host: String) -> String {
    String::from(host.trim_end_matches('/'))
}
