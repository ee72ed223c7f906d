use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Config {
    /// Per-message processing budget in milliseconds. Kept under the
    /// function's own timeout so in-flight messages are reported as failed
    /// instead of being lost with the invocation.
    pub message_timeout_ms: u64,
    /// How long the simulated `timeout` branch stalls, in milliseconds.
    pub simulated_stall_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            message_timeout_ms: 25_000,
            simulated_stall_ms: 60_000,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["MESSAGE_TIMEOUT_MS", "SIMULATED_STALL_MS"]))
            .extract()
    }
}
