use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_INTERVAL_MS: u64 = 2000;
pub const MIN_INTERVAL_MS: u64 = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedConfig {
    pub bind: String,
    /// JSON-lines file to replay; the built-in demo script when unset.
    pub script: Option<PathBuf>,
    pub interval: Duration,
    /// Replay forever instead of stopping after the last frame.
    pub repeat: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.into(),
            script: None,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            repeat: false,
        }
    }
}

impl FeedConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let interval_ms = non_empty("FEED_INTERVAL_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_INTERVAL_MS)
            .max(MIN_INTERVAL_MS);

        Self {
            bind: non_empty("FEED_BIND").unwrap_or_else(|| DEFAULT_BIND.into()),
            script: non_empty("FEED_SCRIPT").map(PathBuf::from),
            interval: Duration::from_millis(interval_ms),
            repeat: non_empty("FEED_LOOP")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}
