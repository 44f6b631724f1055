use std::time::Duration;

/// Default period of the refresh/expiry protocol (5 minutes)
pub const DEFAULT_REFRESH_SECS: u64 = 300;

/// Party lifecycle settings shared by every party in a registry
#[derive(Debug, Clone)]
pub struct PartySettings {
    /// Period between two runs of the refresh/expiry protocol
    pub refresh_interval: Duration,
    /// Repost the status message on every tick, even when nothing changed
    pub repost_unchanged: bool,
}

impl Default for PartySettings {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            repost_unchanged: false,
        }
    }
}

impl PartySettings {
    /// Read settings from `PARTY_REFRESH_SECS` and `PARTY_REPOST_UNCHANGED`
    pub fn from_env() -> Self {
        let refresh_secs = std::env::var("PARTY_REFRESH_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REFRESH_SECS);

        let repost_unchanged = std::env::var("PARTY_REPOST_UNCHANGED")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            refresh_interval: Duration::from_secs(refresh_secs),
            repost_unchanged,
        }
    }

    pub fn with_repost_unchanged(mut self, repost: bool) -> Self {
        self.repost_unchanged = repost;
        self
    }
}
