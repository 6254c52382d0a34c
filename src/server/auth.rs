use crate::config::AuthConfig;
use std::collections::HashSet;

/// Environment variable holding a comma-separated list of accepted keys
pub const API_KEYS_ENV: &str = "CV_FINDER_API_KEYS";

/// API keys accepted by the service
///
/// Built once at startup; an empty set rejects every request.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    keys: HashSet<String>,
}

impl ApiKeys {
    /// Collects keys, trimming whitespace and dropping empty entries
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = keys
            .into_iter()
            .map(|key| key.as_ref().trim().to_string())
            .filter(|key| !key.is_empty())
            .collect();
        Self { keys }
    }

    /// Merges the configured keys with those in [`API_KEYS_ENV`]
    pub fn from_config_and_env(config: &AuthConfig) -> Self {
        let from_env = std::env::var(API_KEYS_ENV).unwrap_or_default();
        Self::new(
            config
                .api_keys
                .iter()
                .map(String::as_str)
                .chain(from_env.split(',')),
        )
    }

    /// Returns true if `candidate` is a known, non-empty key
    pub fn is_valid(&self, candidate: Option<&str>) -> bool {
        match candidate {
            Some(key) if !key.is_empty() => self.keys.contains(key),
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
