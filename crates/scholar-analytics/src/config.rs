//! Configuration for the scholar analytics engine and server.

use std::time::Duration;

/// Engine configuration constants.
pub mod defaults {
    use std::time::Duration;

    /// Authors listed in the "most collaborative" ranking.
    pub const TOP_COLLABORATORS: usize = 10;

    /// Title tokens kept in the topic ranking.
    pub const TOP_TOPICS: usize = 50;

    /// Maximum word co-occurrence pairs reported.
    pub const MAX_WORD_CONNECTIONS: usize = 100;

    /// Years per window when comparing topic shares (recent vs prior).
    pub const EMERGING_WINDOW: usize = 2;

    /// Maximum emerging topics reported.
    pub const EMERGING_LIMIT: usize = 10;

    /// Shortest token (in characters) the topic extractor keeps.
    pub const MIN_TOKEN_LEN: usize = 3;

    /// Words that never count as topics.
    pub const STOP_WORDS: &[&str] = &["a", "an", "the", "in", "on", "at", "to", "for", "of", "and"];

    /// Author suggestions returned for a partial name.
    pub const AUTHOR_SUGGESTIONS: usize = 5;

    /// Analysis cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cached analysis reports.
    pub const CACHE_MAX_SIZE: u64 = 100;

    /// Default HTTP port.
    pub const HTTP_PORT: u16 = 8000;
}

/// Analysis configuration.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Authors in the collaboration ranking.
    pub top_collaborators: usize,

    /// Tokens in the topic ranking.
    pub top_topics: usize,

    /// Co-occurrence pairs reported.
    pub max_word_connections: usize,

    /// Years per emerging-topic window.
    pub emerging_window: usize,

    /// Emerging topics reported.
    pub emerging_limit: usize,

    /// Minimum token length kept by the tokenizer.
    pub min_token_len: usize,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,
}

impl AnalysisConfig {
    /// Create a configuration with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            top_collaborators: defaults::TOP_COLLABORATORS,
            top_topics: defaults::TOP_TOPICS,
            max_word_connections: defaults::MAX_WORD_CONNECTIONS,
            emerging_window: defaults::EMERGING_WINDOW,
            emerging_limit: defaults::EMERGING_LIMIT,
            min_token_len: defaults::MIN_TOKEN_LEN,
            cache_ttl: defaults::CACHE_TTL,
            cache_max_size: defaults::CACHE_MAX_SIZE,
        }
    }

    /// Create a test configuration with caching disabled.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            cache_ttl: Duration::from_secs(0), // No caching in tests
            cache_max_size: 0,
            ..Self::new()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `SCHOLAR_ANALYTICS_TOP_COLLABORATORS`, `SCHOLAR_ANALYTICS_TOP_TOPICS`,
    /// `SCHOLAR_ANALYTICS_MAX_WORD_CONNECTIONS`, `SCHOLAR_ANALYTICS_EMERGING_WINDOW`,
    /// `SCHOLAR_ANALYTICS_EMERGING_LIMIT`, `SCHOLAR_ANALYTICS_CACHE_TTL_SECS` and
    /// `SCHOLAR_ANALYTICS_CACHE_MAX_SIZE`. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but is not a valid number.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new();

        if let Some(v) = env_number("SCHOLAR_ANALYTICS_TOP_COLLABORATORS")? {
            config.top_collaborators = v;
        }
        if let Some(v) = env_number("SCHOLAR_ANALYTICS_TOP_TOPICS")? {
            config.top_topics = v;
        }
        if let Some(v) = env_number("SCHOLAR_ANALYTICS_MAX_WORD_CONNECTIONS")? {
            config.max_word_connections = v;
        }
        if let Some(v) = env_number("SCHOLAR_ANALYTICS_EMERGING_WINDOW")? {
            anyhow::ensure!(v > 0, "SCHOLAR_ANALYTICS_EMERGING_WINDOW must be at least 1");
            config.emerging_window = v;
        }
        if let Some(v) = env_number("SCHOLAR_ANALYTICS_EMERGING_LIMIT")? {
            config.emerging_limit = v;
        }
        if let Some(v) = env_number::<u64>("SCHOLAR_ANALYTICS_CACHE_TTL_SECS")? {
            config.cache_ttl = Duration::from_secs(v);
        }
        if let Some(v) = env_number("SCHOLAR_ANALYTICS_CACHE_MAX_SIZE")? {
            config.cache_max_size = v;
        }

        Ok(config)
    }

    /// Check if report caching is enabled.
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_max_size > 0 && !self.cache_ttl.is_zero()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn env_number<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("{name}={raw:?} is not a valid number: {e}"))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = AnalysisConfig::default();
        assert_eq!(config.top_collaborators, 10);
        assert_eq!(config.top_topics, 50);
        assert!(config.caching_enabled());
    }

    #[test]
    fn test_config_for_testing_disables_cache() {
        let config = AnalysisConfig::for_testing();
        assert!(!config.caching_enabled());
        assert_eq!(config.top_topics, defaults::TOP_TOPICS);
    }

    #[test]
    fn test_stop_words() {
        assert!(defaults::STOP_WORDS.contains(&"the"));
        assert!(defaults::STOP_WORDS.contains(&"for"));
        assert_eq!(defaults::STOP_WORDS.len(), 10);
    }
}
