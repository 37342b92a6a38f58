use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::errors::{DigestError, DigestResult};

pub const DEFAULT_CATEGORY: &str = "dns";
pub const DEFAULT_HEADER: &str = "📰 Daily DNS News Digest (Domain Incite)";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
    pub webhook_url: Option<String>,
    pub category: String,
    pub header: String,
    pub fetch_timeout: Duration,
    pub webhook_timeout: Duration,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> DigestResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from a `.env` style file without touching the process environment
    pub fn from_env_file(path: &Path) -> DigestResult<Self> {
        let mut vars = HashMap::new();
        let iter = dotenvy::from_path_iter(path)
            .map_err(|e| DigestError::Config(format!("{}: {}", path.display(), e)))?;
        for item in iter {
            let (key, value) =
                item.map_err(|e| DigestError::Config(format!("{}: {}", path.display(), e)))?;
            vars.insert(key, value);
        }

        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Build a config from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> DigestResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let feed_url =
            get("RSS_FEED_URL").ok_or_else(|| DigestError::MissingEnvVar("RSS_FEED_URL".to_string()))?;

        let webhook_url = get("SLACK_WEBHOOK_URL");

        let category = get("DIGEST_CATEGORY").unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let header = get("DIGEST_HEADER").unwrap_or_else(|| DEFAULT_HEADER.to_string());

        let fetch_timeout = parse_secs(
            "DIGEST_FETCH_TIMEOUT_SECS",
            get("DIGEST_FETCH_TIMEOUT_SECS"),
            DEFAULT_FETCH_TIMEOUT_SECS,
        )?;

        let webhook_timeout = parse_secs(
            "DIGEST_WEBHOOK_TIMEOUT_SECS",
            get("DIGEST_WEBHOOK_TIMEOUT_SECS"),
            DEFAULT_WEBHOOK_TIMEOUT_SECS,
        )?;

        Ok(Self {
            feed_url,
            webhook_url,
            category,
            header,
            fetch_timeout,
            webhook_timeout,
        })
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        if let Some(category) = category.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()) {
            self.category = category;
        }
        self
    }

    /// Check the feed URL before any network call is made.
    /// The webhook URL is only required once there is something to deliver.
    pub fn validate(&self) -> DigestResult<()> {
        validate_http_url("RSS_FEED_URL", &self.feed_url)
    }
}

pub fn validate_webhook_url(url: &str) -> DigestResult<()> {
    validate_http_url("SLACK_WEBHOOK_URL", url)
}

fn parse_secs(key: &str, value: Option<String>, default: u64) -> DigestResult<Duration> {
    match value {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                DigestError::Config(format!("{} must be a positive number of seconds, got '{}'", key, raw))
            }),
    }
}

fn validate_http_url(key: &str, value: &str) -> DigestResult<()> {
    let parsed =
        Url::parse(value).map_err(|e| DigestError::Config(format!("{} is not a valid URL: {}", key, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(DigestError::Config(format!(
            "{} must use http or https, got '{}'",
            key, scheme
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_feed_url() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, DigestError::MissingEnvVar(ref k) if k == "RSS_FEED_URL"));
    }

    #[test]
    fn test_blank_feed_url_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("RSS_FEED_URL", "   ")])).unwrap_err();
        assert!(matches!(err, DigestError::MissingEnvVar(_)));
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(lookup(&[("RSS_FEED_URL", "https://example.com/feed")])).unwrap();

        assert_eq!(config.feed_url, "https://example.com/feed");
        assert!(config.webhook_url.is_none());
        assert_eq!(config.category, "dns");
        assert_eq!(config.header, DEFAULT_HEADER);
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.webhook_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_empty_webhook_is_unset() {
        let config = Config::from_lookup(lookup(&[
            ("RSS_FEED_URL", "https://example.com/feed"),
            ("SLACK_WEBHOOK_URL", ""),
        ]))
        .unwrap();
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn test_invalid_timeout() {
        let err = Config::from_lookup(lookup(&[
            ("RSS_FEED_URL", "https://example.com/feed"),
            ("DIGEST_FETCH_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, DigestError::Config(_)));
    }

    #[test]
    fn test_category_override() {
        let config = Config::from_lookup(lookup(&[("RSS_FEED_URL", "https://example.com/feed")]))
            .unwrap()
            .with_category(Some(" registry ".to_string()));
        assert_eq!(config.category, "registry");

        let config = config.with_category(None);
        assert_eq!(config.category, "registry");
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let config = Config::from_lookup(lookup(&[("RSS_FEED_URL", "not a url")])).unwrap();
        assert!(matches!(config.validate(), Err(DigestError::Config(_))));

        let config = Config::from_lookup(lookup(&[("RSS_FEED_URL", "ftp://example.com/feed")])).unwrap();
        assert!(matches!(config.validate(), Err(DigestError::Config(_))));
    }

    #[test]
    fn test_malformed_webhook_is_not_fatal_at_startup() {
        let config = Config::from_lookup(lookup(&[
            ("RSS_FEED_URL", "https://example.com/feed"),
            ("SLACK_WEBHOOK_URL", "hooks.slack.com/services/x"),
        ]))
        .unwrap();
        assert!(config.validate().is_ok());

        let err = validate_webhook_url(config.webhook_url.as_deref().unwrap()).unwrap_err();
        assert!(matches!(err, DigestError::Config(ref msg) if msg.contains("SLACK_WEBHOOK_URL")));
    }

    #[test]
    fn test_validate_accepts_good_urls() {
        let config = Config::from_lookup(lookup(&[
            ("RSS_FEED_URL", "https://domainincite.com/feed"),
            ("SLACK_WEBHOOK_URL", "https://hooks.slack.com/services/T/B/X"),
        ]))
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "RSS_FEED_URL=https://example.com/rss").unwrap();
        writeln!(file, "SLACK_WEBHOOK_URL=https://hooks.slack.com/services/T/B/X").unwrap();
        writeln!(file, "DIGEST_CATEGORY=domains").unwrap();
        drop(file);

        let config = Config::from_env_file(&path).unwrap();
        assert_eq!(config.feed_url, "https://example.com/rss");
        assert_eq!(
            config.webhook_url.as_deref(),
            Some("https://hooks.slack.com/services/T/B/X")
        );
        assert_eq!(config.category, "domains");
    }

    #[test]
    fn test_from_env_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_env_file(&dir.path().join("absent.env")).unwrap_err();
        assert!(matches!(err, DigestError::Config(_)));
    }
}
