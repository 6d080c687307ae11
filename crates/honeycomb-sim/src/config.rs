//! Session configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use honeycomb_engine::{EngineConfig, TapPolicy, Viewport};

use crate::error::{Result, SimError};

/// Settings for the simulated feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// Profiles delivered before the grid first appears
    pub initial_page: usize,
    /// Profiles per load-more page
    pub page_size: usize,
    /// Simulated network latency per request
    pub latency: Duration,
    /// Probability that a load-more request fails (0.0 - 1.0)
    pub failure_rate: f64,
    /// Stop serving pages after this many profiles
    pub max_items: Option<usize>,
    /// Seed for deterministic profiles
    pub seed: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_page: 30,
            page_size: 20,
            latency: Duration::from_millis(1500),
            failure_rate: 0.0,
            max_items: None,
            seed: 42,
        }
    }
}

/// Configuration for a scripted session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub engine: EngineConfig,
    pub feed: FeedConfig,
    pub viewport: Viewport,
    pub tap_policy: TapPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            feed: FeedConfig::default(),
            viewport: Viewport::new(400.0, 800.0),
            tap_policy: TapPolicy::Single,
        }
    }
}

impl SimConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// - `HONEYCOMB_CONFIG`: path to a JSON engine config
    /// - `HONEYCOMB_VIEWPORT`: `WIDTHxHEIGHT`, default `400x800`
    /// - `HONEYCOMB_PAGE_SIZE`, `HONEYCOMB_INITIAL_PAGE`, `HONEYCOMB_LATENCY_MS`
    /// - `HONEYCOMB_FAILURE_RATE`, `HONEYCOMB_MAX_ITEMS`, `HONEYCOMB_SEED`
    /// - `HONEYCOMB_TAP`: `single` or `toggle`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("HONEYCOMB_CONFIG") {
            let json = std::fs::read_to_string(PathBuf::from(path))?;
            config.engine = EngineConfig::from_json(&json)?;
        }

        if let Ok(viewport) = std::env::var("HONEYCOMB_VIEWPORT") {
            config.viewport = parse_viewport(&viewport)?;
        }

        let feed = &mut config.feed;
        if let Some(n) = env_parse("HONEYCOMB_PAGE_SIZE")? {
            feed.page_size = n;
        }
        if let Some(n) = env_parse("HONEYCOMB_INITIAL_PAGE")? {
            feed.initial_page = n;
        }
        if let Some(ms) = env_parse("HONEYCOMB_LATENCY_MS")? {
            feed.latency = Duration::from_millis(ms);
        }
        if let Some(rate) = env_parse("HONEYCOMB_FAILURE_RATE")? {
            feed.failure_rate = rate;
        }
        if let Some(max) = env_parse("HONEYCOMB_MAX_ITEMS")? {
            feed.max_items = Some(max);
        }
        if let Some(seed) = env_parse("HONEYCOMB_SEED")? {
            feed.seed = seed;
        }

        if let Ok(tap) = std::env::var("HONEYCOMB_TAP") {
            config.tap_policy = match tap.trim().to_ascii_lowercase().as_str() {
                "single" => TapPolicy::Single,
                "toggle" => TapPolicy::Toggle,
                _ => {
                    return Err(SimError::InvalidSetting {
                        name: "HONEYCOMB_TAP",
                        value: tap,
                    })
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Check feed and viewport settings, then the engine config.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.feed.failure_rate) {
            return Err(SimError::InvalidSetting {
                name: "failure_rate",
                value: self.feed.failure_rate.to_string(),
            });
        }
        if self.feed.page_size == 0 {
            return Err(SimError::InvalidSetting {
                name: "page_size",
                value: "0".into(),
            });
        }
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(SimError::InvalidSetting {
                name: "viewport",
                value: format!("{}x{}", self.viewport.width, self.viewport.height),
            });
        }
        self.engine.validate()?;
        Ok(())
    }
}

fn env_parse<T: FromStr>(name: &'static str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SimError::InvalidSetting { name, value }),
        Err(_) => Ok(None),
    }
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_viewport(value: &str) -> Result<Viewport> {
    let invalid = || SimError::InvalidSetting {
        name: "viewport",
        value: value.to_string(),
    };
    let (w, h) = value.split_once('x').ok_or_else(invalid)?;
    let width: f32 = w.trim().parse().map_err(|_| invalid())?;
    let height: f32 = h.trim().parse().map_err(|_| invalid())?;
    Ok(Viewport::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_feed_behaviour() {
        let config = SimConfig::default();
        assert_eq!(config.feed.initial_page, 30);
        assert_eq!(config.feed.page_size, 20);
        assert_eq!(config.feed.latency, Duration::from_millis(1500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_viewport() {
        assert_eq!(parse_viewport("390x844").unwrap(), Viewport::new(390.0, 844.0));
        assert!(parse_viewport("390").is_err());
        assert!(parse_viewport("wide x tall").is_err());
    }

    #[test]
    fn rejects_bad_failure_rate() {
        let mut config = SimConfig::default();
        config.feed.failure_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidSetting { name: "failure_rate", .. })
        ));
    }

    #[test]
    fn rejects_empty_viewport() {
        let config = SimConfig {
            viewport: Viewport::new(400.0, 0.0),
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
