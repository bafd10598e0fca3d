//! Startup configuration read from the environment.
//!
//! Every variable is optional. Missing or unparsable values silently fall
//! back to the defaults.

use std::env;
use std::path::PathBuf;

use tracing::Level;

use crate::input::DEFAULT_KEY_RELEASE_TIMEOUT_MS;
use crate::types::{TimingConfig, DEFAULT_ARR_MS, DEFAULT_DAS_MS, DEFAULT_SOFT_DROP_MS};

pub const ENV_SEED: &str = "TUI_ARCADE_SEED";
pub const ENV_DAS_MS: &str = "TUI_ARCADE_DAS_MS";
pub const ENV_ARR_MS: &str = "TUI_ARCADE_ARR_MS";
pub const ENV_SOFT_DROP_MS: &str = "TUI_ARCADE_SOFT_DROP_MS";
pub const ENV_KEY_RELEASE_TIMEOUT_MS: &str = "TUI_ARCADE_KEY_RELEASE_TIMEOUT_MS";
pub const ENV_LOG: &str = "TUI_ARCADE_LOG";
pub const ENV_LOG_LEVEL: &str = "TUI_ARCADE_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// RNG seed; `None` means pick one at random.
    pub seed: Option<u64>,
    pub timing: TimingConfig,
    pub key_release_timeout_ms: u32,
    /// Log file; logging is off when unset.
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            timing: TimingConfig::default(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            log_path: None,
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse_u32 = |key: &str, default: u32| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        let seed = lookup(ENV_SEED).and_then(|s| s.trim().parse().ok());

        let timing = TimingConfig {
            das_ms: parse_u32(ENV_DAS_MS, DEFAULT_DAS_MS),
            arr_ms: parse_u32(ENV_ARR_MS, DEFAULT_ARR_MS),
            soft_drop_ms: parse_u32(ENV_SOFT_DROP_MS, DEFAULT_SOFT_DROP_MS),
        };

        let log_path = lookup(ENV_LOG)
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let log_level = lookup(ENV_LOG_LEVEL)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(Level::INFO);

        Self {
            seed,
            timing,
            key_release_timeout_ms: parse_u32(
                ENV_KEY_RELEASE_TIMEOUT_MS,
                DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            ),
            log_path,
            log_level,
        }
    }

    /// The configured seed, or a fresh random one.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(crate::core::rng::random_seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config(&[]), AppConfig::default());
    }

    #[test]
    fn test_reads_values() {
        let cfg = config(&[
            (ENV_SEED, "42"),
            (ENV_DAS_MS, "120"),
            (ENV_ARR_MS, " 20 "),
            (ENV_SOFT_DROP_MS, "10"),
            (ENV_KEY_RELEASE_TIMEOUT_MS, "300"),
            (ENV_LOG, "/tmp/arcade.log"),
            (ENV_LOG_LEVEL, "debug"),
        ]);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.seed_or_random(), 42);
        assert_eq!(
            cfg.timing,
            TimingConfig {
                das_ms: 120,
                arr_ms: 20,
                soft_drop_ms: 10
            }
        );
        assert_eq!(cfg.key_release_timeout_ms, 300);
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/arcade.log")));
        assert_eq!(cfg.log_level, Level::DEBUG);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = config(&[
            (ENV_SEED, "not-a-number"),
            (ENV_DAS_MS, "-5"),
            (ENV_LOG, "   "),
            (ENV_LOG_LEVEL, "loud"),
        ]);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.timing.das_ms, DEFAULT_DAS_MS);
        assert_eq!(cfg.log_path, None);
        assert_eq!(cfg.log_level, Level::INFO);
    }
}
