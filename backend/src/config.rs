//! Server configuration
//!
//! Settings come from the process environment, after loading a `.env` file
//! if one is present:
//!
//! | Key                   | Default | Meaning                                  |
//! |-----------------------|---------|------------------------------------------|
//! | `KFCHESS_TICK_MS`     | 100     | Milliseconds between ticks               |
//! | `KFCHESS_EXPIRY_SECS` | 600     | Idle seconds before a session is dropped |
//! | `KFCHESS_RNG_SEED`    | unset   | Seed for bot draws; entropy when unset   |

use std::str::FromStr;
use std::time::Duration;

use crate::error::{BackendError, BackendResult};

pub const TICK_MS_KEY: &str = "KFCHESS_TICK_MS";
pub const EXPIRY_SECS_KEY: &str = "KFCHESS_EXPIRY_SECS";
pub const RNG_SEED_KEY: &str = "KFCHESS_RNG_SEED";

pub const DEFAULT_TICK_MS: u64 = 100;
pub const DEFAULT_EXPIRY_SECS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Wall-clock time between two ticks of every game
    pub tick_period: Duration,
    /// Sessions idle for longer than this are removed
    pub expiry: Duration,
    /// Fixed seed for the driver's random source
    pub rng_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            tick_period: Duration::from_millis(DEFAULT_TICK_MS),
            expiry: Duration::from_secs(DEFAULT_EXPIRY_SECS),
            rng_seed: None,
        }
    }
}

impl ServerConfig {
    /// Load from `.env` and the process environment
    pub fn from_env() -> BackendResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = ServerConfig::from_lookup(|key| match key {
    ///     "KFCHESS_TICK_MS" => Some("50".to_string()),
    ///     _ => None,
    /// })?;
    /// ```
    pub fn from_lookup<F>(lookup: F) -> BackendResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tick_ms = parse::<u64, _>(&lookup, TICK_MS_KEY)?.unwrap_or(DEFAULT_TICK_MS);
        if tick_ms == 0 {
            return Err(BackendError::Config {
                message: format!("{} must be at least 1", TICK_MS_KEY),
            });
        }
        let expiry_secs =
            parse::<u64, _>(&lookup, EXPIRY_SECS_KEY)?.unwrap_or(DEFAULT_EXPIRY_SECS);
        let rng_seed = parse::<u64, _>(&lookup, RNG_SEED_KEY)?;

        Ok(ServerConfig {
            tick_period: Duration::from_millis(tick_ms),
            expiry: Duration::from_secs(expiry_secs),
            rng_seed,
        })
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> BackendResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e| BackendError::Config {
            message: format!("{} = {:?}: {}", key, raw, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.tick_period, Duration::from_millis(100));
        assert_eq!(config.expiry, Duration::from_secs(600));
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (TICK_MS_KEY, "25"),
            (EXPIRY_SECS_KEY, " 30 "),
            (RNG_SEED_KEY, "42"),
        ]))
        .expect("valid settings");
        assert_eq!(config.tick_period, Duration::from_millis(25));
        assert_eq!(config.expiry, Duration::from_secs(30));
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = ServerConfig::from_lookup(lookup(&[(TICK_MS_KEY, "fast")]))
            .expect_err("non-numeric tick");
        assert!(
            matches!(err, BackendError::Config { ref message } if message.contains(TICK_MS_KEY)),
            "Error should name the offending key: {}",
            err
        );

        let err = ServerConfig::from_lookup(lookup(&[(TICK_MS_KEY, "0")]))
            .expect_err("zero tick");
        assert!(matches!(err, BackendError::Config { .. }));
    }
}
