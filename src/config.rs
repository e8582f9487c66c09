use std::env;

use crate::error::ConfigError;
use crate::ledger::DEFAULT_DIFFICULTY;
use crate::sealer::MAX_DIFFICULTY;

pub const DEFAULT_CANDIDATES: [&str; 3] = ["Alice", "Bob", "Charlie"];

/// Server and ledger settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub difficulty: usize,
    pub max_seal_attempts: Option<u64>,
    pub candidates: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 9095,
            difficulty: DEFAULT_DIFFICULTY,
            max_seal_attempts: None,
            candidates: DEFAULT_CANDIDATES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    /// Reads `SERVER_HOST`, `SERVER_PORT`, `LEDGER_DIFFICULTY`,
    /// `SEAL_MAX_ATTEMPTS` and `CANDIDATES`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("SERVER_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                expected: "a valid u16",
                value: port.clone(),
            })?;
        }
        if let Some(difficulty) = lookup("LEDGER_DIFFICULTY") {
            config.difficulty = match difficulty.parse::<usize>() {
                Ok(value) if (1..=MAX_DIFFICULTY).contains(&value) => value,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "LEDGER_DIFFICULTY",
                        expected: "an integer between 1 and 64",
                        value: difficulty,
                    })
                }
            };
        }
        if let Some(attempts) = lookup("SEAL_MAX_ATTEMPTS") {
            config.max_seal_attempts = match attempts.parse::<u64>() {
                Ok(value) if value > 0 => Some(value),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "SEAL_MAX_ATTEMPTS",
                        expected: "a positive integer",
                        value: attempts,
                    })
                }
            };
        }
        if let Some(candidates) = lookup("CANDIDATES") {
            let parsed: Vec<String> = candidates
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
            if parsed.is_empty() {
                return Err(ConfigError::Invalid {
                    name: "CANDIDATES",
                    expected: "a comma-separated list of names",
                    value: candidates,
                });
            }
            config.candidates = parsed;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
