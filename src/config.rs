use std::collections::HashMap;
use std::env;

use thiserror::Error;

/// Credentials the token service cannot start without.
pub const REQUIRED_VARS: [&str; 2] = ["LIVEKIT_API_KEY", "LIVEKIT_API_SECRET"];

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),
}

impl Config {
    /// Validates an environment snapshot. A variable that is unset or set to
    /// the empty string counts as missing; the error names every offender in
    /// `REQUIRED_VARS` order. The snapshot itself is never mutated.
    pub fn from_snapshot(env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let missing: Vec<&'static str> = REQUIRED_VARS
            .into_iter()
            .filter(|name| env.get(*name).map_or(true, String::is_empty))
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        Ok(Config {
            api_key: env["LIVEKIT_API_KEY"].clone(),
            api_secret: env["LIVEKIT_API_SECRET"].clone(),
        })
    }

    /// Snapshots the real process environment, loading a `.env` file first
    /// if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_snapshot(&env::vars().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn snapshot(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn accepts_a_full_snapshot() {
        let env = snapshot(&[("LIVEKIT_API_KEY", "devkey"), ("LIVEKIT_API_SECRET", "devsecret")]);
        let config = Config::from_snapshot(&env).unwrap();
        assert_eq!(config.api_key, "devkey");
        assert_eq!(config.api_secret, "devsecret");
    }

    #[test]
    fn reports_both_when_nothing_is_set() {
        let err = Config::from_snapshot(&snapshot(&[])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingVars(vec!["LIVEKIT_API_KEY", "LIVEKIT_API_SECRET"])
        );
    }

    #[test]
    fn reports_only_the_missing_variable() {
        let env = snapshot(&[("LIVEKIT_API_KEY", "devkey")]);
        let err = Config::from_snapshot(&env).unwrap_err();
        assert_eq!(err, ConfigError::MissingVars(vec!["LIVEKIT_API_SECRET"]));
    }

    #[test]
    fn treats_empty_values_as_missing() {
        let env = snapshot(&[("LIVEKIT_API_KEY", ""), ("LIVEKIT_API_SECRET", "devsecret")]);
        let err = Config::from_snapshot(&env).unwrap_err();
        assert_eq!(err, ConfigError::MissingVars(vec!["LIVEKIT_API_KEY"]));
    }

    #[test]
    fn ignores_unrelated_variables() {
        let env = snapshot(&[("PATH", "/usr/bin"), ("LIVEKIT_API_SECRET", "devsecret")]);
        let err = Config::from_snapshot(&env).unwrap_err();
        assert_eq!(err, ConfigError::MissingVars(vec!["LIVEKIT_API_KEY"]));
    }

    #[test]
    fn checking_a_snapshot_is_idempotent() {
        let env = snapshot(&[("LIVEKIT_API_KEY", "devkey")]);
        let first = Config::from_snapshot(&env).unwrap_err();
        let second = Config::from_snapshot(&env).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn error_message_names_the_offenders() {
        let err = Config::from_snapshot(&snapshot(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: LIVEKIT_API_KEY, LIVEKIT_API_SECRET"
        );
    }

    #[test]
    #[serial]
    fn from_env_reads_the_process_environment() {
        env::set_var("LIVEKIT_API_KEY", "devkey");
        env::set_var("LIVEKIT_API_SECRET", "devsecret");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key, "devkey");
        assert_eq!(config.api_secret, "devsecret");
        env::remove_var("LIVEKIT_API_KEY");
        env::remove_var("LIVEKIT_API_SECRET");
    }
}
