use config::{ConfigError, Environment};
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Directory served for any path no route matches.
pub const STATIC_DIR: &str = "public";

/// Process configuration, read once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// `PORT`
    pub port: u16,
    /// `APP_VERSION`
    pub app_version: String,
}

impl Config {
    /// Built-in defaults overridden by `PORT` / `APP_VERSION` from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::default())
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        config::Config::builder()
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("app_version", DEFAULT_VERSION)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().source(Some(map))
    }

    #[test]
    fn defaults_apply_without_environment() {
        let cfg = Config::load(env(&[])).unwrap();
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.app_version, "1.0.0");
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = Config::load(env(&[("PORT", "8080"), ("APP_VERSION", "2.1.0")])).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.app_version, "2.1.0");
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        let cfg = Config::load(env(&[("HOME", "/root"), ("APP_VERSION", "3.0.0")])).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.app_version, "3.0.0");
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        assert!(Config::load(env(&[("PORT", "http")])).is_err());
    }
}
