use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars. Every variable has a default, so a bare environment is valid.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function, decoupled from the actual environment so it can be tested with
/// a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("ANNUAIRE_ENV", "development"));
    let bind_addr = parse_addr("ANNUAIRE_BIND_ADDR", "0.0.0.0:8080")?;
    let log_level = or_default("ANNUAIRE_LOG_LEVEL", "info");
    let registry_url = or_default(
        "ANNUAIRE_REGISTRY_URL",
        "https://www.sirene.fr/sirene/public/recherche",
    );
    let phone_directory_url = or_default("ANNUAIRE_PHONE_DIRECTORY_URL", "https://www.pagespro.com");
    let request_timeout_secs = parse_u64("ANNUAIRE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ANNUAIRE_USER_AGENT", "annuaire/0.1");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        registry_url,
        phone_directory_url,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_succeeds_on_empty_environment() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(
            cfg.registry_url,
            "https://www.sirene.fr/sirene/public/recherche"
        );
        assert_eq!(cfg.phone_directory_url, "https://www.pagespro.com");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "annuaire/0.1");
    }

    #[test]
    fn build_app_config_applies_overrides() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("ANNUAIRE_BIND_ADDR", "127.0.0.1:9000");
        map.insert("ANNUAIRE_REGISTRY_URL", "http://localhost:1234/recherche");
        map.insert("ANNUAIRE_REQUEST_TIMEOUT_SECS", "5");
        map.insert("ANNUAIRE_ENV", "production");
        let cfg = build_app_config(lookup_from_map(&map)).expect("overrides should be valid");
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(cfg.registry_url, "http://localhost:1234/recherche");
        assert_eq!(cfg.request_timeout_secs, 5);
        assert_eq!(cfg.env, Environment::Production);
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("ANNUAIRE_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ANNUAIRE_BIND_ADDR"),
            "expected InvalidEnvVar(ANNUAIRE_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_timeout() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("ANNUAIRE_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ANNUAIRE_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(ANNUAIRE_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }
}
