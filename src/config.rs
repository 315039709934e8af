//! Configuration types.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: String,
    /// Port for the HTTP listener.
    pub port: u16,
    /// Directory for daily-rolling log files; console only when unset.
    pub log_dir: Option<PathBuf>,
    /// Allowed CORS origin. `*` allows any origin; unset disables CORS.
    pub cors_origin: Option<String>,
    /// Minutes a session may sit untouched before it is dropped.
    pub session_idle_minutes: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            log_dir: None,
            cors_origin: None,
            session_idle_minutes: 60,
        }
    }
}

impl AppConfig {
    /// Build config from `INTERVIEW_PREP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("INTERVIEW_PREP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "INTERVIEW_PREP_PORT".to_string(),
                    message: format!("{raw:?}: {e}"),
                })?,
            None => defaults.port,
        };

        let session_idle_minutes = match non_empty("INTERVIEW_PREP_SESSION_IDLE_MIN") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidValue {
                        key: "INTERVIEW_PREP_SESSION_IDLE_MIN".to_string(),
                        message: "must be at least 1 minute".to_string(),
                    });
                }
                Ok(minutes) => minutes,
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        key: "INTERVIEW_PREP_SESSION_IDLE_MIN".to_string(),
                        message: format!("{raw:?}: {e}"),
                    });
                }
            },
            None => defaults.session_idle_minutes,
        };

        Ok(Self {
            bind_addr: non_empty("INTERVIEW_PREP_BIND").unwrap_or(defaults.bind_addr),
            port,
            log_dir: non_empty("INTERVIEW_PREP_LOG_DIR").map(PathBuf::from),
            cors_origin: non_empty("INTERVIEW_PREP_CORS_ORIGIN"),
            session_idle_minutes,
        })
    }

    /// Idle limit after which a session is expired.
    pub fn session_idle(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.session_idle_minutes))
    }

    /// `host:port` string for the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_all_keys() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("INTERVIEW_PREP_BIND", "127.0.0.1"),
            ("INTERVIEW_PREP_PORT", "9090"),
            ("INTERVIEW_PREP_LOG_DIR", "/var/log/interview-prep"),
            ("INTERVIEW_PREP_CORS_ORIGIN", "*"),
            ("INTERVIEW_PREP_SESSION_IDLE_MIN", "15"),
        ]))
        .unwrap();

        assert_eq!(config.session_idle_minutes, 15);
        assert_eq!(config.session_idle(), chrono::Duration::minutes(15));

        assert_eq!(config.listen_addr(), "127.0.0.1:9090");
        assert_eq!(
            config.log_dir,
            Some(PathBuf::from("/var/log/interview-prep"))
        );
        assert_eq!(config.cors_origin.as_deref(), Some("*"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("INTERVIEW_PREP_PORT", "  "),
            ("INTERVIEW_PREP_LOG_DIR", ""),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("INTERVIEW_PREP_PORT", "eighty")]))
            .unwrap_err();
        let ConfigError::InvalidValue { key, .. } = err;
        assert_eq!(key, "INTERVIEW_PREP_PORT");
    }

    #[test]
    fn session_idle_defaults_to_an_hour() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.session_idle(), chrono::Duration::minutes(60));
    }

    #[test]
    fn zero_or_garbage_idle_limit_is_an_error() {
        for raw in ["0", "soon"] {
            let err = AppConfig::from_lookup(lookup_from(&[("INTERVIEW_PREP_SESSION_IDLE_MIN", raw)]))
                .unwrap_err();
            let ConfigError::InvalidValue { key, .. } = err;
            assert_eq!(key, "INTERVIEW_PREP_SESSION_IDLE_MIN");
        }
    }
}
