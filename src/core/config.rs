//! Process-wide configuration
//!
//! The minimum severity and service identity are read once from the
//! environment (`LOG_LEVEL`, `SERVICE`, `VERSION`). Problems are reported on
//! stderr and never through the structured log itself.

use super::payload::ServiceContext;
use super::severity::Severity;
use parking_lot::RwLock;

/// Environment variable holding the minimum severity name
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Environment variable holding the service name
pub const SERVICE_ENV: &str = "SERVICE";

/// Environment variable holding the service version
pub const VERSION_ENV: &str = "VERSION";

static GLOBAL: RwLock<Option<Config>> = parking_lot::const_rwlock(None);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub level: Severity,
    pub service: String,
    pub version: String,
}

impl Config {
    pub fn new(level: Severity, service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            level,
            service: service.into(),
            version: version.into(),
        }
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// An absent or unrecognized level falls back to INFO. A missing service
    /// or version only produces a warning; the service context is then
    /// omitted from every record.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = match lookup(LOG_LEVEL_ENV).map(|raw| raw.parse::<Severity>()) {
            Some(Ok(level)) => level,
            _ => {
                eprintln!(
                    "[LOGGER WARNING] {} is not valid or not set, defaulting to INFO",
                    LOG_LEVEL_ENV
                );
                Severity::Info
            }
        };

        let service = lookup(SERVICE_ENV).unwrap_or_default();
        let version = lookup(VERSION_ENV).unwrap_or_default();
        if service.is_empty() || version.is_empty() {
            eprintln!(
                "[LOGGER WARNING] {} and {} must both be set, serviceContext will be omitted",
                SERVICE_ENV, VERSION_ENV
            );
        }

        Self::new(level, service, version)
    }

    /// Service context attached to records, if both parts are present
    pub fn service_context(&self) -> Option<ServiceContext> {
        ServiceContext::new(self.service.as_str(), self.version.as_str())
    }
}

/// Replace the process-wide configuration without touching the environment.
pub fn configure(level: Severity, service: impl Into<String>, version: impl Into<String>) {
    *GLOBAL.write() = Some(Config::new(level, service, version));
}

/// Re-read the process-wide configuration from the environment.
pub fn init_from_env() -> Config {
    let config = Config::from_env();
    *GLOBAL.write() = Some(config.clone());
    config
}

/// Snapshot of the process-wide configuration, read from the environment on
/// first use.
pub fn current() -> Config {
    if let Some(config) = GLOBAL.read().as_ref() {
        return config.clone();
    }

    let mut global = GLOBAL.write();
    global.get_or_insert_with(Config::from_env).clone()
}
