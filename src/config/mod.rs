use crate::error::{FormRouteError, Result};
use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

pub const HOST_KEY: &str = "FORMROUTE_HOST";
pub const PORT_KEY: &str = "FORMROUTE_PORT";
pub const BODY_LIMIT_KEY: &str = "FORMROUTE_BODY_LIMIT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Service seeded with the process environment.
    pub fn from_env() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse `key` as `T`; `Ok(None)` when unset.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| FormRouteError::InvalidConfig {
                    key: key.to_string(),
                    value,
                }),
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// Settings applied to every route a registry turns into a router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl DispatcherConfig {
    pub fn from_service(config: &ConfigService) -> Result<Self> {
        Ok(Self {
            body_limit: config
                .get_parsed(BODY_LIMIT_KEY)?
                .unwrap_or(DEFAULT_BODY_LIMIT),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dispatcher: DispatcherConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            dispatcher: DispatcherConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_service(&ConfigService::from_env())
    }

    pub fn from_service(config: &ConfigService) -> Result<Self> {
        Ok(Self {
            host: config.get_or(HOST_KEY, DEFAULT_HOST),
            port: config.get_parsed(PORT_KEY)?.unwrap_or(DEFAULT_PORT),
            dispatcher: DispatcherConfig::from_service(config)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_service(&ConfigService::default()).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_values_from_service() {
        let service = ConfigService::default();
        service.set(HOST_KEY, "127.0.0.1");
        service.set(PORT_KEY, "8089");
        service.set(BODY_LIMIT_KEY, " 1024 ");

        let config = ServerConfig::from_service(&service).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8089");
        assert_eq!(config.dispatcher.body_limit, 1024);
    }

    #[test]
    fn test_malformed_number_is_rejected() {
        let service = ConfigService::default();
        service.set(PORT_KEY, "eighty");

        let err = ServerConfig::from_service(&service).unwrap_err();
        assert!(matches!(
            err,
            FormRouteError::InvalidConfig { ref key, ref value } if key == PORT_KEY && value == "eighty"
        ));
    }
}
