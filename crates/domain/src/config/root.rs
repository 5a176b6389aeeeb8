use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::openstack::OpenStackConfig;
use super::server::ServerConfig;

const DEFAULT_CONFIG_PATHS: &[&str] = &["nimbus-dns.toml", "/etc/nimbus-dns/nimbus-dns.toml"];

/// Root configuration, loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub openstack: OpenStackConfig,
}

/// Values given on the command line. They win over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load from `path`, or from the first default location that exists.
    /// Falls back to built-in defaults when no file is found.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let resolved = match path {
            Some(p) => Some(p.to_string()),
            None => DEFAULT_CONFIG_PATHS
                .iter()
                .find(|p| Path::new(p).exists())
                .map(|p| p.to_string()),
        };

        let mut config = match resolved {
            Some(p) => {
                let content =
                    std::fs::read_to_string(&p).map_err(|e| ConfigError::FileRead {
                        path: p.clone(),
                        reason: e.to_string(),
                    })?;
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        config.openstack.normalize();
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation(
                "server.dns_port cannot be 0".to_string(),
            ));
        }
        if self.server.bind_address.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "server.bind_address '{}' is not an IP address",
                self.server.bind_address
            )));
        }
        self.openstack.validate().map_err(ConfigError::Validation)
    }

    pub fn dns_bind_address(&self) -> String {
        match self.server.bind_address.parse::<std::net::IpAddr>() {
            Ok(ip) => std::net::SocketAddr::new(ip, self.server.dns_port).to_string(),
            Err(_) => format!("{}:{}", self.server.bind_address, self.server.dns_port),
        }
    }
}
