use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::zones::{is_valid_name, normalize, Fallthrough, Zones};

/// Keystone credentials passed through to the inventory provider.
#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Identity endpoint, e.g. "https://keystone.example.org:5000/v3"
    #[serde(default)]
    pub auth_url: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_domain_name")]
    pub domain_name: String,

    /// Project to scope the token to. Unscoped when absent.
    #[serde(default)]
    pub tenant_id: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("auth_url", &self.auth_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("domain_name", &self.domain_name)
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            auth_url: String::new(),
            username: default_username(),
            password: String::new(),
            domain_name: default_domain_name(),
            tenant_id: None,
        }
    }
}

/// Inventory-backed zone configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenStackConfig {
    /// Zones this service is authoritative for (e.g. ["cloud.example.org."])
    #[serde(default)]
    pub zones: Vec<String>,

    /// TTL of synthesized answers in seconds (1-65535)
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Seconds between inventory refreshes. 0 refreshes once at startup only.
    #[serde(default = "default_reload_secs")]
    pub reload_secs: u64,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Zones whose unanswerable queries go to the next handler.
    /// Absent disables fallthrough; an empty list covers every zone.
    #[serde(default)]
    pub fallthrough: Option<Vec<String>>,
}

impl Default for OpenStackConfig {
    fn default() -> Self {
        Self {
            zones: Vec::new(),
            ttl: default_ttl(),
            reload_secs: default_reload_secs(),
            region: default_region(),
            auth: AuthConfig::default(),
            fallthrough: None,
        }
    }
}

impl OpenStackConfig {
    pub fn zone_set(&self) -> Zones {
        Zones::new(&self.zones)
    }

    pub fn fallthrough_set(&self) -> Fallthrough {
        match &self.fallthrough {
            None => Fallthrough::disabled(),
            Some(zones) => Fallthrough::from_zones(zones),
        }
    }

    pub fn reload_interval(&self) -> Duration {
        Duration::from_secs(self.reload_secs)
    }

    /// Lowercase and fully qualify every configured zone.
    pub fn normalize(&mut self) {
        self.zones = self.zones.iter().map(|z| normalize(z)).collect();
        if let Some(fall) = self.fallthrough.as_mut() {
            *fall = fall.iter().map(|z| normalize(z)).collect();
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.zones.is_empty() {
            return Err("openstack.zones must list at least one zone".to_string());
        }
        if let Some(bad) = self.zones.iter().find(|z| !is_valid_name(z)) {
            return Err(format!("openstack.zones contains an invalid zone '{}'", bad));
        }
        if let Some(bad) = self
            .fallthrough
            .iter()
            .flatten()
            .find(|z| !is_valid_name(z))
        {
            return Err(format!(
                "openstack.fallthrough contains an invalid zone '{}'",
                bad
            ));
        }
        if self.ttl == 0 || self.ttl > 65535 {
            return Err(format!(
                "openstack.ttl must be between 1 and 65535, got {}",
                self.ttl
            ));
        }
        if self.auth.auth_url.is_empty() {
            return Err("openstack.auth.auth_url is required".to_string());
        }
        if !self.auth.auth_url.starts_with("http://") && !self.auth.auth_url.starts_with("https://")
        {
            return Err("openstack.auth.auth_url must start with http:// or https://".to_string());
        }
        if self.region.is_empty() {
            return Err("openstack.region cannot be empty".to_string());
        }
        Ok(())
    }
}

fn default_ttl() -> u32 {
    3600
}

fn default_reload_secs() -> u64 {
    30
}

fn default_region() -> String {
    "RegionOne".to_string()
}

fn default_username() -> String {
    "coredns".to_string()
}

fn default_domain_name() -> String {
    "default".to_string()
}
