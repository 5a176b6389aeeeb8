//! Keystone and Nova payloads.
//!
//! Server addresses are decoded in two steps: the per-network lists are kept
//! as raw JSON values, then each entry is decoded on its own into
//! [`NovaAddress`]. An entry that does not fit is counted and dropped without
//! affecting its siblings.

use nimbus_dns_domain::config::AuthConfig;
use nimbus_dns_domain::{AddressEntry, AddressRole, InventoryHost};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Keystone request
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    auth: Auth<'a>,
}

#[derive(Debug, Serialize)]
struct Auth<'a> {
    identity: Identity<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<Scope<'a>>,
}

#[derive(Debug, Serialize)]
struct Identity<'a> {
    methods: [&'static str; 1],
    password: PasswordMethod<'a>,
}

#[derive(Debug, Serialize)]
struct PasswordMethod<'a> {
    user: User<'a>,
}

#[derive(Debug, Serialize)]
struct User<'a> {
    name: &'a str,
    domain: NamedDomain<'a>,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct NamedDomain<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct Scope<'a> {
    project: ProjectRef<'a>,
}

#[derive(Debug, Serialize)]
struct ProjectRef<'a> {
    id: &'a str,
}

impl<'a> AuthRequest<'a> {
    pub fn password(auth: &'a AuthConfig) -> Self {
        Self {
            auth: Auth {
                identity: Identity {
                    methods: ["password"],
                    password: PasswordMethod {
                        user: User {
                            name: &auth.username,
                            domain: NamedDomain {
                                name: &auth.domain_name,
                            },
                            password: &auth.password,
                        },
                    },
                },
                scope: auth
                    .tenant_id
                    .as_deref()
                    .filter(|id| !id.is_empty())
                    .map(|id| Scope {
                        project: ProjectRef { id },
                    }),
            },
        }
    }
}

// ============================================================================
// Keystone response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: Token,
}

#[derive(Debug, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Deserialize)]
pub struct Endpoint {
    pub interface: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    pub url: String,
}

impl Token {
    /// Public compute endpoint for `region`, without a trailing slash.
    pub fn compute_endpoint(&self, region: &str) -> Option<String> {
        self.catalog
            .iter()
            .filter(|entry| entry.service_type == "compute")
            .flat_map(|entry| entry.endpoints.iter())
            .find(|ep| {
                ep.interface == "public"
                    && (ep.region_id.as_deref() == Some(region)
                        || ep.region.as_deref() == Some(region))
            })
            .map(|ep| ep.url.trim_end_matches('/').to_string())
    }
}

// ============================================================================
// Nova servers
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ServersPage {
    pub servers: Vec<ServerDetail>,
    #[serde(default)]
    pub servers_links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

#[derive(Debug, Deserialize)]
pub struct ServerDetail {
    pub name: String,
    #[serde(default)]
    pub addresses: Option<BTreeMap<String, Vec<serde_json::Value>>>,
}

#[derive(Debug, Deserialize)]
pub struct NovaAddress {
    pub addr: String,
    pub version: u8,
    #[serde(rename = "OS-EXT-IPS:type", default)]
    pub ip_type: Option<String>,
}

impl ServersPage {
    pub fn next_link(&self) -> Option<&str> {
        self.servers_links
            .iter()
            .find(|link| link.rel == "next")
            .map(|link| link.href.as_str())
    }
}

impl ServerDetail {
    pub fn into_host(self) -> InventoryHost {
        let mut host = InventoryHost::new(self.name, Vec::new());
        for entries in self.addresses.unwrap_or_default().into_values() {
            for value in entries {
                match serde_json::from_value::<NovaAddress>(value) {
                    Ok(addr) => host.addresses.push(AddressEntry::new(
                        addr.addr,
                        addr.version,
                        AddressRole::from_tag(addr.ip_type.as_deref()),
                    )),
                    Err(_) => host.undecodable += 1,
                }
            }
        }
        host
    }
}
