use super::types::{AuthRequest, ServersPage, TokenResponse};
use async_trait::async_trait;
use nimbus_dns_application::ports::{InventoryProvider, InventorySession};
use nimbus_dns_domain::config::AuthConfig;
use nimbus_dns_domain::{DomainError, InventoryHost};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Keystone + Nova backed inventory.
///
/// Holds one persistent HTTP client so refresh cycles reuse connections.
/// Every request is bounded by the client timeout; the refresh loop itself
/// imposes none.
pub struct OpenStackProvider {
    http: reqwest::Client,
    auth: AuthConfig,
    region: String,
}

impl OpenStackProvider {
    pub fn new(auth: AuthConfig, region: impl Into<String>) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("nimbus-dns/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::IoError(e.to_string()))?;

        Ok(Self {
            http,
            auth,
            region: region.into(),
        })
    }

    fn token_url(&self) -> String {
        format!("{}/auth/tokens", self.auth.auth_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl InventoryProvider for OpenStackProvider {
    async fn authenticate(&self) -> Result<Box<dyn InventorySession>, DomainError> {
        let url = self.token_url();
        let body = serde_json::to_vec(&AuthRequest::password(&self.auth))
            .map_err(|e| DomainError::InventoryAuth(e.to_string()))?;

        debug!(url = %url, user = %self.auth.username, "Requesting Keystone token");

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| DomainError::InventoryAuth(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::InventoryAuth(format!(
                "{} returned {}",
                url, status
            )));
        }

        let token = response
            .headers()
            .get(SUBJECT_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                DomainError::InventoryAuth(format!("{} response has no {}", url, SUBJECT_TOKEN_HEADER))
            })?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::InventoryAuth(e.to_string()))?;
        let parsed: TokenResponse = serde_json::from_slice(&bytes)
            .map_err(|e| DomainError::InventoryAuth(format!("invalid token body: {}", e)))?;

        let compute = parsed.token.compute_endpoint(&self.region).ok_or_else(|| {
            DomainError::InventoryAuth(format!(
                "no public compute endpoint for region '{}'",
                self.region
            ))
        })?;

        debug!(compute = %compute, region = %self.region, "Keystone token issued");

        Ok(Box::new(OpenStackSession {
            http: self.http.clone(),
            token,
            next: Some(format!("{}/servers/detail", compute)),
        }))
    }
}

/// Paginated `servers/detail` listing that follows `servers_links`.
pub struct OpenStackSession {
    http: reqwest::Client,
    token: String,
    next: Option<String>,
}

#[async_trait]
impl InventorySession for OpenStackSession {
    async fn next_page(&mut self) -> Result<Option<Vec<InventoryHost>>, DomainError> {
        let Some(url) = self.next.take() else {
            return Ok(None);
        };

        let response = self
            .http
            .get(&url)
            .header(AUTH_TOKEN_HEADER, &self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DomainError::InventoryList(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::InventoryList(format!(
                "{} returned {}",
                url, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::InventoryList(e.to_string()))?;
        let page: ServersPage = serde_json::from_slice(&bytes)
            .map_err(|e| DomainError::InventoryList(format!("invalid servers page: {}", e)))?;

        self.next = page
            .next_link()
            .filter(|href| *href != url)
            .map(str::to_string);

        let hosts: Vec<InventoryHost> = page.servers.into_iter().map(|s| s.into_host()).collect();
        debug!(url = %url, hosts = hosts.len(), more = self.next.is_some(), "Servers page fetched");

        Ok(Some(hosts))
    }
}
