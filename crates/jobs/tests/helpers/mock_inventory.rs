use async_trait::async_trait;
use nimbus_dns_application::ports::{InventoryProvider, InventorySession};
use nimbus_dns_domain::{AddressEntry, AddressRole, DomainError, InventoryHost};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn host(name: &str, addr: &str) -> InventoryHost {
    InventoryHost::new(name, vec![AddressEntry::new(addr, 4, AddressRole::Fixed)])
}

// ============================================================================
// Mock InventoryProvider
// ============================================================================

/// Serves a single page of hosts. An optional delay is applied while the
/// page is being listed, to simulate a slow compute API.
pub struct MockInventoryProvider {
    hosts: Arc<Mutex<Vec<InventoryHost>>>,
    auth_calls: Arc<AtomicU64>,
    completed: Arc<AtomicU64>,
    fail_auth: Arc<AtomicBool>,
    list_delay: Duration,
}

impl MockInventoryProvider {
    pub fn new(hosts: Vec<InventoryHost>) -> Self {
        Self {
            hosts: Arc::new(Mutex::new(hosts)),
            auth_calls: Arc::new(AtomicU64::new(0)),
            completed: Arc::new(AtomicU64::new(0)),
            fail_auth: Arc::new(AtomicBool::new(false)),
            list_delay: Duration::ZERO,
        }
    }

    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = delay;
        self
    }

    pub fn set_hosts(&self, hosts: Vec<InventoryHost>) {
        *self.hosts.lock().unwrap() = hosts;
    }

    pub fn set_fail_auth(&self, fail: bool) {
        self.fail_auth.store(fail, Ordering::Relaxed);
    }

    pub fn auth_calls(&self) -> u64 {
        self.auth_calls.load(Ordering::Relaxed)
    }

    /// Sessions that delivered their page.
    pub fn completed_listings(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl InventoryProvider for MockInventoryProvider {
    async fn authenticate(&self) -> Result<Box<dyn InventorySession>, DomainError> {
        self.auth_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_auth.load(Ordering::Relaxed) {
            return Err(DomainError::InventoryAuth("401 Unauthorized".to_string()));
        }
        let page = self.hosts.lock().unwrap().clone();
        Ok(Box::new(MockSession {
            page: Some(page),
            delay: self.list_delay,
            completed: Arc::clone(&self.completed),
        }))
    }
}

struct MockSession {
    page: Option<Vec<InventoryHost>>,
    delay: Duration,
    completed: Arc<AtomicU64>,
}

#[async_trait]
impl InventorySession for MockSession {
    async fn next_page(&mut self) -> Result<Option<Vec<InventoryHost>>, DomainError> {
        let Some(page) = self.page.take() else {
            return Ok(None);
        };
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.completed.fetch_add(1, Ordering::Relaxed);
        Ok(Some(page))
    }
}
