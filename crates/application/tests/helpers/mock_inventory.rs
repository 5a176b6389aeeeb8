use async_trait::async_trait;
use nimbus_dns_application::ports::{InventoryProvider, InventorySession};
use nimbus_dns_domain::{AddressEntry, AddressRole, DomainError, InventoryHost};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Fixtures
// ============================================================================

pub fn fixed(addr: &str) -> AddressEntry {
    AddressEntry::new(addr, 4, AddressRole::Fixed)
}

pub fn floating(addr: &str) -> AddressEntry {
    AddressEntry::new(addr, 4, AddressRole::Floating)
}

pub fn host(name: &str, addresses: Vec<AddressEntry>) -> InventoryHost {
    InventoryHost::new(name, addresses)
}

// ============================================================================
// Mock InventoryProvider
// ============================================================================

pub struct MockInventoryProvider {
    pages: Arc<RwLock<Vec<Vec<InventoryHost>>>>,
    auth_calls: Arc<AtomicU64>,
    page_calls: Arc<AtomicU64>,
    fail_auth: Arc<RwLock<bool>>,
    fail_at_page: Arc<RwLock<Option<usize>>>,
}

impl MockInventoryProvider {
    pub fn new() -> Self {
        Self::with_pages(Vec::new())
    }

    pub fn with_hosts(hosts: Vec<InventoryHost>) -> Self {
        Self::with_pages(vec![hosts])
    }

    pub fn with_pages(pages: Vec<Vec<InventoryHost>>) -> Self {
        Self {
            pages: Arc::new(RwLock::new(pages)),
            auth_calls: Arc::new(AtomicU64::new(0)),
            page_calls: Arc::new(AtomicU64::new(0)),
            fail_auth: Arc::new(RwLock::new(false)),
            fail_at_page: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_pages(&self, pages: Vec<Vec<InventoryHost>>) {
        *self.pages.write().await = pages;
    }

    pub async fn set_fail_auth(&self, fail: bool) {
        *self.fail_auth.write().await = fail;
    }

    /// Fail when the zero-based page `index` is requested.
    pub async fn set_fail_at_page(&self, index: Option<usize>) {
        *self.fail_at_page.write().await = index;
    }

    pub fn auth_calls(&self) -> u64 {
        self.auth_calls.load(Ordering::Relaxed)
    }

    pub fn page_calls(&self) -> u64 {
        self.page_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl InventoryProvider for MockInventoryProvider {
    async fn authenticate(&self) -> Result<Box<dyn InventorySession>, DomainError> {
        self.auth_calls.fetch_add(1, Ordering::Relaxed);
        if *self.fail_auth.read().await {
            return Err(DomainError::InventoryAuth("401 Unauthorized".to_string()));
        }
        Ok(Box::new(MockSession {
            pages: self.pages.read().await.clone(),
            next: 0,
            fail_at_page: *self.fail_at_page.read().await,
            page_calls: Arc::clone(&self.page_calls),
        }))
    }
}

struct MockSession {
    pages: Vec<Vec<InventoryHost>>,
    next: usize,
    fail_at_page: Option<usize>,
    page_calls: Arc<AtomicU64>,
}

#[async_trait]
impl InventorySession for MockSession {
    async fn next_page(&mut self) -> Result<Option<Vec<InventoryHost>>, DomainError> {
        self.page_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_at_page == Some(self.next) {
            return Err(DomainError::InventoryList(format!(
                "page {} returned 500",
                self.next
            )));
        }
        let page = self.pages.get(self.next).cloned();
        self.next += 1;
        Ok(page)
    }
}
