use crate::ports::InventoryProvider;
use crate::services::{DirectoryBuilder, DirectoryStore};
use nimbus_dns_domain::zones::{is_valid_name, join};
use nimbus_dns_domain::{AddressDisposition, DomainError, InventoryHost, Zones};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument, Span};

/// Counts for a single refresh cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub pages: usize,
    pub hosts: usize,
    /// Addresses that survived filtering, counted once per host.
    pub addresses: usize,
    /// Distinct fully-qualified names published.
    pub names: usize,
    pub skipped_floating: usize,
    pub skipped_non_ipv4: usize,
    pub skipped_malformed: usize,
    /// Host-zone pairs whose joined name breaks DNS label or length limits.
    pub skipped_invalid_name: usize,
}

/// Lifetime counters across all cycles.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
    pub cycles_succeeded: AtomicU64,
    pub cycles_failed: AtomicU64,
    pub hosts_seen: AtomicU64,
    pub addresses_published: AtomicU64,
    pub skipped_floating: AtomicU64,
    pub skipped_non_ipv4: AtomicU64,
    pub skipped_malformed: AtomicU64,
    pub skipped_invalid_name: AtomicU64,
}

impl RefreshMetrics {
    fn record_success(&self, stats: &RefreshStats) {
        self.cycles_succeeded.fetch_add(1, Ordering::Relaxed);
        self.hosts_seen
            .fetch_add(stats.hosts as u64, Ordering::Relaxed);
        self.addresses_published
            .fetch_add(stats.addresses as u64, Ordering::Relaxed);
        self.skipped_floating
            .fetch_add(stats.skipped_floating as u64, Ordering::Relaxed);
        self.skipped_non_ipv4
            .fetch_add(stats.skipped_non_ipv4 as u64, Ordering::Relaxed);
        self.skipped_malformed
            .fetch_add(stats.skipped_malformed as u64, Ordering::Relaxed);
        self.skipped_invalid_name
            .fetch_add(stats.skipped_invalid_name as u64, Ordering::Relaxed);
    }

    fn record_failure(&self) {
        self.cycles_failed.fetch_add(1, Ordering::Relaxed);
    }
}

/// One authenticate + list + rebuild + publish cycle.
///
/// A failure at any step leaves the published directory untouched; the
/// replacement is built privately and only handed to the store once the
/// whole listing succeeded.
pub struct RefreshInventoryUseCase {
    provider: Arc<dyn InventoryProvider>,
    store: Arc<DirectoryStore>,
    zones: Zones,
    metrics: Arc<RefreshMetrics>,
    span: Span,
}

impl RefreshInventoryUseCase {
    pub fn new(provider: Arc<dyn InventoryProvider>, store: Arc<DirectoryStore>, zones: Zones) -> Self {
        Self {
            provider,
            store,
            zones,
            metrics: Arc::new(RefreshMetrics::default()),
            span: info_span!("openstack", task = "refresh"),
        }
    }

    /// Record every log line of this use case inside `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn metrics(&self) -> &Arc<RefreshMetrics> {
        &self.metrics
    }

    pub async fn execute(&self) -> Result<RefreshStats, DomainError> {
        let result = self.run_cycle().instrument(self.span.clone()).await;
        match &result {
            Ok(stats) => self.metrics.record_success(stats),
            Err(_) => self.metrics.record_failure(),
        }
        result
    }

    async fn run_cycle(&self) -> Result<RefreshStats, DomainError> {
        debug!("Updating server list");

        let mut session = self.provider.authenticate().await.map_err(|e| {
            error!(error = %e, "Authentication failed; keeping current directory");
            e
        })?;

        let mut builder = DirectoryBuilder::new();
        let mut stats = RefreshStats::default();

        loop {
            let page = match session.next_page().await {
                Ok(Some(page)) => page,
                Ok(None) => break,
                Err(e) => {
                    error!(
                        error = %e,
                        pages_read = stats.pages,
                        "Failed to list servers; keeping current directory"
                    );
                    return Err(e);
                }
            };

            stats.pages += 1;
            for host in &page {
                self.add_host(&mut builder, host, &mut stats);
            }
        }

        let pairs = builder.pair_count();
        let directory = builder.build();
        stats.names = directory.name_count();
        let reverse_entries = directory.address_count();
        self.store.publish(directory);

        info!(
            pages = stats.pages,
            hosts = stats.hosts,
            addresses = stats.addresses,
            names = stats.names,
            reverse_entries,
            pairs,
            skipped_floating = stats.skipped_floating,
            skipped_non_ipv4 = stats.skipped_non_ipv4,
            skipped_malformed = stats.skipped_malformed,
            skipped_invalid_name = stats.skipped_invalid_name,
            "Host directory published"
        );

        Ok(stats)
    }

    fn add_host(&self, builder: &mut DirectoryBuilder, host: &InventoryHost, stats: &mut RefreshStats) {
        stats.hosts += 1;
        stats.skipped_malformed += host.undecodable;

        let name = host.name.trim();
        if name.is_empty() {
            warn!("Skipping host with empty name");
            return;
        }

        let mut accepted: Vec<Ipv4Addr> = Vec::with_capacity(host.addresses.len());
        for entry in &host.addresses {
            match entry.classify() {
                AddressDisposition::Accept(ip) => accepted.push(ip),
                AddressDisposition::SkipFloating => stats.skipped_floating += 1,
                AddressDisposition::SkipNonIpv4 => stats.skipped_non_ipv4 += 1,
                AddressDisposition::SkipMalformed => {
                    debug!(host = %name, addr = %entry.addr, "Skipping malformed address");
                    stats.skipped_malformed += 1;
                }
            }
        }
        stats.addresses += accepted.len();

        for zone in self.zones.iter() {
            let fqdn = join(name, zone);
            if !is_valid_name(&fqdn) {
                debug!(host = %name, zone = %zone, "Skipping name outside DNS limits");
                stats.skipped_invalid_name += 1;
                continue;
            }
            for ip in &accepted {
                builder.insert(&fqdn, *ip);
            }
        }
    }
}
