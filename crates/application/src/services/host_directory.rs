use rustc_hash::FxHashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

/// Immutable point-in-time index, hostname ↔ IPv4.
///
/// Built once by a [`DirectoryBuilder`] and never mutated afterwards. Lookups
/// return owned copies so callers cannot reach into the live snapshot.
#[derive(Debug, Default)]
pub struct HostDirectory {
    forward: FxHashMap<Arc<str>, Vec<Ipv4Addr>>,
    reverse: FxHashMap<Ipv4Addr, Vec<Arc<str>>>,
}

impl HostDirectory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Addresses for a fully-qualified name, in accumulation order.
    /// The name is matched case-insensitively; the trailing dot is optional.
    pub fn lookup_forward(&self, name: &str) -> Vec<Ipv4Addr> {
        let key = nimbus_dns_domain::zones::normalize(name);
        self.forward
            .get(key.as_str())
            .cloned()
            .unwrap_or_default()
    }

    /// Hostnames for an address given in textual form. Anything that does
    /// not parse as an IP address yields nothing.
    pub fn lookup_reverse(&self, addr: &str) -> Vec<Arc<str>> {
        match addr.trim().parse::<IpAddr>() {
            Ok(ip) => self.lookup_reverse_ip(ip),
            Err(_) => Vec::new(),
        }
    }

    pub fn lookup_reverse_ip(&self, ip: IpAddr) -> Vec<Arc<str>> {
        match ip {
            IpAddr::V4(v4) => self.reverse.get(&v4).cloned().unwrap_or_default(),
            IpAddr::V6(_) => Vec::new(),
        }
    }

    pub fn name_count(&self) -> usize {
        self.forward.len()
    }

    pub fn address_count(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Private, unpublished directory under construction.
#[derive(Debug, Default)]
pub struct DirectoryBuilder {
    directory: HostDirectory,
    pairs: usize,
}

impl DirectoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name → ip` and `ip → name` together. Duplicates are kept.
    pub fn insert(&mut self, name: &str, ip: Ipv4Addr) {
        let name: Arc<str> = Arc::from(nimbus_dns_domain::zones::normalize(name).as_str());
        self.directory
            .forward
            .entry(Arc::clone(&name))
            .or_default()
            .push(ip);
        self.directory.reverse.entry(ip).or_default().push(name);
        self.pairs += 1;
    }

    /// Number of `(name, ip)` pairs recorded so far.
    pub fn pair_count(&self) -> usize {
        self.pairs
    }

    pub fn build(self) -> HostDirectory {
        self.directory
    }
}
