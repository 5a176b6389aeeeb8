//! Zone suffix handling.
//!
//! All names are compared in normalized form: ASCII lowercase with a trailing
//! dot. Matching is label-aligned, so `example.org.` is an ancestor of
//! `web1.example.org.` but not of `badexample.org.`.

use std::sync::Arc;

const MAX_NAME_LEN: usize = 255;
const MAX_LABEL_LEN: usize = 63;

/// Append the root dot if the name is not already fully qualified.
pub fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Lowercase and fully qualify a name. The empty name is the root.
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == "." {
        return ".".to_string();
    }
    fqdn(&trimmed.to_ascii_lowercase())
}

/// Join an unqualified host label with a zone suffix.
///
/// `join("web1", "example.org.")` is `web1.example.org.`.
pub fn join(host: &str, zone: &str) -> String {
    let host = host.trim_end_matches('.');
    if zone == "." {
        return format!("{}.", host);
    }
    format!("{}.{}", host, zone)
}

/// Label-aligned ancestor check on normalized names. A name is its own
/// subdomain and the root is everyone's ancestor.
pub fn is_subdomain(parent: &str, child: &str) -> bool {
    if parent == "." || parent == child {
        return true;
    }
    child.len() > parent.len()
        && child.ends_with(parent)
        && child.as_bytes()[child.len() - parent.len() - 1] == b'.'
}

/// Label and length rules of RFC 1035 section 2.3.4. Applied to configured
/// zones and to every name the refresh publishes.
pub fn is_valid_name(name: &str) -> bool {
    let normalized = normalize(name);
    if normalized == "." {
        return true;
    }
    if normalized.len() > MAX_NAME_LEN {
        return false;
    }
    normalized
        .trim_end_matches('.')
        .split('.')
        .all(|label| !label.is_empty() && label.len() <= MAX_LABEL_LEN)
}

/// Ordered set of authoritative suffixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Zones {
    zones: Vec<Arc<str>>,
}

impl Zones {
    pub fn new<I, S>(zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<Arc<str>> = Vec::new();
        for zone in zones {
            let zone: Arc<str> = Arc::from(normalize(zone.as_ref()).as_str());
            if !normalized.contains(&zone) {
                normalized.push(zone);
            }
        }
        Self { zones: normalized }
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<str>> {
        self.zones.iter()
    }

    /// Longest configured zone that is an ancestor of `qname`.
    pub fn matches(&self, qname: &str) -> Option<&Arc<str>> {
        let qname = normalize(qname);
        self.zones
            .iter()
            .filter(|zone| is_subdomain(zone, &qname))
            .max_by_key(|zone| zone.len())
    }
}

/// Which zones may hand an unanswerable query to the next handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fallthrough {
    zones: Zones,
}

impl Fallthrough {
    /// Never fall through.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Fall through for every name.
    pub fn all() -> Self {
        Self {
            zones: Zones::new(["."]),
        }
    }

    /// An empty list means every zone, matching the directive with no arguments.
    pub fn from_zones<I, S>(zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let zones = Zones::new(zones);
        if zones.is_empty() {
            return Self::all();
        }
        Self { zones }
    }

    pub fn is_enabled(&self) -> bool {
        !self.zones.is_empty()
    }

    pub fn through(&self, qname: &str) -> bool {
        self.zones.matches(qname).is_some()
    }
}
