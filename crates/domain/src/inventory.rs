//! Host records as delivered by an inventory provider.

use std::net::Ipv4Addr;

/// Provider-assigned role of an address. Only `Floating` is excluded from
/// the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressRole {
    Fixed,
    Floating,
    Other(String),
    Unspecified,
}

impl AddressRole {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            None => AddressRole::Unspecified,
            Some(t) if t.eq_ignore_ascii_case("fixed") => AddressRole::Fixed,
            Some(t) if t.eq_ignore_ascii_case("floating") => AddressRole::Floating,
            Some(t) => AddressRole::Other(t.to_string()),
        }
    }
}

/// One address attached to a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressEntry {
    pub addr: String,
    pub version: u8,
    pub role: AddressRole,
}

/// Why an address entry did or did not make it into the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressDisposition {
    Accept(Ipv4Addr),
    SkipFloating,
    SkipNonIpv4,
    SkipMalformed,
}

impl AddressEntry {
    pub fn new(addr: impl Into<String>, version: u8, role: AddressRole) -> Self {
        Self {
            addr: addr.into(),
            version,
            role,
        }
    }

    pub fn classify(&self) -> AddressDisposition {
        if self.version != 4 {
            return AddressDisposition::SkipNonIpv4;
        }
        if self.role == AddressRole::Floating {
            return AddressDisposition::SkipFloating;
        }
        match self.addr.trim().parse::<Ipv4Addr>() {
            Ok(ip) => AddressDisposition::Accept(ip),
            Err(_) => AddressDisposition::SkipMalformed,
        }
    }
}

/// A host with its unqualified name and address entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryHost {
    pub name: String,
    pub addresses: Vec<AddressEntry>,
    /// Entries the provider could not decode at all. They never reach
    /// `addresses` but are reported so the refresh can count them.
    pub undecodable: usize,
}

impl InventoryHost {
    pub fn new(name: impl Into<String>, addresses: Vec<AddressEntry>) -> Self {
        Self {
            name: name.into(),
            addresses,
            undecodable: 0,
        }
    }
}
