use std::fmt;
use std::sync::Arc;

/// Query types this service distinguishes. Everything else is carried as
/// `Other` so it can be declined to the next handler untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    NS,
    PTR,
    SOA,
    SRV,
    TXT,
    Other(u16),
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::A => f.write_str("A"),
            RecordType::AAAA => f.write_str("AAAA"),
            RecordType::CNAME => f.write_str("CNAME"),
            RecordType::MX => f.write_str("MX"),
            RecordType::NS => f.write_str("NS"),
            RecordType::PTR => f.write_str("PTR"),
            RecordType::SOA => f.write_str("SOA"),
            RecordType::SRV => f.write_str("SRV"),
            RecordType::TXT => f.write_str("TXT"),
            RecordType::Other(code) => write!(f, "TYPE{}", code),
        }
    }
}

/// Decoded question: name as received on the wire plus its type.
/// Uses `Arc<str>` so the name can be shared with synthesized answers.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub name: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }
}
