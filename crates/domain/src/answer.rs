use std::net::Ipv4Addr;
use std::sync::Arc;

/// Typed payload of a synthesized answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerData {
    A(Ipv4Addr),
    /// Pointer target, always fully qualified (trailing dot).
    Ptr(Arc<str>),
}

/// One resource record in an answer section, independent of any wire library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    /// Owner name, the query name as asked.
    pub name: Arc<str>,
    pub ttl: u32,
    pub data: AnswerData,
}

impl AnswerRecord {
    pub fn a(name: Arc<str>, ttl: u32, address: Ipv4Addr) -> Self {
        Self {
            name,
            ttl,
            data: AnswerData::A(address),
        }
    }

    pub fn ptr(name: Arc<str>, ttl: u32, target: Arc<str>) -> Self {
        Self {
            name,
            ttl,
            data: AnswerData::Ptr(target),
        }
    }
}
