use nimbus_dns_domain::zones::fqdn;
use nimbus_dns_domain::AnswerRecord;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Turns directory lookup results into answer records with the configured TTL.
#[derive(Debug, Clone, Copy)]
pub struct AnswerSynthesizer {
    ttl: u32,
}

impl AnswerSynthesizer {
    pub fn new(ttl: u32) -> Self {
        Self { ttl }
    }

    /// One A record per address, in lookup order.
    pub fn address_records(&self, qname: &Arc<str>, ips: &[Ipv4Addr]) -> Vec<AnswerRecord> {
        ips.iter()
            .map(|ip| AnswerRecord::a(Arc::clone(qname), self.ttl, *ip))
            .collect()
    }

    /// One PTR record per hostname, in lookup order. Targets are always
    /// fully qualified.
    pub fn pointer_records(&self, qname: &Arc<str>, names: &[Arc<str>]) -> Vec<AnswerRecord> {
        names
            .iter()
            .map(|name| {
                let target: Arc<str> = if name.ends_with('.') {
                    Arc::clone(name)
                } else {
                    Arc::from(fqdn(name).as_str())
                };
                AnswerRecord::ptr(Arc::clone(qname), self.ttl, target)
            })
            .collect()
    }
}
