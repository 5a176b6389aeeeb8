use crate::services::{AnswerSynthesizer, DirectoryStore};
use nimbus_dns_domain::reverse::extract_address;
use nimbus_dns_domain::zones::normalize;
use nimbus_dns_domain::{AnswerRecord, DnsQuery, Fallthrough, RecordType, Zones};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info_span, Span};

/// Terminal outcome of one query. Decline and server failure are policy
/// results, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Authoritative reply carrying exactly these records.
    Answer(Vec<AnswerRecord>),
    /// Not ours: hand the original request to the next handler.
    Decline,
    /// Ours, but nothing to answer and fallthrough does not cover it.
    ServerFailure,
}

impl DispatchOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            DispatchOutcome::Answer(_) => "answer",
            DispatchOutcome::Decline => "decline",
            DispatchOutcome::ServerFailure => "servfail",
        }
    }
}

#[derive(Debug, Default)]
pub struct DispatchMetrics {
    pub answered: AtomicU64,
    pub declined: AtomicU64,
    pub server_failures: AtomicU64,
}

impl DispatchMetrics {
    fn record(&self, outcome: &DispatchOutcome) {
        let counter = match outcome {
            DispatchOutcome::Answer(_) => &self.answered,
            DispatchOutcome::Decline => &self.declined,
            DispatchOutcome::ServerFailure => &self.server_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Decides, per query, whether this service answers, declines or fails.
///
/// Decision table:
///   PTR            → reverse lookup, regardless of configured zones
///   A in a zone    → forward lookup
///   anything else  → decline
///
/// An empty lookup declines when fallthrough covers the name and is a
/// server failure otherwise. Reads the directory at most once and never
/// performs I/O.
pub struct QueryDispatcher {
    store: Arc<DirectoryStore>,
    zones: Zones,
    fallthrough: Fallthrough,
    synthesizer: AnswerSynthesizer,
    metrics: Arc<DispatchMetrics>,
    span: Span,
}

impl QueryDispatcher {
    pub fn new(
        store: Arc<DirectoryStore>,
        zones: Zones,
        fallthrough: Fallthrough,
        ttl: u32,
    ) -> Self {
        Self {
            store,
            zones,
            fallthrough,
            synthesizer: AnswerSynthesizer::new(ttl),
            metrics: Arc::new(DispatchMetrics::default()),
            span: info_span!("openstack", task = "dispatch"),
        }
    }

    /// Record every log line of the dispatcher inside `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn metrics(&self) -> &Arc<DispatchMetrics> {
        &self.metrics
    }

    pub fn dispatch(&self, query: &DnsQuery) -> DispatchOutcome {
        let _entered = self.span.enter();

        let outcome = self.decide(query);
        self.metrics.record(&outcome);

        debug!(
            qname = %query.name,
            qtype = %query.record_type,
            outcome = outcome.label(),
            "Query dispatched"
        );

        outcome
    }

    fn decide(&self, query: &DnsQuery) -> DispatchOutcome {
        let qname = normalize(&query.name);

        let answers = match query.record_type {
            RecordType::PTR => {
                let names = match extract_address(&qname) {
                    Some(ip) => self.store.current().lookup_reverse_ip(ip),
                    None => {
                        debug!(qname = %qname, "Reverse name carries no valid address");
                        Vec::new()
                    }
                };
                self.synthesizer.pointer_records(&query.name, &names)
            }
            RecordType::A if self.zones.matches(&qname).is_some() => {
                let ips = self.store.current().lookup_forward(&qname);
                self.synthesizer.address_records(&query.name, &ips)
            }
            _ => return DispatchOutcome::Decline,
        };

        if !answers.is_empty() {
            return DispatchOutcome::Answer(answers);
        }

        if self.fallthrough.through(&qname) {
            DispatchOutcome::Decline
        } else {
            DispatchOutcome::ServerFailure
        }
    }
}
