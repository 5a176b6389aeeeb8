use super::wire::{answer_response, query_from_message, response_for};
use async_trait::async_trait;
use hickory_proto::op::{Message, ResponseCode};
use nimbus_dns_application::use_cases::{DispatchOutcome, QueryDispatcher};
use std::sync::Arc;
use tracing::{debug, error};

/// One link of a handler chain. Every request produces exactly one reply.
#[async_trait]
pub trait DnsHandler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn serve(&self, request: &Message) -> Message;
}

/// Hand `request` to the next link unmodified, or answer SERVFAIL when this
/// is the last link.
pub async fn next_or_failure(
    current: &str,
    next: Option<&Arc<dyn DnsHandler>>,
    request: &Message,
) -> Message {
    match next {
        Some(handler) => handler.serve(request).await,
        None => {
            debug!(handler = current, "No next handler; answering SERVFAIL");
            response_for(request, ResponseCode::ServFail)
        }
    }
}

/// The inventory-backed link: dispatches against the host directory and
/// maps the outcome onto a reply.
pub struct InventoryHandler {
    dispatcher: Arc<QueryDispatcher>,
    next: Option<Arc<dyn DnsHandler>>,
}

impl InventoryHandler {
    pub fn new(dispatcher: Arc<QueryDispatcher>) -> Self {
        Self {
            dispatcher,
            next: None,
        }
    }

    pub fn with_next(mut self, next: Arc<dyn DnsHandler>) -> Self {
        self.next = Some(next);
        self
    }
}

#[async_trait]
impl DnsHandler for InventoryHandler {
    fn name(&self) -> &'static str {
        "openstack"
    }

    async fn serve(&self, request: &Message) -> Message {
        let Some(query) = query_from_message(request) else {
            return response_for(request, ResponseCode::FormErr);
        };

        match self.dispatcher.dispatch(&query) {
            DispatchOutcome::Answer(records) => match answer_response(request, &records) {
                Ok(response) => response,
                Err(e) => {
                    error!(error = %e, qname = %query.name, "Failed to build answer");
                    response_for(request, ResponseCode::ServFail)
                }
            },
            DispatchOutcome::Decline => {
                next_or_failure(self.name(), self.next.as_ref(), request).await
            }
            DispatchOutcome::ServerFailure => response_for(request, ResponseCode::ServFail),
        }
    }
}
