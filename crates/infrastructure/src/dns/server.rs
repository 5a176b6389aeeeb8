use super::handler::DnsHandler;
use async_trait::async_trait;
use hickory_proto::op::{Edns, Header, Message, ResponseCode};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error};

/// Smallest payload a UDP responder may assume (RFC 6891 section 6.2.5).
const MIN_UDP_PAYLOAD: u16 = 512;

const EDNS_VERSION: u8 = 0;

/// hickory-server entry point: turns each request into a `Message`, runs it
/// through the handler chain and sends whatever the chain decided.
///
/// Transport concerns (framing, truncation against the client's advertised
/// payload size, per-connection timeouts) stay with `ServerFuture`.
#[derive(Clone)]
pub struct DnsServerHandler {
    chain: Arc<dyn DnsHandler>,
}

impl DnsServerHandler {
    pub fn new(chain: Arc<dyn DnsHandler>) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let message = request_message(request);
        let response = self.chain.serve(&message).await;

        debug!(
            id = response.id(),
            rcode = %response.response_code(),
            answers = response.answers().len(),
            handler = self.chain.name(),
            "Sending reply"
        );

        let mut builder = MessageResponseBuilder::from_message_request(request);
        if let Some(edns) = response_edns(request) {
            builder.edns(edns);
        }
        let reply = builder.build(
            *response.header(),
            response.answers(),
            response.name_servers(),
            std::iter::empty(),
            response.additionals(),
        );

        match response_handle.send_response(reply).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send DNS reply");
                let mut header = Header::response_from_request(request.header());
                header.set_response_code(ResponseCode::ServFail);
                header.into()
            }
        }
    }
}

/// Rebuild the request as a plain `Message` for the handler chain. A request
/// without a usable question keeps an empty question section.
fn request_message(request: &Request) -> Message {
    let header = request.header();
    let mut message = Message::new(header.id(), header.message_type(), header.op_code());
    message.set_recursion_desired(header.recursion_desired());
    message.set_checking_disabled(header.checking_disabled());

    if let Ok(info) = request.request_info() {
        message.add_query(info.query.original().clone());
    }
    if let Some(edns) = request.edns() {
        message.set_edns(edns.clone());
    }
    message
}

/// OPT record for the reply. Present only when the client sent one; the
/// advertised payload size carries over so large answers fit in one
/// datagram.
fn response_edns(request: &Request) -> Option<Edns> {
    let requested = request.edns()?;
    let mut edns = Edns::new();
    edns.set_version(EDNS_VERSION);
    edns.set_max_payload(requested.max_payload().max(MIN_UDP_PAYLOAD));
    Some(edns)
}
