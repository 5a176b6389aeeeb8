use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RecordType};
use nimbus_dns_infrastructure::dns::DnsHandler;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub fn query_message(id: u16, name: &str, qtype: RecordType) -> Message {
    let mut query = Query::new();
    query.set_name(Name::from_str(name).unwrap());
    query.set_query_type(qtype);
    query.set_query_class(hickory_proto::rr::DNSClass::IN);

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);
    message
}

/// Next link that records what it was given and answers REFUSED.
pub struct RecordingHandler {
    calls: Arc<AtomicU64>,
    seen: Arc<Mutex<Vec<Message>>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicU64::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn seen(&self) -> Vec<Message> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsHandler for RecordingHandler {
    fn name(&self) -> &'static str {
        "recorder"
    }

    async fn serve(&self, request: &Message) -> Message {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.seen.lock().unwrap().push(request.clone());

        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response.set_response_code(ResponseCode::Refused);
        response
    }
}
