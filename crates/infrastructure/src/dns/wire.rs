//! Conversion between hickory-proto messages and domain types.

use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, PTR};
use hickory_proto::rr::{Name, RData, Record, RecordType as HickoryRecordType};
use nimbus_dns_domain::{AnswerData, AnswerRecord, DnsQuery, DomainError, RecordType};
use std::str::FromStr;

/// Convert hickory RecordType → domain RecordType
pub fn record_type_from_hickory(record_type: HickoryRecordType) -> RecordType {
    match record_type {
        HickoryRecordType::A => RecordType::A,
        HickoryRecordType::AAAA => RecordType::AAAA,
        HickoryRecordType::CNAME => RecordType::CNAME,
        HickoryRecordType::MX => RecordType::MX,
        HickoryRecordType::NS => RecordType::NS,
        HickoryRecordType::PTR => RecordType::PTR,
        HickoryRecordType::SOA => RecordType::SOA,
        HickoryRecordType::SRV => RecordType::SRV,
        HickoryRecordType::TXT => RecordType::TXT,
        other => RecordType::Other(u16::from(other)),
    }
}

/// First question of a request. `None` for an empty question section.
pub fn query_from_message(request: &Message) -> Option<DnsQuery> {
    let query = request.queries().first()?;
    Some(DnsQuery::new(
        query.name().to_string(),
        record_type_from_hickory(query.query_type()),
    ))
}

pub fn to_hickory_record(answer: &AnswerRecord) -> Result<Record, DomainError> {
    let name = parse_name(&answer.name)?;
    let rdata = match &answer.data {
        AnswerData::A(ip) => RData::A(A(*ip)),
        AnswerData::Ptr(target) => RData::PTR(PTR(parse_name(target)?)),
    };
    Ok(Record::from_rdata(name, answer.ttl, rdata))
}

fn parse_name(name: &str) -> Result<Name, DomainError> {
    Name::from_str(name)
        .map_err(|e| DomainError::InvalidDomainName(format!("Invalid name '{}': {}", name, e)))
}

/// Reply skeleton: same id, opcode, RD flag and question as the request.
pub fn response_for(request: &Message, rcode: ResponseCode) -> Message {
    let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
    response.set_recursion_desired(request.recursion_desired());
    response.set_response_code(rcode);
    for query in request.queries() {
        response.add_query(query.clone());
    }
    response
}

/// Authoritative NOERROR reply whose answer section is exactly `answers`.
pub fn answer_response(request: &Message, answers: &[AnswerRecord]) -> Result<Message, DomainError> {
    let records = answers
        .iter()
        .map(to_hickory_record)
        .collect::<Result<Vec<_>, _>>()?;

    let mut response = response_for(request, ResponseCode::NoError);
    response.set_authoritative(true);
    response.add_answers(records);
    Ok(response)
}
