//! cache purge signalling
//!
//! An administrator asks for cache invalidation by handing the
//! resolver a synthetic DNS query: class CHAOS, type NULL, with the
//! qname carrying `base64("<QTYPE>:<fqdn(name)>")`. The query never
//! goes out on the wire; any component that sees one decodes it and
//! evicts the matching cache entries instead of resolving it.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::dns::protocol::{DnsPacket, DnsQuestion, QueryClass, QueryType};
use crate::dns::question::{fqdn, unfqdn};

/// Build the synthetic purge query for a `(qname, qtype)` pair. The
/// question name is the fully qualified form of the base64 payload.
pub fn encode(qtype: QueryType, qname: &str) -> DnsPacket {
    let payload = format!("{}:{}", qtype, fqdn(qname));
    let encoded = STANDARD.encode(payload.as_bytes());

    DnsPacket::query(&fqdn(&encoded), QueryType::Null, QueryClass::Ch, false)
}

/// Recognise a purge question and recover the `(qtype, qname)` pair
/// it names. Returns `None` for ordinary questions and for CHAOS
/// NULL questions whose payload does not decode.
pub fn decode(question: &DnsQuestion) -> Option<(QueryType, String)> {
    if question.qclass != QueryClass::Ch || question.qtype != QueryType::Null {
        return None;
    }

    let raw = STANDARD.decode(unfqdn(&question.name).as_bytes()).ok()?;
    let payload = String::from_utf8(raw).ok()?;

    let (qtype_text, qname) = payload.split_once(':')?;
    let qtype = QueryType::from_mnemonic(qtype_text)?;

    Some((qtype, qname.to_string()))
}
