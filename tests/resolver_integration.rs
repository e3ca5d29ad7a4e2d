//! End to end scenarios for the recursive resolver
//!
//! Each test wires a `RecursiveResolver` to a scripted upstream that
//! plays the root, TLD and authoritative servers, then checks both
//! the response and the cache state the descent leaves behind.

use std::net::SocketAddr;
use std::sync::Arc;

use summit::dns::cache::{NameServerCache, TransientCache};
use summit::dns::client::{ClientError, DnsClient, Transport};
use summit::dns::context::{ResolverConfig, ResolverContext};
use summit::dns::protocol::{
    DnsPacket, DnsRecord, QueryClass, QueryType, ResultCode, TransientTtl,
};
use summit::dns::purge;
use summit::dns::question::QuestionKey;
use summit::dns::resolve::{RecursiveResolver, ResolveError};

type Script = dyn Fn(Transport, &DnsPacket, SocketAddr) -> Result<DnsPacket, ClientError>
    + Send
    + Sync;

/// Client whose upstream traffic is played by a closure.
struct ScriptedClient {
    script: Box<Script>,
}

impl DnsClient for ScriptedClient {
    fn get_sent_count(&self) -> usize {
        0
    }

    fn get_failed_count(&self) -> usize {
        0
    }

    fn exchange(
        &self,
        transport: Transport,
        request: &DnsPacket,
        server: SocketAddr,
    ) -> Result<DnsPacket, ClientError> {
        (self.script)(transport, request, server)
    }
}

fn scripted_context(script: Box<Script>) -> Arc<ResolverContext> {
    let config = ResolverConfig {
        interval_ms: 20,
        ..ResolverConfig::default()
    };

    let ns_cache = NameServerCache::new(config.ns_cache_size);
    let lookup_cache = TransientCache::new(config.transient_cache_size, config.transient_ttl_s);

    Arc::new(ResolverContext {
        config,
        client: Box::new(ScriptedClient { script }),
        ns_cache,
        lookup_cache,
    })
}

fn addr(s: &str) -> SocketAddr {
    s.parse().unwrap()
}

fn referral(zone: &str, host: &str, glue: &str) -> DnsPacket {
    let mut packet = DnsPacket::new();
    packet.header.response = true;
    packet.authorities.push(DnsRecord::Ns {
        domain: zone.to_string(),
        host: host.to_string(),
        ttl: TransientTtl(172800),
    });
    packet.resources.push(DnsRecord::A {
        domain: host.to_string(),
        addr: glue.parse().unwrap(),
        ttl: TransientTtl(172800),
    });

    packet
}

fn answer(qname: &str, ip: &str) -> DnsPacket {
    let mut packet = DnsPacket::new();
    packet.header.response = true;
    packet.answers.push(DnsRecord::A {
        domain: qname.to_string(),
        addr: ip.parse().unwrap(),
        ttl: TransientTtl(300),
    });

    packet
}

/// The root to TLD to authoritative walk: every hop is probed, every
/// delegation is cached, the answer comes back with Authority
/// stripped.
#[test]
fn test_root_to_authoritative_descent() {
    let context = scripted_context(Box::new(|_, request, server| {
        let qname = request.questions[0].name.clone();

        if server == "198.41.0.4:53".parse().unwrap() {
            Ok(referral("com", "a.gtld-servers.net", "192.0.2.10"))
        } else if server == "192.0.2.10:53".parse().unwrap() {
            Ok(referral("example.com", "ns1.example.com", "192.0.2.20"))
        } else if server == "192.0.2.20:53".parse().unwrap() {
            Ok(answer(&qname, "93.184.216.34"))
        } else {
            let mut packet = DnsPacket::new();
            packet.header.rescode = ResultCode::SERVFAIL;
            Ok(packet)
        }
    }));

    let resolver = RecursiveResolver::new(context.clone());

    let request = DnsPacket::query("example.com", QueryType::A, QueryClass::In, false);
    let response = resolver.resolve_request(Transport::Udp, &request).unwrap();

    assert_eq!(Some("93.184.216.34".parse().unwrap()), response.first_a());
    assert!(response.authorities.is_empty());

    let com_key = QuestionKey::new("com", QueryType::Ns, QueryClass::In);
    let example_key = QuestionKey::new("example.com", QueryType::Ns, QueryClass::In);

    assert_eq!(
        vec![addr("192.0.2.10:53")],
        context.ns_cache.get(&com_key).unwrap().servers
    );
    assert_eq!(
        vec![addr("192.0.2.20:53")],
        context.ns_cache.get(&example_key).unwrap().servers
    );

    // Warm repeat: the descent starts at the deepest cached ancestor
    // and never touches a root server again.
    let response = resolver.resolve_request(Transport::Udp, &request).unwrap();
    assert_eq!(Some("93.184.216.34".parse().unwrap()), response.first_a());
}

/// A warm cache steers the descent straight to the authoritative
/// servers; the root hints are bypassed entirely.
#[test]
fn test_warm_cache_descent() {
    let context = scripted_context(Box::new(|_, request, server| {
        if server == "192.0.2.20:53".parse().unwrap() {
            Ok(answer(&request.questions[0].name, "93.184.216.34"))
        } else {
            Err(ClientError::TimeOut)
        }
    }));

    context
        .ns_cache
        .set(
            QuestionKey::new("example.com", QueryType::Ns, QueryClass::In),
            3600,
            vec![addr("192.0.2.20:53")],
        )
        .unwrap();

    let resolver = RecursiveResolver::new(context);

    let request = DnsPacket::query("www.example.com", QueryType::A, QueryClass::In, false);
    let response = resolver.resolve_request(Transport::Udp, &request).unwrap();

    assert_eq!(1, response.answers.len());
}

/// NXDOMAIN with an SOA in Authority is not a referral; it is the
/// final word and passes through unchanged.
#[test]
fn test_nxdomain_passthrough() {
    let context = scripted_context(Box::new(|_, _, _| {
        let mut packet = DnsPacket::new();
        packet.header.response = true;
        packet.header.rescode = ResultCode::NXDOMAIN;
        packet.authorities.push(DnsRecord::Soa {
            domain: "example.com".to_string(),
            m_name: "ns1.example.com".to_string(),
            r_name: "hostmaster.example.com".to_string(),
            serial: 2024010101,
            refresh: 7200,
            retry: 3600,
            expire: 1209600,
            minimum: 3600,
            ttl: TransientTtl(3600),
        });
        Ok(packet)
    }));

    context
        .ns_cache
        .set(
            QuestionKey::new("example.com", QueryType::Ns, QueryClass::In),
            3600,
            vec![addr("192.0.2.20:53")],
        )
        .unwrap();

    let resolver = RecursiveResolver::new(context);

    let request = DnsPacket::query("missing.example.com", QueryType::A, QueryClass::In, false);
    let response = resolver.resolve_request(Transport::Udp, &request).unwrap();

    assert_eq!(ResultCode::NXDOMAIN, response.header.rescode);
    assert!(response.answers.is_empty());
    assert_eq!(1, response.authorities.len());
}

/// A zone that delegates back to itself with the same server set the
/// parent handed out must terminate, not spin.
#[test]
fn test_delegation_loop_terminates() {
    let context = scripted_context(Box::new(|_, _, _| {
        Ok(referral("z.example", "ns1.z.example", "192.0.2.1"))
    }));

    context
        .ns_cache
        .set(
            QuestionKey::new("z.example", QueryType::Ns, QueryClass::In),
            3600,
            vec![addr("192.0.2.1:53")],
        )
        .unwrap();

    let resolver = RecursiveResolver::new(context);

    let request = DnsPacket::query("www.z.example", QueryType::A, QueryClass::In, false);
    match resolver.resolve_request(Transport::Udp, &request) {
        Err(ResolveError::LoopDetection) => {}
        other => panic!("expected LoopDetection, got {:?}", other.map(|_| ())),
    }
}

/// A glueless referral whose nameserver cannot be resolved leaves no
/// usable servers; the referral is returned verbatim and nothing is
/// cached.
#[test]
fn test_glueless_referral_verbatim() {
    let context = scripted_context(Box::new(|_, _, server| {
        if server == "192.0.2.1:53".parse().unwrap() {
            let mut packet = DnsPacket::new();
            packet.header.response = true;
            packet.authorities.push(DnsRecord::Ns {
                domain: "zone.example".to_string(),
                host: "ns1.zone.example".to_string(),
                ttl: TransientTtl(3600),
            });
            Ok(packet)
        } else {
            Err(ClientError::TimeOut)
        }
    }));

    // Two cached servers against a one-record referral: the stale
    // entry is dropped and the descent has to rebuild the server set
    // from the (glueless) referral.
    let key = QuestionKey::new("zone.example", QueryType::Ns, QueryClass::In);
    context
        .ns_cache
        .set(
            key.clone(),
            3600,
            vec![addr("192.0.2.1:53"), addr("192.0.2.2:53")],
        )
        .unwrap();

    let resolver = RecursiveResolver::new(context.clone());

    let request = DnsPacket::query("www.zone.example", QueryType::A, QueryClass::In, false);
    let response = resolver.resolve_request(Transport::Udp, &request).unwrap();

    assert!(response.answers.is_empty());
    assert_eq!(1, response.authorities.len());

    // The stale entry is gone and nothing replaced it.
    assert!(context.ns_cache.get(&key).is_none());
}

/// A SERVFAIL that arrives first never wins the race; the next
/// server's answer does.
#[test]
fn test_servfail_suppression() {
    let context = scripted_context(Box::new(|_, request, server| {
        if server == "192.0.2.1:53".parse().unwrap() {
            let mut packet = DnsPacket::new();
            packet.header.response = true;
            packet.header.rescode = ResultCode::SERVFAIL;
            Ok(packet)
        } else {
            std::thread::sleep(std::time::Duration::from_millis(10));
            Ok(answer(&request.questions[0].name, "93.184.216.34"))
        }
    }));

    let resolver = RecursiveResolver::new(context);

    let request = DnsPacket::query("example.com", QueryType::A, QueryClass::In, false);
    let response = resolver
        .lookup(
            Transport::Udp,
            &request,
            &[addr("192.0.2.1:53"), addr("192.0.2.2:53")],
        )
        .unwrap();

    assert_eq!(ResultCode::NOERROR, response.header.rescode);
    assert_eq!(Some("93.184.216.34".parse().unwrap()), response.first_a());
}

/// The purge signal round trips through its base64 encoding and
/// evicts the named entries.
#[test]
fn test_purge_contract() {
    let signal = purge::encode(QueryType::Ns, "example.com");

    let question = &signal.questions[0];
    assert_eq!(QueryClass::Ch, question.qclass);
    assert_eq!(QueryType::Null, question.qtype);
    assert_eq!(
        Some((QueryType::Ns, "example.com.".to_string())),
        purge::decode(question)
    );

    let context = scripted_context(Box::new(|_, _, _| Err(ClientError::TimeOut)));
    context
        .ns_cache
        .set(
            QuestionKey::new("example.com", QueryType::Ns, QueryClass::In),
            3600,
            vec![addr("192.0.2.20:53")],
        )
        .unwrap();

    let resolver = RecursiveResolver::new(context.clone());

    assert!(resolver.purge(&signal));
    assert!(context
        .ns_cache
        .get(&QuestionKey::new("example.com", QueryType::Ns, QueryClass::In))
        .is_none());
}
