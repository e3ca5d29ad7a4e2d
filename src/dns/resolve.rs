//! iterative descent of the DNS hierarchy
//!
//! `RecursiveResolver` answers a question by walking the delegation
//! chain top down: pick a starting server set (the deepest cached
//! delegation, else the root hints), race the servers with staggered
//! starts, and follow whatever the winning response says. Referrals
//! recurse one level deeper, answers terminate, and everything else
//! is handed back to the caller verbatim.
//!
//! Purge signals (CHAOS NULL questions, see `dns::purge`) are not
//! resolved; callers hand them to [`RecursiveResolver::purge`] and
//! send no response.

use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::Builder;
use std::time::Duration;

use derive_more::{Display, Error, From};

use crate::dns::client::Transport;
use crate::dns::context::ResolverContext;
use crate::dns::hints::root_hints;
use crate::dns::protocol::{
    DnsPacket, DnsQuestion, DnsRecord, QueryClass, QueryType, ResultCode,
};
use crate::dns::purge;
use crate::dns::question::{label_count, unfqdn, parent_name, QuestionKey};

#[derive(Debug, Display, From, Error)]
pub enum ResolveError {
    Client(crate::dns::client::ClientError),
    Cache(crate::dns::cache::CacheError),
    Io(std::io::Error),
    /// The recursion budget ran out before an answer was found.
    DepthExhausted,
    /// A referral pointed at an ancestor of the current zone.
    ParentDetection,
    /// A referral computed to the empty (root) name.
    RootDetection,
    /// A referral handed back the very server set that produced it.
    LoopDetection,
    /// No probed server produced an acceptable response.
    ResolveFailed,
    /// No address could be obtained for a delegated nameserver.
    GlueNotFound,
}

type Result<T> = std::result::Result<T, ResolveError>;

/// Single slot rendezvous between probe threads and the caller.
///
/// The first acceptable response is kept; later publishes find the
/// slot occupied and are dropped without blocking, so losing probes
/// can finish in the background long after the caller has moved on.
struct ResponseSlot {
    cell: Mutex<Option<DnsPacket>>,
    available: Condvar,
}

impl ResponseSlot {
    fn new() -> ResponseSlot {
        ResponseSlot {
            cell: Mutex::new(None),
            available: Condvar::new(),
        }
    }

    fn try_publish(&self, packet: DnsPacket) {
        if let Ok(mut slot) = self.cell.lock() {
            if slot.is_none() {
                *slot = Some(packet);
                self.available.notify_all();
            }
        }
    }

    /// Wait up to `timeout` for a response, taking it if one arrives.
    fn wait(&self, timeout: Duration) -> Option<DnsPacket> {
        let slot = self.cell.lock().ok()?;
        let (mut slot, _) = self
            .available
            .wait_timeout_while(slot, timeout, |slot| slot.is_none())
            .ok()?;

        slot.take()
    }

    fn take(&self) -> Option<DnsPacket> {
        self.cell.lock().ok().and_then(|mut slot| slot.take())
    }
}

pub struct RecursiveResolver {
    context: Arc<ResolverContext>,
}

impl RecursiveResolver {
    pub fn new(context: Arc<ResolverContext>) -> RecursiveResolver {
        RecursiveResolver { context }
    }

    /// Resolve a request starting from the cache or the root hints.
    pub fn resolve_request(
        &self,
        transport: Transport,
        request: &DnsPacket,
    ) -> Result<DnsPacket> {
        self.resolve(
            transport,
            request,
            Vec::new(),
            true,
            self.context.config.max_depth,
            0,
        )
    }

    /// One step of the descent.
    ///
    /// `servers` is the set handed down by the parent referral (or
    /// ignored when `is_root` selects the starting set), `depth` the
    /// remaining recursion budget, and `level` the label count of the
    /// deepest delegation already followed on this path.
    pub fn resolve(
        &self,
        transport: Transport,
        request: &DnsPacket,
        servers: Vec<SocketAddr>,
        is_root: bool,
        depth: u32,
        level: usize,
    ) -> Result<DnsPacket> {
        if depth == 0 {
            return Err(ResolveError::DepthExhausted);
        }

        let question = request
            .questions
            .first()
            .ok_or(ResolveError::ResolveFailed)?
            .clone();

        let servers = if is_root {
            self.search_cache(&question)
        } else {
            servers
        };

        let mut response = self.lookup(transport, request, &servers)?;

        // An answer terminates the descent. Authority is dropped,
        // Additional stays: upper layers still mine it for glue.
        if !response.answers.is_empty() {
            response.authorities.clear();

            return Ok(response);
        }

        // Only a leading NS record makes the response a referral;
        // NXDOMAIN and NODATA responses carry SOA here and pass
        // through untouched.
        let (ns_owner, ns_ttl) = match response.authorities.first() {
            Some(DnsRecord::Ns { domain, ttl, .. }) => (domain.clone(), ttl.0),
            _ => return Ok(response),
        };

        let nlevel = label_count(&ns_owner);
        if level > nlevel {
            return Err(ResolveError::ParentDetection);
        }

        let zone = unfqdn(&ns_owner).to_lowercase();
        if zone.is_empty() {
            return Err(ResolveError::RootDetection);
        }

        let key = QuestionKey::new(&zone, QueryType::Ns, question.qclass);

        if let Some(delegation) = self.context.ns_cache.get(&key) {
            let ns_count = response
                .authorities
                .iter()
                .filter(|record| matches!(record, DnsRecord::Ns { .. }))
                .count();

            if delegation.servers.len() == ns_count {
                if delegation.servers == servers {
                    return Err(ResolveError::LoopDetection);
                }

                log::debug!("Nameserver cache hit for {}", key);

                return self.resolve(
                    transport,
                    request,
                    delegation.servers,
                    false,
                    depth - 1,
                    nlevel,
                );
            }

            // The referral disagrees with what we remembered; the
            // entry is stale. Rebuild it from the referral below.
            self.context.ns_cache.remove(&key);
        }

        let nservers = self.delegation_servers(transport, &question, &response);
        if nservers.is_empty() {
            return Ok(response);
        }

        if let Err(e) = self
            .context
            .ns_cache
            .set(key.clone(), ns_ttl, nservers.clone())
        {
            log::error!("Set nameserver cache failed for {}: {}", key, e);
        }

        self.resolve(transport, request, nservers, false, depth - 1, nlevel)
    }

    /// Race the servers with staggered starts and return the first
    /// acceptable response.
    ///
    /// One probe thread is launched per server, top to bottom, with
    /// `interval_ms` between launches. SERVFAIL responses and
    /// transport errors never win; any other response does, including
    /// truncated and negative ones. Once every server has launched,
    /// the caller waits for all of them before giving up.
    pub fn lookup(
        &self,
        transport: Transport,
        request: &DnsPacket,
        servers: &[SocketAddr],
    ) -> Result<DnsPacket> {
        let interval = Duration::from_millis(self.context.config.interval_ms);
        let slot = Arc::new(ResponseSlot::new());

        let question = request.questions.first().cloned();
        let (qname, qtype) = match question {
            Some(question) => (question.name, question.qtype),
            None => (String::new(), QueryType::Unknown(0)),
        };

        let mut in_flight = Vec::with_capacity(servers.len());

        for (launch, &server) in servers.iter().enumerate() {
            let context = self.context.clone();
            let request = request.clone();
            let slot_handle = slot.clone();
            let qname = qname.clone();

            let handle = Builder::new()
                .name(format!("probe-{}", launch))
                .spawn(move || {
                    let response = match context.client.exchange(transport, &request, server) {
                        Ok(response) => response,
                        Err(e) => {
                            log::info!(
                                "Got an error from upstream qname={} qtype={} server={} net={}: {}",
                                qname,
                                qtype,
                                server,
                                transport,
                                e
                            );
                            return;
                        }
                    };

                    if response.header.rescode == ResultCode::SERVFAIL {
                        log::debug!(
                            "Dropping SERVFAIL qname={} qtype={} server={} net={}",
                            qname,
                            qtype,
                            server,
                            transport
                        );
                        return;
                    }

                    slot_handle.try_publish(response);
                })?;
            in_flight.push(handle);

            // Exit early if a launched probe already won; losers keep
            // running detached and publish into the void.
            if let Some(response) = slot.wait(interval) {
                return Ok(response);
            }
        }

        for handle in in_flight {
            let _ = handle.join();
        }

        slot.take().ok_or(ResolveError::ResolveFailed)
    }

    /// Starting server set for a question: the servers of the deepest
    /// cached delegation that is an ancestor of the name, else the
    /// root hints. Read only.
    fn search_cache(&self, question: &DnsQuestion) -> Vec<SocketAddr> {
        let mut name = unfqdn(&question.name).to_lowercase();

        loop {
            let key = QuestionKey::new(&name, QueryType::Ns, question.qclass);
            if let Some(delegation) = self.context.ns_cache.get(&key) {
                log::debug!("Nameserver cache hit for {}", key);
                return delegation.servers;
            }

            match parent_name(&name) {
                Some(parent) => name = parent.to_string(),
                None => return root_hints(),
            }
        }
    }

    /// Build the delegated server set from a referral: NS targets in
    /// Authority order, addresses from Additional glue where present,
    /// resolved through the fallback recursor otherwise. Nameservers
    /// whose address cannot be found are skipped.
    fn delegation_servers(
        &self,
        transport: Transport,
        question: &DnsQuestion,
        response: &DnsPacket,
    ) -> Vec<SocketAddr> {
        let mut targets: Vec<(String, Option<IpAddr>)> = Vec::new();
        for record in &response.authorities {
            if let DnsRecord::Ns { host, .. } = record {
                let host = unfqdn(host).to_lowercase();
                if !targets.iter().any(|(name, _)| *name == host) {
                    targets.push((host, None));
                }
            }
        }

        for record in &response.resources {
            match record {
                DnsRecord::A { domain, addr, .. } => {
                    let domain = unfqdn(domain).to_lowercase();
                    if let Some(target) = targets
                        .iter_mut()
                        .find(|(name, addr)| *name == domain && addr.is_none())
                    {
                        target.1 = Some(IpAddr::V4(*addr));
                    }
                }
                DnsRecord::Aaaa { domain, addr, .. } => {
                    let domain = unfqdn(domain).to_lowercase();
                    if let Some(target) = targets
                        .iter_mut()
                        .find(|(name, addr)| *name == domain && addr.is_none())
                    {
                        target.1 = Some(IpAddr::V6(*addr));
                    }
                }
                _ => {}
            }
        }

        let qname = unfqdn(&question.name).to_lowercase();

        let mut servers = Vec::new();
        for (host, addr) in targets {
            match addr {
                Some(ip) => servers.push(SocketAddr::new(ip, 53)),
                None => {
                    // A zone whose NS set is the very name being
                    // resolved cannot be chased without recursing
                    // into ourselves; stop enumerating.
                    if host == qname {
                        break;
                    }

                    match self.lookup_ns_addr(transport, &host) {
                        Ok(ip) => servers.push(SocketAddr::new(IpAddr::V4(ip), 53)),
                        Err(e) => {
                            log::debug!("NS address lookup failed for {}: {}", host, e);
                        }
                    }
                }
            }
        }

        servers
    }

    /// Address of a delegated nameserver that arrived without glue.
    ///
    /// Asks the configured fallback recursor rather than descending
    /// again, and memoises successful responses in the transient
    /// cache so concurrent descents chasing the same referral ask
    /// only once.
    fn lookup_ns_addr(&self, transport: Transport, ns_host: &str) -> Result<std::net::Ipv4Addr> {
        let key = QuestionKey::new(ns_host, QueryType::A, QueryClass::In);

        if let Some(cached) = self.context.lookup_cache.get(&key) {
            if let Some(addr) = cached.first_a() {
                return Ok(addr);
            }
        }

        let request = DnsPacket::query(ns_host, QueryType::A, QueryClass::In, true);
        let response = self.lookup(
            transport,
            &request,
            &[self.context.config.fallback_resolver],
        )?;

        if let Some(addr) = response.first_a() {
            if let Err(e) = self.context.lookup_cache.set(key, response.clone()) {
                log::debug!("Set transient cache failed for {}: {}", ns_host, e);
            }

            return Ok(addr);
        }

        Err(ResolveError::GlueNotFound)
    }

    /// Apply a purge signal: if the packet's question is a CHAOS NULL
    /// purge query, evict the matching entries from both caches and
    /// return true. Purge signals get no DNS response.
    pub fn purge(&self, request: &DnsPacket) -> bool {
        let question = match request.questions.first() {
            Some(question) => question,
            None => return false,
        };

        let (qtype, qname) = match purge::decode(question) {
            Some(decoded) => decoded,
            None => return false,
        };

        let name = unfqdn(&qname).to_lowercase();

        self.context
            .lookup_cache
            .remove(&QuestionKey::new(&name, qtype, QueryClass::In));
        self.context
            .ns_cache
            .remove(&QuestionKey::new(&name, qtype, QueryClass::In));
        self.context
            .ns_cache
            .remove(&QuestionKey::new(&name, QueryType::Ns, QueryClass::In));

        log::debug!("Purged cache entries for {} {}", name, qtype);

        true
    }
}
