//! shared state and tunables for the resolver core

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use serde_derive::Deserialize;

use crate::dns::cache::{NameServerCache, TransientCache};
use crate::dns::client::{DnsClient, DnsNetworkClient, TransportConfig};

/// Tunables consumed by the resolver core.
///
/// Loaded from whatever configuration source the embedding program
/// uses (all fields are optional in serialised form and fall back to
/// the defaults below).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Dialer connect deadline, seconds.
    pub connect_timeout_s: u64,
    /// Read and write deadline per exchange, seconds.
    pub timeout_s: u64,
    /// Stagger delay between probe launches, milliseconds.
    pub interval_ms: u64,
    /// Optional source address bound on every dialer.
    pub outbound_ip: Option<IpAddr>,
    /// Recursion budget for a single descent.
    pub max_depth: u32,
    /// External recursor asked for nameserver addresses when a
    /// referral arrives without glue.
    pub fallback_resolver: SocketAddr,
    /// Nameserver cache capacity, entries.
    pub ns_cache_size: usize,
    /// Transient lookup cache capacity, entries.
    pub transient_cache_size: usize,
    /// Transient lookup cache entry lifetime, seconds.
    pub transient_ttl_s: u64,
}

impl Default for ResolverConfig {
    fn default() -> ResolverConfig {
        ResolverConfig {
            connect_timeout_s: 2,
            timeout_s: 2,
            interval_ms: 200,
            outbound_ip: None,
            max_depth: 30,
            fallback_resolver: "8.8.8.8:53".parse().unwrap(),
            ns_cache_size: 250_000,
            transient_cache_size: 5_000,
            transient_ttl_s: 60,
        }
    }
}

impl ResolverConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            connect_timeout: Duration::from_secs(self.connect_timeout_s),
            timeout: Duration::from_secs(self.timeout_s),
            outbound_ip: self.outbound_ip,
        }
    }
}

/// Everything a descent needs: the tunables, the upstream client and
/// the two caches. One context is shared by all concurrent descents.
pub struct ResolverContext {
    pub config: ResolverConfig,
    pub client: Box<dyn DnsClient + Sync + Send>,
    pub ns_cache: NameServerCache,
    pub lookup_cache: TransientCache,
}

impl ResolverContext {
    pub fn new(config: ResolverConfig) -> ResolverContext {
        let client = Box::new(DnsNetworkClient::new(config.transport()));
        let ns_cache = NameServerCache::new(config.ns_cache_size);
        let lookup_cache =
            TransientCache::new(config.transient_cache_size, config.transient_ttl_s);

        ResolverContext {
            config,
            client,
            ns_cache,
            lookup_cache,
        }
    }
}

impl Default for ResolverContext {
    fn default() -> Self {
        ResolverContext::new(ResolverConfig::default())
    }
}
