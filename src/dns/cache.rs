//! Delegation and lookup memoisation for the recursive descent
//!
//! Two caches live here. `NameServerCache` remembers which servers
//! are authoritative for a zone, keyed by the `(name, NS, class)`
//! question, so later descents can skip straight to the deepest
//! delegation already seen. `TransientCache` remembers whole
//! responses for a short while and exists only to avoid re-asking
//! the fallback recursor for the same nameserver address during
//! glue resolution.
//!
//! Both are `RwLock` protected maps, safe for concurrent use from
//! any number of descents, and both hand out clones rather than
//! references so no lock is held across network suspension points.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::RwLock;

use chrono::*;
use derive_more::{Display, Error, From};

use crate::dns::protocol::DnsPacket;
use crate::dns::question::QuestionKey;

#[derive(Debug, Display, From, Error)]
pub enum CacheError {
    Io(std::io::Error),
    PoisonedLock,
    CacheFull,
    InvalidEntry,
}

type Result<T> = std::result::Result<T, CacheError>;

/// A cached referral: the child zone's servers in the order the
/// parent delivered them, plus how long the parent said they are
/// good for.
#[derive(Clone, Debug)]
pub struct Delegation {
    pub servers: Vec<SocketAddr>,
    pub ttl: u32,
    pub inserted_at: DateTime<Local>,
}

impl Delegation {
    fn is_expired(&self, now: DateTime<Local>) -> bool {
        self.inserted_at + Duration::seconds(self.ttl as i64) < now
    }
}

/// TTL bounded, capacity bounded map from question to delegation.
pub struct NameServerCache {
    entries: RwLock<HashMap<QuestionKey, Delegation>>,
    max_entries: usize,
}

impl NameServerCache {
    pub fn new(max_entries: usize) -> NameServerCache {
        NameServerCache {
            entries: RwLock::new(HashMap::new()),
            max_entries,
        }
    }

    /// The live delegation for a question, or `None` when nothing is
    /// cached or the entry has outlived its ttl. Expired entries are
    /// dropped on observation.
    pub fn get(&self, key: &QuestionKey) -> Option<Delegation> {
        let now = Local::now();

        {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(delegation) if !delegation.is_expired(now) => {
                    return Some(delegation.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired; upgrade to a write lock to drop it.
        if let Ok(mut entries) = self.entries.write() {
            if let Some(delegation) = entries.get(key) {
                if delegation.is_expired(now) {
                    entries.remove(key);
                }
            }
        }

        None
    }

    /// Insert or overwrite a delegation. Empty server lists and zero
    /// ttls are never cached.
    pub fn set(&self, key: QuestionKey, ttl: u32, servers: Vec<SocketAddr>) -> Result<()> {
        if servers.is_empty() || ttl == 0 {
            return Err(CacheError::InvalidEntry);
        }

        let mut entries = self.entries.write().map_err(|_| CacheError::PoisonedLock)?;

        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            return Err(CacheError::CacheFull);
        }

        entries.insert(
            key,
            Delegation {
                servers,
                ttl,
                inserted_at: Local::now(),
            },
        );

        Ok(())
    }

    /// Idempotent removal.
    pub fn remove(&self, key: &QuestionKey) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct TransientEntry {
    packet: DnsPacket,
    inserted_at: DateTime<Local>,
}

/// Short lived response memo used while resolving glue addresses.
///
/// Entries share one process wide lifetime rather than honouring the
/// response's own ttls; the cache only needs to carry a response
/// across the handful of descents that race for the same nameserver.
pub struct TransientCache {
    entries: RwLock<HashMap<QuestionKey, TransientEntry>>,
    max_entries: usize,
    lifetime: i64,
}

impl TransientCache {
    pub fn new(max_entries: usize, lifetime_seconds: u64) -> TransientCache {
        TransientCache {
            entries: RwLock::new(HashMap::new()),
            max_entries,
            lifetime: lifetime_seconds as i64,
        }
    }

    pub fn get(&self, key: &QuestionKey) -> Option<DnsPacket> {
        let now = Local::now();

        {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(entry) if entry.inserted_at + Duration::seconds(self.lifetime) >= now => {
                    return Some(entry.packet.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        if let Ok(mut entries) = self.entries.write() {
            if let Some(entry) = entries.get(key) {
                if entry.inserted_at + Duration::seconds(self.lifetime) < now {
                    entries.remove(key);
                }
            }
        }

        None
    }

    pub fn set(&self, key: QuestionKey, packet: DnsPacket) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| CacheError::PoisonedLock)?;

        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            return Err(CacheError::CacheFull);
        }

        entries.insert(
            key,
            TransientEntry {
                packet,
                inserted_at: Local::now(),
            },
        );

        Ok(())
    }

    pub fn remove(&self, key: &QuestionKey) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }
}
