//! Summit DNS Recursor
//!
//! The core of a recursive DNS resolver: given a query, it descends
//! the public DNS hierarchy from the root zone downward, racing each
//! zone's nameservers with staggered starts, caching delegations as
//! it learns them, and returning the authoritative answer.
//!
//! The crate deliberately stops at the resolution engine. Listener
//! sockets, answer caching, blocklists and the management surface
//! belong to the embedding program; the only inward-facing contract
//! beyond plain queries is the cache purge signal (see `dns::purge`).

/// Recursive resolution engine and protocol handling
pub mod dns;
