//! Recursive DNS resolution core
//!
//! This module implements the iterative half of a recursive resolver:
//! * DNS packet parsing and serialization
//! * Parallel, staggered-start probing of upstream nameservers
//! * Recursive descent from the root hints with loop and parent
//!   detection
//! * Delegation caching with TTL bounded lifetimes
//! * Cache purge signalling over synthetic CHAOS queries
//!
//! # Module Structure
//!
//! * `protocol` - DNS protocol definitions and packet handling
//! * `resolve` - the probing race and the descent state machine
//! * `cache` - delegation and transient lookup caches
//! * `client` - DNS client for outgoing queries
//! * `context` - resolver configuration and shared state
//! * `buffer` - low-level packet buffer operations
//! * `hints` - bootstrap endpoints for the root zone
//! * `question` - cache key and domain name helpers
//! * `purge` - cache purge signalling

/// Low-level buffer operations for DNS packet handling
pub mod buffer;

/// Delegation and transient lookup caches
pub mod cache;

/// DNS client for making outgoing queries
pub mod client;

/// Resolver configuration and shared context
pub mod context;

/// Bootstrap endpoints for the root zone
pub mod hints;

/// DNS protocol definitions and packet structures
pub mod protocol;

/// Cache purge signalling
pub mod purge;

/// Cache key and domain name helpers
pub mod question;

/// Recursive descent and upstream probing
pub mod resolve;

/// Internal network utilities
mod netutil;
