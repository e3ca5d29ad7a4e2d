//! bootstrap endpoints for the root zone

use std::net::{IpAddr, SocketAddr};

/// The 13 root nameservers, a.root-servers.net through m, in probe
/// order. The addresses change rarely enough that a compiled in table
/// is the norm; a descent only reaches them when the cache holds no
/// ancestor delegation at all.
const ROOT_SERVERS: &[(&str, &str)] = &[
    ("a", "198.41.0.4"),
    ("b", "192.228.79.201"),
    ("c", "192.33.4.12"),
    ("d", "199.7.91.13"),
    ("e", "192.203.230.10"),
    ("f", "192.5.5.241"),
    ("g", "192.112.36.4"),
    ("h", "128.63.2.53"),
    ("i", "192.36.148.17"),
    ("j", "192.58.128.30"),
    ("k", "193.0.14.129"),
    ("l", "199.7.83.42"),
    ("m", "202.12.27.33"),
];

/// Endpoints for the root zone's nameservers, port 53, in the fixed
/// hint order.
pub fn root_hints() -> Vec<SocketAddr> {
    ROOT_SERVERS
        .iter()
        .map(|&(_, ip)| {
            let addr: IpAddr = ip.parse().expect("Invalid root server address");
            SocketAddr::new(addr, 53)
        })
        .collect()
}
