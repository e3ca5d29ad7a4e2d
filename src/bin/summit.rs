use std::env;
use std::process::exit;
use std::sync::Arc;

use getopts::Options;

use summit::dns::client::Transport;
use summit::dns::context::{ResolverConfig, ResolverContext};
use summit::dns::protocol::{DnsPacket, QueryClass, QueryType};
use summit::dns::resolve::RecursiveResolver;

fn print_usage(program: &str, opts: Options) {
    let brief = format!("Usage: {} [options] DOMAIN", program);
    print!("{}", opts.usage(&brief));
}

/// One-shot lookup tool: resolve a single name iteratively from the
/// root hints and print what came back.
fn main() {
    simple_logger::init().expect("Failed to initialize logger");

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optflag("h", "help", "print this help menu");
    opts.optopt("t", "qtype", "record type to query (default A)", "TYPE");
    opts.optflag("", "tcp", "query upstream servers over TCP");
    opts.optopt(
        "i",
        "interval",
        "stagger delay between upstream probes, milliseconds",
        "MS",
    );
    opts.optopt("d", "max-depth", "recursion depth budget", "N");
    opts.optopt(
        "f",
        "fallback",
        "recursor asked for glueless nameserver addresses (e.g. 8.8.8.8:53)",
        "ADDR",
    );

    let opt_matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => panic!("{}", f.to_string()),
    };

    if opt_matches.opt_present("h") || opt_matches.free.is_empty() {
        print_usage(&program, opts);
        return;
    }

    let qname = opt_matches.free[0].clone();

    let qtype = match opt_matches.opt_str("t") {
        Some(text) => match QueryType::from_mnemonic(&text) {
            Some(qtype) => qtype,
            None => {
                log::error!("Unknown query type: {}", text);
                exit(1);
            }
        },
        None => QueryType::A,
    };

    let transport = if opt_matches.opt_present("tcp") {
        Transport::Tcp
    } else {
        Transport::Udp
    };

    let mut config = ResolverConfig::default();

    if let Some(interval) = opt_matches.opt_str("i").and_then(|x| x.parse().ok()) {
        config.interval_ms = interval;
    }
    if let Some(depth) = opt_matches.opt_str("d").and_then(|x| x.parse().ok()) {
        config.max_depth = depth;
    }
    if let Some(fallback) = opt_matches.opt_str("f").and_then(|x| x.parse().ok()) {
        config.fallback_resolver = fallback;
    }

    let context = Arc::new(ResolverContext::new(config));
    let resolver = RecursiveResolver::new(context);

    let request = DnsPacket::query(&qname, qtype, QueryClass::In, false);

    match resolver.resolve_request(transport, &request) {
        Ok(response) => {
            for question in &response.questions {
                println!("; question {}", question);
            }
            println!("; rcode {:?}", response.header.rescode);

            for record in &response.answers {
                println!("{:?}", record);
            }
            for record in &response.authorities {
                println!("; authority {:?}", record);
            }
            for record in &response.resources {
                println!("; additional {:?}", record);
            }
        }
        Err(e) => {
            log::error!("Resolution failed for {}: {}", qname, e);
            exit(1);
        }
    }
}
