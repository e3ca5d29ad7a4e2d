//! canonical query identity used to key the resolver caches

use std::fmt;

use serde_derive::{Deserialize, Serialize};

use crate::dns::protocol::{QueryClass, QueryType};

/// The (name, type, class) triple identifying a query.
///
/// The name is stored case-normalised and without a trailing dot, so
/// two keys are equal exactly when they denote the same question. The
/// `Display` form (`"example.com NS IN"`) is the stable string
/// encoding used in log output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionKey {
    pub name: String,
    pub qtype: QueryType,
    pub qclass: QueryClass,
}

impl QuestionKey {
    pub fn new(name: &str, qtype: QueryType, qclass: QueryClass) -> QuestionKey {
        QuestionKey {
            name: unfqdn(name).to_lowercase(),
            qtype,
            qclass,
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.qtype, self.qclass)
    }
}

/// Strip the trailing dot, if present. The root name becomes the
/// empty string.
pub fn unfqdn(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Append a trailing dot, unless one is already present.
pub fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Drop the leftmost label. Returns `None` once no parent remains,
/// i.e. for the root name and for single label names.
pub fn parent_name(name: &str) -> Option<&str> {
    let name = unfqdn(name);
    if name.is_empty() {
        return None;
    }

    match name.split_once('.') {
        Some((_, parent)) => Some(parent),
        None => None,
    }
}

/// Number of labels in a name: the root counts 0, `com` counts 1,
/// `example.com` counts 2.
pub fn label_count(name: &str) -> usize {
    let name = unfqdn(name);
    if name.is_empty() {
        return 0;
    }

    name.split('.').count()
}
