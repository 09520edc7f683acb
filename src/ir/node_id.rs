//! Node identity.
//!
//! Every IR node carries a [`NodeId`] minted from a single process-wide
//! counter. Ids are unique for the lifetime of the process and never reused,
//! so a cloned subtree can coexist with its original and reference nodes can
//! name declarations unambiguously across the whole unit.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

static COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Globally unique identifier of an IR node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mint a fresh id. Monotonic; atomic so parallel test runs stay unique.
pub fn next_id() -> NodeId {
    NodeId(COUNTER.fetch_add(1, Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_increasing_ids() {
        let a = next_id();
        let b = next_id();
        assert_ne!(a, b);
        assert!(b.0 > a.0);
    }
}
