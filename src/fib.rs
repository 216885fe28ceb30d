//! The forwarding-table facade
//!
//! [`Fib`] runs the whole pipeline (radix staging, sealing, record
//! collection, trie compilation) and keeps only the long-lived artifacts:
//! the compiled trie and the next-hop table. The staging tree is dropped
//! as soon as the build returns.

use crate::error::Result;
use crate::lulea::{CompiledTrie, TrieBuilder};
use crate::nexthop::{NextHopTable, RouteRecord};
use crate::prefix_set::PrefixSet;
use crate::radix::RadixTree;
use std::net::Ipv4Addr;

/// A built forwarding table: compiled trie plus next-hop records.
///
/// Immutable after the build. Lookups take `&self`, so a `Fib` can be
/// shared across any number of concurrent readers.
#[derive(Debug, Clone)]
pub struct Fib {
    trie: CompiledTrie,
    nexthops: NextHopTable,
}

impl Fib {
    /// Build a forwarding table with the default arena capacity.
    pub fn build(set: &PrefixSet) -> Result<Self> {
        let (tree, nexthops) = RadixTree::from_prefix_set(set)?;
        let trie = TrieBuilder::new().build(&tree)?;
        Ok(Self { trie, nexthops })
    }

    /// Build with an explicit arena capacity in bytes.
    pub fn build_with_capacity(set: &PrefixSet, capacity: usize) -> Result<Self> {
        let (tree, nexthops) = RadixTree::from_prefix_set(set)?;
        let trie = TrieBuilder::with_capacity(capacity).build(&tree)?;
        Ok(Self { trie, nexthops })
    }

    /// Assemble a `Fib` from pipeline stages run by hand.
    ///
    /// Useful when the caller wants to keep the radix tree around, e.g.
    /// to cross-check the compiled trie against it.
    pub fn from_parts(trie: CompiledTrie, nexthops: NextHopTable) -> Self {
        Self { trie, nexthops }
    }

    /// Longest-prefix-match lookup for a host-order address.
    pub fn lookup(&self, addr: u32) -> Option<&RouteRecord> {
        self.trie.lookup_record(addr, &self.nexthops)
    }

    /// Longest-prefix-match lookup for a parsed address.
    pub fn lookup_addr(&self, addr: Ipv4Addr) -> Option<&RouteRecord> {
        self.lookup(u32::from(addr))
    }

    /// The shared next-hop table.
    pub fn next_hops(&self) -> &NextHopTable {
        &self.nexthops
    }

    /// The compiled trie.
    pub fn trie(&self) -> &CompiledTrie {
        &self.trie
    }
}
