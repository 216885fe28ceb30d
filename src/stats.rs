//! Build statistics
//!
//! Counters gathered while compiling a table, serializable for the CLI's
//! `--stats` JSON output.

use crate::lulea::CompiledTrie;
use crate::nexthop::{NextHopTable, NO_NEXT_HOP};
use crate::prefix_set::PrefixSet;
use crate::radix::RadixTree;
use serde::Serialize;

/// Chunk and pointer counts of one compiled trie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrieStats {
    /// Bytes of arena in use
    pub arena_bytes: usize,
    /// Pointers in the level-1 header
    pub level1_pointers: usize,
    /// Level-2 chunks emitted
    pub level2_chunks: usize,
    /// Pointers across all level-2 chunks
    pub level2_pointers: usize,
    /// Level-3 chunks emitted
    pub level3_chunks: usize,
    /// Pointers across all level-3 chunks
    pub level3_pointers: usize,
}

/// Summary of a whole build, from input prefixes to compiled arena.
#[derive(Debug, Clone, Serialize)]
pub struct BuildStats {
    /// Input prefixes (after `/0` splitting)
    pub prefixes: usize,
    /// Input prefix count per length, index = length
    pub prefixes_by_length: Vec<usize>,
    /// Covered leaves (= next-hop records)
    pub routes: usize,
    /// Synthetic no-route leaves added by sealing
    pub filler_leaves: usize,
    /// Radix nodes allocated during staging
    pub radix_nodes: usize,
    /// Compiled trie counters
    pub trie: TrieStats,
}

impl BuildStats {
    /// Gather statistics across the stages of one build.
    pub fn collect(
        set: &PrefixSet,
        tree: &RadixTree,
        nexthops: &NextHopTable,
        trie: &CompiledTrie,
    ) -> Self {
        let mut filler_leaves = 0usize;
        tree.for_each_leaf(|leaf| {
            if leaf.next_hop_index == NO_NEXT_HOP {
                filler_leaves += 1;
            }
        });

        Self {
            prefixes: set.len(),
            prefixes_by_length: (0u8..=32).map(|len| set.of_length(len).len()).collect(),
            routes: nexthops.len(),
            filler_leaves,
            radix_nodes: tree.node_count(),
            trie: *trie.stats(),
        }
    }
}
