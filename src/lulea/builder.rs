//! Compiling a sealed radix tree into the three-level trie
//!
//! The build walks the radix leaves three times over progressively
//! narrower address slices:
//!
//! 1. Leaves are bucketed by their top 16 bits into 65,536 level-1
//!    buckets (4,096 groups of 16).
//! 2. Each group becomes one codeword. Groups with zero or one occupied
//!    buckets resolve entirely in the codeword; groups with more get one
//!    pointer per occupied bucket, appended to the chunk's pointer array.
//! 3. A bucket holding several leaves becomes a child chunk one level
//!    down (8 more address bits), found by re-bucketing just its leaves.
//!
//! Child chunks are never emitted inline. Every chunk's pointer array
//! must sit contiguously after its codewords, so a multi-leaf bucket
//! writes a placeholder pointer and enqueues a build task; tasks run FIFO
//! once the current chunk has all its pointers. Each task records where
//! its chunk landed by patching the placeholder in the parent.
//!
//! The third level consumes the last address bits, so every bucket there
//! holds at most one leaf; more is a fatal build error.

use super::arena::Arena;
use super::format::{
    Codeword, TaggedPointer, BUCKETS_PER_GROUP, CHUNK_BUCKETS, CHUNK_CODEWORDS, CODEWORD_SIZE,
    DEFAULT_ARENA_CAPACITY, LEVEL1_BUCKETS, LEVEL1_CODEWORDS, POINTER_SIZE,
};
use super::lookup::CompiledTrie;
use crate::error::{FibError, Result};
use crate::nexthop::NO_NEXT_HOP;
use crate::radix::RadixTree;
use crate::stats::TrieStats;
use std::collections::VecDeque;

/// One radix leaf as the compiler sees it.
#[derive(Debug, Clone, Copy)]
struct LeafRef {
    start: u32,
    next_hop: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkLevel {
    One,
    Two,
    Three,
}

impl ChunkLevel {
    /// Level of the chunk a multi-leaf bucket descends into.
    fn child(self) -> Option<ChunkLevel> {
        match self {
            ChunkLevel::One => Some(ChunkLevel::Two),
            ChunkLevel::Two => Some(ChunkLevel::Three),
            ChunkLevel::Three => None,
        }
    }

    /// Shift selecting the 8 address bits this chunk consumes.
    fn bucket_shift(self) -> u32 {
        match self {
            ChunkLevel::One => 16,
            ChunkLevel::Two => 8,
            ChunkLevel::Three => 0,
        }
    }
}

/// A deferred child-chunk build.
struct BuildTask {
    /// Byte offset of the parent pointer to patch with the chunk offset
    patch_at: usize,
    /// Leaves of the one bucket this chunk resolves
    leaves: Vec<LeafRef>,
    level: ChunkLevel,
}

/// Builds a [`CompiledTrie`] from a sealed [`RadixTree`].
pub struct TrieBuilder {
    arena: Arena,
    tasks: VecDeque<BuildTask>,
    stats: TrieStats,
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrieBuilder {
    /// Builder with the default 16 MiB arena.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ARENA_CAPACITY)
    }

    /// Builder with an explicit arena capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            tasks: VecDeque::new(),
            stats: TrieStats::default(),
        }
    }

    /// Compile the tree. Consumes the builder; the radix tree can be
    /// dropped afterwards.
    pub fn build(mut self, tree: &RadixTree) -> Result<CompiledTrie> {
        let mut buckets: Vec<Vec<LeafRef>> = vec![Vec::new(); LEVEL1_BUCKETS];
        tree.for_each_leaf(|leaf| {
            buckets[(leaf.start >> 16) as usize].push(LeafRef {
                start: leaf.start,
                next_hop: leaf.next_hop_index,
            });
        });

        let header = self.arena.alloc(LEVEL1_CODEWORDS * CODEWORD_SIZE)?;
        self.encode_groups(&mut buckets, header, ChunkLevel::One)?;

        while let Some(task) = self.tasks.pop_front() {
            self.run_task(task)?;
        }

        self.stats.arena_bytes = self.arena.used();
        let mut arena = self.arena;
        arena.trim();
        Ok(CompiledTrie::new(arena, self.stats))
    }

    fn run_task(&mut self, task: BuildTask) -> Result<()> {
        let chunk = self.arena.alloc(CHUNK_CODEWORDS * CODEWORD_SIZE)?;
        self.arena
            .write_pointer(task.patch_at, TaggedPointer::child(chunk as u32))?;
        match task.level {
            ChunkLevel::Two => self.stats.level2_chunks += 1,
            _ => self.stats.level3_chunks += 1,
        }

        let mut buckets: Vec<Vec<LeafRef>> = vec![Vec::new(); CHUNK_BUCKETS];
        let shift = task.level.bucket_shift();
        for leaf in task.leaves {
            buckets[((leaf.start >> shift) & 0xFF) as usize].push(leaf);
        }

        self.encode_groups(&mut buckets, chunk, task.level)
    }

    /// Emit one codeword per bucket group and the pointers of every
    /// multi-bucket group, in left-to-right order.
    fn encode_groups(
        &mut self,
        buckets: &mut [Vec<LeafRef>],
        codewords_at: usize,
        level: ChunkLevel,
    ) -> Result<()> {
        let groups = buckets.len() / BUCKETS_PER_GROUP;
        let mut last_next_hop = NO_NEXT_HOP;
        let mut pointer_base = 0u32;

        for group in 0..groups {
            let slots = &mut buckets[group * BUCKETS_PER_GROUP..(group + 1) * BUCKETS_PER_GROUP];
            let occupied = slots.iter().filter(|bucket| !bucket.is_empty()).count();

            let codeword = match occupied {
                // Covered by the nearest leaf to the left, if any
                0 => Codeword::next_hop(last_next_hop),
                // A single leaf resolves the whole group in the codeword
                1 => {
                    let next_hop = slots
                        .iter()
                        .find(|bucket| !bucket.is_empty())
                        .map(|bucket| bucket[0].next_hop)
                        .unwrap_or(NO_NEXT_HOP);
                    last_next_hop = next_hop;
                    Codeword::next_hop(next_hop)
                }
                _ => {
                    let bitmask = self.encode_pointers(slots, level)?;
                    let codeword = Codeword::group(bitmask, pointer_base);
                    pointer_base += occupied as u32;
                    codeword
                }
            };
            self.arena
                .write_codeword(codewords_at + group * CODEWORD_SIZE, codeword)?;
        }
        Ok(())
    }

    /// Allocate one pointer per occupied bucket of a group and return the
    /// occupancy bitmask (bit `15 - j` for bucket `j`).
    fn encode_pointers(&mut self, slots: &mut [Vec<LeafRef>], level: ChunkLevel) -> Result<u16> {
        let mut bitmask = 0u16;
        for slot in slots.iter_mut() {
            bitmask <<= 1;
            if slot.is_empty() {
                // An empty bucket reuses the nearest pointer to its left
                continue;
            }
            bitmask |= 1;

            let at = self.arena.alloc(POINTER_SIZE)?;
            match level {
                ChunkLevel::One => self.stats.level1_pointers += 1,
                ChunkLevel::Two => self.stats.level2_pointers += 1,
                ChunkLevel::Three => self.stats.level3_pointers += 1,
            }

            if slot.len() == 1 {
                self.arena
                    .write_pointer(at, TaggedPointer::next_hop(slot[0].next_hop))?;
            } else if let Some(child) = level.child() {
                // Placeholder; the child task patches in the real offset
                self.arena.write_pointer(at, TaggedPointer::child(0))?;
                self.tasks.push_back(BuildTask {
                    patch_at: at,
                    leaves: std::mem::take(slot),
                    level: child,
                });
            } else {
                return Err(FibError::InvariantViolation(format!(
                    "{} overlapping leaves at {:#010x} reached the last stride",
                    slot.len(),
                    slot[0].start
                )));
            }
        }
        Ok(bitmask)
    }
}
