//! Wire-level building blocks of the compiled trie
//!
//! The arena holds exactly two kinds of values. A **codeword** (64 bits)
//! summarizes one group of 16 buckets: either a direct next-hop index
//! (high bit set) or a 16-bit occupancy bitmask plus the group's base
//! index into its chunk's pointer array. A **pointer** (32 bits) resolves
//! one occupied bucket: either a next-hop index (high bit clear) or the
//! arena byte offset of a child chunk (high bit set).
//!
//! Both are stored little-endian and accessed through `zerocopy`, so the
//! arena is plain bytes with no alignment requirements.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, LittleEndian, U32, U64};

/// Codeword tag: the low 32 bits hold a next-hop index directly.
pub const CODEWORD_NEXTHOP: u64 = 1 << 63;

/// Pointer tag: the low 31 bits hold a child chunk's arena offset.
pub const POINTERTYPE_NEXTLEVEL: u32 = 1 << 31;

/// Codewords in the level-1 header (one per group of 16 top-16-bit buckets).
pub const LEVEL1_CODEWORDS: usize = 4096;

/// Codewords per level-2/3 chunk.
pub const CHUNK_CODEWORDS: usize = 16;

/// Buckets summarized by one codeword.
pub const BUCKETS_PER_GROUP: usize = 16;

/// Level-1 buckets (one per distinct top 16 bits).
pub const LEVEL1_BUCKETS: usize = 65536;

/// Buckets per level-2/3 chunk (8 address bits per level).
pub const CHUNK_BUCKETS: usize = 256;

/// Bytes per codeword.
pub const CODEWORD_SIZE: usize = std::mem::size_of::<Codeword>();

/// Bytes per pointer.
pub const POINTER_SIZE: usize = std::mem::size_of::<TaggedPointer>();

/// Default arena capacity. 16 MiB comfortably holds a compiled full
/// IPv4 BGP table (a 2020-era dump compiles to roughly half that).
pub const DEFAULT_ARENA_CAPACITY: usize = 16 * 1024 * 1024;

/// One 64-bit codeword.
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct Codeword(U64<LittleEndian>);

impl Codeword {
    /// Codeword resolving the whole group to one next-hop index.
    pub fn next_hop(index: u32) -> Self {
        Self(U64::new(CODEWORD_NEXTHOP | index as u64))
    }

    /// Codeword carrying a bucket bitmask and the group's pointer base.
    pub fn group(bitmask: u16, pointer_base: u32) -> Self {
        Self(U64::new(((bitmask as u64) << 32) | pointer_base as u64))
    }

    /// Whether the group resolves directly to a next hop.
    pub fn is_next_hop(&self) -> bool {
        self.0.get() & CODEWORD_NEXTHOP != 0
    }

    /// Next-hop index (valid when [`Self::is_next_hop`]).
    pub fn next_hop_index(&self) -> u32 {
        (self.0.get() & 0xFFFF_FFFF) as u32
    }

    /// Bucket occupancy bitmask, bit `15 - j` for bucket `j` of the group.
    pub fn bitmask(&self) -> u16 {
        ((self.0.get() >> 32) & 0xFFFF) as u16
    }

    /// Index of the group's first pointer in the chunk's pointer array.
    pub fn pointer_base(&self) -> u32 {
        (self.0.get() & 0xFFFF_FFFF) as u32
    }
}

/// One 32-bit tagged pointer.
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct TaggedPointer(U32<LittleEndian>);

impl TaggedPointer {
    /// Pointer resolving a bucket to a next-hop index.
    pub fn next_hop(index: u32) -> Self {
        debug_assert_eq!(index & POINTERTYPE_NEXTLEVEL, 0);
        Self(U32::new(index))
    }

    /// Pointer to a child chunk at the given arena byte offset.
    pub fn child(offset: u32) -> Self {
        debug_assert_eq!(offset & POINTERTYPE_NEXTLEVEL, 0);
        Self(U32::new(POINTERTYPE_NEXTLEVEL | offset))
    }

    /// Whether this pointer descends to a child chunk.
    pub fn is_child(&self) -> bool {
        self.0.get() & POINTERTYPE_NEXTLEVEL != 0
    }

    /// Next-hop index (valid when not [`Self::is_child`]).
    pub fn next_hop_index(&self) -> u32 {
        self.0.get()
    }

    /// Child chunk offset (valid when [`Self::is_child`]).
    pub fn child_offset(&self) -> u32 {
        self.0.get() & !POINTERTYPE_NEXTLEVEL
    }
}
