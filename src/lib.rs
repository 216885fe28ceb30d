//! Fibber - Compressed IPv4 Forwarding Table
//!
//! Fibber compiles a full IPv4 routing table (a BGP-scale set of prefixes
//! with next hops) into a compact three-level trie in the style of the
//! Lulea algorithm, then answers longest-prefix-match lookups in at most
//! three levels of the structure.
//!
//! # Quick Start
//!
//! ```rust
//! use fibber::{Fib, PrefixSet};
//!
//! let mut set = PrefixSet::new();
//! set.add_addr("10.0.0.0".parse()?, 8, 1)?;
//! set.add_addr("10.1.0.0".parse()?, 16, 2)?;
//!
//! let fib = Fib::build(&set)?;
//!
//! // Longest match wins
//! let route = fib.lookup_addr("10.1.2.3".parse()?).expect("covered");
//! assert_eq!(route.next_hop, 2);
//!
//! // Addresses outside every prefix miss
//! assert!(fib.lookup_addr("192.0.2.1".parse()?).is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! The build is a one-way pipeline; only the last two artifacts survive:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  PrefixSet (33 length buckets)          │
//! ├─────────────────────────────────────────┤
//! │  RadixTree (staging)                    │
//! │   - longest-first insert, split on      │
//! │     collision -> disjoint cover         │
//! │   - sealed with no-route leaves         │
//! ├─────────────────────────────────────────┤
//! │  NextHopTable   +   CompiledTrie        │
//! │  (route records)    (one byte arena:    │
//! │                      codewords/pointers)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! Lookups decode 16 address bits against the level-1 header, then 8 bits
//! per chunk below; most addresses resolve without leaving level 1.
//!
//! # Key Properties
//!
//! - **Bounded lookups**: at most one codeword and one pointer per level
//! - **Compact**: a full 2020-era BGP table compiles into a few MiB
//! - **Read-only sharing**: a built [`Fib`] is immutable and `Sync`
//! - **Build-once**: no incremental update; rebuild to change routes

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
/// Error types for forwarding-table operations
pub mod error;
/// The forwarding-table facade
pub mod fib;
/// Gz-aware buffered input
pub mod file_reader;
/// The compressed three-level trie
pub mod lulea;
/// Next-hop records and the shared table
pub mod nexthop;
/// Prefix bucketing by length
pub mod prefix_set;
/// Binary radix staging tree
pub mod radix;
/// Build statistics
pub mod stats;
/// Text route-table loading
pub mod table_loader;

// Re-exports for the common path

/// Built forwarding table (compiled trie + next-hop records)
pub use crate::fib::Fib;

/// Crate-wide error and result types
pub use crate::error::{FibError, Result};

/// Compiled trie and its builder
pub use crate::lulea::{CompiledTrie, TrieBuilder};

/// Route records and the miss sentinel
pub use crate::nexthop::{NextHopTable, RouteRecord, NO_NEXT_HOP};

/// Input prefixes bucketed by length
pub use crate::prefix_set::{PrefixSet, RoutePrefix};

/// Staging radix tree
pub use crate::radix::{RadixLeaf, RadixTree};

/// Parsed route table (prefixes + next-hop symbols)
pub use crate::table_loader::LoadedTable;
