//! The compressed three-level trie (Lulea encoding)
//!
//! A sealed radix tree compiles into a single byte arena: a level-1
//! header of 4,096 codewords covering the top 16 address bits, then
//! chunks of 16 codewords for each 8-bit stride below. Codewords and
//! tagged pointers are the only value types in the arena; see [`format`]
//! for their encoding, [`builder::TrieBuilder`] for the compilation, and
//! [`CompiledTrie`] for lookups.

pub mod builder;
pub mod format;

mod arena;
mod lookup;

pub use builder::TrieBuilder;
pub use lookup::CompiledTrie;
