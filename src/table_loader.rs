//! Text route-table loading
//!
//! The loader feeds the build pipeline from a line-oriented dump:
//!
//! ```text
//! # prefix        next-hop
//! 193.0.0.0/21    192.0.2.1
//! 10.0.0.0/8      peer-a
//! 0.0.0.0/0       upstream
//! ```
//!
//! One route per line, `#` starts a comment, blank lines are skipped, and
//! anything after the second field is ignored. A bare address means a
//! `/32` host route. Next-hop tokens are opaque: they are interned into
//! dense `u32` identifiers in first-seen order, so equal tokens share a
//! next hop no matter how many routes name them.
//!
//! Endianness is settled here: addresses are parsed into host-order
//! integers before they reach the prefix set, and a `/0` becomes two `/1`
//! entries on the way in.

use crate::error::{FibError, Result};
use crate::file_reader;
use crate::prefix_set::PrefixSet;
use rustc_hash::FxHashMap;
use std::io::BufRead;
use std::net::Ipv4Addr;
use std::path::Path;

/// A parsed route table: bucketed prefixes plus the next-hop symbol table.
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    /// Prefixes bucketed by length, ready for the radix builder
    pub prefixes: PrefixSet,
    /// Interned next-hop tokens, indexed by the identifier stored in the
    /// prefixes (and later in the route records)
    pub next_hops: Vec<String>,
}

impl LoadedTable {
    /// Token for an interned next-hop identifier.
    pub fn next_hop_name(&self, id: u32) -> Option<&str> {
        self.next_hops.get(id as usize).map(String::as_str)
    }
}

/// Load a route table from a file (`.gz` transparently decompressed,
/// `-` reads stdin).
pub fn load<P: AsRef<Path>>(path: P) -> Result<LoadedTable> {
    parse(file_reader::open(path)?)
}

/// Parse a route table from any buffered reader.
pub fn parse<R: BufRead>(reader: R) -> Result<LoadedTable> {
    let mut table = LoadedTable::default();
    let mut interned: FxHashMap<String, u32> = FxHashMap::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let entry = line.split('#').next().unwrap_or("").trim();
        if entry.is_empty() {
            continue;
        }

        let mut fields = entry.split_whitespace();
        let prefix = fields.next().ok_or_else(|| {
            FibError::Parse(format!("line {}: missing prefix", index + 1))
        })?;
        let hop = fields.next().ok_or_else(|| {
            FibError::Parse(format!("line {}: missing next hop", index + 1))
        })?;

        let (addr, length) = parse_prefix(prefix)
            .map_err(|err| FibError::Parse(format!("line {}: {}", index + 1, err)))?;

        let id = match interned.get(hop) {
            Some(&id) => id,
            None => {
                let id = table.next_hops.len() as u32;
                interned.insert(hop.to_string(), id);
                table.next_hops.push(hop.to_string());
                id
            }
        };

        table
            .prefixes
            .add(addr, length, id)
            .map_err(|err| FibError::Parse(format!("line {}: {}", index + 1, err)))?;
    }

    Ok(table)
}

/// Parse `A.B.C.D/L` (or a bare `A.B.C.D` host route) into host order.
fn parse_prefix(text: &str) -> Result<(u32, u8)> {
    let (addr_text, length) = match text.split_once('/') {
        Some((addr_text, len_text)) => {
            let length: u8 = len_text.parse().map_err(|_| {
                FibError::InvalidPrefix(format!("bad prefix length {:?}", len_text))
            })?;
            (addr_text, length)
        }
        None => (text, 32),
    };
    if length > 32 {
        return Err(FibError::InvalidPrefix(format!(
            "prefix length {} exceeds 32",
            length
        )));
    }
    let addr: Ipv4Addr = addr_text.parse()?;
    Ok((u32::from(addr), length))
}
