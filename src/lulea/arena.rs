//! Bump-allocated byte arena
//!
//! All chunks of a compiled trie live in one contiguous byte buffer and
//! reference each other by byte offset from the buffer base. The buffer is
//! allocated once at its full capacity and never grows, so offsets handed
//! out during the build stay valid for the lifetime of the trie.

use super::format::{Codeword, TaggedPointer, CODEWORD_SIZE, POINTER_SIZE};
use crate::error::{FibError, Result};
use zerocopy::{FromBytes, IntoBytes};

/// Fixed-capacity byte arena with a bump cursor.
#[derive(Debug, Clone)]
pub struct Arena {
    buf: Vec<u8>,
    cursor: usize,
}

impl Arena {
    /// Create an arena of the given capacity, zero-filled.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            cursor: 0,
        }
    }

    /// Reserve `len` bytes, returning their offset from the arena base.
    ///
    /// # Errors
    ///
    /// Returns [`FibError::ArenaExhausted`] when the capacity is spent;
    /// the build cannot continue past this point.
    pub fn alloc(&mut self, len: usize) -> Result<usize> {
        if self.cursor + len > self.buf.len() {
            return Err(FibError::ArenaExhausted(format!(
                "needed {} bytes at offset {}, capacity {}",
                len,
                self.cursor,
                self.buf.len()
            )));
        }
        let offset = self.cursor;
        self.cursor += len;
        Ok(offset)
    }

    /// Bytes handed out so far.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Release the unused tail. Offsets are unaffected.
    pub fn trim(&mut self) {
        self.buf.truncate(self.cursor);
        self.buf.shrink_to_fit();
    }

    pub fn write_codeword(&mut self, offset: usize, codeword: Codeword) -> Result<()> {
        let slot = self
            .buf
            .get_mut(offset..offset + CODEWORD_SIZE)
            .ok_or_else(|| FibError::CorruptTrie(format!("codeword write at {}", offset)))?;
        slot.copy_from_slice(codeword.as_bytes());
        Ok(())
    }

    pub fn write_pointer(&mut self, offset: usize, pointer: TaggedPointer) -> Result<()> {
        let slot = self
            .buf
            .get_mut(offset..offset + POINTER_SIZE)
            .ok_or_else(|| FibError::CorruptTrie(format!("pointer write at {}", offset)))?;
        slot.copy_from_slice(pointer.as_bytes());
        Ok(())
    }

    /// Codeword at a byte offset, `None` when out of range.
    pub fn codeword_at(&self, offset: usize) -> Option<Codeword> {
        let bytes = self.buf.get(offset..offset + CODEWORD_SIZE)?;
        Codeword::read_from_bytes(bytes).ok()
    }

    /// Pointer at a byte offset, `None` when out of range.
    pub fn pointer_at(&self, offset: usize) -> Option<TaggedPointer> {
        let bytes = self.buf.get(offset..offset + POINTER_SIZE)?;
        TaggedPointer::read_from_bytes(bytes).ok()
    }
}
