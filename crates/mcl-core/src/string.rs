// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 mcl-core contributors

//! §4.5 the string object.
//!
//! Layout, starting at the object's address `s`:
//!
//! | offset | size | field                      |
//! |-------:|-----:|----------------------------|
//! |      0 |    1 | reference count (1..=255)  |
//! |      1 |    2 | length `L`, little-endian  |
//! |      3 |    L | content bytes              |
//! |  3 + L |    1 | terminating NUL            |
//!
//! Total size is `4 + L`. The NUL terminator is not part of `L` and is not
//! included in [`Context::string_chars`]; it exists purely so a raw
//! pointer into the heap can be handed to a C caller expecting a
//! NUL-terminated buffer, without a second allocation.

#[cfg(test)]
#[path = "string_test.rs"]
mod string_test;

use crate::context::Context;
use crate::pack::{pack_u16, unpack_u16};
use crate::types::Addr;
use crate::ErrorKind;

const REFCOUNT_OFFSET: usize = 0;
const LEN_OFFSET: usize = 1;
const HEADER_SIZE: usize = 3;

/// Longest content length this substrate will allocate for a string.
/// `L` is stored in a 16-bit field, so this is one below `u16::MAX` to
/// keep `L + 1` (content plus NUL) from wrapping.
pub const MAX_STRING_LEN: usize = 32_767;

/// Total on-heap size, in bytes, of a string object holding `len` content
/// bytes.
#[must_use]
pub const fn string_size(len: usize) -> usize {
    HEADER_SIZE + len + 1
}

impl Context<'_> {
    /// Current reference count of the string at `s`.
    #[must_use]
    pub fn string_ref_count(&self, s: Addr) -> u8 {
        self.heap_bytes()[s.as_usize() + REFCOUNT_OFFSET]
    }

    fn set_ref_count(&mut self, s: Addr, v: u8) {
        self.heap_bytes_mut()[s.as_usize() + REFCOUNT_OFFSET] = v;
    }

    /// Content length, in bytes, of the string at `s` (excludes the NUL
    /// terminator).
    #[must_use]
    pub fn string_len(&self, s: Addr) -> usize {
        let off = s.as_usize() + LEN_OFFSET;
        unpack_u16(&self.heap_bytes()[off..off + 2]) as usize
    }

    fn set_len(&mut self, s: Addr, len: usize) {
        debug_assert!(len <= MAX_STRING_LEN);
        let off = s.as_usize() + LEN_OFFSET;
        #[allow(clippy::cast_possible_truncation)] // bounded by MAX_STRING_LEN above
        pack_u16(&mut self.heap_bytes_mut()[off..off + 2], len as u16);
    }

    /// The string's content bytes, excluding the NUL terminator.
    #[must_use]
    pub fn string_chars(&self, s: Addr) -> &[u8] {
        let len = self.string_len(s);
        let start = s.as_usize() + HEADER_SIZE;
        &self.heap_bytes()[start..start + len]
    }

    fn chars_mut(&mut self, s: Addr, len: usize) -> &mut [u8] {
        let start = s.as_usize() + HEADER_SIZE;
        &mut self.heap_bytes_mut()[start..start + len]
    }

    fn write_terminator(&mut self, s: Addr, len: usize) {
        let idx = s.as_usize() + HEADER_SIZE + len;
        self.heap_bytes_mut()[idx] = 0;
    }

    /// Allocate an uninitialized string object holding `len` content bytes,
    /// with its reference count set to 1.
    ///
    /// # Errors
    ///
    /// Returns `OutOfMemory` if `len` exceeds [`MAX_STRING_LEN`] or the heap
    /// has fewer than `string_size(len)` free bytes.
    pub fn string_alloc(&mut self, len: usize) -> Result<Addr, ErrorKind> {
        if len > MAX_STRING_LEN {
            return Err(ErrorKind::OutOfMemory);
        }
        let s = self.alloc(string_size(len))?;
        self.set_ref_count(s, 1);
        self.set_len(s, len);
        self.write_terminator(s, len);
        Ok(s)
    }

    /// Allocate a string object and copy `bytes` into it.
    ///
    /// # Errors
    ///
    /// See [`Context::string_alloc`].
    pub fn string_new_with_len(&mut self, bytes: &[u8]) -> Result<Addr, ErrorKind> {
        let s = self.string_alloc(bytes.len())?;
        self.chars_mut(s, bytes.len()).copy_from_slice(bytes);
        Ok(s)
    }

    /// Allocate a string object from a NUL-terminated buffer, for callers
    /// handing in a C string. The length is the distance to the first `0`
    /// byte, or the whole buffer if none is found.
    ///
    /// # Errors
    ///
    /// See [`Context::string_alloc`].
    pub fn string_new(&mut self, cstr: &[u8]) -> Result<Addr, ErrorKind> {
        let len = cstr.iter().position(|&b| b == 0).unwrap_or(cstr.len());
        self.string_new_with_len(&cstr[..len])
    }

    /// Increment the reference count and return `s` unchanged.
    ///
    /// # Preconditions
    ///
    /// The current count must be below 255; overflowing it is a
    /// programming fault, not a recoverable error (see `SPEC_FULL.md` §9,
    /// Open Question 3).
    pub fn string_acquire(&mut self, s: Addr) -> Addr {
        let count = self.string_ref_count(s);
        debug_assert!(count < u8::MAX, "string_acquire: reference count overflow");
        self.set_ref_count(s, count.wrapping_add(1));
        s
    }

    /// Decrement the reference count, freeing the object's heap storage if
    /// it reaches zero.
    ///
    /// # Preconditions
    ///
    /// The current count must be at least 1.
    pub fn string_release(&mut self, s: Addr) {
        let count = self.string_ref_count(s);
        debug_assert!(count >= 1, "string_release: releasing a dead string");
        if count == 1 {
            let size = string_size(self.string_len(s));
            // A shrink-to-zero of a freshly-computed live range never fails.
            let _ = self.free(s, size);
        } else {
            self.set_ref_count(s, count - 1);
        }
    }

    /// Grow the string at `s` to `new_len` content bytes. The new content
    /// beyond the old length is left uninitialized; the terminator moves.
    ///
    /// # Errors
    ///
    /// Returns `OutOfMemory` if `new_len` exceeds [`MAX_STRING_LEN`] or the
    /// heap has insufficient free space.
    pub fn string_grow(&mut self, s: Addr, new_len: usize) -> Result<Addr, ErrorKind> {
        if new_len > MAX_STRING_LEN {
            return Err(ErrorKind::OutOfMemory);
        }
        let old_len = self.string_len(s);
        debug_assert!(new_len > old_len, "string_grow: new_len must exceed the current length");
        self.grow(s, string_size(old_len), string_size(new_len))?;
        self.set_len(s, new_len);
        self.write_terminator(s, new_len);
        Ok(s)
    }

    /// Shrink the string at `s` to `new_len` content bytes, truncating its
    /// content and moving the terminator.
    ///
    /// This never fails: shrinking only ever reduces heap usage.
    pub fn string_shrink(&mut self, s: Addr, new_len: usize) -> Result<Addr, ErrorKind> {
        let old_len = self.string_len(s);
        debug_assert!(new_len < old_len, "string_shrink: new_len must be below the current length");
        self.shrink(s, string_size(old_len), string_size(new_len))?;
        self.set_len(s, new_len);
        self.write_terminator(s, new_len);
        Ok(s)
    }

    /// Lexicographically compare the content of two strings, returning
    /// `-1`, `0`, or `1`.
    #[must_use]
    pub fn string_compare(&self, a: Addr, b: Addr) -> i32 {
        match self.string_chars(a).cmp(self.string_chars(b)) {
            core::cmp::Ordering::Less => -1,
            core::cmp::Ordering::Equal => 0,
            core::cmp::Ordering::Greater => 1,
        }
    }
}
