// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 mcl-core contributors

//! §4.3 the relocating heap allocator.
//!
//! There is no free list and no generational collector: `alloc` only ever
//! bumps `heap_ptr`. `grow`/`shrink` resize the *most recently allocated
//! live* object in place when possible, and otherwise slide every object
//! above it up or down with one `copy_within`, then rewrite every
//! pointer-stack slot that referenced something above the moved region.
//! Because the pointer stack is the only root set (there are no handles,
//! see `SPEC_FULL.md` §4), that one sweep is sufficient to keep every live
//! reference correct — nothing else in the system holds a heap address.

#[cfg(test)]
#[path = "alloc_test.rs"]
mod alloc_test;

use crate::context::Context;
use crate::types::Addr;
use crate::ErrorKind;

impl Context<'_> {
    /// Bump-allocate `size` bytes at the current heap top.
    ///
    /// # Errors
    ///
    /// Returns `OutOfMemory` if fewer than `size` bytes are free.
    pub fn alloc(&mut self, size: usize) -> Result<Addr, ErrorKind> {
        self.debug_check_invariants();
        debug_assert!(size > 0, "alloc: zero-size allocation");
        if self.heap_space() < size {
            return Err(ErrorKind::OutOfMemory);
        }
        let p = Addr::new(self.heap_ptr);
        self.heap_ptr += size;
        Ok(p)
    }

    /// Grow the `old_size`-byte object at `p` to `new_size` bytes, relocating
    /// everything above it (and rewriting stack references to it) if it
    /// is not already the topmost heap allocation.
    ///
    /// # Errors
    ///
    /// Returns `OutOfMemory` if the heap has fewer than `new_size -
    /// old_size` free bytes.
    pub fn grow(&mut self, p: Addr, old_size: usize, new_size: usize) -> Result<Addr, ErrorKind> {
        self.debug_check_invariants();
        debug_assert!(new_size > old_size, "grow: new_size must exceed old_size");
        debug_assert!(self.heap_contains(p), "grow: `p` is not a live heap address");
        let delta = new_size - old_size;
        if self.heap_space() < delta {
            return Err(ErrorKind::OutOfMemory);
        }
        let p_off = p.as_usize();
        let old_heap_ptr = self.heap_ptr;
        let tail_start = p_off + old_size;
        if tail_start != old_heap_ptr {
            self.heap_bytes_mut().copy_within(tail_start..old_heap_ptr, tail_start + delta);
            self.relocate_stack_refs(p_off, old_heap_ptr, delta as isize);
        }
        self.heap_ptr += delta;
        Ok(p)
    }

    /// Shrink the `old_size`-byte object at `p` to `new_size` bytes.
    /// `new_size == 0` frees it entirely (see [`Context::free`]).
    ///
    /// This never fails: shrinking only ever reduces heap usage.
    pub fn shrink(&mut self, p: Addr, old_size: usize, new_size: usize) -> Result<(), ErrorKind> {
        self.debug_check_invariants();
        debug_assert!(new_size < old_size, "shrink: new_size must be below old_size");
        debug_assert!(self.heap_contains(p), "shrink: `p` is not a live heap address");
        let delta = old_size - new_size;
        let p_off = p.as_usize();
        let old_heap_ptr = self.heap_ptr;
        let tail_start = p_off + old_size;
        if tail_start != old_heap_ptr {
            self.heap_bytes_mut().copy_within(tail_start..old_heap_ptr, tail_start - delta);
            self.relocate_stack_refs(p_off, old_heap_ptr, -(delta as isize));
        }
        self.heap_ptr -= delta;
        Ok(())
    }

    /// Free the `size`-byte object at `p`. Equivalent to `shrink(p, size, 0)`.
    pub fn free(&mut self, p: Addr, size: usize) -> Result<(), ErrorKind> {
        self.shrink(p, size, 0)
    }

    /// Rewrite every pointer-stack slot whose value lies strictly above `p`
    /// and strictly below `boundary` (the heap top as it stood before this
    /// move) by `delta` bytes.
    ///
    /// Frame links are never touched: their addresses always lie in the
    /// stack region, which is always numerically above `boundary`, so the
    /// `< boundary` test excludes them without any special-casing.
    fn relocate_stack_refs(&mut self, p: usize, boundary: usize, delta: isize) {
        for slot in self.stack_top..self.region.len() {
            let v = self.region[slot];
            if v > p && v < boundary {
                self.region[slot] = if delta >= 0 {
                    v + delta.unsigned_abs()
                } else {
                    v - delta.unsigned_abs()
                };
            }
        }
    }
}
