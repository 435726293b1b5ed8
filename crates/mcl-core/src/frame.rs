// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 mcl-core contributors

//! §4.7 frame primitives.
//!
//! A frame header is two pointer-stack slots written by [`Context::frame_push`]:
//! the lower-addressed (most recently pushed) slot holds a self-sentinel
//! equal to its own address, the slot above it holds the previous
//! `frame_ptr`. Frames therefore chain through the pointer stack itself —
//! there is no separate frame table to keep in sync with relocation.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

use crate::context::Context;
use crate::types::Addr;
use crate::ErrorKind;

impl Context<'_> {
    /// Open a new frame: push the previous frame pointer, then a
    /// self-sentinel, and make the sentinel's slot the new `frame_ptr`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfMemory` if fewer than two stack slots are free.
    pub fn frame_push(&mut self) -> Result<(), ErrorKind> {
        self.debug_check_invariants();
        if self.stack_space() < 2 {
            return Err(ErrorKind::OutOfMemory);
        }
        let prev_frame_addr = self.slot_addr(self.frame_ptr);
        let new_frame_slot = self.stack_top - 2;
        let new_frame_addr = self.slot_addr(new_frame_slot);
        self.push(prev_frame_addr);
        self.push(new_frame_addr);
        self.frame_ptr = new_frame_slot;
        Ok(())
    }

    /// Close the current frame: release every scope-local entry pushed
    /// since [`Context::frame_push`], then restore the previous frame
    /// pointer.
    ///
    /// # Preconditions
    ///
    /// A frame must be active (`frame_ptr < region.len()`).
    pub fn frame_pop(&mut self) {
        self.debug_check_invariants();
        debug_assert!(self.frame_ptr < self.region.len(), "frame_pop: no active frame");
        while self.stack_top < self.frame_ptr {
            let v = self.pop();
            if self.heap_contains(v) {
                self.release(v);
            }
        }
        let _self_sentinel = self.pop();
        let prev = self.pop();
        self.frame_ptr = self.slot_of(prev);
    }

    /// Address the frame `level` steps away from the current one.
    ///
    /// `level == 0` is the current frame. `level > 0` walks outward that
    /// many steps along the previous-frame chain, returning `Ok(None)` if
    /// the chain ends first. `level < 0` indexes from the outermost frame
    /// (`-1`), temporarily materializing the whole chain on the free
    /// portion of the pointer stack to do so.
    ///
    /// # Errors
    ///
    /// Returns `OutOfMemory` (only possible for `level < 0`) if the chain
    /// is too long to materialize in the free stack space.
    pub fn frame_seek(&mut self, level: isize) -> Result<Option<Addr>, ErrorKind> {
        self.debug_check_invariants();
        if level == 0 {
            return Ok(Some(self.slot_addr(self.frame_ptr)));
        }
        if level > 0 {
            return Ok(self.frame_seek_outward(level));
        }
        self.frame_seek_from_base(level)
    }

    fn frame_seek_outward(&self, level: isize) -> Option<Addr> {
        let mut current = self.frame_ptr;
        for _ in 0..level {
            if current == self.region.len() {
                return None;
            }
            let prev = Addr::new(self.region[current + 1]);
            current = self.slot_of(prev);
        }
        if current == self.region.len() {
            None
        } else {
            Some(self.slot_addr(current))
        }
    }

    fn frame_seek_from_base(&mut self, level: isize) -> Result<Option<Addr>, ErrorKind> {
        let mut current = self.frame_ptr;
        let mut count = 0usize;
        while current != self.region.len() {
            if self.stack_space() < 1 {
                self.pop_n(count);
                return Err(ErrorKind::OutOfMemory);
            }
            self.push(self.slot_addr(current));
            count += 1;
            let prev = Addr::new(self.region[current + 1]);
            current = self.slot_of(prev);
        }
        #[allow(clippy::cast_sign_loss)] // `level < 0` is checked by the caller
        let outer_first_index = (-1 - level) as usize;
        let result = if outer_first_index >= count {
            None
        } else {
            Some(Addr::new(self.region[self.stack_top + outer_first_index]))
        };
        self.pop_n(count);
        Ok(result)
    }
}
