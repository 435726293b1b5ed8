// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 mcl-core contributors

//! The context: region cursors, queries, and lifecycle.
//!
//! A [`Context`] owns one contiguous, caller-supplied region of pointer-sized
//! slots for its entire lifetime. Two cursors partition it: `heap_ptr` grows
//! a bump-allocated, relocatable object heap up from the low end; `stack_top`
//! grows a pointer stack down from the high end. The gap between them is
//! free space, checked before every allocation or push (see
//! [`crate::alloc`] and [`crate::stack`]).
//!
//! Addressing is unified on [`Addr`]: a byte offset from the region's base
//! (slot 0), used for heap object addresses, pointer-stack slot addresses,
//! and frame links alike, so a single relocation sweep (`Context::relocate`
//! in [`crate::alloc`]) can rewrite any stack slot that holds one without
//! caring which role it plays. See `DESIGN.md` for why the teacher's
//! `Paddr`/`Vaddr` split collapses to this one type here.

#[cfg(test)]
mod mod_test;

use crate::types::Addr;
use crate::ErrorKind;

/// Minimum number of slots a region must have for [`Context::init`] to
/// accept it: enough for the two initial frames plus headroom.
pub const MIN_ENTRIES: usize = 16;

/// Width, in bytes, of one region slot.
pub(crate) const SLOT_SIZE: usize = core::mem::size_of::<usize>();

#[cfg(debug_assertions)]
const INTEGRITY_TAG: u32 = 0x4D43_4C30; // "MCL0"

/// The memory substrate for one interpreter instance.
///
/// Single-owner, single-threaded: `Context` borrows its region for its
/// entire lifetime and is neither `Send` nor `Sync` (the raw `user_data`
/// pointer already prevents auto-derivation of either).
#[derive(Debug)]
pub struct Context<'region> {
    pub(crate) region: &'region mut [usize],
    /// Next free heap byte, monotonically non-decreasing.
    pub(crate) heap_ptr: usize,
    /// Current stack top, as a slot index (smaller index = higher on the
    /// stack = more recently pushed). `region.len()` means the stack is
    /// empty.
    pub(crate) stack_top: usize,
    /// Current frame header's self-sentinel slot index. `region.len()`
    /// means "no frame" (the sentinel named in `spec.md` §3).
    pub(crate) frame_ptr: usize,
    user_data: *mut u8,
    #[cfg(debug_assertions)]
    tag: u32,
}

impl<'region> Context<'region> {
    /// Initialize a context over `region`, pushing the two initial frames
    /// (procedure table, then global table).
    ///
    /// Rust's slices carry their own length, so unlike the C-shaped
    /// `init(handle, region, N, user_data)` embedding API this takes one
    /// `&mut [usize]` rather than a separate pointer and count.
    ///
    /// # Errors
    ///
    /// Returns `OutOfMemory` if `region.len() < MIN_ENTRIES` or if the
    /// initial frames cannot be pushed.
    pub fn init(region: &'region mut [usize], user_data: *mut u8) -> Result<Self, ErrorKind> {
        if region.len() < MIN_ENTRIES {
            return Err(ErrorKind::OutOfMemory);
        }
        let stack_end = region.len();
        let mut ctx = Self {
            region,
            heap_ptr: 0,
            stack_top: stack_end,
            frame_ptr: stack_end,
            user_data,
            #[cfg(debug_assertions)]
            tag: INTEGRITY_TAG,
        };
        ctx.try_run(|c| {
            c.frame_push()?; // procedure table frame (outermost)
            c.frame_push()?; // global table frame
            Ok(())
        })?;
        Ok(ctx)
    }

    /// The pointer originally supplied to [`Context::init`].
    #[inline]
    #[must_use]
    pub const fn user_data(&self) -> *mut u8 {
        self.user_data
    }

    // --- §4.1 Region cursors & queries -------------------------------

    /// Bytes available for heap growth.
    #[must_use]
    pub fn heap_space(&self) -> usize {
        self.slot_addr(self.stack_top).as_usize() - self.heap_ptr
    }

    /// `true` iff `p` falls within the live heap (`heap_start ≤ p < heap_ptr`).
    #[must_use]
    pub fn heap_contains(&self, p: Addr) -> bool {
        p.as_usize() < self.heap_ptr
    }

    /// Slots available for stack growth.
    #[must_use]
    pub fn stack_space(&self) -> usize {
        self.stack_top - self.ceil_to_slot(self.heap_ptr)
    }

    /// Number of slots currently on the pointer stack.
    #[must_use]
    pub fn stack_height(&self) -> usize {
        self.region.len() - self.stack_top
    }

    /// `true` iff `p` falls within the live pointer stack.
    #[must_use]
    pub fn stack_contains(&self, p: Addr) -> bool {
        p.in_range(self.slot_addr(self.stack_top), self.slot_addr(self.region.len()))
    }

    // --- internal helpers shared across the other modules ------------

    /// Convert a slot index to its byte address.
    pub(crate) fn slot_addr(&self, slot: usize) -> Addr {
        Addr::new(slot * SLOT_SIZE)
    }

    /// Convert a byte address to its slot index. The address must be
    /// slot-aligned (true of every frame link and every pointer-stack
    /// value this core ever produces).
    pub(crate) fn slot_of(&self, addr: Addr) -> usize {
        debug_assert_eq!(addr.as_usize() % SLOT_SIZE, 0, "slot_of: misaligned address");
        addr.as_usize() / SLOT_SIZE
    }

    fn ceil_to_slot(&self, byte_offset: usize) -> usize {
        byte_offset.div_ceil(SLOT_SIZE)
    }

    /// Byte-level read-only view over the whole region's backing storage.
    ///
    /// Callers only ever index within `[0, heap_ptr)` or an allocation
    /// range they have already bounds-checked; slicing a wider range here
    /// costs nothing and keeps this one unsafe block the crate's only one.
    pub(crate) fn heap_bytes(&self) -> &[u8] {
        // SAFETY: `usize` has no padding and every bit pattern is valid, so
        // reinterpreting `region`'s backing storage as bytes for the
        // lifetime of this borrow is sound.
        unsafe {
            core::slice::from_raw_parts(self.region.as_ptr().cast::<u8>(), self.region.len() * SLOT_SIZE)
        }
    }

    /// Mutable counterpart of [`Context::heap_bytes`].
    pub(crate) fn heap_bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: see `heap_bytes`.
        unsafe {
            core::slice::from_raw_parts_mut(
                self.region.as_mut_ptr().cast::<u8>(),
                self.region.len() * SLOT_SIZE,
            )
        }
    }

    #[cfg(debug_assertions)]
    pub(crate) fn debug_check_invariants(&self) {
        debug_assert_eq!(self.tag, INTEGRITY_TAG, "context used after failed init or corruption");
        debug_assert!(self.heap_ptr <= self.slot_addr(self.stack_top).as_usize());
        debug_assert!(self.stack_top <= self.frame_ptr);
        debug_assert!(self.frame_ptr <= self.region.len());
    }

    #[cfg(not(debug_assertions))]
    pub(crate) fn debug_check_invariants(&self) {}
}
