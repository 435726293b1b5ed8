// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 mcl-core contributors

//! §4.2 pointer-stack primitives.
//!
//! These four operations are unchecked: the caller establishes their
//! preconditions (usually by having just called
//! [`Context::stack_space`]/[`Context::stack_height`]) and a debug build
//! asserts them. The checked, `Result`-returning operations that build on
//! top of these live in [`crate::alloc`] and [`crate::frame`].

#[cfg(test)]
#[path = "stack_test.rs"]
mod stack_test;

use crate::context::Context;
use crate::types::Addr;

impl Context<'_> {
    /// Push `v` onto the pointer stack.
    ///
    /// # Preconditions
    ///
    /// `stack_space() >= 1`.
    pub fn push(&mut self, v: Addr) {
        self.debug_check_invariants();
        debug_assert!(self.stack_space() >= 1, "push: stack space exhausted");
        self.stack_top -= 1;
        self.region[self.stack_top] = v.as_usize();
    }

    /// Pop and return the top of the pointer stack.
    ///
    /// # Preconditions
    ///
    /// `stack_height() >= 1`.
    pub fn pop(&mut self) -> Addr {
        self.debug_check_invariants();
        debug_assert!(self.stack_height() >= 1, "pop: stack is empty");
        let v = self.region[self.stack_top];
        self.stack_top += 1;
        Addr::new(v)
    }

    /// Discard the top `n` entries without inspecting them.
    ///
    /// # Preconditions
    ///
    /// `stack_height() >= n`.
    pub fn pop_n(&mut self, n: usize) {
        self.debug_check_invariants();
        debug_assert!(self.stack_height() >= n, "pop_n: insufficient stack height");
        self.stack_top += n;
    }

    /// Swap the two stack slots addressed by `a` and `b`.
    ///
    /// # Preconditions
    ///
    /// Both `a` and `b` must satisfy `stack_contains`.
    pub fn swap(&mut self, a: Addr, b: Addr) {
        self.debug_check_invariants();
        debug_assert!(self.stack_contains(a), "swap: `a` is outside the live stack");
        debug_assert!(self.stack_contains(b), "swap: `b` is outside the live stack");
        let ia = self.slot_of(a);
        let ib = self.slot_of(b);
        self.region.swap(ia, ib);
    }
}
