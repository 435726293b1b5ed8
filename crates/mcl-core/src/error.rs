// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 mcl-core contributors

//! Error taxonomy for the memory substrate.
//!
//! There is no `OK` variant: success is represented the idiomatic Rust way,
//! as `Result::Ok`, rather than as a fourth enum member a caller has to
//! remember to check for. Raising is just returning `Err`; propagation is
//! just `?`. See [`crate::unwind`] for how `try_run` turns a propagated
//! `Err` into the stack/frame unwind the spec requires.

/// The three ways a protected region can fail.
///
/// Reference-count overflow, releasing a non-heap pointer, and operating on
/// an uninitialized context are *not* represented here: the spec treats
/// those as programming faults, not recoverable error kinds (see
/// `SPEC_FULL.md` §9, Open Question 3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A request exceeded the free heap bytes or free stack slots, or a
    /// string creation exceeded [`crate::MAX_STRING_LEN`].
    OutOfMemory,
    /// An evaluator-level semantic failure. The raiser is expected to have
    /// pushed a message string immediately before returning this.
    RuntimeError,
    /// A parser-level failure. Same message contract as `RuntimeError`.
    SyntaxError,
}
