// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 mcl-core contributors

//! # mcl-core
//!
//! The memory and execution-context substrate for a minimal command-language
//! interpreter, built to run on resource-constrained and embedded hosts.
//!
//! This crate provides:
//! - A [`Context`] that owns exactly one caller-supplied contiguous region
//!   of pointer-sized slots for its entire lifetime and never reaches for a
//!   general allocator after [`Context::init`]
//! - A dual-ended region: a bump-allocated, relocating object heap growing
//!   up from the low end, and a pointer stack / call-frame chain growing
//!   down from the high end (see [`alloc`], [`stack`])
//! - A reference-counted string object as the sole heap object kind
//!   (see [`string`])
//! - An unwinding error mechanism that releases every stack-referenced
//!   object dropped by a failed protected region (see [`unwind`])
//! - Frame primitives for lexical scoping (see [`frame`])
//!
//! There is no embedding layer, parser, or evaluator here: this crate is
//! the substrate those would be built on, not the interpreter itself.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod alloc;
pub mod context;
pub mod error;
pub mod frame;
pub mod pack;
pub mod stack;
pub mod string;
pub mod types;
pub mod unwind;

pub use context::{Context, MIN_ENTRIES};
pub use error::ErrorKind;
pub use string::MAX_STRING_LEN;
pub use types::Addr;
