// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 mcl-core contributors

//! §4.6 the unwinding error mechanism.
//!
//! There is no C-style linked list of installed landing sites to maintain
//! by hand here: nesting a protected region is just nesting a call to
//! [`Context::try_run`], and propagating a failure out of one is just `?`.
//! The one piece of bookkeeping genuinely specific to this substrate is
//! what happens at the boundary when a call *does* fail — truncating the
//! pointer stack back to where the region started, releasing every
//! heap-contained reference that truncation drops, while preserving the
//! one message string a `RuntimeError`/`SyntaxError` raiser left on top.

#[cfg(test)]
#[path = "unwind_test.rs"]
mod unwind_test;

use crate::context::Context;
use crate::types::Addr;
use crate::ErrorKind;

/// A saved `(stack_top, frame_ptr)` pair: the boundary [`Context::try_run`]
/// unwinds back to on failure.
#[derive(Clone, Copy)]
struct Mark {
    stack_top: usize,
    frame_ptr: usize,
}

impl Context<'_> {
    fn mark(&self) -> Mark {
        Mark { stack_top: self.stack_top, frame_ptr: self.frame_ptr }
    }

    /// Drop one heap-contained reference taken off the pointer stack.
    ///
    /// Strings are the only heap object kind this substrate defines; a
    /// second kind would extend this one dispatch point rather than
    /// duplicate the release logic at every call site that pops a value.
    pub(crate) fn release(&mut self, v: Addr) {
        self.string_release(v);
    }

    /// Run `f` as a protected region.
    ///
    /// On `Ok`, this is transparent. On `Err`, the pointer stack and frame
    /// chain are truncated back to where they stood on entry, releasing
    /// every heap-contained value that truncation drops; a message string
    /// left on top by [`Context::raise_runtime_error`] or
    /// [`Context::raise_syntax_error`] survives the truncation, ending up
    /// immediately above the restored stack top. `OutOfMemory` carries no
    /// message and nothing is preserved.
    pub fn try_run<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, ErrorKind>) -> Result<T, ErrorKind> {
        let saved = self.mark();
        match f(self) {
            Ok(v) => Ok(v),
            Err(kind) => {
                self.unwind_to(saved, kind);
                Err(kind)
            }
        }
    }

    fn unwind_to(&mut self, saved: Mark, kind: ErrorKind) {
        let message = if kind == ErrorKind::OutOfMemory || self.stack_top >= saved.stack_top {
            None
        } else {
            Some(self.pop())
        };
        while self.stack_top < saved.stack_top {
            let v = self.pop();
            if self.heap_contains(v) {
                self.release(v);
            }
        }
        if let Some(m) = message {
            self.push(m);
        }
        self.frame_ptr = saved.frame_ptr;
    }

    /// Push `message` and return the `RuntimeError` it describes.
    ///
    /// Intended use is `return Err(ctx.raise_runtime_error(msg))`.
    pub fn raise_runtime_error(&mut self, message: Addr) -> ErrorKind {
        self.push(message);
        ErrorKind::RuntimeError
    }

    /// Push `message` and return the `SyntaxError` it describes.
    pub fn raise_syntax_error(&mut self, message: Addr) -> ErrorKind {
        self.push(message);
        ErrorKind::SyntaxError
    }
}
