// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 mcl-core contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

fn region(n: usize) -> Vec<usize> {
    vec![0usize; n]
}

#[test]
fn init_rejects_undersized_region() {
    let mut r = region(MIN_ENTRIES - 1);
    assert_eq!(Context::init(&mut r, core::ptr::null_mut()).unwrap_err(), ErrorKind::OutOfMemory);
}

#[test]
fn init_reserves_two_frames() {
    let mut r = region(MIN_ENTRIES);
    let ctx = Context::init(&mut r, core::ptr::null_mut()).unwrap();
    assert_eq!(ctx.stack_height(), 4);
    assert_eq!(ctx.heap_space(), ctx.slot_addr(ctx.stack_top).as_usize());
}

#[test]
fn user_data_round_trips() {
    let mut tag = 7u8;
    let mut r = region(MIN_ENTRIES);
    let ctx = Context::init(&mut r, core::ptr::from_mut(&mut tag).cast::<u8>()).unwrap();
    assert_eq!(ctx.user_data(), core::ptr::from_mut(&mut tag).cast::<u8>());
}

#[test]
fn heap_and_stack_space_are_complementary() {
    let mut r = region(64);
    let ctx = Context::init(&mut r, core::ptr::null_mut()).unwrap();
    let total_bytes = 64 * SLOT_SIZE;
    let used_stack_bytes = ctx.stack_height() * SLOT_SIZE;
    assert_eq!(ctx.heap_space() + used_stack_bytes, total_bytes);
}

#[test]
fn heap_contains_respects_heap_ptr() {
    let mut r = region(MIN_ENTRIES);
    let mut ctx = Context::init(&mut r, core::ptr::null_mut()).unwrap();
    let p = ctx.alloc(8).unwrap();
    assert!(ctx.heap_contains(p));
    assert!(!ctx.heap_contains(Addr::new(ctx.heap_ptr)));
}

#[test]
fn stack_contains_respects_stack_top() {
    let mut r = region(MIN_ENTRIES);
    let ctx = Context::init(&mut r, core::ptr::null_mut()).unwrap();
    let top_addr = ctx.slot_addr(ctx.stack_top);
    assert!(ctx.stack_contains(top_addr));
    assert!(!ctx.stack_contains(Addr::new(0)));
}
