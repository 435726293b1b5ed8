// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 mcl-core contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::context::{Context, MIN_ENTRIES};
use crate::types::Addr;
use proptest::prelude::*;

fn ctx(region: &mut [usize]) -> Context<'_> {
    Context::init(region, core::ptr::null_mut()).unwrap()
}

#[test]
fn push_then_pop_round_trips() {
    let mut r = vec![0usize; MIN_ENTRIES];
    let mut c = ctx(&mut r);
    let before = c.stack_height();
    c.push(Addr::new(0x2a));
    assert_eq!(c.stack_height(), before + 1);
    assert_eq!(c.pop(), Addr::new(0x2a));
    assert_eq!(c.stack_height(), before);
}

#[test]
fn pop_n_discards_in_bulk() {
    let mut r = vec![0usize; MIN_ENTRIES];
    let mut c = ctx(&mut r);
    let before = c.stack_height();
    c.push(Addr::new(1));
    c.push(Addr::new(2));
    c.push(Addr::new(3));
    c.pop_n(3);
    assert_eq!(c.stack_height(), before);
}

#[test]
fn swap_exchanges_two_slots() {
    let mut r = vec![0usize; MIN_ENTRIES];
    let mut c = ctx(&mut r);
    c.push(Addr::new(1));
    let a = c.slot_addr(c.stack_top);
    c.push(Addr::new(2));
    let b = c.slot_addr(c.stack_top);
    c.swap(a, b);
    assert_eq!(c.pop(), Addr::new(1));
    assert_eq!(c.pop(), Addr::new(2));
}

#[test]
fn lifo_order_is_preserved() {
    let mut r = vec![0usize; MIN_ENTRIES];
    let mut c = ctx(&mut r);
    for i in 0..5 {
        c.push(Addr::new(i));
    }
    for i in (0..5).rev() {
        assert_eq!(c.pop(), Addr::new(i));
    }
}

proptest! {
    #[test]
    fn push_pop_round_trips_any_slot_value(values in prop::collection::vec(0usize..0x1000, 0..8)) {
        let mut r = vec![0usize; MIN_ENTRIES];
        let mut c = ctx(&mut r);
        let height_before = c.stack_height();
        for &v in &values {
            c.push(Addr::new(v));
        }
        let mut popped = Vec::new();
        for _ in &values {
            popped.push(c.pop().as_usize());
        }
        popped.reverse();
        prop_assert_eq!(popped, values);
        prop_assert_eq!(c.stack_height(), height_before);
    }
}
