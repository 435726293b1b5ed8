// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 mcl-core contributors

use super::*;

#[test]
fn basic() {
    let addr = Addr::new(0x1000);
    assert_eq!(addr.as_usize(), 0x1000);
}

#[test]
fn arithmetic() {
    let addr = Addr::new(0x1000);
    assert_eq!(addr.add(0x100).as_usize(), 0x1100);
    assert_eq!(addr.sub(0x100).as_usize(), 0x0F00);
    assert_eq!((addr + 0x100).as_usize(), 0x1100);
    assert_eq!((addr - 0x100).as_usize(), 0x0F00);
}

#[test]
fn alignment() {
    let addr = Addr::new(0x1234);
    assert_eq!(addr.align_up(0x1000).as_usize(), 0x2000);
    assert_eq!(Addr::new(0x2000).align_up(0x1000).as_usize(), 0x2000);
    assert_eq!(Addr::new(0).align_up(8).as_usize(), 0);
}

#[test]
fn diff() {
    let a = Addr::new(0x5000);
    let b = Addr::new(0x3000);
    assert_eq!(a.diff(b), 0x2000);
}

#[test]
fn range() {
    let start = Addr::new(0x100);
    let end = Addr::new(0x200);
    assert!(Addr::new(0x100).in_range(start, end));
    assert!(Addr::new(0x1ff).in_range(start, end));
    assert!(!Addr::new(0x200).in_range(start, end));
    assert!(!Addr::new(0x0ff).in_range(start, end));
}

#[test]
fn debug_format() {
    assert_eq!(format!("{:?}", Addr::new(0x1234)), "Addr(0x1234)");
}
