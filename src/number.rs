// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Deciding whether a bare word is an integer literal or a symbol.

use num::BigInt;

#[derive(Debug, PartialEq)]
pub enum Word {
    Integer(BigInt),
    Symbol,
    /// Looks like a number (starts with a digit, after an optional
    /// '-'), but isn't valid in the base its prefix selects.
    MalformedInteger { radix: u32 },
}

/// Split off a `0x`, `0o` or `0b` prefix.
pub fn radix_and_digits(s: &str) -> (u32, &str) {
    if let Some(rest) = s.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = s.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = s.strip_prefix("0b") {
        (2, rest)
    } else {
        (10, s)
    }
}

// All of s must be digits in radix, and there must be at least one.
fn read_digits(radix: u32, s: &str) -> Option<BigInt> {
    if s.is_empty() {
        return None
    }
    let mut n: BigInt = 0.into();
    for c in s.chars() {
        n = n * radix + c.to_digit(radix)?;
    }
    Some(n)
}

pub fn classify(word: &str) -> Word {
    let (is_neg, unsigned) = match word.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, word),
    };
    if ! unsigned.starts_with(|c: char| c.is_ascii_digit()) {
        return Word::Symbol
    }
    let (radix, digits) = radix_and_digits(unsigned);
    match read_digits(radix, digits) {
        Some(n) => Word::Integer(if is_neg { -n } else { n }),
        None => Word::MalformedInteger { radix },
    }
}
