// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Both line and col are zero based; diagnostics show them 1-based.

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl Pos {
    /// The position of the character following `c` if `c` is at
    /// `self`.
    pub fn after(self, c: char) -> Pos {
        if c == '\n' {
            Pos { line: self.line + 1, col: 0 }
        } else {
            Pos { line: self.line, col: self.col + 1 }
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("{}:{}", self.line + 1, self.col + 1))
    }
}

/// Turn an offset that may count from the end (negative) into an
/// absolute one: `-1` is the last of `length` items. Offsets reaching
/// before the start are clamped to 0.
pub fn resolve_offset(offset: isize, length: usize) -> usize {
    if offset < 0 {
        length.saturating_sub(offset.unsigned_abs())
    } else {
        offset as usize
    }
}
