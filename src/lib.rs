// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This is an S-Expression parser for a small Lisp-like syntax:
//! parenthesized lists, symbols, integers (decimal, and `0x`, `0o`,
//! `0b` prefixed, optionally negative), string literals with `\"`,
//! `\\`, `\n` and `\t` escapes, and `;` line comments.
//!
//! * `locsexpr::parse` (or `parse_str`, `parse_file`) builds an
//!   in-memory tree of [SExpr](value::SExpr) values, always wrapped in
//!   a top-level list.
//!
//! * Syntax errors are reported with their precise location, showing
//!   the offending source line and marking the characters concerned:
//!
//! ```text
//! foo.lll:3:26: invalid integer literal for base 16: '0xxff'
//!     (def 'test-const 0xxff)
//!                      ^^^^^
//! ```
//!
//! * Nesting is handled without recursion, so deeply nested input
//!   can't overflow the stack while parsing.
//!
//! The parser only builds the tree; it does not resolve or evaluate
//! anything.

pub mod buffer;
pub mod decode;
pub mod formatted;
pub mod number;
pub mod parse;
pub mod pos;
pub mod read;
pub mod settings;
pub mod value;

pub use read::{parse, parse_str, parse_with_settings, parse_file, Error};
pub use parse::{ParseError, ParseErrorKind};
pub use value::SExpr;
