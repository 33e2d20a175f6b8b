// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The in-memory tree produced by the parser. Symbols and string
//! literals both carry text, but are never equal to each other: `foo`
//! and `"foo"` are different values.

use kstring::KString;
use num::BigInt;
use std::fmt::Write;

/// Dropping, `Display` and `pretty()` work without recursion, so trees
/// of any depth the parser produced can be freed and printed. The
/// derived `Clone`, `PartialEq`, `Hash` and `Debug` do recurse once
/// per nesting level; with the default thread stack they are fine for
/// some thousands of levels, not for millions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SExpr {
    Integer(BigInt),
    StringLiteral(KString),
    Symbol(KString),
    List(Vec<SExpr>),
}

impl Drop for SExpr {
    fn drop(&mut self) {
        if let SExpr::List(items) = self {
            if items.iter().all(SExpr::is_atom) {
                return
            }
            // Empty out nested lists before their parents are freed
            let mut todo = vec![std::mem::take(items)];
            while let Some(mut items) = todo.pop() {
                for item in items.iter_mut() {
                    if let SExpr::List(inner) = item {
                        if ! inner.is_empty() {
                            todo.push(std::mem::take(inner));
                        }
                    }
                }
            }
        }
    }
}

enum Step<'t> {
    Item(&'t SExpr, usize),
    Break(usize),
    Space,
    Close,
}

impl SExpr {
    pub fn is_atom(&self) -> bool {
        ! matches!(self, SExpr::List(_))
    }

    pub fn as_list(&self) -> Option<&[SExpr]> {
        match self {
            SExpr::List(v) => Some(v),
            _ => None
        }
    }

    pub fn into_list(mut self) -> Option<Vec<SExpr>> {
        match &mut self {
            SExpr::List(v) => Some(std::mem::take(v)),
            _ => None
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            SExpr::Symbol(s) => Some(s),
            _ => None
        }
    }

    /// The text of a string literal (not of a symbol).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SExpr::StringLiteral(s) => Some(s),
            _ => None
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            SExpr::Integer(n) => Some(n),
            _ => None
        }
    }

    /// Multi-line rendering: lists containing only atoms go on one
    /// line, others put each item after the first on its own line,
    /// indented to the column after the opening paren.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        let mut todo = vec![Step::Item(self, 0)];
        while let Some(step) = todo.pop() {
            match step {
                Step::Item(SExpr::List(items), indent)
                    if items.iter().any(|v| ! v.is_atom()) =>
                {
                    out.push('(');
                    todo.push(Step::Close);
                    for (i, item) in items.iter().enumerate().rev() {
                        todo.push(Step::Item(item, indent + 1));
                        if i > 0 {
                            todo.push(Step::Break(indent + 1));
                        }
                    }
                }
                Step::Item(v, _) => {
                    // Writing to a String can't fail
                    let _ = write!(out, "{}", v);
                }
                Step::Break(indent) => {
                    out.push('\n');
                    out.extend(std::iter::repeat(' ').take(indent));
                }
                Step::Space => out.push(' '),
                Step::Close => out.push(')'),
            }
        }
        out
    }
}

fn fmt_string_literal(f: &mut std::fmt::Formatter<'_>, s: &str)
                      -> Result<(), std::fmt::Error> {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            _ => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl std::fmt::Display for SExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        let mut todo = vec![Step::Item(self, 0)];
        while let Some(step) = todo.pop() {
            match step {
                Step::Item(v, _) => match v {
                    SExpr::Integer(n) => f.write_fmt(format_args!("{}", n))?,
                    SExpr::StringLiteral(s) => fmt_string_literal(f, s)?,
                    SExpr::Symbol(s) => f.write_str(s)?,
                    SExpr::List(items) => {
                        f.write_char('(')?;
                        todo.push(Step::Close);
                        for (i, item) in items.iter().enumerate().rev() {
                            todo.push(Step::Item(item, 0));
                            if i > 0 {
                                todo.push(Step::Space);
                            }
                        }
                    }
                },
                Step::Break(_) => f.write_char('\n')?,
                Step::Space => f.write_char(' ')?,
                Step::Close => f.write_char(')')?,
            }
        }
        Ok(())
    }
}

/// Easily create a symbol
pub fn symbol(s: &str) -> SExpr {
    SExpr::Symbol(KString::from_ref(s))
}

/// Easily create a string literal
pub fn string(s: &str) -> SExpr {
    SExpr::StringLiteral(KString::from_ref(s))
}

pub fn integer(n: impl Into<BigInt>) -> SExpr {
    SExpr::Integer(n.into())
}

pub fn list(items: impl IntoIterator<Item = SExpr>) -> SExpr {
    SExpr::List(items.into_iter().collect())
}
