// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rendering of error messages together with the source line they
//! refer to and a mark pointing at the offending characters:
//!
//! ```text
//! line 3:26: invalid integer literal for base 16: '0xxff'
//!     (def 'test-const 0xxff)
//!                      ^^^^^
//! ```

use crate::pos::{Pos, resolve_offset};
use kstring::KString;
use std::fmt::{Display, Formatter, Write};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedError {
    message: String,
    source: Arc<str>,
    pos: Pos,
    mark_size: usize,
    file_name: Option<KString>,
}

fn nth_line(source: &str, i: usize) -> &str {
    source.lines().nth(i).unwrap_or("")
}

impl FormattedError {
    /// Negative `line_offset` counts lines from the end of `source`,
    /// negative `col_offset` counts characters from the end of the
    /// (resolved) line.
    pub fn new(
        message: impl Into<String>,
        source: impl Into<Arc<str>>,
        line_offset: isize,
        col_offset: isize,
        mark_size: usize,
        file_name: Option<&str>,
    ) -> FormattedError {
        let source = source.into();
        let line = resolve_offset(line_offset, source.lines().count());
        let col = resolve_offset(col_offset,
                                 nth_line(&source, line).chars().count());
        FormattedError::at_pos(message, source, Pos { line, col },
                               mark_size, file_name)
    }

    pub fn at_pos(
        message: impl Into<String>,
        source: impl Into<Arc<str>>,
        pos: Pos,
        mark_size: usize,
        file_name: Option<&str>,
    ) -> FormattedError {
        FormattedError {
            message: message.into(),
            source: source.into(),
            pos,
            mark_size,
            file_name: file_name.map(KString::from_ref),
        }
    }

    pub fn message(&self) -> &str { &self.message }
    pub fn source_text(&self) -> &str { &self.source }
    pub fn pos(&self) -> Pos { self.pos }
    pub fn mark_size(&self) -> usize { self.mark_size }
    pub fn file_name(&self) -> Option<&str> { self.file_name.as_deref() }

    /// The source line the error is located on, without line ending.
    pub fn source_line(&self) -> &str {
        nth_line(&self.source, self.pos.line)
    }
}

impl Display for FormattedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        if let Some(file_name) = &self.file_name {
            f.write_fmt(format_args!("{}:", file_name))?;
        } else {
            f.write_str("line ")?;
        }
        f.write_fmt(format_args!("{}: {}\n{}\n",
                                 self.pos,
                                 self.message,
                                 self.source_line()))?;
        // The mark reaches back from the column
        let indent = (self.pos.col + 1).saturating_sub(self.mark_size);
        for _ in 0..indent {
            f.write_char(' ')?;
        }
        for _ in 0..self.mark_size {
            f.write_char('^')?;
        }
        Ok(())
    }
}
