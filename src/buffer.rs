// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The source text together with the position of the character read
//! last. Errors are created here since they need both.

use crate::decode::{self, InputError};
use crate::formatted::FormattedError;
use crate::parse::{ParseError, ParseErrorKind};
use crate::pos::Pos;
use kstring::KString;
use std::io::Read;
use std::sync::Arc;
use tracing::debug;

/// What a `PositionedBuffer` can be made from.
pub enum Source<'r> {
    Text(String),
    Reader(Box<dyn Read + 'r>),
}

impl<'r> Source<'r> {
    pub fn reader(fh: impl Read + 'r) -> Source<'r> {
        Source::Reader(Box::new(fh))
    }
}

impl<'r> From<&str> for Source<'r> {
    fn from(s: &str) -> Source<'r> {
        Source::Text(s.to_string())
    }
}

impl<'r> From<String> for Source<'r> {
    fn from(s: String) -> Source<'r> {
        Source::Text(s)
    }
}

/// Iterating yields the characters of the source. Right after a
/// character was returned, `pos()` is the position *of* that
/// character; the position is only advanced past it when the next
/// character is asked for.
#[derive(Debug)]
pub struct PositionedBuffer {
    source: Arc<str>,
    file_name: Option<KString>,
    index: usize,
    pos: Pos,
    last: Option<char>,
}

impl PositionedBuffer {
    pub fn new(
        source: Source<'_>, file_name: Option<&str>
    ) -> Result<PositionedBuffer, InputError> {
        let text = match source {
            Source::Text(s) => s,
            Source::Reader(fh) => decode::read_to_string(fh)?,
        };
        Ok(PositionedBuffer::from_text(text, file_name))
    }

    pub fn from_text(
        text: impl Into<Arc<str>>, file_name: Option<&str>
    ) -> PositionedBuffer {
        PositionedBuffer {
            source: text.into(),
            file_name: file_name.map(KString::from_ref),
            index: 0,
            pos: Pos::default(),
            last: None,
        }
    }

    pub fn pos(&self) -> Pos { self.pos }
    pub fn line_offset(&self) -> usize { self.pos.line }
    pub fn col_offset(&self) -> usize { self.pos.col }
    pub fn source(&self) -> &str { &self.source }
    pub fn file_name(&self) -> Option<&str> { self.file_name.as_deref() }

    /// An error at the current position.
    pub fn error_here(&self, kind: ParseErrorKind, mark_size: usize) -> ParseError {
        self.error_at_pos(kind, self.pos, mark_size)
    }

    /// An error at the given offsets, or the current ones where
    /// `None`. Negative offsets count from the end of the source resp.
    /// the end of the line.
    pub fn error_at(
        &self,
        kind: ParseErrorKind,
        line_offset: Option<isize>,
        col_offset: Option<isize>,
        mark_size: usize,
    ) -> ParseError {
        let line = line_offset.unwrap_or(self.pos.line as isize);
        let col = col_offset.unwrap_or(self.pos.col as isize);
        let formatted = FormattedError::new(kind.to_string(),
                                            self.source.clone(),
                                            line, col, mark_size,
                                            self.file_name());
        debug!(pos = %formatted.pos(), "{}", kind);
        ParseError::new(kind, formatted)
    }

    pub fn error_at_pos(
        &self, kind: ParseErrorKind, pos: Pos, mark_size: usize
    ) -> ParseError {
        let formatted = FormattedError::at_pos(kind.to_string(),
                                               self.source.clone(),
                                               pos, mark_size,
                                               self.file_name());
        debug!(%pos, "{}", kind);
        ParseError::new(kind, formatted)
    }
}

impl Iterator for PositionedBuffer {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if let Some(c) = self.last.take() {
            self.pos = self.pos.after(c);
        }
        let c = self.source[self.index..].chars().next()?;
        self.index += c.len_utf8();
        self.last = Some(c);
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRING_LITERALS: &str =
        include_str!("../tests/fixtures/string_literals.lll.lisp");

    #[test]
    fn yields_source_characters() {
        let buf = PositionedBuffer::from_text(STRING_LITERALS, None);
        assert_eq!(buf.collect::<String>(), STRING_LITERALS);
    }

    #[test]
    fn tracks_offsets() {
        let mut buf = PositionedBuffer::from_text(STRING_LITERALS, None);
        let mut res = String::new();
        for _ in 0..14 {
            res.extend(buf.next());
        }
        assert_eq!(res, "(foo \"1234\" 1)");
        assert_eq!((buf.line_offset(), buf.col_offset()), (0, 13));

        assert_eq!(buf.next(), Some('\n'));
        assert_eq!((buf.line_offset(), buf.col_offset()), (0, 14));

        assert_eq!(buf.next(), Some('('));
        assert_eq!((buf.line_offset(), buf.col_offset()), (1, 0));

        while let Some(c) = buf.next() {
            res.push(c);
        }
        assert_eq!(buf.pos(), Pos { line: 9, col: 0 });
        assert_eq!(buf.next(), None);
        assert_eq!(buf.pos(), Pos { line: 9, col: 0 });
    }

    #[test]
    fn reads_from_reader() {
        let buf = PositionedBuffer::new(Source::reader("(a\nb)".as_bytes()),
                                        Some("in.lisp")).unwrap();
        assert_eq!(buf.file_name(), Some("in.lisp"));
        assert_eq!(buf.source(), "(a\nb)");
    }

    #[test]
    fn errors_default_to_current_position() {
        let mut buf = PositionedBuffer::from_text("(foo\n  bar)", None);
        for _ in 0..8 {
            buf.next();
        }
        let e = buf.error_at(ParseErrorKind::UnexpectedEof, None, None, 1);
        assert_eq!(e.pos(), Pos { line: 1, col: 2 });
        assert_eq!(e.to_string(),
                   "line 2:3: unexpected end of input\n  bar)\n  ^");
        let e = buf.error_at(ParseErrorKind::UnexpectedEof, Some(-1), Some(-1), 1);
        assert_eq!(e.pos(), Pos { line: 1, col: 5 });
        let e = buf.error_at(ParseErrorKind::UnexpectedEof, Some(0), None, 1);
        assert_eq!(e.pos(), Pos { line: 0, col: 2 });
    }
}
