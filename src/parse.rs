// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating the characters of a
//! [PositionedBuffer](../buffer/struct.PositionedBuffer.html) to a
//! tree of [SExpr](../value/enum.SExpr.html) values. Nesting is
//! handled with an explicit stack of the lists being built, not by
//! recursion, so the depth is only limited by memory (or by
//! `Settings::max_depth`).

use crate::buffer::PositionedBuffer;
use crate::formatted::FormattedError;
use crate::number::{self, Word};
use crate::pos::Pos;
use crate::settings::Settings;
use crate::value::SExpr;
use kstring::KString;
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("invalid integer literal for base {radix}: '{text}'")]
    MalformedInteger { radix: u32, text: KString },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected closing parenthesis")]
    UnexpectedClosingParen,
    #[error("lists nested deeper than {0} levels")]
    NestingTooDeep(u32),
    #[error("invalid escaped character '{0}'")]
    InvalidEscapedChar(char),
}

/// A syntax error, displayed as a location line, the source line and
/// a line with a mark under the offending characters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{formatted}")]
pub struct ParseError {
    kind: ParseErrorKind,
    formatted: FormattedError,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, formatted: FormattedError) -> ParseError {
        ParseError { kind, formatted }
    }

    pub fn kind(&self) -> &ParseErrorKind { &self.kind }
    pub fn message(&self) -> &str { self.formatted.message() }
    pub fn pos(&self) -> Pos { self.formatted.pos() }
    pub fn mark_size(&self) -> usize { self.formatted.mark_size() }
    pub fn file_name(&self) -> Option<&str> { self.formatted.file_name() }
    pub fn formatted(&self) -> &FormattedError { &self.formatted }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Comment,
    Str,
    StrEscape,
}

struct Parser<'s> {
    settings: &'s Settings,
    mode: Mode,
    /// The lists enclosing `current`, outermost first
    parents: Vec<Vec<SExpr>>,
    current: Vec<SExpr>,
    word: String,
    literal: String,
}

impl<'s> Parser<'s> {
    fn new(settings: &'s Settings) -> Parser<'s> {
        Parser {
            settings,
            mode: Mode::Normal,
            parents: Vec::new(),
            current: Vec::new(),
            word: String::new(),
            literal: String::new(),
        }
    }

    // Called with the buffer positioned on the character after the
    // word (the delimiter).
    fn finish_word(&mut self, buf: &PositionedBuffer) -> Result<(), ParseError> {
        if self.word.is_empty() {
            return Ok(())
        }
        let v = match number::classify(&self.word) {
            Word::Integer(n) => SExpr::Integer(n),
            Word::Symbol => SExpr::Symbol(KString::from_ref(&self.word)),
            Word::MalformedInteger { radix } => {
                // Mark the whole word, ending on its last character
                let len = self.word.chars().count();
                let here = buf.pos();
                let pos = Pos { line: here.line, col: here.col.saturating_sub(1) };
                let text = KString::from_ref(&self.word);
                return Err(buf.error_at_pos(
                    ParseErrorKind::MalformedInteger { radix, text }, pos, len))
            }
        };
        self.current.push(v);
        self.word.clear();
        Ok(())
    }

    fn open(&mut self, buf: &PositionedBuffer) -> Result<(), ParseError> {
        if let Some(max) = self.settings.max_depth {
            if self.parents.len() >= max as usize {
                return Err(buf.error_here(ParseErrorKind::NestingTooDeep(max), 1))
            }
        }
        self.parents.push(std::mem::take(&mut self.current));
        trace!(depth = self.parents.len(), "open list");
        Ok(())
    }

    fn close(&mut self, buf: &PositionedBuffer) -> Result<(), ParseError> {
        self.finish_word(buf)?;
        match self.parents.pop() {
            Some(parent) => {
                let done = std::mem::replace(&mut self.current, parent);
                self.current.push(SExpr::List(done));
                trace!(depth = self.parents.len(), "close list");
                Ok(())
            }
            None => Err(buf.error_here(ParseErrorKind::UnexpectedClosingParen, 1))
        }
    }

    fn feed(&mut self, buf: &PositionedBuffer, c: char) -> Result<(), ParseError> {
        match self.mode {
            Mode::Comment => {
                if c == '\n' {
                    self.mode = Mode::Normal;
                }
            }
            Mode::Normal => {
                match c {
                    ';' => {
                        self.finish_word(buf)?;
                        self.mode = Mode::Comment;
                    }
                    '(' => {
                        self.finish_word(buf)?;
                        self.open(buf)?;
                    }
                    ')' => self.close(buf)?,
                    ' ' | '\t' | '\n' => self.finish_word(buf)?,
                    '"' => {
                        self.finish_word(buf)?;
                        self.mode = Mode::Str;
                    }
                    _ => self.word.push(c),
                }
            }
            Mode::Str => {
                match c {
                    '\\' => self.mode = Mode::StrEscape,
                    '"' => {
                        self.current.push(
                            SExpr::StringLiteral(KString::from_ref(&self.literal)));
                        self.literal.clear();
                        self.mode = Mode::Normal;
                    }
                    _ => self.literal.push(c),
                }
            }
            Mode::StrEscape => {
                match c {
                    '"' => self.literal.push('"'),
                    '\\' => self.literal.push('\\'),
                    'n' => self.literal.push('\n'),
                    't' => self.literal.push('\t'),
                    _ => {
                        if self.settings.strict_escapes {
                            return Err(buf.error_here(
                                ParseErrorKind::InvalidEscapedChar(c), 2))
                        }
                        self.literal.push('\\');
                        self.literal.push(c);
                    }
                }
                self.mode = Mode::Str;
            }
        }
        Ok(())
    }

    fn finish(self, buf: &PositionedBuffer) -> Result<SExpr, ParseError> {
        match self.mode {
            Mode::Str | Mode::StrEscape =>
                Err(buf.error_at(ParseErrorKind::UnterminatedString,
                                 Some(-1), Some(-1), 1)),
            _ if ! self.word.is_empty() || ! self.parents.is_empty() =>
                Err(buf.error_at(ParseErrorKind::UnexpectedEof,
                                 Some(-1), Some(-1), 1)),
            _ => Ok(SExpr::List(self.current))
        }
    }
}

/// Consume `buf` completely, returning the top-level list of all
/// items in it.
pub fn parse_buffer(
    buf: &mut PositionedBuffer,
    settings: &Settings,
) -> Result<SExpr, ParseError> {
    let mut parser = Parser::new(settings);
    while let Some(c) = buf.next() {
        parser.feed(buf, c)?;
    }
    parser.finish(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{LENIENT, STRICT};
    use crate::value::{integer, list, string, symbol};
    use pretty_assertions::assert_eq;

    fn parse(s: &str) -> Result<SExpr, ParseError> {
        parse_buffer(&mut PositionedBuffer::from_text(s, None), &LENIENT)
    }

    fn parse_err(s: &str) -> ParseError {
        match parse(s) {
            Ok(v) => panic!("expected error for {:?}, got {}", s, v),
            Err(e) => e,
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse("").unwrap(), list([]));
        assert_eq!(parse(" \n\t; nothing\n").unwrap(), list([]));
    }

    #[test]
    fn nested_lists() {
        assert_eq!(parse("(foo \"bar\" 1 (-2 (x)))\n()\n").unwrap(),
                   list([list([symbol("foo"), string("bar"), integer(1),
                               list([integer(-2), list([symbol("x")])])]),
                         list([])]));
    }

    #[test]
    fn comments_are_elided() {
        assert_eq!(parse("(foo ; comment\n bar)").unwrap(),
                   parse("(foo bar)").unwrap());
        assert_eq!(parse("(foo;comment\nbar)").unwrap(),
                   parse("(foo bar)").unwrap());
    }

    #[test]
    fn escapes() {
        let v = parse(r#"("a\"b\\c\nd\te")"#).unwrap();
        assert_eq!(v, list([list([string("a\"b\\c\nd\te")])]));
        assert_eq!(v.as_list().unwrap()[0].as_list().unwrap()[0]
                   .as_str().unwrap().chars().count(), 9);
    }

    #[test]
    fn unknown_escapes_are_kept() {
        assert_eq!(parse(r#"("\q\0")"#).unwrap(),
                   list([list([string("\\q\\0")])]));
    }

    #[test]
    fn newlines_in_string_literals() {
        assert_eq!(parse("(\"a\nb\")").unwrap(),
                   list([list([string("a\nb")])]));
    }

    #[test]
    fn symbols_are_not_strings() {
        let v = parse("(foo \"foo\")").unwrap();
        let items = v.as_list().unwrap()[0].as_list().unwrap();
        assert_ne!(items[0], items[1]);
    }

    #[test]
    fn delimiters_end_words() {
        assert_eq!(parse("(a\"b\"c(d))").unwrap(),
                   list([list([symbol("a"), string("b"), symbol("c"),
                               list([symbol("d")])])]));
    }

    #[test]
    fn integer_and_symbol_words() {
        assert_eq!(parse("(0 255 -1 0xff -0xff 0o377 0b11111111 - -foo *)").unwrap(),
                   list([list([integer(0), integer(255), integer(-1),
                               integer(255), integer(-255), integer(255),
                               integer(255), symbol("-"), symbol("-foo"),
                               symbol("*")])]));
    }

    #[test]
    fn malformed_integer() {
        let e = parse_err("(seq\n\n    (def 'test-const 0xxff)\n\n)");
        assert_eq!(e.kind(), &ParseErrorKind::MalformedInteger {
            radix: 16, text: KString::from_ref("0xxff") });
        assert_eq!(e.to_string(),
                   "line 3:26: invalid integer literal for base 16: '0xxff'\n    \
                    (def 'test-const 0xxff)\n                     ^^^^^");
    }

    #[test]
    fn malformed_integer_before_whitespace() {
        let e = parse_err("(-0aaa x)");
        assert!(e.message().contains("base 10: '-0aaa'"));
        assert_eq!(e.pos(), Pos { line: 0, col: 5 });
        assert_eq!(e.mark_size(), 5);
        assert_eq!(e.to_string(),
                   "line 1:6: invalid integer literal for base 10: '-0aaa'\n\
                    (-0aaa x)\n ^^^^^");
    }

    #[test]
    fn unterminated_string() {
        let e = parse_err("(foo \"bar)\n");
        assert_eq!(e.kind(), &ParseErrorKind::UnterminatedString);
        assert_eq!(e.to_string(),
                   "line 1:10: unterminated string literal\n(foo \"bar)\n         ^");
        assert_eq!(parse_err("\"abc\\").kind(), &ParseErrorKind::UnterminatedString);
    }

    #[test]
    fn unterminated_list() {
        let e = parse_err("(foo (bar)\n  baz");
        assert_eq!(e.kind(), &ParseErrorKind::UnexpectedEof);
        assert_eq!(e.pos(), Pos { line: 1, col: 4 });
        assert_eq!(parse_err("((").kind(), &ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn trailing_word_without_delimiter() {
        assert_eq!(parse_err("(foo) bar").kind(), &ParseErrorKind::UnexpectedEof);
        assert_eq!(parse("(foo) bar\n").unwrap(),
                   list([list([symbol("foo")]), symbol("bar")]));
    }

    #[test]
    fn excess_closing_paren() {
        let e = parse_err("(foo))");
        assert_eq!(e.kind(), &ParseErrorKind::UnexpectedClosingParen);
        assert_eq!(e.to_string(),
                   "line 1:6: unexpected closing parenthesis\n(foo))\n     ^");
    }

    #[test]
    fn deep_nesting_parses_and_drops() {
        let depth = 1_000_000;
        let s = "(".repeat(depth) + &")".repeat(depth);
        let v = parse(&s).unwrap();
        assert_eq!(v.to_string().len(), 2 * (depth + 1));
        drop(v);
    }

    #[test]
    fn max_depth() {
        let settings = Settings { max_depth: Some(2), ..LENIENT };
        let mut buf = PositionedBuffer::from_text("((x))", None);
        assert!(parse_buffer(&mut buf, &settings).is_ok());
        let mut buf = PositionedBuffer::from_text("(((x)))", None);
        let e = parse_buffer(&mut buf, &settings).unwrap_err();
        assert_eq!(e.kind(), &ParseErrorKind::NestingTooDeep(2));
        assert_eq!(e.pos(), Pos { line: 0, col: 2 });
    }

    #[test]
    fn strict_escapes() {
        let mut buf = PositionedBuffer::from_text("(\"ok\\n\" \"bad\\q\")", None);
        let e = parse_buffer(&mut buf, &STRICT).unwrap_err();
        assert_eq!(e.kind(), &ParseErrorKind::InvalidEscapedChar('q'));
        assert_eq!(e.to_string(),
                   "line 1:14: invalid escaped character 'q'\n\
                    (\"ok\\n\" \"bad\\q\")\n            ^^");
    }
}
