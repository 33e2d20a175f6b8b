// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Entry points: from text, readers or files to a tree.

use crate::buffer::{PositionedBuffer, Source};
use crate::decode::InputError;
use crate::parse::{ParseError, parse_buffer};
use crate::settings::{Settings, LENIENT};
use crate::value::SExpr;
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Input(#[from] InputError),
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Parse all of `text`; the result is always an `SExpr::List`.
pub fn parse_str(
    text: &str,
    file_name: Option<&str>,
) -> Result<SExpr, ParseError> {
    let mut buf = PositionedBuffer::from_text(text, file_name);
    parse_with_buffer(&mut buf, &LENIENT)
}

/// Parse a string or everything from a reader; the result is always
/// an `SExpr::List`.
pub fn parse<'r>(
    source: impl Into<Source<'r>>,
    file_name: Option<&str>,
) -> Result<SExpr, Error> {
    parse_with_settings(source, file_name, &LENIENT)
}

pub fn parse_with_settings<'r>(
    source: impl Into<Source<'r>>,
    file_name: Option<&str>,
    settings: &Settings,
) -> Result<SExpr, Error> {
    let mut buf = PositionedBuffer::new(source.into(), file_name)?;
    Ok(parse_with_buffer(&mut buf, settings)?)
}

/// Parse the file at `path`, which also serves as the file name in
/// error messages.
pub fn parse_file(path: &Path) -> Result<SExpr, Error> {
    let fh = File::open(path).map_err(
        |err| InputError::File { path: path.to_path_buf(), err })?;
    let file_name = path.to_string_lossy();
    parse_with_settings(Source::reader(fh), Some(&*file_name), &LENIENT)
}

fn parse_with_buffer(
    buf: &mut PositionedBuffer,
    settings: &Settings,
) -> Result<SExpr, ParseError> {
    debug!(file = ?buf.file_name(), len = buf.source().len(), "parsing");
    let v = parse_buffer(buf, settings)?;
    debug!(file = ?buf.file_name(),
           items = v.as_list().map_or(0, |l| l.len()),
           "parsed");
    Ok(v)
}
