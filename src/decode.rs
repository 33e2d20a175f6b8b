// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Get characters from anything implementing `Read`, decoding UTF-8
//! strictly.

use std::io::{self, Read};
use std::path::PathBuf;
use thiserror::Error;
use utf8::{BufReadDecoder, BufReadDecoderError};
use genawaiter::rc::Gen;

/// Failures to obtain the source text. These happen before parsing
/// starts and thus carry no position.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("{path:?}: {err}")]
    File { path: PathBuf, err: io::Error },
    #[error("invalid UTF-8 byte sequence {0:?}")]
    InvalidUtf8(Vec<u8>),
}

pub fn decoded_chars<R>(
    fh: R
) -> impl Iterator<Item=Result<char, InputError>>
    where R: Read
{
    Gen::new(|co| async move {
        let mut inp = BufReadDecoder::new(io::BufReader::new(fh));
        while let Some(r) = inp.next_strict() {
            match r {
                Ok(s) => {
                    for c in s.chars() {
                        co.yield_(Ok(c)).await;
                    }
                }
                Err(BufReadDecoderError::InvalidByteSequence(bytes)) => {
                    let bytes = bytes.to_vec();
                    co.yield_(Err(InputError::InvalidUtf8(bytes))).await;
                    return;
                }
                Err(BufReadDecoderError::Io(e)) => {
                    co.yield_(Err(InputError::Io(e))).await;
                    return;
                }
            }
        }
    }).into_iter()
}

/// Read all of `fh` into a string.
pub fn read_to_string(fh: impl Read) -> Result<String, InputError> {
    decoded_chars(fh).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_multibyte_characters() {
        let s = read_to_string("(λ \"ü\")".as_bytes()).unwrap();
        assert_eq!(s, "(λ \"ü\")");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let bytes: &[u8] = b"(foo \xff)";
        match read_to_string(bytes) {
            Err(InputError::InvalidUtf8(b)) => assert_eq!(b, vec![0xff]),
            r => panic!("expected invalid UTF-8 error, got {:?}", r),
        }
    }
}
