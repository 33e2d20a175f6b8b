// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for parsing.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Maximum number of nested open lists (not counting the implicit
    /// top-level list); `None` means unlimited.
    pub max_depth: Option<u32>,
    /// Reject escape sequences in string literals other than `\"`,
    /// `\\`, `\n` and `\t`, instead of keeping them as they are.
    pub strict_escapes: bool,
}

pub const LENIENT: Settings = Settings {
    max_depth: None,
    strict_escapes: false,
};

pub const STRICT: Settings = Settings {
    max_depth: Some(500),
    strict_escapes: true,
};

impl Default for Settings {
    fn default() -> Settings {
        LENIENT
    }
}
