// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Denylist cleanup for free-text form input.
//!
//! Strips angle brackets, `javascript:` and inline event handler prefixes
//! (`onclick=`, `onerror=`, ...). This is not an HTML parser and crafted
//! encodings can get past it.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ANGLE_BRACKETS: Regex = Regex::new(r"[<>]").unwrap();
    static ref SCRIPT_SCHEME: Regex = Regex::new(r"(?i-u)javascript:").unwrap();
    static ref EVENT_HANDLER: Regex = Regex::new(r"(?i-u)on\w+=").unwrap();
}

/// Remove markup-like fragments from `input` and trim surrounding whitespace.
pub fn sanitize(input: &str) -> String {
    let text = ANGLE_BRACKETS.replace_all(input, "");
    let text = SCRIPT_SCHEME.replace_all(&text, "");
    let text = EVENT_HANDLER.replace_all(&text, "");
    text.trim().to_string()
}
