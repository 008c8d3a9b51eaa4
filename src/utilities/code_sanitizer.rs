//! De-fencing and denylist scanning of generated sketch code.
//!
//! The denylist is plain pattern matching over the text. It does not understand JavaScript, so
//! a match inside a string literal or comment is still rejected, and anything that spells a
//! forbidden call indirectly (string concatenation, bracket access, unicode escapes) gets
//! through. It narrows what reaches the sketch runner; it does not sandbox it.

use std::fmt;
use std::ops::Deref;
use std::sync::OnceLock;

use regex::Regex;

/// Patterns rejected in generated code, paired with the label reported on a match.
const DENYLIST: [(&str, &str); 10] = [
    ("eval(", r"(?-u:\b)eval\s*\("),
    ("Function(", r"(?-u:\b)Function\s*\("),
    ("setTimeout(", r"(?-u:\b)setTimeout\s*\("),
    ("setInterval(", r"(?-u:\b)setInterval\s*\("),
    ("fetch(", r"(?-u:\b)fetch\s*\("),
    ("XMLHttpRequest", r"(?-u:\b)XMLHttpRequest"),
    ("document.", r"(?-u:\b)document\."),
    ("window.", r"(?-u:\b)window\."),
    ("localStorage", r"(?-u:\b)localStorage"),
    ("sessionStorage", r"(?-u:\b)sessionStorage"),
];

/// Code that passed [`sanitize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedCode(String);

impl SanitizedCode {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for SanitizedCode {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for SanitizedCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for SanitizedCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A denylisted pattern found in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsafePattern(pub &'static str);

fn opening_fence() -> &'static Regex {
    static OPENING_FENCE: OnceLock<Regex> = OnceLock::new();
    OPENING_FENCE.get_or_init(|| {
        Regex::new(r"(?i)\A```(?:[a-z0-9_+\-]*[ \t]*\r?\n|(?:javascript|js)\b[ \t]*)?").unwrap()
    })
}

fn closing_fence() -> &'static Regex {
    static CLOSING_FENCE: OnceLock<Regex> = OnceLock::new();
    CLOSING_FENCE.get_or_init(|| Regex::new(r"\r?\n?```\z").unwrap())
}

fn denylist() -> &'static [(&'static str, Regex)] {
    static COMPILED: OnceLock<Vec<(&str, Regex)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        DENYLIST.iter().map(|&(label, pattern)| (label, Regex::new(pattern).unwrap())).collect()
    })
}

/// Strips a markdown code fence at the very start and end of `text` and trims the result.
pub fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let text = opening_fence().find(text).map_or(text, |fence| &text[fence.end()..]);
    let text = closing_fence().find(text).map_or(text, |fence| &text[..fence.start()]);
    text.trim()
}

/// Returns the first denylisted pattern that occurs in `code`.
pub fn find_unsafe_pattern(code: &str) -> Option<UnsafePattern> {
    denylist()
        .iter()
        .find(|(_, pattern)| pattern.is_match(code))
        .map(|&(label, _)| UnsafePattern(label))
}

pub fn sanitize(text: &str) -> Result<SanitizedCode, UnsafePattern> {
    let code = strip_fences(text);

    if let Some(pattern) = find_unsafe_pattern(code) {
        return Err(pattern);
    }

    Ok(SanitizedCode(code.into()))
}
