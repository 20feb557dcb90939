//! JSON text reader.
//!
//! Parses a byte range into a [`Value`](crate::value::Value) tree,
//! recording the source byte span of every node and attaching comments to
//! the values they annotate. The grammar is relaxed JSON; a
//! [`ReaderOptions`] policy selects the dialect (comments, single quotes,
//! dropped null placeholders, numeric keys, trailing commas, special
//! float literals) and tightenings (strict root, duplicate-key
//! rejection, extra-input rejection, nesting limit).
//!
//! Malformed input never aborts: errors accumulate as structured
//! [`ParseError`] records with byte spans, and the report may still carry
//! a partial tree for diagnostics.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::value::Value;

mod parser;

/// Dialect policy for the reader.
///
/// The presets mirror the two ends of the dialect family: [`all`] accepts
/// every relaxation, [`strict`] is RFC 8259 plus the tightenings.
///
/// [`all`]: ReaderOptions::all
/// [`strict`]: ReaderOptions::strict
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Accept `//` and `/* */` comments as whitespace.
    pub allow_comments: bool,
    /// Attach parsed comments to values; when `false` comments are
    /// skipped and lost.
    pub collect_comments: bool,
    /// Require the document root to be an array or an object.
    pub strict_root: bool,
    /// Materialize empty slots between commas (and `"k":,` members) as
    /// `null`.
    pub allow_dropped_null_placeholders: bool,
    /// Accept bare unsigned integers as object keys.
    pub allow_numeric_keys: bool,
    /// Accept `'…'` strings with the same escape rules as `"…"`.
    pub allow_single_quotes: bool,
    /// Accept a trailing comma before `]` or `}`. Ignored for arrays when
    /// dropped null placeholders are enabled (the comma then denotes a
    /// dropped slot).
    pub allow_trailing_commas: bool,
    /// Maximum container nesting depth.
    pub stack_limit: usize,
    /// Report non-whitespace content after the root value.
    pub fail_if_extra: bool,
    /// Report duplicate object keys instead of replacing.
    pub reject_dup_keys: bool,
    /// Accept `NaN`, `Infinity`, and `-Infinity` as real literals.
    pub allow_special_floats: bool,
}

impl ReaderOptions {
    /// Every relaxation enabled, no tightenings.
    pub fn all() -> Self {
        ReaderOptions {
            allow_comments: true,
            collect_comments: true,
            strict_root: false,
            allow_dropped_null_placeholders: false,
            allow_numeric_keys: false,
            allow_single_quotes: false,
            allow_trailing_commas: false,
            stack_limit: 1000,
            fail_if_extra: false,
            reject_dup_keys: false,
            allow_special_floats: false,
        }
    }

    /// Strictly conforming JSON: no relaxations, array-or-object root,
    /// duplicate keys and trailing content rejected.
    pub fn strict() -> Self {
        ReaderOptions {
            allow_comments: false,
            collect_comments: false,
            strict_root: true,
            allow_dropped_null_placeholders: false,
            allow_numeric_keys: false,
            allow_single_quotes: false,
            allow_trailing_commas: false,
            stack_limit: 1000,
            fail_if_extra: true,
            reject_dup_keys: true,
            allow_special_floats: false,
        }
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions::all()
    }
}

/// Kinds of data errors the reader reports.
///
/// The `Display` text of a kind is the diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// No value could be recognized at this position.
    #[error("Syntax error: value, object or array expected.")]
    SyntaxError,
    /// `strict_root` was set and the root is a scalar.
    #[error("A valid JSON document must be either an array or an object value.")]
    InvalidRoot,
    /// A backslash sequence other than the recognized escapes.
    #[error("Bad escape sequence in string")]
    BadEscape,
    /// A malformed `\uXXXX` sequence or an unpaired surrogate.
    #[error("Bad unicode escape sequence in string: {0}.")]
    BadUnicodeEscape(&'static str),
    /// The number fits neither the integer types nor a finite `f64`.
    #[error("'{0}' is not a number.")]
    NumberOutOfRange(String),
    /// `reject_dup_keys` was set and an object repeated a key.
    #[error("Duplicate key: '{0}'")]
    DuplicateKey(String),
    /// Container nesting exceeded `stack_limit`.
    #[error("Exceeded maximum nesting depth.")]
    StackOverflow,
    /// `fail_if_extra` was set and content followed the root value.
    #[error("Extra non-whitespace after JSON value.")]
    ExtraInput,
    /// A container member was not followed by a separator or closer.
    #[error("Missing ',' or '{closer}' in {context} declaration")]
    MissingComma {
        /// `"array"` or `"object"`.
        context: &'static str,
        /// `']'` or `'}'`.
        closer: char,
    },
    /// An object member name was not followed by `:`.
    #[error("Missing ':' after object member name")]
    MissingColon,
    /// An object wanted a member name and found something else.
    #[error("Missing '}}' or object member name")]
    MissingMemberName,
    /// A string literal ran into the end of input.
    #[error("Unterminated string")]
    UnterminatedString,
    /// A `/* */` comment ran into the end of input.
    #[error("Unterminated comment")]
    UnterminatedComment,
}

/// A structured data error: what went wrong and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong; `Display` renders the message.
    pub kind: ParseErrorKind,
    /// Byte offset of the first byte of the offending token.
    pub offset_start: usize,
    /// Byte offset one past the offending token.
    pub offset_limit: usize,
    /// Optional byte offset of a narrower detail position, e.g. the
    /// offending backslash inside a string literal.
    pub detail: Option<usize>,
}

impl ParseError {
    /// The diagnostic message.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Human-readable rendering with 1-based line and column, computed by
    /// scanning `doc` up to the error offset.
    pub fn format(&self, doc: &[u8]) -> String {
        let (line, column) = line_and_column(doc, self.offset_start);
        let mut out = format!("* Line {line}, Column {column}\n  {}\n", self.kind);
        if let Some(detail) = self.detail {
            let (line, column) = line_and_column(doc, detail);
            out.push_str(&format!("See Line {line}, Column {column} for detail.\n"));
        }
        out
    }
}

/// 1-based line/column of a byte offset, counting `\n` (and `\r`,
/// `\r\n`) as line breaks.
pub fn line_and_column(doc: &[u8], offset: usize) -> (usize, usize) {
    let offset = offset.min(doc.len());
    let mut line = 1;
    let mut line_start = 0;
    let mut i = 0;
    while i < offset {
        match doc[i] {
            b'\r' => {
                if doc.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                line += 1;
                line_start = i + 1;
            }
            b'\n' => {
                line += 1;
                line_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    (line, offset - line_start + 1)
}

/// Outcome of a parse: the root (possibly partial on failure) and every
/// error recorded.
#[derive(Debug)]
pub struct ParseReport {
    /// The parsed tree. When errors are present this is best-effort and
    /// should be treated as diagnostic only.
    pub root: Value,
    /// Structured errors, empty on success.
    pub errors: Vec<ParseError>,
}

impl ParseReport {
    /// `true` when no errors were recorded.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// The root on success, the error list otherwise.
    pub fn into_result(self) -> Result<Value, ParseFailure> {
        if self.errors.is_empty() {
            Ok(self.root)
        } else {
            Err(ParseFailure {
                errors: self.errors,
            })
        }
    }

    /// Concatenated [`ParseError::format`] renderings.
    pub fn formatted_messages(&self, doc: &[u8]) -> String {
        let mut out = String::new();
        for error in &self.errors {
            out.push_str(&error.format(doc));
        }
        out
    }
}

/// A failed parse, carrying the recorded errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Structured errors, never empty.
    pub errors: Vec<ParseError>,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error.kind)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseFailure {}

/// Text-to-tree reader for one dialect policy.
#[derive(Debug, Clone, Default)]
pub struct Reader {
    options: ReaderOptions,
}

impl Reader {
    /// Reader with the given dialect policy.
    pub fn new(options: ReaderOptions) -> Self {
        Reader { options }
    }

    /// The policy this reader parses with.
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Parse `doc` into a tree. Errors accumulate in the report rather
    /// than aborting; the report's root may be partial when errors are
    /// present.
    pub fn parse(&self, doc: &[u8]) -> ParseReport {
        parser::Parser::new(doc, &self.options).parse_document()
    }
}

impl FromStr for Value {
    type Err = ParseFailure;

    /// Parse with the default (all-relaxations) dialect.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reader::default().parse(s.as_bytes()).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_and_column() {
        let doc = b"ab\ncd\r\nef";
        assert_eq!(line_and_column(doc, 0), (1, 1));
        assert_eq!(line_and_column(doc, 4), (2, 2));
        assert_eq!(line_and_column(doc, 7), (3, 1));
    }

    #[test]
    fn test_error_format() {
        let doc = b"{ \"a\" :: 1 }";
        let report = Reader::default().parse(doc);
        assert!(!report.is_success());
        let rendered = report.formatted_messages(doc);
        assert!(rendered.starts_with("* Line 1, Column 8\n"));
        assert!(rendered.contains("Syntax error: value, object or array expected."));
    }

    #[test]
    fn test_from_str() {
        let value: Value = "[1, 2]".parse().unwrap();
        assert_eq!(value.size(), 2);
        let failed = "{".parse::<Value>();
        assert!(failed.is_err());
    }

    #[test]
    fn test_strict_preset_rejects_relaxations() {
        let reader = Reader::new(ReaderOptions::strict());
        assert!(!reader.parse(b"// comment\n[]").is_success());
        assert!(!reader.parse(b"1").is_success(), "scalar root");
        assert!(!reader.parse(b"[] []").is_success(), "extra input");
        assert!(reader.parse(b"[1, 2]").is_success());
    }
}
