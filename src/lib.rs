//! jsontree - a JSON document-tree library.
//!
//! An owned, tree-shaped value model together with a text reader and
//! styled writers. The reader parses a relaxed family of JSON dialects,
//! records the byte span of every node, attaches comments to the values
//! they annotate, and reports malformed input as structured diagnostics
//! instead of aborting. The writers render strict JSON by default, with
//! opt-in YAML-compatible colons and dropped null placeholders.
//!
//! # Architecture
//!
//! - [`value`] - the `Value` model: seven JSON types, coercion,
//!   comments, source spans
//! - [`codec`] - string quoting and locale-free number formatting
//! - [`reader`] - dialect-configurable parser with structured errors
//! - [`writer`] - compact and styled serializers
//! - [`builder`] - settings-driven reader/writer construction
//! - [`error`] - logic errors (contract violations)
//!
//! # Example
//!
//! ```
//! use jsontree::{Reader, CompactWriter, Value};
//!
//! let report = Reader::default().parse(b"{ \"name\": \"demo\", \"tags\": [1, 2] }");
//! assert!(report.is_success());
//! assert_eq!(report.root["name"].as_string().unwrap(), "demo");
//!
//! let mut root = report.root;
//! root["tags"].append(Value::from(3i32)).unwrap();
//! assert_eq!(
//!     CompactWriter::new().write(&root),
//!     "{\"name\":\"demo\",\"tags\":[1,2,3]}\n"
//! );
//! ```

// Library code reports contract violations as errors, never by
// unwinding; the documented exception is the `Index`/`IndexMut` sugar.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod builder;
pub mod codec;
pub mod error;
pub mod reader;
pub mod value;
pub mod writer;

// Re-export commonly used types
pub use builder::{ReaderBuilder, WriterBuilder};
pub use error::{LogicError, LogicResult};
pub use reader::{ParseError, ParseErrorKind, ParseReport, Reader, ReaderOptions};
pub use value::{CommentPlacement, ObjectKey, Value, ValueTag};
pub use writer::{
    write_string, CommentStyle, CompactWriter, StreamWriter, StyledStreamWriter, StyledWriter,
};
