//! JSON writers.
//!
//! Two shapes: [`CompactWriter`] emits a single line with no whitespace,
//! and [`StreamWriter`] (built by
//! [`WriterBuilder`](crate::builder::WriterBuilder)) pretty-prints with
//! comments. The legacy [`StyledWriter`] and [`StyledStreamWriter`] are
//! thin wrappers that pin the historical indentation and colon choices
//! onto the same core.
//!
//! The styled core decides per array whether to render inline or one
//! element per line: an array stays inline only when it has no non-empty
//! container children, no commented children, and its projected rendering
//! fits the right margin.

use std::fmt;
use std::io::{self, Write};

use crate::builder::WriterBuilder;
use crate::codec;
use crate::error::LogicResult;
use crate::value::{CommentPlacement, Value, ValueData};

/// Right margin for inline array rendering.
const RIGHT_MARGIN: usize = 74;

/// Keys always serialize quoted; numeric-dialect keys as their decimal
/// rendering.
fn quote_key(key: &crate::value::ObjectKey) -> Vec<u8> {
    match key.as_bytes() {
        Some(bytes) => codec::quote_bytes(bytes),
        None => codec::quote_bytes(key.display_name().as_bytes()),
    }
}

/// Whether styled writers emit attached comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// Drop all comments.
    None,
    /// Keep all comments.
    All,
}

// ----------------------------------------------------------------------
// Compact writer
// ----------------------------------------------------------------------

/// Single-line writer with no whitespace.
#[derive(Debug, Clone, Default)]
pub struct CompactWriter {
    yaml_compatibility: bool,
    drop_null_placeholders: bool,
    omit_ending_line_feed: bool,
}

impl CompactWriter {
    /// Writer with strict-JSON output.
    pub fn new() -> Self {
        CompactWriter::default()
    }

    /// Emit `": "` instead of `":"` so the output is also valid YAML.
    pub fn enable_yaml_compatibility(&mut self) {
        self.yaml_compatibility = true;
    }

    /// Omit `null` payloads: object members with a `null` value are
    /// skipped entirely, array slots are left empty between commas. The
    /// array form is not standard JSON; it round-trips through a reader
    /// with dropped null placeholders enabled.
    pub fn drop_null_placeholders(&mut self) {
        self.drop_null_placeholders = true;
    }

    /// Skip the terminating line feed.
    pub fn omit_ending_line_feed(&mut self) {
        self.omit_ending_line_feed = true;
    }

    /// Serialize to a single line. Non-UTF-8 string payloads render
    /// lossily; use a styled stream writer for byte-exact output.
    pub fn write(&self, root: &Value) -> String {
        let mut out = Vec::new();
        self.write_value(root, &mut out);
        if !self.omit_ending_line_feed {
            out.push(b'\n');
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    fn write_value(&self, value: &Value, out: &mut Vec<u8>) {
        match value.data() {
            ValueData::Null => {
                if !self.drop_null_placeholders {
                    out.extend_from_slice(b"null");
                }
            }
            ValueData::Int(i) => out.extend_from_slice(codec::format_int(*i).as_bytes()),
            ValueData::Uint(u) => out.extend_from_slice(codec::format_uint(*u).as_bytes()),
            ValueData::Real(r) => out.extend_from_slice(codec::format_double(*r).as_bytes()),
            ValueData::Bool(b) => out.extend_from_slice(if *b { &b"true"[..] } else { &b"false"[..] }),
            ValueData::String(s) => out.extend_from_slice(&codec::quote_bytes(s.as_bytes())),
            ValueData::Array(items) => {
                out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(b',');
                    }
                    self.write_value(item, out);
                }
                out.push(b']');
            }
            ValueData::Object(members) => {
                out.push(b'{');
                let mut first = true;
                for (key, member) in members {
                    if self.drop_null_placeholders && member.is_null() {
                        continue;
                    }
                    if !first {
                        out.push(b',');
                    }
                    first = false;
                    out.extend_from_slice(&quote_key(key));
                    out.extend_from_slice(if self.yaml_compatibility {
                        &b": "[..]
                    } else {
                        &b":"[..]
                    });
                    self.write_value(member, out);
                }
                out.push(b'}');
            }
        }
    }
}

// ----------------------------------------------------------------------
// Styled writer core
// ----------------------------------------------------------------------

/// Styled writer: indented, comment-preserving, sink-based.
///
/// Built by [`WriterBuilder::new_writer`]; the builder snapshots the
/// indentation, comment style, colon symbol, and null symbol.
#[derive(Debug, Clone)]
pub struct StreamWriter {
    indentation: String,
    comment_style: CommentStyle,
    colon: String,
    null_symbol: String,
    ending_line_feed: String,
}

impl StreamWriter {
    pub(crate) fn with_settings(
        indentation: String,
        comment_style: CommentStyle,
        colon: String,
        null_symbol: String,
        ending_line_feed: String,
    ) -> Self {
        StreamWriter {
            indentation,
            comment_style,
            colon,
            null_symbol,
            ending_line_feed,
        }
    }

    /// Serialize `root` into `sink`. Fails only when the sink fails.
    pub fn write(&self, root: &Value, sink: &mut dyn Write) -> io::Result<()> {
        let mut printer = StyledPrinter {
            cfg: self,
            out: sink,
            indent_str: String::new(),
            indented: true,
        };
        printer.write_comment_before(root)?;
        if !printer.indented {
            printer.write_indent()?;
        }
        printer.indented = true;
        printer.write_value(root)?;
        printer.write_comment_after(root)?;
        printer.out.write_all(self.ending_line_feed.as_bytes())
    }

    /// Serialize to a string (lossy for non-UTF-8 string payloads).
    pub fn write_to_string(&self, root: &Value) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write(root, &mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

struct StyledPrinter<'a> {
    cfg: &'a StreamWriter,
    out: &'a mut dyn Write,
    indent_str: String,
    indented: bool,
}

impl StyledPrinter<'_> {
    fn write_value(&mut self, value: &Value) -> io::Result<()> {
        match value.data() {
            ValueData::Array(_) => self.write_array(value),
            ValueData::Object(members) => {
                if members.is_empty() {
                    return self.push(b"{}");
                }
                self.write_with_indent(b"{")?;
                self.indent();
                let last = members.len() - 1;
                for (i, (key, member)) in members.iter().enumerate() {
                    self.write_comment_before(member)?;
                    let quoted = quote_key(key);
                    self.write_with_indent(&quoted)?;
                    self.out.write_all(self.cfg.colon.as_bytes())?;
                    self.write_value(member)?;
                    // Attached comments precede the separating comma.
                    self.write_comment_after(member)?;
                    if i != last {
                        self.out.write_all(b",")?;
                    }
                }
                self.unindent();
                self.write_with_indent(b"}")
            }
            _ => {
                let repr = self.scalar_repr(value);
                self.push(&repr)
            }
        }
    }

    fn write_array(&mut self, value: &Value) -> io::Result<()> {
        let items = value.array_slice().unwrap_or(&[]);
        if items.is_empty() {
            return self.push(b"[]");
        }
        let (multiline, reprs) = self.layout_array(items);
        if multiline {
            self.write_with_indent(b"[")?;
            self.indent();
            let last = items.len() - 1;
            for (i, item) in items.iter().enumerate() {
                self.write_comment_before(item)?;
                if let Some(repr) = reprs.get(i) {
                    self.write_with_indent(repr)?;
                } else {
                    if !self.indented {
                        self.write_indent()?;
                    }
                    self.indented = true;
                    self.write_value(item)?;
                    self.indented = false;
                }
                // Attached comments precede the separating comma.
                self.write_comment_after(item)?;
                if i != last {
                    self.out.write_all(b",")?;
                }
            }
            self.unindent();
            self.write_with_indent(b"]")
        } else {
            let pad: &[u8] = if self.cfg.indentation.is_empty() {
                b""
            } else {
                b" "
            };
            self.out.write_all(b"[")?;
            self.out.write_all(pad)?;
            for (i, repr) in reprs.iter().enumerate() {
                if i > 0 {
                    self.out.write_all(b", ")?;
                }
                self.out.write_all(repr)?;
            }
            self.out.write_all(pad)?;
            self.out.write_all(b"]")?;
            self.indented = false;
            Ok(())
        }
    }

    /// Decide inline vs. one-per-line. When the array qualifies for the
    /// inline check, the returned vector holds each child's rendering;
    /// an early multi-line verdict leaves it empty and children render
    /// recursively.
    fn layout_array(&self, items: &[Value]) -> (bool, Vec<Vec<u8>>) {
        let mut multiline = items.len() * 3 >= RIGHT_MARGIN;
        if !multiline {
            multiline = items
                .iter()
                .any(|item| (item.is_array() || item.is_object()) && item.size() > 0);
        }
        let mut reprs = Vec::new();
        if !multiline {
            reprs.reserve(items.len());
            let mut line_length = 4 + (items.len() - 1) * 2;
            for item in items {
                if item.has_any_comment() {
                    multiline = true;
                }
                let repr = self.scalar_repr(item);
                line_length += repr.len();
                reprs.push(repr);
            }
            multiline = multiline || line_length >= RIGHT_MARGIN;
        }
        (multiline, reprs)
    }

    /// Rendering of a value with no children; only scalars and empty
    /// containers reach this.
    fn scalar_repr(&self, value: &Value) -> Vec<u8> {
        match value.data() {
            ValueData::Null => self.cfg.null_symbol.as_bytes().to_vec(),
            ValueData::Int(i) => codec::format_int(*i).into_bytes(),
            ValueData::Uint(u) => codec::format_uint(*u).into_bytes(),
            ValueData::Real(r) => codec::format_double(*r).into_bytes(),
            ValueData::Bool(b) => if *b { &b"true"[..] } else { &b"false"[..] }.to_vec(),
            ValueData::String(s) => codec::quote_bytes(s.as_bytes()),
            ValueData::Array(_) => b"[]".to_vec(),
            ValueData::Object(_) => b"{}".to_vec(),
        }
    }

    fn push(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)
    }

    fn write_indent(&mut self) -> io::Result<()> {
        // Empty indentation collapses all layout whitespace, newlines
        // included.
        if !self.cfg.indentation.is_empty() {
            self.out.write_all(b"\n")?;
            self.out.write_all(self.indent_str.as_bytes())?;
        }
        Ok(())
    }

    fn write_with_indent(&mut self, bytes: &[u8]) -> io::Result<()> {
        if !self.indented {
            self.write_indent()?;
        }
        self.out.write_all(bytes)?;
        self.indented = false;
        Ok(())
    }

    fn indent(&mut self) {
        self.indent_str.push_str(&self.cfg.indentation);
    }

    fn unindent(&mut self) {
        let new_len = self.indent_str.len() - self.cfg.indentation.len();
        self.indent_str.truncate(new_len);
    }

    fn write_comment_before(&mut self, value: &Value) -> io::Result<()> {
        if self.cfg.comment_style == CommentStyle::None {
            return Ok(());
        }
        let Some(text) = value.comment(CommentPlacement::Before) else {
            return Ok(());
        };
        if !self.indented {
            self.write_indent()?;
        }
        let bytes = text.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            self.out.write_all(&[b])?;
            // A following `//` line keeps the current indentation.
            if b == b'\n' && bytes.get(i + 1) == Some(&b'/') {
                self.out.write_all(self.indent_str.as_bytes())?;
            }
        }
        self.indented = false;
        Ok(())
    }

    fn write_comment_after(&mut self, value: &Value) -> io::Result<()> {
        if self.cfg.comment_style == CommentStyle::None {
            return Ok(());
        }
        if let Some(text) = value.comment(CommentPlacement::AfterOnSameLine) {
            self.out.write_all(b" ")?;
            self.out.write_all(text.as_bytes())?;
        }
        if let Some(text) = value.comment(CommentPlacement::After) {
            self.write_indent()?;
            self.out.write_all(text.as_bytes())?;
            self.indented = false;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------
// Legacy shapes
// ----------------------------------------------------------------------

/// Legacy pretty-printer returning a string: three-space indentation and
/// a terminating newline.
#[derive(Debug, Clone)]
pub struct StyledWriter {
    core: StreamWriter,
}

impl StyledWriter {
    /// Writer with the historical layout defaults.
    pub fn new() -> Self {
        StyledWriter {
            core: StreamWriter::with_settings(
                "   ".to_string(),
                CommentStyle::All,
                " : ".to_string(),
                "null".to_string(),
                "\n".to_string(),
            ),
        }
    }

    /// Serialize to an indented string.
    pub fn write(&self, root: &Value) -> String {
        self.core.write_to_string(root)
    }
}

impl Default for StyledWriter {
    fn default() -> Self {
        StyledWriter::new()
    }
}

/// Legacy pretty-printer writing to a sink, with configurable
/// indentation.
#[derive(Debug, Clone)]
pub struct StyledStreamWriter {
    core: StreamWriter,
}

impl StyledStreamWriter {
    /// Writer indenting with the given string.
    pub fn new(indentation: impl Into<String>) -> Self {
        StyledStreamWriter {
            core: StreamWriter::with_settings(
                indentation.into(),
                CommentStyle::All,
                " : ".to_string(),
                "null".to_string(),
                "\n".to_string(),
            ),
        }
    }

    /// Serialize `root` into `sink`.
    pub fn write(&self, root: &Value, sink: &mut dyn Write) -> io::Result<()> {
        self.core.write(root, sink)
    }
}

impl Default for StyledStreamWriter {
    /// Tab indentation.
    fn default() -> Self {
        StyledStreamWriter::new("\t")
    }
}

/// Serialize with a configured builder into a string (lossy for
/// non-UTF-8 string payloads).
pub fn write_string(builder: &WriterBuilder, root: &Value) -> LogicResult<String> {
    let writer = builder.new_writer()?;
    Ok(writer.write_to_string(root))
}

impl fmt::Display for Value {
    /// Default builder settings: tab indentation, comments kept.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let writer = WriterBuilder::new().new_writer().map_err(|_| fmt::Error)?;
        f.write_str(&writer.write_to_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueTag;

    fn builder_writer(indentation: &str) -> StreamWriter {
        StreamWriter::with_settings(
            indentation.to_string(),
            CommentStyle::All,
            if indentation.is_empty() { ":" } else { " : " }.to_string(),
            "null".to_string(),
            String::new(),
        )
    }

    #[test]
    fn test_compact_scalars() {
        let writer = CompactWriter::new();
        assert_eq!(writer.write(&Value::null()), "null\n");
        assert_eq!(writer.write(&Value::from(true)), "true\n");
        assert_eq!(writer.write(&Value::from(-5i32)), "-5\n");
        assert_eq!(writer.write(&Value::from("a\tb")), "\"a\\tb\"\n");
    }

    #[test]
    fn test_compact_containers() {
        let mut root = Value::null();
        root["a"] = Value::from(1i32);
        root["b"].append(Value::from(2i32)).unwrap();
        root["b"].append(Value::null()).unwrap();
        let writer = CompactWriter::new();
        assert_eq!(writer.write(&root), "{\"a\":1,\"b\":[2,null]}\n");
    }

    #[test]
    fn test_compact_yaml_colon() {
        let mut root = Value::null();
        root["k"] = Value::from(1i32);
        let mut writer = CompactWriter::new();
        writer.enable_yaml_compatibility();
        writer.omit_ending_line_feed();
        assert_eq!(writer.write(&root), "{\"k\": 1}");
    }

    #[test]
    fn test_compact_drop_null_placeholders() {
        let mut root = Value::null();
        root["a"] = Value::null();
        root["b"] = Value::from(true);
        let mut writer = CompactWriter::new();
        writer.drop_null_placeholders();
        writer.omit_ending_line_feed();
        assert_eq!(writer.write(&root), "{\"b\":true}");

        let mut arr = Value::with_tag(ValueTag::Array);
        arr.append(Value::from(1i32)).unwrap();
        arr.append(Value::null()).unwrap();
        arr.append(Value::from(3i32)).unwrap();
        assert_eq!(writer.write(&arr), "[1,,3]");
    }

    #[test]
    fn test_inline_array() {
        let mut arr = Value::with_tag(ValueTag::Array);
        for i in 1..=3 {
            arr.append(Value::from(i)).unwrap();
        }
        let out = builder_writer("\t").write_to_string(&arr);
        assert_eq!(out, "[ 1, 2, 3 ]");
    }

    #[test]
    fn test_nested_nonempty_array_forces_multiline() {
        let mut inner = Value::with_tag(ValueTag::Array);
        inner.append(Value::from(1i32)).unwrap();
        let mut arr = Value::with_tag(ValueTag::Array);
        arr.append(inner).unwrap();
        let out = builder_writer("\t").write_to_string(&arr);
        assert_eq!(out, "[\n\t[ 1 ]\n]");
    }

    #[test]
    fn test_empty_containers_stay_inline() {
        let mut arr = Value::with_tag(ValueTag::Array);
        arr.append(Value::with_tag(ValueTag::Array)).unwrap();
        arr.append(Value::with_tag(ValueTag::Object)).unwrap();
        let out = builder_writer("\t").write_to_string(&arr);
        assert_eq!(out, "[ [], {} ]");
    }

    #[test]
    fn test_right_margin_forces_multiline() {
        let mut arr = Value::with_tag(ValueTag::Array);
        for _ in 0..4 {
            arr.append(Value::from("a string of twentyish chars")).unwrap();
        }
        let out = builder_writer("\t").write_to_string(&arr);
        assert!(out.starts_with("[\n"), "long content must break: {out}");
    }

    #[test]
    fn test_object_layout() {
        let mut root = Value::null();
        root["name"] = Value::from("value");
        root["count"] = Value::from(2i32);
        let out = builder_writer("\t").write_to_string(&root);
        assert_eq!(out, "{\n\t\"name\" : \"value\",\n\t\"count\" : 2\n}");
    }

    #[test]
    fn test_empty_indentation_collapses_whitespace() {
        let mut root = Value::null();
        root["a"].append(Value::from(1i32)).unwrap();
        root["a"].append(Value::from(2i32)).unwrap();
        let out = builder_writer("").write_to_string(&root);
        assert_eq!(out, "{\"a\":[1, 2]}");
    }

    #[test]
    fn test_commented_child_forces_multiline() {
        let mut arr = Value::with_tag(ValueTag::Array);
        arr.append(Value::from(1i32)).unwrap();
        let mut commented = Value::from(2i32);
        commented.set_comment("// two", CommentPlacement::AfterOnSameLine);
        arr.append(commented).unwrap();
        let out = builder_writer("\t").write_to_string(&arr);
        assert_eq!(out, "[\n\t1,\n\t2 // two\n]");
    }

    #[test]
    fn test_same_line_comment_precedes_comma_in_array() {
        let mut arr = Value::with_tag(ValueTag::Array);
        let mut first = Value::from(1i32);
        first.set_comment("// one", CommentPlacement::AfterOnSameLine);
        arr.append(first).unwrap();
        arr.append(Value::from(2i32)).unwrap();
        let out = builder_writer("\t").write_to_string(&arr);
        assert_eq!(out, "[\n\t1 // one,\n\t2\n]");
    }

    #[test]
    fn test_same_line_comment_precedes_comma_in_object() {
        let mut root = Value::null();
        root["a"] = Value::from(1i32);
        root["a"].set_comment("/* note */", CommentPlacement::AfterOnSameLine);
        root["b"] = Value::from(2i32);
        let out = builder_writer("\t").write_to_string(&root);
        assert_eq!(out, "{\n\t\"a\" : 1 /* note */,\n\t\"b\" : 2\n}");
    }

    #[test]
    fn test_comment_before_member() {
        let mut root = Value::null();
        root["a"] = Value::from(1i32);
        root["a"].set_comment("// first", CommentPlacement::Before);
        let out = builder_writer("\t").write_to_string(&root);
        assert_eq!(out, "{\n\t// first\n\t\"a\" : 1\n}");
    }

    #[test]
    fn test_styled_writer_legacy_shape() {
        let mut root = Value::null();
        root["k"] = Value::from(true);
        let out = StyledWriter::new().write(&root);
        assert_eq!(out, "{\n   \"k\" : true\n}\n");
    }

    #[test]
    fn test_styled_stream_writer_sink() {
        let mut root = Value::null();
        root["k"] = Value::from(1i32);
        let mut sink = Vec::new();
        StyledStreamWriter::default()
            .write(&root, &mut sink)
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&sink), "{\n\t\"k\" : 1\n}\n");
    }

    #[test]
    fn test_nonfinite_reals() {
        let mut arr = Value::with_tag(ValueTag::Array);
        arr.append(Value::from(f64::NAN)).unwrap();
        arr.append(Value::from(f64::INFINITY)).unwrap();
        arr.append(Value::from(f64::NEG_INFINITY)).unwrap();
        let writer = CompactWriter::new();
        assert_eq!(writer.write(&arr), "[null,1e+9999,-1e+9999]\n");
    }
}
