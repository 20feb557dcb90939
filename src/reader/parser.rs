//! Tokenizer and recursive-descent parser.
//!
//! Scans the input byte range directly; token spans are byte offsets into
//! the document and become the node spans of the produced tree. Errors
//! are values threaded through the descent, never panics: a failed
//! construct records a [`ParseError`], skips ahead to the enclosing
//! container's closing token, and leaves a partial tree behind.

use crate::value::{ByteString, CommentPlacement, ObjectKey, Value, ValueTag};

use super::{ParseError, ParseErrorKind, ParseReport, ReaderOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    ArraySeparator,
    MemberSeparator,
    String,
    Number,
    True,
    False,
    Null,
    NaN,
    PosInfinity,
    NegInfinity,
    Comment,
    End,
    Error,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

pub(super) struct Parser<'a> {
    doc: &'a [u8],
    pos: usize,
    opts: &'a ReaderOptions,
    errors: Vec<ParseError>,
    depth: usize,
    // Comment bookkeeping: comments pending attachment as the next
    // value's Before, and a comment seen on the same line as the last
    // completed value, pending attachment as its AfterOnSameLine.
    comments_before: String,
    pending_same_line: Option<String>,
    last_value_end: Option<usize>,
    // Start offset of a token the tokenizer already reported, so the
    // generic syntax error is not stacked on top.
    tokenizer_error_at: Option<usize>,
}

impl<'a> Parser<'a> {
    pub(super) fn new(doc: &'a [u8], opts: &'a ReaderOptions) -> Self {
        Parser {
            doc,
            pos: 0,
            opts,
            errors: Vec::new(),
            depth: 0,
            comments_before: String::new(),
            pending_same_line: None,
            last_value_end: None,
            tokenizer_error_at: None,
        }
    }

    pub(super) fn parse_document(mut self) -> ParseReport {
        let tok = self.next_meaningful();
        let (mut root, root_ok) = self.parse_value(tok);

        // Consume what follows the root: trailing comments attach to the
        // root, anything else is extra input.
        let after = self.next_meaningful();
        if let Some(text) = self.pending_same_line.take() {
            root.set_comment(text, CommentPlacement::AfterOnSameLine);
        }
        if !self.comments_before.is_empty() {
            let text = std::mem::take(&mut self.comments_before);
            root.set_comment(text, CommentPlacement::After);
        }
        if self.opts.fail_if_extra && root_ok && after.kind != TokenKind::End {
            self.add_error(ParseErrorKind::ExtraInput, after, None);
        }
        if self.opts.strict_root && !root.is_array() && !root.is_object() {
            self.errors.push(ParseError {
                kind: ParseErrorKind::InvalidRoot,
                offset_start: 0,
                offset_limit: self.doc.len(),
                detail: None,
            });
        }
        ParseReport {
            root,
            errors: self.errors,
        }
    }

    // ------------------------------------------------------------------
    // Recursive descent
    // ------------------------------------------------------------------

    /// Parse the value introduced by `tok`. Always yields a value (null
    /// on failure) so partial trees stay navigable; the flag reports
    /// whether it parsed cleanly.
    fn parse_value(&mut self, tok: Token) -> (Value, bool) {
        let before = self.take_comments_before();
        let (mut value, ok) = match tok.kind {
            TokenKind::ObjectBegin => self.parse_object(tok),
            TokenKind::ArrayBegin => self.parse_array(tok),
            TokenKind::String => match self.decode_string(tok) {
                Ok(bytes) => (scalar(Value::from(bytes), tok), true),
                Err(()) => (scalar(Value::null(), tok), false),
            },
            TokenKind::Number => match self.decode_number(tok) {
                Ok(v) => (scalar(v, tok), true),
                Err(()) => (scalar(Value::null(), tok), false),
            },
            TokenKind::True => (scalar(Value::from(true), tok), true),
            TokenKind::False => (scalar(Value::from(false), tok), true),
            TokenKind::Null => (scalar(Value::null(), tok), true),
            TokenKind::NaN => (scalar(Value::from(f64::NAN), tok), true),
            TokenKind::PosInfinity => (scalar(Value::from(f64::INFINITY), tok), true),
            TokenKind::NegInfinity => (scalar(Value::from(f64::NEG_INFINITY), tok), true),
            TokenKind::ArraySeparator | TokenKind::ArrayEnd | TokenKind::ObjectEnd
                if self.opts.allow_dropped_null_placeholders =>
            {
                // A dropped slot: materialize null and push the token
                // back for the container loop.
                self.pos = tok.start;
                let mut v = Value::null();
                v.set_offsets(tok.start, tok.start);
                (v, true)
            }
            _ => {
                self.report_syntax_error(tok);
                (scalar(Value::null(), tok), false)
            }
        };
        if let Some(text) = before {
            value.set_comment(text, CommentPlacement::Before);
        }
        self.last_value_end = Some(value.offset_limit());
        (value, ok)
    }

    fn parse_object(&mut self, open: Token) -> (Value, bool) {
        let mut obj = Value::with_tag(ValueTag::Object);
        self.depth += 1;
        if self.depth > self.opts.stack_limit {
            self.add_error(ParseErrorKind::StackOverflow, open, None);
            self.recover(TokenKind::ObjectEnd);
            obj.set_offsets(open.start, self.pos);
            self.depth -= 1;
            return (obj, false);
        }

        let mut seen_member = false;
        loop {
            let name_tok = self.next_meaningful();
            self.attach_pending_same_line(&mut obj);
            if name_tok.kind == TokenKind::ObjectEnd
                && (!seen_member || self.opts.allow_trailing_commas)
            {
                self.attach_trailing_comments(&mut obj);
                obj.set_offsets(open.start, name_tok.end);
                self.depth -= 1;
                return (obj, true);
            }

            let key = match name_tok.kind {
                TokenKind::String => match self.decode_string(name_tok) {
                    Ok(bytes) => ObjectKey::Bytes(ByteString::from(bytes)),
                    Err(()) => {
                        self.recover(TokenKind::ObjectEnd);
                        break;
                    }
                },
                TokenKind::Number if self.opts.allow_numeric_keys => {
                    match self.decode_number(name_tok) {
                        Ok(num) => match num.as_uint64() {
                            Ok(index) => ObjectKey::Index(index),
                            Err(_) => {
                                self.add_error(ParseErrorKind::MissingMemberName, name_tok, None);
                                self.recover(TokenKind::ObjectEnd);
                                break;
                            }
                        },
                        Err(()) => {
                            self.recover(TokenKind::ObjectEnd);
                            break;
                        }
                    }
                }
                _ => {
                    self.add_error(ParseErrorKind::MissingMemberName, name_tok, None);
                    self.recover(TokenKind::ObjectEnd);
                    break;
                }
            };

            let colon = self.next_meaningful();
            self.attach_pending_same_line(&mut obj);
            if colon.kind != TokenKind::MemberSeparator {
                self.add_error(ParseErrorKind::MissingColon, colon, None);
                self.recover(TokenKind::ObjectEnd);
                break;
            }

            if self.opts.reject_dup_keys && obj.contains_key(&key) {
                self.add_error(
                    ParseErrorKind::DuplicateKey(key.display_name()),
                    name_tok,
                    None,
                );
                self.recover(TokenKind::ObjectEnd);
                break;
            }

            let value_tok = self.next_meaningful();
            self.attach_pending_same_line(&mut obj);
            let (value, value_ok) = self.parse_value(value_tok);
            if let Some(map) = obj.object_map_mut() {
                map.insert(key, value);
            }
            seen_member = true;
            if !value_ok {
                self.recover(TokenKind::ObjectEnd);
                break;
            }

            let sep = self.next_meaningful();
            self.attach_pending_same_line(&mut obj);
            match sep.kind {
                TokenKind::ObjectEnd => {
                    self.attach_trailing_comments(&mut obj);
                    obj.set_offsets(open.start, sep.end);
                    self.depth -= 1;
                    return (obj, true);
                }
                TokenKind::ArraySeparator => {}
                _ => {
                    self.add_error(
                        ParseErrorKind::MissingComma {
                            context: "object",
                            closer: '}',
                        },
                        sep,
                        None,
                    );
                    self.recover(TokenKind::ObjectEnd);
                    break;
                }
            }
        }

        obj.set_offsets(open.start, self.pos);
        self.depth -= 1;
        (obj, false)
    }

    fn parse_array(&mut self, open: Token) -> (Value, bool) {
        let mut arr = Value::with_tag(ValueTag::Array);
        self.depth += 1;
        if self.depth > self.opts.stack_limit {
            self.add_error(ParseErrorKind::StackOverflow, open, None);
            self.recover(TokenKind::ArrayEnd);
            arr.set_offsets(open.start, self.pos);
            self.depth -= 1;
            return (arr, false);
        }

        loop {
            let tok = self.next_meaningful();
            self.attach_pending_same_line(&mut arr);
            // A closing bracket in value position: the empty array, or a
            // trailing comma. With dropped placeholders enabled the comma
            // denotes a dropped slot instead.
            if tok.kind == TokenKind::ArrayEnd
                && (arr.size() == 0
                    || (self.opts.allow_trailing_commas
                        && !self.opts.allow_dropped_null_placeholders))
            {
                self.attach_trailing_comments(&mut arr);
                arr.set_offsets(open.start, tok.end);
                self.depth -= 1;
                return (arr, true);
            }

            let (value, value_ok) = self.parse_value(tok);
            if let Some(vec) = arr.array_vec_mut() {
                vec.push(value);
            }
            if !value_ok {
                self.recover(TokenKind::ArrayEnd);
                break;
            }

            let sep = self.next_meaningful();
            self.attach_pending_same_line(&mut arr);
            match sep.kind {
                TokenKind::ArrayEnd => {
                    self.attach_trailing_comments(&mut arr);
                    arr.set_offsets(open.start, sep.end);
                    self.depth -= 1;
                    return (arr, true);
                }
                TokenKind::ArraySeparator => {}
                _ => {
                    self.add_error(
                        ParseErrorKind::MissingComma {
                            context: "array",
                            closer: ']',
                        },
                        sep,
                        None,
                    );
                    self.recover(TokenKind::ArrayEnd);
                    break;
                }
            }
        }

        arr.set_offsets(open.start, self.pos);
        self.depth -= 1;
        (arr, false)
    }

    // ------------------------------------------------------------------
    // Literals
    // ------------------------------------------------------------------

    fn decode_number(&mut self, tok: Token) -> Result<Value, ()> {
        let bytes = &self.doc[tok.start..tok.end];
        let text = String::from_utf8_lossy(bytes);
        let is_real = bytes
            .iter()
            .any(|&b| matches!(b, b'.' | b'e' | b'E'));
        if !is_real {
            if bytes.first() == Some(&b'-') {
                if let Ok(v) = text.parse::<i64>() {
                    return Ok(Value::from(v));
                }
            } else if let Ok(v) = text.parse::<u64>() {
                // A positive integer stays signed while it fits; the
                // unsigned variant records a value only u64 can hold.
                return Ok(if v <= i64::MAX as u64 {
                    Value::from(v as i64)
                } else {
                    Value::from(v)
                });
            }
        }
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Value::from(v)),
            _ => {
                self.add_error(
                    ParseErrorKind::NumberOutOfRange(text.into_owned()),
                    tok,
                    None,
                );
                Err(())
            }
        }
    }

    fn decode_string(&mut self, tok: Token) -> Result<Vec<u8>, ()> {
        let content_end = tok.end - 1;
        let mut out = Vec::with_capacity(content_end - tok.start);
        let mut i = tok.start + 1;
        while i < content_end {
            let b = self.doc[i];
            i += 1;
            if b != b'\\' {
                out.push(b);
                continue;
            }
            let backslash = i - 1;
            if i >= content_end {
                self.add_error(ParseErrorKind::BadEscape, tok, Some(backslash));
                return Err(());
            }
            let esc = self.doc[i];
            i += 1;
            match esc {
                b'"' => out.push(b'"'),
                b'\\' => out.push(b'\\'),
                b'/' => out.push(b'/'),
                b'b' => out.push(0x08),
                b'f' => out.push(0x0C),
                b'n' => out.push(b'\n'),
                b'r' => out.push(b'\r'),
                b't' => out.push(b'\t'),
                b'u' => {
                    i = self.decode_unicode_escape(tok, backslash, i, content_end, &mut out)?;
                }
                _ => {
                    self.add_error(ParseErrorKind::BadEscape, tok, Some(backslash));
                    return Err(());
                }
            }
        }
        Ok(out)
    }

    /// Decode `\uXXXX` (and a surrogate pair's second half) starting at
    /// `i`, the offset after the `u`. Returns the offset after the
    /// consumed escape.
    fn decode_unicode_escape(
        &mut self,
        tok: Token,
        backslash: usize,
        mut i: usize,
        end: usize,
        out: &mut Vec<u8>,
    ) -> Result<usize, ()> {
        let high = self.read_hex4(tok, backslash, i, end)?;
        i += 4;
        let code_point = if (0xD800..=0xDBFF).contains(&high) {
            if i + 2 > end || self.doc[i] != b'\\' || self.doc[i + 1] != b'u' {
                self.add_error(
                    ParseErrorKind::BadUnicodeEscape(
                        "expected another \\u token to begin the second half of a surrogate pair",
                    ),
                    tok,
                    Some(backslash),
                );
                return Err(());
            }
            let low = self.read_hex4(tok, backslash, i + 2, end)?;
            i += 6;
            if !(0xDC00..=0xDFFF).contains(&low) {
                self.add_error(
                    ParseErrorKind::BadUnicodeEscape("invalid second half of a surrogate pair"),
                    tok,
                    Some(backslash),
                );
                return Err(());
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else if (0xDC00..=0xDFFF).contains(&high) {
            self.add_error(
                ParseErrorKind::BadUnicodeEscape("unpaired surrogate"),
                tok,
                Some(backslash),
            );
            return Err(());
        } else {
            high
        };
        match char::from_u32(code_point) {
            Some(c) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                Ok(i)
            }
            None => {
                self.add_error(
                    ParseErrorKind::BadUnicodeEscape("not a Unicode code point"),
                    tok,
                    Some(backslash),
                );
                Err(())
            }
        }
    }

    fn read_hex4(
        &mut self,
        tok: Token,
        backslash: usize,
        i: usize,
        end: usize,
    ) -> Result<u32, ()> {
        if i + 4 > end {
            self.add_error(
                ParseErrorKind::BadUnicodeEscape("four hexadecimal digits expected"),
                tok,
                Some(backslash),
            );
            return Err(());
        }
        let mut value: u32 = 0;
        for &b in &self.doc[i..i + 4] {
            let digit = match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                _ => {
                    self.add_error(
                        ParseErrorKind::BadUnicodeEscape("four hexadecimal digits expected"),
                        tok,
                        Some(backslash),
                    );
                    return Err(());
                }
            };
            value = (value << 4) | u32::from(digit);
        }
        Ok(value)
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// Next non-comment token; comments on the way are recorded for
    /// attachment.
    fn next_meaningful(&mut self) -> Token {
        loop {
            let tok = self.read_token();
            if tok.kind != TokenKind::Comment {
                return tok;
            }
            self.process_comment(tok);
        }
    }

    fn process_comment(&mut self, tok: Token) {
        if !self.opts.collect_comments {
            return;
        }
        let text = normalize_eol(&self.doc[tok.start..tok.end]);
        let same_line = match self.last_value_end {
            Some(end) if end <= tok.start => !self.doc[end..tok.start]
                .iter()
                .any(|&b| b == b'\n' || b == b'\r'),
            _ => false,
        };
        if same_line {
            let trimmed = text.trim_end_matches(['\n', '\r']);
            match &mut self.pending_same_line {
                Some(buf) => {
                    buf.push(' ');
                    buf.push_str(trimmed);
                }
                None => self.pending_same_line = Some(trimmed.to_string()),
            }
        } else {
            self.push_comment_before(&text);
        }
    }

    fn push_comment_before(&mut self, text: &str) {
        if !self.comments_before.is_empty() && !self.comments_before.ends_with('\n') {
            self.comments_before.push('\n');
        }
        self.comments_before.push_str(text);
    }

    fn take_comments_before(&mut self) -> Option<String> {
        if self.comments_before.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.comments_before))
        }
    }

    /// Attach a comment seen on the last value's line to that value.
    fn attach_pending_same_line(&mut self, container: &mut Value) {
        let Some(text) = self.pending_same_line.take() else {
            return;
        };
        match container.last_child_mut() {
            Some(child) => child.set_comment(text, CommentPlacement::AfterOnSameLine),
            None => self.push_comment_before(&text),
        }
    }

    /// Comments between the last member and the container's closer become
    /// the last member's After comment.
    fn attach_trailing_comments(&mut self, container: &mut Value) {
        if self.comments_before.is_empty() {
            return;
        }
        if let Some(child) = container.last_child_mut() {
            let text = std::mem::take(&mut self.comments_before);
            child.set_comment(text, CommentPlacement::After);
        }
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    fn add_error(&mut self, kind: ParseErrorKind, tok: Token, detail: Option<usize>) {
        self.errors.push(ParseError {
            kind,
            offset_start: tok.start,
            offset_limit: tok.end,
            detail,
        });
    }

    fn report_syntax_error(&mut self, tok: Token) {
        // The tokenizer reports unterminated strings and comments itself.
        if self.tokenizer_error_at == Some(tok.start) {
            self.tokenizer_error_at = None;
            return;
        }
        self.add_error(ParseErrorKind::SyntaxError, tok, None);
    }

    /// Skip tokens until the given closer (or end of input), dropping
    /// errors raised while skipping so a construct reports once.
    fn recover(&mut self, until: TokenKind) {
        let reported = self.errors.len();
        loop {
            let tok = self.read_token();
            if tok.kind == until || tok.kind == TokenKind::End {
                break;
            }
        }
        self.errors.truncate(reported);
        self.tokenizer_error_at = None;
    }

    // ------------------------------------------------------------------
    // Tokenizer
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<u8> {
        self.doc.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    fn read_token(&mut self) -> Token {
        self.skip_spaces();
        let start = self.pos;
        let kind = match self.advance() {
            None => TokenKind::End,
            Some(b'{') => TokenKind::ObjectBegin,
            Some(b'}') => TokenKind::ObjectEnd,
            Some(b'[') => TokenKind::ArrayBegin,
            Some(b']') => TokenKind::ArrayEnd,
            Some(b',') => TokenKind::ArraySeparator,
            Some(b':') => TokenKind::MemberSeparator,
            Some(b'"') => self.scan_string(start, b'"'),
            Some(b'\'') if self.opts.allow_single_quotes => self.scan_string(start, b'\''),
            Some(b'/') if self.opts.allow_comments => self.scan_comment(start),
            Some(b'0'..=b'9') => self.scan_number(),
            Some(b'-') => {
                if self.opts.allow_special_floats && self.peek() == Some(b'I') {
                    self.match_rest(b"Infinity", TokenKind::NegInfinity)
                } else {
                    self.scan_number()
                }
            }
            Some(b't') => self.match_rest(b"rue", TokenKind::True),
            Some(b'f') => self.match_rest(b"alse", TokenKind::False),
            Some(b'n') => self.match_rest(b"ull", TokenKind::Null),
            Some(b'N') if self.opts.allow_special_floats => {
                self.match_rest(b"aN", TokenKind::NaN)
            }
            Some(b'I') if self.opts.allow_special_floats => {
                self.match_rest(b"nfinity", TokenKind::PosInfinity)
            }
            Some(_) => TokenKind::Error,
        };
        Token {
            kind,
            start,
            end: self.pos,
        }
    }

    fn match_rest(&mut self, rest: &[u8], kind: TokenKind) -> TokenKind {
        for &expected in rest {
            if self.advance() != Some(expected) {
                return TokenKind::Error;
            }
        }
        kind
    }

    fn scan_number(&mut self) -> TokenKind {
        while matches!(
            self.peek(),
            Some(b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-')
        ) {
            self.pos += 1;
        }
        TokenKind::Number
    }

    fn scan_string(&mut self, start: usize, quote: u8) -> TokenKind {
        loop {
            match self.advance() {
                None => {
                    self.errors.push(ParseError {
                        kind: ParseErrorKind::UnterminatedString,
                        offset_start: start,
                        offset_limit: self.pos,
                        detail: None,
                    });
                    self.tokenizer_error_at = Some(start);
                    return TokenKind::Error;
                }
                Some(b'\\') => {
                    self.advance();
                }
                Some(b) if b == quote => return TokenKind::String,
                Some(_) => {}
            }
        }
    }

    fn scan_comment(&mut self, start: usize) -> TokenKind {
        match self.advance() {
            Some(b'/') => {
                while let Some(b) = self.peek() {
                    self.pos += 1;
                    if b == b'\n' {
                        break;
                    }
                    if b == b'\r' {
                        if self.peek() == Some(b'\n') {
                            self.pos += 1;
                        }
                        break;
                    }
                }
                TokenKind::Comment
            }
            Some(b'*') => loop {
                match self.advance() {
                    None => {
                        self.errors.push(ParseError {
                            kind: ParseErrorKind::UnterminatedComment,
                            offset_start: start,
                            offset_limit: self.pos,
                            detail: None,
                        });
                        self.tokenizer_error_at = Some(start);
                        return TokenKind::Error;
                    }
                    Some(b'*') if self.peek() == Some(b'/') => {
                        self.pos += 1;
                        return TokenKind::Comment;
                    }
                    Some(_) => {}
                }
            },
            _ => TokenKind::Error,
        }
    }
}

fn scalar(mut value: Value, tok: Token) -> Value {
    value.set_offsets(tok.start, tok.end);
    value
}

fn normalize_eol(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use crate::reader::{Reader, ReaderOptions};
    use crate::value::CommentPlacement;

    fn parse(doc: &str) -> crate::reader::ParseReport {
        Reader::default().parse(doc.as_bytes())
    }

    #[test]
    fn test_parse_literals() {
        assert!(parse("null").root.is_null());
        assert!(parse("true").root.as_bool().unwrap());
        assert_eq!(parse("-12").root.as_int64().unwrap(), -12);
        assert_eq!(parse("1.5").root.as_double().unwrap(), 1.5);
        assert_eq!(parse("\"s\"").root.as_string().unwrap(), "s");
    }

    #[test]
    fn test_signedness_from_source() {
        use crate::value::ValueTag;
        assert_eq!(parse("42").root.tag(), ValueTag::Int);
        assert_eq!(parse("-42").root.tag(), ValueTag::Int);
        assert_eq!(parse("9223372036854775808").root.tag(), ValueTag::Uint);
        assert_eq!(parse("18446744073709551616").root.tag(), ValueTag::Real);
    }

    #[test]
    fn test_nested_containers() {
        let report = parse(r#"{"arr": [1, {"nested": true}], "n": null}"#);
        assert!(report.is_success());
        assert!(report.root["arr"][1]["nested"].as_bool().unwrap());
        assert!(report.root["n"].is_null());
    }

    #[test]
    fn test_spans_cover_tokens() {
        let report = parse(r#"[10, "ab"]"#);
        let root = &report.root;
        assert_eq!((root.offset_start(), root.offset_limit()), (0, 10));
        assert_eq!(root[0].offset_start(), 1);
        assert_eq!(root[0].offset_limit(), 3);
        assert_eq!(root[1].offset_start(), 5);
        assert_eq!(root[1].offset_limit(), 9);
    }

    #[test]
    fn test_unterminated_string_reported() {
        let report = parse("\"abc");
        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            report.errors[0].kind,
            crate::reader::ParseErrorKind::UnterminatedString
        );
    }

    #[test]
    fn test_unterminated_comment_reported() {
        let report = parse("/* never closed");
        assert!(!report.is_success());
    }

    #[test]
    fn test_missing_comma_reported() {
        let report = parse("[1 2]");
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0]
            .message()
            .contains("Missing ',' or ']' in array declaration"));
    }

    #[test]
    fn test_missing_colon_reported() {
        let report = parse(r#"{"a" 1}"#);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0]
            .message()
            .contains("Missing ':' after object member name"));
    }

    #[test]
    fn test_stack_limit() {
        let mut options = ReaderOptions::all();
        options.stack_limit = 2;
        let reader = Reader::new(options);
        assert!(reader.parse(b"[[1]]").is_success());
        let report = reader.parse(b"[[[1]]]");
        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            report.errors[0].kind,
            crate::reader::ParseErrorKind::StackOverflow
        );
    }

    #[test]
    fn test_comment_before_value() {
        let report = parse("// intro\n{ \"a\": 1 }");
        assert!(report.is_success());
        assert_eq!(
            report.root.comment(CommentPlacement::Before).unwrap(),
            "// intro"
        );
    }

    #[test]
    fn test_comment_after_value_on_same_line() {
        let report = parse("{ \"a\": 1 // note\n}");
        assert!(report.is_success());
        assert_eq!(
            report.root["a"]
                .comment(CommentPlacement::AfterOnSameLine)
                .unwrap(),
            "// note"
        );
    }

    #[test]
    fn test_trailing_comment_becomes_after() {
        let report = parse("{ \"a\": 1\n// trailing\n}");
        assert!(report.is_success());
        assert_eq!(
            report.root["a"].comment(CommentPlacement::After).unwrap(),
            "// trailing"
        );
    }

    #[test]
    fn test_single_quotes_flag() {
        assert!(!parse("'s'").is_success());
        let mut options = ReaderOptions::all();
        options.allow_single_quotes = true;
        let report = Reader::new(options).parse(b"'s'");
        assert_eq!(report.root.as_string().unwrap(), "s");
    }

    #[test]
    fn test_trailing_comma_flag() {
        assert!(!parse("[1, 2,]").is_success());
        let mut options = ReaderOptions::all();
        options.allow_trailing_commas = true;
        let reader = Reader::new(options);
        assert_eq!(reader.parse(b"[1, 2,]").root.size(), 2);
        assert_eq!(reader.parse(b"{\"a\": 1,}").root.size(), 1);
    }

    #[test]
    fn test_special_floats_flag() {
        assert!(!parse("NaN").is_success());
        let mut options = ReaderOptions::all();
        options.allow_special_floats = true;
        let reader = Reader::new(options);
        assert!(reader.parse(b"NaN").root.as_double().unwrap().is_nan());
        assert_eq!(
            reader.parse(b"-Infinity").root.as_double().unwrap(),
            f64::NEG_INFINITY
        );
        assert_eq!(
            reader.parse(b"Infinity").root.as_double().unwrap(),
            f64::INFINITY
        );
    }

    #[test]
    fn test_numeric_keys_flag() {
        assert!(!parse("{1: true}").is_success());
        let mut options = ReaderOptions::all();
        options.allow_numeric_keys = true;
        let report = Reader::new(options).parse(b"{1: true, \"b\": false}");
        assert!(report.is_success());
        assert_eq!(report.root.member_names().unwrap(), vec!["1", "b"]);
    }
}
