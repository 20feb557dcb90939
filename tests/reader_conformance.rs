//! Reader conformance tests.
//!
//! End-to-end parses covering span capture, diagnostics, dialect flags,
//! escape decoding, and numeric classification at the type boundaries.

use jsontree::{
    CommentPlacement, ParseErrorKind, Reader, ReaderBuilder, ReaderOptions, Value, ValueTag,
};

fn parse(doc: &str) -> jsontree::ParseReport {
    Reader::default().parse(doc.as_bytes())
}

fn parse_with(doc: &str, options: ReaderOptions) -> jsontree::ParseReport {
    Reader::new(options).parse(doc.as_bytes())
}

// ============================================================================
// Basic documents and offsets
// ============================================================================

#[test]
fn basic_object() {
    let doc = r#"{ "property" : "value" }"#;
    let report = parse(doc);
    assert!(report.is_success());
    let root = &report.root;
    assert_eq!(root.size(), 1);
    assert_eq!(root["property"].as_string().unwrap(), "value");
    assert_eq!(root.offset_start(), 0);
    assert_eq!(root.offset_limit(), 24);
}

#[test]
fn offset_tracking() {
    let doc = r#"{ "property" : ["value", "value2"], "obj" : { "nested" : 123, "bool" : true}, "null" : null, "false" : false }"#;
    let report = parse(doc);
    assert!(report.is_success());
    let root = &report.root;
    assert_eq!(root["property"].offset_start(), 15);
    assert_eq!(root["property"].offset_limit(), 34);
    assert_eq!(root["obj"]["nested"].offset_start(), 57);
    assert_eq!(root["false"].offset_limit(), 108);
}

#[test]
fn string_value_spans_include_quotes() {
    let report = parse(r#"{ "a" : "xy" }"#);
    assert_eq!(report.root["a"].offset_start(), 8);
    assert_eq!(report.root["a"].offset_limit(), 12);
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn syntax_error_reports_single_error_with_span() {
    let doc = r#"{ "property" :: "value" }"#;
    let report = parse(doc);
    assert_eq!(report.errors.len(), 1);
    let error = &report.errors[0];
    assert_eq!(error.offset_start, 14);
    assert_eq!(error.offset_limit, 15);
    assert_eq!(
        error.message(),
        "Syntax error: value, object or array expected."
    );
    assert_eq!(
        report.formatted_messages(doc.as_bytes()),
        "* Line 1, Column 15\n  Syntax error: value, object or array expected.\n"
    );
}

#[test]
fn bad_escape_points_at_backslash() {
    let doc = r#"{ "property" : "v\alue" }"#;
    let report = parse(doc);
    assert_eq!(report.errors.len(), 1);
    let error = &report.errors[0];
    assert_eq!(error.kind, ParseErrorKind::BadEscape);
    // The span covers the string literal, the detail the backslash.
    assert_eq!(error.offset_start, 15);
    assert_eq!(error.offset_limit, 23);
    assert_eq!(error.detail, Some(17));
    let rendered = report.formatted_messages(doc.as_bytes());
    assert!(rendered.contains("Bad escape sequence in string"));
    assert!(rendered.contains("See Line 1, Column 18 for detail."));
}

#[test]
fn partial_tree_survives_failure() {
    let report = parse(r#"{ "good" : 1, "bad" : }"#);
    assert!(!report.is_success());
    assert_eq!(report.root["good"].as_int().unwrap(), 1);
}

#[test]
fn number_overflow_falls_back_to_real() {
    // One digit beyond u64::MAX.
    let report = parse("18446744073709551616");
    assert!(report.is_success());
    assert_eq!(report.root.tag(), ValueTag::Real);
    assert_eq!(report.root.as_double().unwrap(), 1.8446744073709552e19);
}

#[test]
fn unrepresentable_number_is_an_error() {
    let report = parse("1e99999");
    assert!(!report.is_success());
    assert!(matches!(
        report.errors[0].kind,
        ParseErrorKind::NumberOutOfRange(_)
    ));
}

// ============================================================================
// Dialect flags
// ============================================================================

#[test]
fn dropped_null_placeholders() {
    let mut options = ReaderOptions::all();
    options.allow_dropped_null_placeholders = true;
    let report = parse_with(r#"{"a":,"b":true}"#, options.clone());
    assert!(report.is_success());
    assert_eq!(report.root.size(), 2);
    assert!(report.root["a"].is_null());
    assert!(report.root["b"].as_bool().unwrap());

    let report = parse_with("[1,,3]", options);
    assert!(report.is_success());
    assert_eq!(report.root.size(), 3);
    assert!(report.root[1].is_null());
}

#[test]
fn duplicate_keys_replace_by_default() {
    let report = parse(r#"{ "key":"val1", "key":"val2" }"#);
    assert!(report.is_success());
    assert_eq!(report.root.size(), 1);
    assert_eq!(report.root["key"].as_string().unwrap(), "val2");
}

#[test]
fn duplicate_keys_rejected_when_strict() {
    let mut options = ReaderOptions::all();
    options.reject_dup_keys = true;
    let doc = r#"{ "key":"val1", "key":"val2" }"#;
    let report = parse_with(doc, options);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.root["key"].as_string().unwrap(), "val1");
    assert!(report.errors[0].message().contains("Duplicate key: 'key'"));
}

#[test]
fn numeric_keys_keep_parsed_form() {
    let mut options = ReaderOptions::all();
    options.allow_numeric_keys = true;
    let report = parse_with(r#"{12: "a", "12": "b"}"#, options);
    assert!(report.is_success());
    // The bare and the quoted spelling are distinct keys.
    assert_eq!(report.root.size(), 2);
    assert_eq!(report.root.member_names().unwrap(), vec!["12", "12"]);
}

#[test]
fn single_quoted_strings_share_escape_rules() {
    let mut options = ReaderOptions::all();
    options.allow_single_quotes = true;
    let report = parse_with(r#"{'a': 'x\ny'}"#, options);
    assert!(report.is_success());
    assert_eq!(report.root["a"].as_string().unwrap(), "x\ny");
}

#[test]
fn extra_input_flagged_only_on_request() {
    assert!(parse("[] trailing").is_success());
    let mut options = ReaderOptions::all();
    options.fail_if_extra = true;
    let report = parse_with("[] trailing", options);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, ParseErrorKind::ExtraInput);
}

#[test]
fn strict_root_rejects_scalars() {
    let mut options = ReaderOptions::all();
    options.strict_root = true;
    assert!(!parse_with("42", options.clone()).is_success());
    assert!(parse_with("[42]", options.clone()).is_success());
    assert!(parse_with(r#"{"k": 42}"#, options).is_success());
}

#[test]
fn stack_limit_overflow() {
    let mut options = ReaderOptions::all();
    options.stack_limit = 10;
    let deep = "[".repeat(11) + &"]".repeat(11);
    let report = parse_with(&deep, options.clone());
    assert!(report
        .errors
        .iter()
        .any(|e| e.kind == ParseErrorKind::StackOverflow));
    let shallow = "[".repeat(10) + &"]".repeat(10);
    assert!(parse_with(&shallow, options).is_success());
}

#[test]
fn special_floats_only_when_enabled() {
    assert!(!parse("[NaN]").is_success());
    let mut options = ReaderOptions::all();
    options.allow_special_floats = true;
    let report = parse_with("[NaN, Infinity, -Infinity]", options);
    assert!(report.is_success());
    assert!(report.root[0].as_double().unwrap().is_nan());
    assert_eq!(report.root[1].as_double().unwrap(), f64::INFINITY);
    assert_eq!(report.root[2].as_double().unwrap(), f64::NEG_INFINITY);
}

// ============================================================================
// Escapes and encodings
// ============================================================================

#[test]
fn named_escapes_decode() {
    let report = parse(r#""\"\\\/\b\f\n\r\t""#);
    assert!(report.is_success());
    assert_eq!(
        report.root.as_bytes().unwrap(),
        b"\"\\/\x08\x0C\n\r\t"
    );
}

#[test]
fn unicode_escape_decodes_to_utf8() {
    let report = parse(r#""\u00E9""#);
    assert_eq!(report.root.as_str().unwrap(), "\u{e9}");
}

#[test]
fn surrogate_pair_decodes_to_four_byte_utf8() {
    let report = parse(r#""\uD834\uDD1E""#);
    assert!(report.is_success());
    assert_eq!(report.root.as_str().unwrap(), "\u{1D11E}");
    assert_eq!(report.root.as_bytes().unwrap(), [0xF0, 0x9D, 0x84, 0x9E]);
}

#[test]
fn unpaired_surrogates_rejected() {
    for doc in [r#""\uD800""#, r#""\uDC00""#, r#""\uD800A""#] {
        let report = parse(doc);
        assert!(!report.is_success(), "{doc} must be rejected");
        assert!(matches!(
            report.errors[0].kind,
            ParseErrorKind::BadUnicodeEscape(_)
        ));
    }
}

#[test]
fn embedded_nul_round_trips() {
    let report = parse(r#""a\u0000b""#);
    assert!(report.is_success());
    assert_eq!(report.root.as_bytes().unwrap(), b"a\0b");
}

#[test]
fn raw_bytes_pass_through() {
    // Non-UTF-8 content inside a string literal is preserved verbatim.
    let doc = [b'"', 0xFF, 0xFE, b'"'];
    let report = Reader::default().parse(&doc);
    assert!(report.is_success());
    assert_eq!(report.root.as_bytes().unwrap(), [0xFF, 0xFE]);
}

// ============================================================================
// Numeric boundaries through the reader
// ============================================================================

#[test]
fn integer_boundaries_classify_after_parse() {
    let cases: &[(&str, fn(&Value) -> bool)] = &[
        ("2147483647", |v| v.is_int()),
        ("-2147483648", |v| v.is_int()),
        ("2147483648", |v| !v.is_int() && v.is_int64()),
        ("4294967295", |v| v.is_uint() && !v.is_int()),
        ("9223372036854775807", |v| v.is_int64() && v.is_uint64()),
        ("-9223372036854775808", |v| v.is_int64() && !v.is_uint64()),
        ("18446744073709551615", |v| v.is_uint64() && !v.is_int64()),
    ];
    for (doc, check) in cases {
        let report = parse(doc);
        assert!(report.is_success(), "{doc}");
        assert!(check(&report.root), "{doc} classified wrongly");
    }
}

#[test]
fn format_int_round_trips() {
    for x in [0i64, 1, -1, 42, i64::MAX, i64::MIN, 1 << 40] {
        let text = jsontree::codec::format_int(x);
        let report = parse(&text);
        assert_eq!(report.root.as_int64().unwrap(), x, "{text}");
    }
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn comment_placements() {
    let doc = "// head\n{\n  \"a\": 1, // same line\n  /* block */\n  \"b\": 2\n  // tail\n}\n";
    let report = parse(doc);
    assert!(report.is_success());
    let root = &report.root;
    assert_eq!(root.comment(CommentPlacement::Before).unwrap(), "// head");
    assert_eq!(
        root["a"].comment(CommentPlacement::AfterOnSameLine).unwrap(),
        "// same line"
    );
    assert_eq!(
        root["b"].comment(CommentPlacement::Before).unwrap(),
        "/* block */"
    );
    assert_eq!(root["b"].comment(CommentPlacement::After).unwrap(), "// tail");
}

#[test]
fn comments_can_be_skipped() {
    let mut options = ReaderOptions::all();
    options.collect_comments = false;
    let report = parse_with("// head\n[1]", options);
    assert!(report.is_success());
    assert!(!report.root.has_comment(CommentPlacement::Before));
}

#[test]
fn comments_rejected_when_disallowed() {
    let mut options = ReaderOptions::all();
    options.allow_comments = false;
    assert!(!parse_with("// head\n[1]", options).is_success());
}

// ============================================================================
// Builder-driven construction
// ============================================================================

#[test]
fn reader_builder_snapshot() {
    let mut builder = ReaderBuilder::new();
    builder["allowDroppedNullPlaceholders"] = Value::from(true);
    builder["rejectDupKeys"] = Value::from(true);
    let reader = builder.new_reader().unwrap();
    let report = reader.parse(br#"{"a":,"a":1}"#);
    assert!(!report.is_success(), "duplicate rejected");
    assert!(report.root["a"].is_null(), "dropped slot parsed first");
}
