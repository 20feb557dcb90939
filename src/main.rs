//! jsontree test runner.
//!
//! Parses a JSON file, dumps the tree as `path=value` lines to
//! `<base>.actual`, rewrites the JSON with the selected writer to
//! `<base>.rewrite`, then reparses the rewrite and dumps it to
//! `<base>.actual-rewrite`. Exit codes: 0 success, 1 parse failure,
//! 2 output file error, 3 usage error, 4 unknown writer name.

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use jsontree::codec;
use jsontree::writer::write_string;
use jsontree::{
    CommentPlacement, Reader, ReaderOptions, StyledStreamWriter, StyledWriter, Value, ValueTag,
    WriterBuilder,
};

#[derive(Parser)]
#[command(name = "jsontree")]
#[command(about = "JSON test runner: parse, dump, rewrite, reparse", long_about = None)]
#[command(version)]
struct Cli {
    /// Parse with the strictly conforming dialect and stop after parsing
    #[arg(long)]
    strict: bool,

    /// Stop after parsing; write no output files
    #[arg(long)]
    parse_only: bool,

    /// Writer for the rewrite step: styled, styled-stream, or builder
    #[arg(long, default_value = "styled")]
    writer: String,

    /// Input JSON file
    input: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(3);
        }
    };
    ExitCode::from(run(&cli))
}

fn run(cli: &Cli) -> u8 {
    let rewrite = match WriterKind::from_name(&cli.writer) {
        Some(kind) => kind,
        None => {
            println!("Unknown '--writer {}'", cli.writer);
            return 4;
        }
    };

    let input = match fs::read(&cli.input) {
        Ok(bytes) if !bytes.is_empty() => bytes,
        _ => {
            println!(
                "Failed to read input or empty input: {}",
                cli.input.display()
            );
            return 3;
        }
    };

    let options = if cli.strict {
        ReaderOptions::strict()
    } else {
        ReaderOptions::all()
    };
    let reader = Reader::new(options);
    let parse_only = cli.parse_only || cli.strict;

    let root = match parse_stage(&reader, &input, "input") {
        Ok(root) => root,
        Err(code) => return code,
    };
    if parse_only {
        return 0;
    }

    let base = match base_path(&cli.input) {
        Some(base) => base,
        None => {
            println!(
                "Bad input path: {} does not end with '.json'",
                cli.input.display()
            );
            return 3;
        }
    };

    if let Err(code) = write_file(&format!("{base}.actual"), &dump_tree(&root)) {
        return code;
    }

    let rewritten = rewrite.render(&root);
    if let Err(code) = write_file(&format!("{base}.rewrite"), &rewritten) {
        return code;
    }

    let reparsed = match parse_stage(&reader, rewritten.as_bytes(), "rewrite") {
        Ok(root) => root,
        Err(code) => return code,
    };
    if let Err(code) = write_file(&format!("{base}.actual-rewrite"), &dump_tree(&reparsed)) {
        return code;
    }
    0
}

fn parse_stage(reader: &Reader, doc: &[u8], kind: &str) -> Result<Value, u8> {
    let report = reader.parse(doc);
    if report.is_success() {
        Ok(report.root)
    } else {
        println!(
            "Failed to parse {} file:\n{}",
            kind,
            report.formatted_messages(doc)
        );
        Err(1)
    }
}

fn base_path(input: &Path) -> Option<String> {
    let text = input.to_string_lossy();
    text.strip_suffix(".json").map(str::to_string)
}

fn write_file(path: &str, contents: &str) -> Result<(), u8> {
    fs::write(path, contents).map_err(|_| {
        println!("Failed to create output file: {path}");
        2
    })
}

enum WriterKind {
    Styled,
    StyledStream,
    Builder,
}

impl WriterKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "styled" => Some(WriterKind::Styled),
            "styled-stream" => Some(WriterKind::StyledStream),
            "builder" => Some(WriterKind::Builder),
            _ => None,
        }
    }

    fn render(&self, root: &Value) -> String {
        match self {
            WriterKind::Styled => StyledWriter::new().write(root),
            WriterKind::StyledStream => {
                let mut out = Vec::new();
                let _ = StyledStreamWriter::default().write(root, &mut out);
                String::from_utf8_lossy(&out).into_owned()
            }
            WriterKind::Builder => {
                write_string(&WriterBuilder::new(), root).unwrap_or_default()
            }
        }
    }
}

/// Render the tree as sorted `path=value` lines, the dump format the
/// expectation files diff against.
fn dump_tree(root: &Value) -> String {
    let mut out = String::new();
    dump_value(&mut out, root, ".");
    out
}

fn dump_value(out: &mut String, value: &Value, path: &str) {
    if let Some(comment) = value.comment(CommentPlacement::Before) {
        out.push_str(comment);
        out.push('\n');
    }
    match value.tag() {
        ValueTag::Null => out.push_str(&format!("{path}=null\n")),
        ValueTag::Int | ValueTag::Uint | ValueTag::Bool => {
            let text = value.as_string().unwrap_or_default();
            out.push_str(&format!("{path}={text}\n"));
        }
        ValueTag::Real => {
            // The dump compares against 16-digit expectation files; the
            // writers themselves keep 17 digits.
            let text = codec::format_double_with_precision(
                value.as_double().unwrap_or_default(),
                16,
            );
            out.push_str(&format!("{path}={text}\n"));
        }
        ValueTag::String => {
            let text = value.as_string().unwrap_or_default();
            out.push_str(&format!("{path}=\"{text}\"\n"));
        }
        ValueTag::Array => {
            out.push_str(&format!("{path}=[]\n"));
            for index in 0..value.size() {
                dump_value(out, &value[index], &format!("{path}[{index}]"));
            }
        }
        ValueTag::Object => {
            out.push_str(&format!("{path}={{}}\n"));
            let mut names = value.member_names().unwrap_or_default();
            names.sort();
            let suffix = if path.ends_with('.') { "" } else { "." };
            for name in names {
                dump_value(out, &value[name.as_str()], &format!("{path}{suffix}{name}"));
            }
        }
    }
    if let Some(comment) = value.comment(CommentPlacement::After) {
        out.push_str(comment);
        out.push('\n');
    }
}
