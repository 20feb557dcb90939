//! Settings-driven reader and writer construction.
//!
//! Each builder holds its configuration as a JSON object, so the settings
//! surface can grow without breaking callers: unknown keys are tolerated
//! at construction (defaults apply) and surfaced by [`validate`].
//! `new_reader`/`new_writer` snapshot the settings into an immutable
//! policy.
//!
//! [`validate`]: ReaderBuilder::validate

use std::ops::{Index, IndexMut};

use crate::error::{LogicError, LogicResult};
use crate::reader::{Reader, ReaderOptions};
use crate::value::{Value, ValueTag};
use crate::writer::{CommentStyle, StreamWriter};

const READER_KEYS: &[&str] = &[
    "collectComments",
    "allowComments",
    "allowTrailingCommas",
    "strictRoot",
    "allowDroppedNullPlaceholders",
    "allowNumericKeys",
    "allowSingleQuotes",
    "stackLimit",
    "failIfExtra",
    "rejectDupKeys",
    "allowSpecialFloats",
];

const WRITER_KEYS: &[&str] = &[
    "indentation",
    "commentStyle",
    "enableYAMLCompatibility",
    "dropNullPlaceholders",
];

fn unknown_keys(settings: &Value, recognized: &[&str]) -> Result<(), Value> {
    let mut unknown = Value::with_tag(ValueTag::Object);
    if let Some(map) = settings.object_map() {
        for (key, value) in map {
            if !recognized.contains(&key.display_name().as_str()) {
                if let Some(out) = unknown.object_map_mut() {
                    out.insert(key.clone(), value.clone());
                }
            }
        }
    }
    if unknown.size() == 0 {
        Ok(())
    } else {
        Err(unknown)
    }
}

fn bool_setting(settings: &Value, key: &str) -> LogicResult<bool> {
    settings[key]
        .as_bool()
        .map_err(|_| LogicError::InvalidSetting(format!("'{key}' must be a boolean")))
}

fn string_setting(settings: &Value, key: &str) -> LogicResult<String> {
    settings[key]
        .as_string()
        .map_err(|_| LogicError::InvalidSetting(format!("'{key}' must be a string")))
}

fn uint_setting(settings: &Value, key: &str) -> LogicResult<usize> {
    let value = settings[key]
        .as_uint64()
        .map_err(|_| LogicError::InvalidSetting(format!("'{key}' must be an unsigned integer")))?;
    usize::try_from(value)
        .map_err(|_| LogicError::InvalidSetting(format!("'{key}' is out of range")))
}

/// Builds [`Reader`]s from a settings object.
#[derive(Debug, Clone)]
pub struct ReaderBuilder {
    settings: Value,
}

impl ReaderBuilder {
    /// Builder with default settings (all relaxations of the permissive
    /// dialect).
    pub fn new() -> Self {
        let mut settings = Value::with_tag(ValueTag::Object);
        Self::set_defaults(&mut settings);
        ReaderBuilder { settings }
    }

    /// Write the default value of every recognized key into `settings`.
    pub fn set_defaults(settings: &mut Value) {
        settings["collectComments"] = Value::from(true);
        settings["allowComments"] = Value::from(true);
        settings["allowTrailingCommas"] = Value::from(false);
        settings["strictRoot"] = Value::from(false);
        settings["allowDroppedNullPlaceholders"] = Value::from(false);
        settings["allowNumericKeys"] = Value::from(false);
        settings["allowSingleQuotes"] = Value::from(false);
        settings["stackLimit"] = Value::from(1000u32);
        settings["failIfExtra"] = Value::from(false);
        settings["rejectDupKeys"] = Value::from(false);
        settings["allowSpecialFloats"] = Value::from(false);
    }

    /// Overwrite `settings` with the strictly conforming preset.
    pub fn strict_mode(settings: &mut Value) {
        settings["allowComments"] = Value::from(false);
        settings["allowTrailingCommas"] = Value::from(false);
        settings["strictRoot"] = Value::from(true);
        settings["allowDroppedNullPlaceholders"] = Value::from(false);
        settings["allowNumericKeys"] = Value::from(false);
        settings["allowSingleQuotes"] = Value::from(false);
        settings["stackLimit"] = Value::from(1000u32);
        settings["failIfExtra"] = Value::from(true);
        settings["rejectDupKeys"] = Value::from(true);
        settings["allowSpecialFloats"] = Value::from(false);
    }

    /// The settings object.
    pub fn settings(&self) -> &Value {
        &self.settings
    }

    /// `Ok` when every key is recognized; `Err` carries the unknown
    /// subset as an object. Construction still proceeds with defaults
    /// for unknown keys.
    pub fn validate(&self) -> Result<(), Value> {
        unknown_keys(&self.settings, READER_KEYS)
    }

    /// Snapshot the settings into a [`Reader`]. Fails when a recognized
    /// key holds an unusable value.
    pub fn new_reader(&self) -> LogicResult<Reader> {
        let s = &self.settings;
        let options = ReaderOptions {
            allow_comments: bool_setting(s, "allowComments")?,
            collect_comments: bool_setting(s, "collectComments")?,
            strict_root: bool_setting(s, "strictRoot")?,
            allow_dropped_null_placeholders: bool_setting(s, "allowDroppedNullPlaceholders")?,
            allow_numeric_keys: bool_setting(s, "allowNumericKeys")?,
            allow_single_quotes: bool_setting(s, "allowSingleQuotes")?,
            allow_trailing_commas: bool_setting(s, "allowTrailingCommas")?,
            stack_limit: uint_setting(s, "stackLimit")?,
            fail_if_extra: bool_setting(s, "failIfExtra")?,
            reject_dup_keys: bool_setting(s, "rejectDupKeys")?,
            allow_special_floats: bool_setting(s, "allowSpecialFloats")?,
        };
        Ok(Reader::new(options))
    }
}

impl Default for ReaderBuilder {
    fn default() -> Self {
        ReaderBuilder::new()
    }
}

impl Index<&str> for ReaderBuilder {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        &self.settings[key]
    }
}

impl IndexMut<&str> for ReaderBuilder {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        &mut self.settings[key]
    }
}

/// Builds [`StreamWriter`]s from a settings object.
#[derive(Debug, Clone)]
pub struct WriterBuilder {
    settings: Value,
}

impl WriterBuilder {
    /// Builder with default settings: tab indentation, comments kept,
    /// strict JSON output.
    pub fn new() -> Self {
        let mut settings = Value::with_tag(ValueTag::Object);
        Self::set_defaults(&mut settings);
        WriterBuilder { settings }
    }

    /// Write the default value of every recognized key into `settings`.
    pub fn set_defaults(settings: &mut Value) {
        settings["commentStyle"] = Value::from("All");
        settings["indentation"] = Value::from("\t");
        settings["enableYAMLCompatibility"] = Value::from(false);
        settings["dropNullPlaceholders"] = Value::from(false);
    }

    /// The settings object.
    pub fn settings(&self) -> &Value {
        &self.settings
    }

    /// `Ok` when every key is recognized; `Err` carries the unknown
    /// subset as an object.
    pub fn validate(&self) -> Result<(), Value> {
        unknown_keys(&self.settings, WRITER_KEYS)
    }

    /// Snapshot the settings into a [`StreamWriter`].
    pub fn new_writer(&self) -> LogicResult<StreamWriter> {
        let s = &self.settings;
        let indentation = string_setting(s, "indentation")?;
        let comment_style = match string_setting(s, "commentStyle")?.as_str() {
            "All" => CommentStyle::All,
            "None" => CommentStyle::None,
            other => {
                return Err(LogicError::InvalidSetting(format!(
                    "commentStyle must be 'All' or 'None', got '{other}'"
                )))
            }
        };
        let yaml = bool_setting(s, "enableYAMLCompatibility")?;
        let drop_nulls = bool_setting(s, "dropNullPlaceholders")?;
        let colon = if yaml {
            ": "
        } else if indentation.is_empty() {
            ":"
        } else {
            " : "
        };
        let null_symbol = if drop_nulls { "" } else { "null" };
        Ok(StreamWriter::with_settings(
            indentation,
            comment_style,
            colon.to_string(),
            null_symbol.to_string(),
            String::new(),
        ))
    }
}

impl Default for WriterBuilder {
    fn default() -> Self {
        WriterBuilder::new()
    }
}

impl Index<&str> for WriterBuilder {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        &self.settings[key]
    }
}

impl IndexMut<&str> for WriterBuilder {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        &mut self.settings[key]
    }
}
