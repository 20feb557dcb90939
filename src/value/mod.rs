//! JSON document model.
//!
//! A [`Value`] is a tagged union over the seven JSON types plus the
//! signed/unsigned integer split that keeps a number's parsed origin
//! observable for round trips. Every node carries optional attached
//! comments and the byte span of the source text it was parsed from.
//!
//! Containers own their children outright; the tree has no sharing, so
//! structural equality and serialization agree. Objects preserve
//! insertion order, and replacing an existing member keeps its original
//! position.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

use crate::codec;
use crate::error::{LogicError, LogicResult};

mod key;
mod string;

pub use key::ObjectKey;
pub use string::ByteString;

pub(crate) use key::BytesKey;

/// Variant discriminator of a [`Value`].
///
/// Declaration order is the comparison order used by `Ord` on values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueTag {
    /// `null`
    Null,
    /// Whole number from a signed source.
    Int,
    /// Whole number from an unsigned source.
    Uint,
    /// IEEE-754 double.
    Real,
    /// Byte-sequence string.
    String,
    /// `true` / `false`
    Bool,
    /// Ordered sequence.
    Array,
    /// Insertion-ordered mapping.
    Object,
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueTag::Null => "null",
            ValueTag::Int => "int",
            ValueTag::Uint => "uint",
            ValueTag::Real => "real",
            ValueTag::String => "string",
            ValueTag::Bool => "bool",
            ValueTag::Array => "array",
            ValueTag::Object => "object",
        };
        f.write_str(name)
    }
}

/// Where a comment sits relative to the value that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentPlacement {
    /// On its own line(s) before the value.
    Before = 0,
    /// On the same line, after the value.
    AfterOnSameLine = 1,
    /// On its own line after the value.
    After = 2,
}

type CommentSlots = [Option<String>; 3];

#[derive(Debug, Clone)]
pub(crate) enum ValueData {
    Null,
    Int(i64),
    Uint(u64),
    Real(f64),
    Bool(bool),
    String(ByteString),
    Array(Vec<Value>),
    Object(IndexMap<ObjectKey, Value>),
}

/// A node of a JSON document tree.
///
/// Equality, ordering, and hashing consider the payload only; attached
/// comments and source spans are carried alongside but are not part of
/// identity.
#[derive(Debug, Clone)]
pub struct Value {
    data: ValueData,
    comments: Option<Box<CommentSlots>>,
    start: usize,
    limit: usize,
}

/// Shared target of `Index` misses.
static NULL_VALUE: Value = Value::null();

impl Value {
    /// The `null` value.
    pub const fn null() -> Self {
        Value {
            data: ValueData::Null,
            comments: None,
            start: 0,
            limit: 0,
        }
    }

    /// The zero of the given variant: `null`, `0`, `0.0`, `false`, the
    /// empty string, `[]`, or `{}`.
    pub fn with_tag(tag: ValueTag) -> Self {
        let data = match tag {
            ValueTag::Null => ValueData::Null,
            ValueTag::Int => ValueData::Int(0),
            ValueTag::Uint => ValueData::Uint(0),
            ValueTag::Real => ValueData::Real(0.0),
            ValueTag::String => ValueData::String(ByteString::empty()),
            ValueTag::Bool => ValueData::Bool(false),
            ValueTag::Array => ValueData::Array(Vec::new()),
            ValueTag::Object => ValueData::Object(IndexMap::new()),
        };
        Value::from_data(data)
    }

    /// String value borrowing program-lifetime bytes; no copy is made.
    pub const fn static_str(s: &'static str) -> Self {
        Value::static_bytes(s.as_bytes())
    }

    /// Byte-string value borrowing program-lifetime bytes; no copy is made.
    pub const fn static_bytes(bytes: &'static [u8]) -> Self {
        Value {
            data: ValueData::String(ByteString::from_static(bytes)),
            comments: None,
            start: 0,
            limit: 0,
        }
    }

    pub(crate) fn from_data(data: ValueData) -> Self {
        Value {
            data,
            comments: None,
            start: 0,
            limit: 0,
        }
    }

    pub(crate) fn data(&self) -> &ValueData {
        &self.data
    }

    /// Variant discriminator.
    pub fn tag(&self) -> ValueTag {
        match self.data {
            ValueData::Null => ValueTag::Null,
            ValueData::Int(_) => ValueTag::Int,
            ValueData::Uint(_) => ValueTag::Uint,
            ValueData::Real(_) => ValueTag::Real,
            ValueData::Bool(_) => ValueTag::Bool,
            ValueData::String(_) => ValueTag::String,
            ValueData::Array(_) => ValueTag::Array,
            ValueData::Object(_) => ValueTag::Object,
        }
    }

    // ------------------------------------------------------------------
    // Type predicates
    // ------------------------------------------------------------------

    /// `true` for the `null` variant.
    pub fn is_null(&self) -> bool {
        matches!(self.data, ValueData::Null)
    }

    /// `true` for the boolean variant.
    pub fn is_bool(&self) -> bool {
        matches!(self.data, ValueData::Bool(_))
    }

    /// `true` when the value holds a whole number representable as `i32`.
    pub fn is_int(&self) -> bool {
        match self.data {
            ValueData::Int(i) => i >= i64::from(i32::MIN) && i <= i64::from(i32::MAX),
            ValueData::Uint(u) => u <= i32::MAX as u64,
            ValueData::Real(r) => {
                is_integral(r) && r >= f64::from(i32::MIN) && r <= f64::from(i32::MAX)
            }
            _ => false,
        }
    }

    /// `true` when the value holds a whole number representable as `u32`.
    pub fn is_uint(&self) -> bool {
        match self.data {
            ValueData::Int(i) => i >= 0 && i <= i64::from(u32::MAX),
            ValueData::Uint(u) => u <= u64::from(u32::MAX),
            ValueData::Real(r) => is_integral(r) && r >= 0.0 && r <= f64::from(u32::MAX),
            _ => false,
        }
    }

    /// `true` when the value holds a whole number representable as `i64`.
    pub fn is_int64(&self) -> bool {
        match self.data {
            ValueData::Int(_) => true,
            ValueData::Uint(u) => u <= i64::MAX as u64,
            // i64::MAX itself is not exactly representable as f64, hence
            // the exclusive upper bound.
            ValueData::Real(r) => is_integral(r) && r >= i64::MIN as f64 && r < i64::MAX as f64,
            _ => false,
        }
    }

    /// `true` when the value holds a whole number representable as `u64`.
    pub fn is_uint64(&self) -> bool {
        match self.data {
            ValueData::Int(i) => i >= 0,
            ValueData::Uint(_) => true,
            ValueData::Real(r) => is_integral(r) && r >= 0.0 && r < u64::MAX as f64,
            _ => false,
        }
    }

    /// `true` for integer variants, or a real with no fractional part in
    /// 64-bit range.
    pub fn is_integral(&self) -> bool {
        match self.data {
            ValueData::Int(_) | ValueData::Uint(_) => true,
            ValueData::Real(r) => is_integral(r) && r >= i64::MIN as f64 && r < u64::MAX as f64,
            _ => false,
        }
    }

    /// `true` for the real variant.
    pub fn is_double(&self) -> bool {
        matches!(self.data, ValueData::Real(_))
    }

    /// `true` for any numeric variant.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.data,
            ValueData::Int(_) | ValueData::Uint(_) | ValueData::Real(_)
        )
    }

    /// `true` for the string variant.
    pub fn is_string(&self) -> bool {
        matches!(self.data, ValueData::String(_))
    }

    /// `true` for the array variant.
    pub fn is_array(&self) -> bool {
        matches!(self.data, ValueData::Array(_))
    }

    /// `true` for the object variant.
    pub fn is_object(&self) -> bool {
        matches!(self.data, ValueData::Object(_))
    }

    /// Whether a coercion to `target` would succeed for the current
    /// payload.
    pub fn is_convertible_to(&self, target: ValueTag) -> bool {
        match target {
            ValueTag::Null => match &self.data {
                ValueData::Null => true,
                ValueData::Bool(b) => !b,
                ValueData::Int(i) => *i == 0,
                ValueData::Uint(u) => *u == 0,
                ValueData::Real(r) => *r == 0.0,
                ValueData::String(s) => s.is_empty(),
                ValueData::Array(a) => a.is_empty(),
                ValueData::Object(o) => o.is_empty(),
            },
            ValueTag::Bool => self.is_null() || self.is_numeric() || self.is_bool(),
            ValueTag::Int => match self.data {
                ValueData::Null | ValueData::Bool(_) | ValueData::Int(_) => true,
                ValueData::Uint(u) => u <= i64::MAX as u64,
                ValueData::Real(r) => {
                    is_integral(r) && r >= f64::from(i32::MIN) && r <= f64::from(i32::MAX)
                }
                _ => false,
            },
            ValueTag::Uint => match self.data {
                ValueData::Null | ValueData::Bool(_) | ValueData::Uint(_) => true,
                ValueData::Int(i) => i >= 0,
                ValueData::Real(r) => is_integral(r) && r >= 0.0 && r <= f64::from(u32::MAX),
                _ => false,
            },
            ValueTag::Real => self.is_null() || self.is_numeric() || self.is_bool(),
            ValueTag::String => {
                self.is_null() || self.is_numeric() || self.is_bool() || self.is_string()
            }
            ValueTag::Array => self.is_null() || self.is_array(),
            ValueTag::Object => self.is_null() || self.is_object(),
        }
    }

    // ------------------------------------------------------------------
    // Coercion
    // ------------------------------------------------------------------

    fn not_convertible(&self, target: ValueTag) -> LogicError {
        LogicError::NotConvertible {
            actual: self.tag(),
            target,
        }
    }

    /// Coerce to bool: `null` is `false`, numbers compare against zero.
    pub fn as_bool(&self) -> LogicResult<bool> {
        match self.data {
            ValueData::Null => Ok(false),
            ValueData::Bool(b) => Ok(b),
            ValueData::Int(i) => Ok(i != 0),
            ValueData::Uint(u) => Ok(u != 0),
            ValueData::Real(r) => Ok(r != 0.0),
            _ => Err(self.not_convertible(ValueTag::Bool)),
        }
    }

    /// Coerce to `i32`, truncating reals toward zero.
    pub fn as_int(&self) -> LogicResult<i32> {
        match self.data {
            ValueData::Null => Ok(0),
            ValueData::Bool(b) => Ok(i32::from(b)),
            ValueData::Int(i) => i32::try_from(i).map_err(|_| self.not_convertible(ValueTag::Int)),
            ValueData::Uint(u) => i32::try_from(u).map_err(|_| self.not_convertible(ValueTag::Int)),
            ValueData::Real(r) => {
                let t = r.trunc();
                if t >= f64::from(i32::MIN) && t <= f64::from(i32::MAX) {
                    Ok(t as i32)
                } else {
                    Err(self.not_convertible(ValueTag::Int))
                }
            }
            _ => Err(self.not_convertible(ValueTag::Int)),
        }
    }

    /// Coerce to `u32`, truncating reals toward zero.
    pub fn as_uint(&self) -> LogicResult<u32> {
        match self.data {
            ValueData::Null => Ok(0),
            ValueData::Bool(b) => Ok(u32::from(b)),
            ValueData::Int(i) => u32::try_from(i).map_err(|_| self.not_convertible(ValueTag::Uint)),
            ValueData::Uint(u) => {
                u32::try_from(u).map_err(|_| self.not_convertible(ValueTag::Uint))
            }
            ValueData::Real(r) => {
                let t = r.trunc();
                if t >= 0.0 && t <= f64::from(u32::MAX) {
                    Ok(t as u32)
                } else {
                    Err(self.not_convertible(ValueTag::Uint))
                }
            }
            _ => Err(self.not_convertible(ValueTag::Uint)),
        }
    }

    /// Coerce to `i64`, truncating reals toward zero.
    pub fn as_int64(&self) -> LogicResult<i64> {
        match self.data {
            ValueData::Null => Ok(0),
            ValueData::Bool(b) => Ok(i64::from(b)),
            ValueData::Int(i) => Ok(i),
            ValueData::Uint(u) => i64::try_from(u).map_err(|_| self.not_convertible(ValueTag::Int)),
            ValueData::Real(r) => {
                let t = r.trunc();
                // 2^63 as f64 is exact; values at or above it overflow.
                if t >= i64::MIN as f64 && t < i64::MAX as f64 {
                    Ok(t as i64)
                } else {
                    Err(self.not_convertible(ValueTag::Int))
                }
            }
            _ => Err(self.not_convertible(ValueTag::Int)),
        }
    }

    /// Coerce to `u64`, truncating reals toward zero.
    pub fn as_uint64(&self) -> LogicResult<u64> {
        match self.data {
            ValueData::Null => Ok(0),
            ValueData::Bool(b) => Ok(u64::from(b)),
            ValueData::Int(i) => u64::try_from(i).map_err(|_| self.not_convertible(ValueTag::Uint)),
            ValueData::Uint(u) => Ok(u),
            ValueData::Real(r) => {
                let t = r.trunc();
                if t >= 0.0 && t < u64::MAX as f64 {
                    Ok(t as u64)
                } else {
                    Err(self.not_convertible(ValueTag::Uint))
                }
            }
            _ => Err(self.not_convertible(ValueTag::Uint)),
        }
    }

    /// Coerce to the widest supported signed integer.
    pub fn as_largest_int(&self) -> LogicResult<i64> {
        self.as_int64()
    }

    /// Coerce to the widest supported unsigned integer.
    pub fn as_largest_uint(&self) -> LogicResult<u64> {
        self.as_uint64()
    }

    /// Coerce to `f64`.
    pub fn as_double(&self) -> LogicResult<f64> {
        match self.data {
            ValueData::Null => Ok(0.0),
            ValueData::Bool(b) => Ok(f64::from(b)),
            ValueData::Int(i) => Ok(i as f64),
            ValueData::Uint(u) => Ok(u as f64),
            ValueData::Real(r) => Ok(r),
            _ => Err(self.not_convertible(ValueTag::Real)),
        }
    }

    /// Coerce to `f32`.
    pub fn as_float(&self) -> LogicResult<f32> {
        self.as_double().map(|d| d as f32)
    }

    /// Coerce to text: the canonical writer formatting for numbers,
    /// `"true"`/`"false"` for booleans, the empty string for `null`, and
    /// a lossy UTF-8 view of string bytes. Containers do not coerce.
    pub fn as_string(&self) -> LogicResult<String> {
        match &self.data {
            ValueData::Null => Ok(String::new()),
            ValueData::Bool(b) => Ok(if *b { "true" } else { "false" }.to_string()),
            ValueData::Int(i) => Ok(i.to_string()),
            ValueData::Uint(u) => Ok(u.to_string()),
            ValueData::Real(r) => Ok(codec::format_double(*r)),
            ValueData::String(s) => Ok(s.to_string_lossy().into_owned()),
            _ => Err(self.not_convertible(ValueTag::String)),
        }
    }

    /// Strict UTF-8 view of a string payload.
    pub fn as_str(&self) -> LogicResult<&str> {
        match &self.data {
            ValueData::String(s) => std::str::from_utf8(s.as_bytes())
                .map_err(|_| self.not_convertible(ValueTag::String)),
            _ => Err(self.not_convertible(ValueTag::String)),
        }
    }

    /// Raw bytes of a string payload.
    pub fn as_bytes(&self) -> LogicResult<&[u8]> {
        match &self.data {
            ValueData::String(s) => Ok(s.as_bytes()),
            _ => Err(LogicError::WrongType {
                op: "as_bytes",
                expected: ValueTag::String,
                actual: self.tag(),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Container operations
    // ------------------------------------------------------------------

    /// Element or member count; zero for scalars and `null`.
    pub fn size(&self) -> usize {
        match &self.data {
            ValueData::Array(a) => a.len(),
            ValueData::Object(o) => o.len(),
            _ => 0,
        }
    }

    /// `true` for `null` and for empty containers; `false` for scalars.
    pub fn is_empty(&self) -> bool {
        match &self.data {
            ValueData::Null => true,
            ValueData::Array(a) => a.is_empty(),
            ValueData::Object(o) => o.is_empty(),
            _ => false,
        }
    }

    /// Remove all children of a container; a no-op on `null`.
    pub fn clear(&mut self) -> LogicResult<()> {
        match &mut self.data {
            ValueData::Null => Ok(()),
            ValueData::Array(a) => {
                a.clear();
                Ok(())
            }
            ValueData::Object(o) => {
                o.clear();
                Ok(())
            }
            _ => Err(LogicError::WrongType {
                op: "clear",
                expected: ValueTag::Array,
                actual: self.tag(),
            }),
        }
    }

    /// Resize an array: growing appends `null`, shrinking truncates.
    /// `null` converts to an array first.
    pub fn resize(&mut self, len: usize) -> LogicResult<()> {
        let arr = self.make_array("resize")?;
        if len <= arr.len() {
            arr.truncate(len);
        } else {
            arr.resize_with(len, Value::null);
        }
        Ok(())
    }

    /// Append to an array (`null` converts first) and return the new slot.
    pub fn append(&mut self, value: Value) -> LogicResult<&mut Value> {
        let arr = self.make_array("append")?;
        arr.push(value);
        let last = arr.len() - 1;
        Ok(&mut arr[last])
    }

    /// Element at `index` of an array.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match &self.data {
            ValueData::Array(a) => a.get(index),
            _ => None,
        }
    }

    /// Mutable element at `index` of an array.
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Value> {
        match &mut self.data {
            ValueData::Array(a) => a.get_mut(index),
            _ => None,
        }
    }

    /// Remove the element at `index`, shifting the rest left. Returns the
    /// removed child, or `None` when out of bounds or not an array.
    pub fn remove_index(&mut self, index: usize) -> Option<Value> {
        match &mut self.data {
            ValueData::Array(a) if index < a.len() => Some(a.remove(index)),
            _ => None,
        }
    }

    /// Member with the given key.
    pub fn member(&self, key: &str) -> Option<&Value> {
        match &self.data {
            ValueData::Object(o) => o.get(&BytesKey(key.as_bytes())),
            _ => None,
        }
    }

    /// Mutable member with the given key.
    pub fn member_mut(&mut self, key: &str) -> Option<&mut Value> {
        match &mut self.data {
            ValueData::Object(o) => o.get_mut(&BytesKey(key.as_bytes())),
            _ => None,
        }
    }

    /// Member with the given key, or a clone of `default` when absent.
    pub fn get(&self, key: &str, default: Value) -> Value {
        self.member(key).cloned().unwrap_or(default)
    }

    /// `true` when an object has a member with the given key.
    pub fn is_member(&self, key: &str) -> bool {
        self.member(key).is_some()
    }

    /// Member names in insertion order (numeric-dialect keys render as
    /// decimal). `null` yields an empty list.
    pub fn member_names(&self) -> LogicResult<Vec<String>> {
        match &self.data {
            ValueData::Null => Ok(Vec::new()),
            ValueData::Object(o) => Ok(o.keys().map(ObjectKey::display_name).collect()),
            _ => Err(LogicError::WrongType {
                op: "member_names",
                expected: ValueTag::Object,
                actual: self.tag(),
            }),
        }
    }

    /// Remove a member, returning the removed child and preserving the
    /// order of the remaining members. `None` when absent or not an
    /// object.
    pub fn remove_member(&mut self, key: &str) -> Option<Value> {
        match &mut self.data {
            ValueData::Object(o) => o.shift_remove(&BytesKey(key.as_bytes())),
            _ => None,
        }
    }

    /// Insert or replace a member. Replacement keeps the key's original
    /// position. `null` converts to an object first.
    pub fn insert_member(&mut self, key: ObjectKey, value: Value) -> LogicResult<()> {
        let map = self.make_object("insert_member")?;
        map.insert(key, value);
        Ok(())
    }

    pub(crate) fn contains_key(&self, key: &ObjectKey) -> bool {
        match &self.data {
            ValueData::Object(o) => o.contains_key(key),
            _ => false,
        }
    }

    pub(crate) fn object_map(&self) -> Option<&IndexMap<ObjectKey, Value>> {
        match &self.data {
            ValueData::Object(o) => Some(o),
            _ => None,
        }
    }

    pub(crate) fn object_map_mut(&mut self) -> Option<&mut IndexMap<ObjectKey, Value>> {
        match &mut self.data {
            ValueData::Object(o) => Some(o),
            _ => None,
        }
    }

    pub(crate) fn array_slice(&self) -> Option<&[Value]> {
        match &self.data {
            ValueData::Array(a) => Some(a),
            _ => None,
        }
    }

    pub(crate) fn array_vec_mut(&mut self) -> Option<&mut Vec<Value>> {
        match &mut self.data {
            ValueData::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Most recently inserted child of a container, if any.
    pub(crate) fn last_child_mut(&mut self) -> Option<&mut Value> {
        match &mut self.data {
            ValueData::Array(a) => a.last_mut(),
            ValueData::Object(o) => {
                let n = o.len();
                if n == 0 {
                    None
                } else {
                    o.get_index_mut(n - 1).map(|(_, v)| v)
                }
            }
            _ => None,
        }
    }

    fn make_array(&mut self, op: &'static str) -> LogicResult<&mut Vec<Value>> {
        if self.is_null() {
            self.data = ValueData::Array(Vec::new());
        }
        let actual = self.tag();
        match &mut self.data {
            ValueData::Array(a) => Ok(a),
            _ => Err(LogicError::WrongType {
                op,
                expected: ValueTag::Array,
                actual,
            }),
        }
    }

    fn make_object(&mut self, op: &'static str) -> LogicResult<&mut IndexMap<ObjectKey, Value>> {
        if self.is_null() {
            self.data = ValueData::Object(IndexMap::new());
        }
        let actual = self.tag();
        match &mut self.data {
            ValueData::Object(o) => Ok(o),
            _ => Err(LogicError::WrongType {
                op,
                expected: ValueTag::Object,
                actual,
            }),
        }
    }

    // ------------------------------------------------------------------
    // Comments and spans
    // ------------------------------------------------------------------

    /// Attach a comment, replacing any previous one at the same
    /// placement. The text is stored verbatim including its `//` or
    /// `/* */` delimiters; trailing newlines are stripped.
    pub fn set_comment(&mut self, text: impl Into<String>, placement: CommentPlacement) {
        let mut text = text.into();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        let slots = self.comments.get_or_insert_with(Default::default);
        slots[placement as usize] = Some(text);
    }

    /// Whether a comment is attached at the given placement.
    pub fn has_comment(&self, placement: CommentPlacement) -> bool {
        self.comment(placement).is_some()
    }

    /// The comment at the given placement, if any.
    pub fn comment(&self, placement: CommentPlacement) -> Option<&str> {
        self.comments
            .as_ref()
            .and_then(|slots| slots[placement as usize].as_deref())
    }

    pub(crate) fn has_any_comment(&self) -> bool {
        self.comments
            .as_ref()
            .is_some_and(|slots| slots.iter().any(Option::is_some))
    }

    /// Byte offset of the first source byte; 0 for programmatic values.
    pub fn offset_start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last source byte; 0 for programmatic
    /// values.
    pub fn offset_limit(&self) -> usize {
        self.limit
    }

    /// Record the source span of this node.
    pub fn set_offsets(&mut self, start: usize, limit: usize) {
        self.start = start;
        self.limit = limit;
    }

    /// Exchange payload and comments with `other`, leaving both values'
    /// source spans in place.
    pub fn swap_payload(&mut self, other: &mut Value) {
        std::mem::swap(&mut self.data, &mut other.data);
        std::mem::swap(&mut self.comments, &mut other.comments);
    }

    /// Exchange everything with `other`, spans included.
    pub fn swap(&mut self, other: &mut Value) {
        std::mem::swap(self, other);
    }
}

fn is_integral(r: f64) -> bool {
    r.is_finite() && r.trunc() == r
}

impl Default for Value {
    fn default() -> Self {
        Value::null()
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::from_data(ValueData::Int(i64::from(v)))
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::from_data(ValueData::Uint(u64::from(v)))
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::from_data(ValueData::Real(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::from_data(ValueData::Real(f64::from(v)))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::from_data(ValueData::Bool(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::from_data(ValueData::String(ByteString::from(v)))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::from_data(ValueData::String(ByteString::from(v)))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::from_data(ValueData::String(ByteString::from(v)))
    }
}

impl From<ByteString> for Value {
    fn from(v: ByteString) -> Self {
        Value::from_data(ValueData::String(v))
    }
}

// ----------------------------------------------------------------------
// Equality, ordering, hashing
//
// Payload only; comments and spans are not identity. Reals use the IEEE
// total order so that equality is reflexive and the order total.
// ----------------------------------------------------------------------

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag().cmp(&other.tag()).then_with(|| {
            match (&self.data, &other.data) {
                (ValueData::Null, ValueData::Null) => Ordering::Equal,
                (ValueData::Int(a), ValueData::Int(b)) => a.cmp(b),
                (ValueData::Uint(a), ValueData::Uint(b)) => a.cmp(b),
                (ValueData::Real(a), ValueData::Real(b)) => a.total_cmp(b),
                (ValueData::Bool(a), ValueData::Bool(b)) => a.cmp(b),
                (ValueData::String(a), ValueData::String(b)) => a.cmp(b),
                (ValueData::Array(a), ValueData::Array(b)) => {
                    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
                }
                (ValueData::Object(a), ValueData::Object(b)) => a
                    .len()
                    .cmp(&b.len())
                    .then_with(|| a.iter().cmp(b.iter())),
                // Tags already compared equal.
                _ => Ordering::Equal,
            }
        })
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.tag() as u8);
        match &self.data {
            ValueData::Null => {}
            ValueData::Int(i) => i.hash(state),
            ValueData::Uint(u) => u.hash(state),
            ValueData::Real(r) => r.to_bits().hash(state),
            ValueData::Bool(b) => b.hash(state),
            ValueData::String(s) => s.hash(state),
            ValueData::Array(a) => a.hash(state),
            ValueData::Object(o) => {
                state.write_usize(o.len());
                for (k, v) in o {
                    k.hash(state);
                    v.hash(state);
                }
            }
        }
    }
}

// ----------------------------------------------------------------------
// Index sugar
//
// Shared indexing resolves misses (and wrong variants) to a shared null;
// mutable indexing creates missing slots and panics on a wrong variant.
// The fallible API (`member`, `get_index`, `insert_member`, `append`) is
// the non-panicking form.
// ----------------------------------------------------------------------

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get_index(index).unwrap_or(&NULL_VALUE)
    }
}

#[allow(clippy::panic)]
impl IndexMut<usize> for Value {
    /// Grows the array with `null` up to `index`. Panics when the value
    /// is neither `null` nor an array.
    fn index_mut(&mut self, index: usize) -> &mut Value {
        let arr = match self.make_array("index_mut") {
            Ok(arr) => arr,
            Err(e) => panic!("{e}"),
        };
        while arr.len() <= index {
            arr.push(Value::null());
        }
        &mut arr[index]
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.member(key).unwrap_or(&NULL_VALUE)
    }
}

#[allow(clippy::panic)]
impl IndexMut<&str> for Value {
    /// Inserts a `null` member on miss. Panics when the value is neither
    /// `null` nor an object.
    fn index_mut(&mut self, key: &str) -> &mut Value {
        let map = match self.make_object("index_mut") {
            Ok(map) => map,
            Err(e) => panic!("{e}"),
        };
        map.entry(ObjectKey::from(key)).or_insert_with(Value::null)
    }
}
