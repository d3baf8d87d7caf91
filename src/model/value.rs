//! Generic decoded property-list values.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded property-list node.
///
/// Maps keep their decode order, which is the order the comparator visits
/// keys in. `Absent` stands in for a side that has no decodable value at all
/// (missing file, unreadable file, malformed bytes, missing map key).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Map(IndexMap<String, Value>),
    Sequence(Vec<Value>),
    Scalar(Scalar),
    Absent,
}

/// Leaf values.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Real(f64),
    Boolean(bool),
    String(String),
    Date(DateTime<Utc>),
    Data(Vec<u8>),
    /// Keyed-archive object reference
    Uid(u64),
}

/// Fieldless tag for every [`Value`] shape and scalar kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Map,
    Sequence,
    Integer,
    Unsigned,
    Real,
    Boolean,
    String,
    Date,
    Data,
    Uid,
    Absent,
}

impl ValueKind {
    /// Name used in rendered reports, following plist element names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Map => "dictionary",
            Self::Sequence => "array",
            Self::Integer => "integer",
            Self::Unsigned => "unsigned",
            Self::Real => "real",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Date => "date",
            Self::Data => "data",
            Self::Uid => "uid",
            Self::Absent => "absent",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Scalar {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Unsigned(_) => ValueKind::Unsigned,
            Self::Real(_) => ValueKind::Real,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::String(_) => ValueKind::String,
            Self::Date(_) => ValueKind::Date,
            Self::Data(_) => ValueKind::Data,
            Self::Uid(_) => ValueKind::Uid,
        }
    }

    /// Exact equality of two scalars of the same kind.
    ///
    /// Reals compare by bit pattern: no epsilon, `NaN` equals itself and
    /// `0.0` differs from `-0.0`.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Real(a), Self::Real(b)) => a.to_bits() == b.to_bits(),
            _ => self == other,
        }
    }

    fn fmt_with(&self, f: &mut fmt::Formatter<'_>, quote_strings: bool) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Unsigned(u) => write!(f, "{u}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(s) if quote_strings => write!(f, "{s:?}"),
            Self::String(s) => f.write_str(s),
            Self::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Data(bytes) => {
                f.write_str("<")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                f.write_str(">")
            }
            Self::Uid(u) => write!(f, "UID({u})"),
        }
    }
}

impl Value {
    /// Build a map from `(key, value)` pairs, keeping their order.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Self)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn sequence(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Map(_) => ValueKind::Map,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Scalar(s) => s.kind(),
            Self::Absent => ValueKind::Absent,
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Whether this is a map or sequence.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Map(_) | Self::Sequence(_))
    }

    fn fmt_with(&self, f: &mut fmt::Formatter<'_>, quote_strings: bool) -> fmt::Result {
        match self {
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: ")?;
                    v.fmt_with(f, true)?;
                }
                f.write_str("}")
            }
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    v.fmt_with(f, true)?;
                }
                f.write_str("]")
            }
            Self::Scalar(s) => s.fmt_with(f, quote_strings),
            Self::Absent => f.write_str("<absent>"),
        }
    }
}

/// Top-level strings print bare; strings nested in containers are quoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, false)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Scalar(Scalar::Integer(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Scalar(Scalar::Integer(i64::from(i)))
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Self::Scalar(Scalar::Real(r))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Boolean(b))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::String(s))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Scalar(Scalar::Date(d))
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Scalar(Scalar::Data(bytes))
    }
}
