//! Property-list wire format to [`Value`] conversion.
//!
//! Binary (`bplist00`) and XML encodings are accepted; the `plist` crate
//! sniffs the encoding from the leading bytes.

use super::value::{Scalar, Value};
use chrono::{DateTime, Utc};
use std::io::Cursor;
use std::time::SystemTime;
use thiserror::Error;

/// Failure to turn raw bytes into a [`Value`].
///
/// Never fatal: the file-set differ treats the side as [`Value::Absent`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("empty input")]
    Empty,

    #[error("malformed property list: {0}")]
    Malformed(#[from] plist::Error),
}

/// Decode one property list.
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    if data.is_empty() {
        return Err(DecodeError::Empty);
    }
    let raw = plist::Value::from_reader(Cursor::new(data))?;
    Ok(Value::from(raw))
}

/// Encode a value as a binary property list.
///
/// Binary is used because XML plists cannot carry UIDs. `Absent` has no wire
/// representation and yields `None`, also when nested inside a container.
#[must_use]
pub fn encode_binary(value: &Value) -> Option<Vec<u8>> {
    let raw = to_plist(value)?;
    let mut out = Vec::new();
    raw.to_writer_binary(&mut out).ok()?;
    Some(out)
}

fn to_plist(value: &Value) -> Option<plist::Value> {
    Some(match value {
        Value::Map(entries) => {
            let mut dict = plist::Dictionary::new();
            for (k, v) in entries {
                dict.insert(k.clone(), to_plist(v)?);
            }
            plist::Value::Dictionary(dict)
        }
        Value::Sequence(items) => {
            plist::Value::Array(items.iter().map(to_plist).collect::<Option<Vec<_>>>()?)
        }
        Value::Scalar(s) => match s {
            Scalar::Integer(i) => plist::Value::Integer((*i).into()),
            Scalar::Unsigned(u) => plist::Value::Integer((*u).into()),
            Scalar::Real(r) => plist::Value::Real(*r),
            Scalar::Boolean(b) => plist::Value::Boolean(*b),
            Scalar::String(s) => plist::Value::String(s.clone()),
            Scalar::Date(d) => plist::Value::Date(SystemTime::from(*d).into()),
            Scalar::Data(bytes) => plist::Value::Data(bytes.clone()),
            Scalar::Uid(u) => plist::Value::Uid(plist::Uid::new(*u)),
        },
        Value::Absent => return None,
    })
}

impl From<plist::Value> for Value {
    fn from(raw: plist::Value) -> Self {
        match raw {
            plist::Value::Dictionary(dict) => {
                Self::Map(dict.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
            plist::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            plist::Value::Integer(i) => match i.as_signed() {
                Some(signed) => Self::Scalar(Scalar::Integer(signed)),
                None => Self::Scalar(Scalar::Unsigned(i.as_unsigned().unwrap_or(u64::MAX))),
            },
            plist::Value::Real(r) => Self::Scalar(Scalar::Real(r)),
            plist::Value::Boolean(b) => Self::Scalar(Scalar::Boolean(b)),
            plist::Value::String(s) => Self::Scalar(Scalar::String(s)),
            plist::Value::Date(d) => {
                Self::Scalar(Scalar::Date(DateTime::<Utc>::from(SystemTime::from(d))))
            }
            plist::Value::Data(bytes) => Self::Scalar(Scalar::Data(bytes)),
            plist::Value::Uid(uid) => Self::Scalar(Scalar::Uid(uid.get())),
            // plist::Value is non_exhaustive; nothing else is produced by its readers
            _ => Self::Absent,
        }
    }
}
