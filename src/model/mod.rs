//! Generic value model for decoded property lists.
//!
//! Every `.plist` file, whatever its encoding, is decoded into a [`Value`]
//! tree before comparison. The model knows nothing about what a given
//! preference domain means; it only distinguishes maps, sequences and the
//! scalar kinds the wire format can carry.
//!
//! ```ignore
//! use plist_diff::model::{decode, Value};
//!
//! let value = decode(&std::fs::read("com.apple.dock.plist")?)
//!     .unwrap_or(Value::Absent);
//! ```

mod decode;
mod value;

pub use decode::{DecodeError, decode, encode_binary};
pub use value::{Scalar, Value, ValueKind};
