//! Typed key-value pairs attached to structured log calls.

use serde::{Serialize, Serializer};
use std::fmt::{self, Write as _};
use std::time::Duration;

/// A field value. Durations are kept typed so both encoders can render them in seconds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
}

impl Value {
    /// Plain-text rendering: strings that would break `key=value` parsing get quoted.
    pub(crate) fn write_plain(&self, out: &mut String) {
        let _ = match self {
            Self::Str(s) if needs_quoting(s) => write!(out, "{s:?}"),
            Self::Str(s) => {
                out.push_str(s);
                Ok(())
            }
            Self::Int(n) => write!(out, "{n}"),
            Self::Uint(n) => write!(out, "{n}"),
            Self::Float(n) => write!(out, "{n}"),
            Self::Bool(b) => write!(out, "{b}"),
            Self::Duration(d) => write!(out, "{}", d.as_secs_f64()),
        };
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '=' || c == '"')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_plain(&mut out);
        f.write_str(&out)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Uint(n) => serializer.serialize_u64(*n),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Duration(d) => serializer.serialize_f64(d.as_secs_f64()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Self::Duration(d)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Float(f64::from(n))
    }
}

macro_rules! value_from_int {
    ($variant:ident, $wide:ty; $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::$variant(<$wide>::from(n))
                }
            }
        )*
    };
}

value_from_int!(Int, i64; i8, i16, i32, i64);
value_from_int!(Uint, u64; u8, u16, u32, u64);

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Uint(n as u64)
    }
}

impl From<isize> for Value {
    fn from(n: isize) -> Self {
        Self::Int(n as i64)
    }
}

/// One key-value pair of a structured call.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// For types without a dedicated `Value` variant (IPs, UUIDs, errors).
    #[must_use]
    pub fn display(key: impl Into<String>, value: &impl fmt::Display) -> Self {
        Self::new(key, value.to_string())
    }
}
