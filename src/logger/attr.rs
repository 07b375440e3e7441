//! Structured attributes attached to log records.

use std::fmt;
use std::time::Duration;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

/// The value half of an [`Attr`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    /// Nested attributes, rendered as an object under the parent key.
    Group(Vec<Attr>),
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self::new(key, Value::Group(attrs))
    }

    /// Whether rendering would produce nothing for this attribute.
    pub fn is_empty(&self) -> bool {
        match &self.value {
            Value::Group(attrs) => attrs.iter().all(Attr::is_empty),
            _ => false,
        }
    }
}

impl<K, V> From<(K, V)> for Attr
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from((key, value): (K, V)) -> Self {
        Attr::new(key, value)
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Int(v) => write!(f, "{}", v),
            Value::Uint(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Duration(d) => write!(f, "{:?}", d),
            Value::Group(attrs) => {
                write!(f, "[")?;
                for (i, attr) in attrs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", attr)?;
                }
                write!(f, "]")
            }
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v as $cast)
                }
            }
        )*
    };
}

value_from! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    isize => Int as i64,
    u8 => Uint as u64,
    u16 => Uint as u64,
    u32 => Uint as u64,
    u64 => Uint as u64,
    usize => Uint as u64,
    f32 => Float as f64,
    f64 => Float as f64,
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(v: Vec<Attr>) -> Self {
        Value::Group(v)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Uint(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Duration(d) => serializer.collect_str(&format_args!("{:?}", d)),
            Value::Group(attrs) => AttrMap(attrs).serialize(serializer),
        }
    }
}

/// Serializes a list of attributes as one object, in order, keeping
/// duplicate keys and skipping empty groups.
pub(crate) struct AttrMap<'a>(pub(crate) &'a [Attr]);

impl Serialize for AttrMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for attr in self.0.iter().filter(|attr| !attr.is_empty()) {
            map.serialize_entry(&attr.key, &attr.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_conversion() {
        let attr: Attr = ("user", "alice").into();
        assert_eq!(attr, Attr::string("user", "alice"));

        let attr: Attr = ("attempt", 3u32).into();
        assert_eq!(attr.value, Value::Uint(3));
    }

    #[test]
    fn test_render_nested_groups() {
        let attrs = vec![
            Attr::int("status", 200),
            Attr::group("req", vec![Attr::string("method", "GET"), Attr::bool("tls", true)]),
            Attr::group("empty", vec![]),
        ];

        let json = serde_json::to_string(&AttrMap(&attrs)).unwrap();
        assert_eq!(json, r#"{"status":200,"req":{"method":"GET","tls":true}}"#);
    }

    #[test]
    fn test_group_of_empty_groups_is_empty() {
        let attr = Attr::group("outer", vec![Attr::group("inner", vec![])]);
        assert!(attr.is_empty());
    }

    #[test]
    fn test_display() {
        let attr = Attr::group("req", vec![Attr::int("id", 7), Attr::duration("took", Duration::from_millis(5))]);
        assert_eq!(attr.to_string(), "req=[id=7 took=5ms]");
    }
}
