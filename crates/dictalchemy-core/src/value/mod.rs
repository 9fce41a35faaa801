
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// DictMap
///
/// The plain mapping produced by `asdict` and consumed by `fromdict`.
/// Keys are kept sorted, which fixes the order `fromdict` applies them in.
///

pub type DictMap = BTreeMap<String, Value>;

///
/// Value
///
/// Dynamically typed attribute value carried by a `DictMap`.
///
/// Serializes as plain JSON-shaped data (no variant tags), so a mapping
/// round-trips through `serde_json` unchanged. Every integer that fits in
/// `i64` is carried as `Int`; `Uint` only holds values above `i64::MAX`,
/// matching the variant `serde_json` decodes back into.
///
/// Null    → the attribute is `Option::None` or an empty singular relation.
/// List    → ordered; used for collection relations and list attributes.
/// Map     → nested plain mapping (followed relations).
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float64(f64),
    Text(String),
    List(Vec<Self>),
    Map(DictMap),
}

impl Value {
    /// Stable, human-readable name of the variant (diagnostics only).
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float64(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&DictMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&Vec<Self>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Plain-mapping coercion: only `Map` values are mappings.
    ///
    /// On failure the original value is handed back untouched.
    pub fn into_map(self) -> Result<DictMap, Self> {
        match self {
            Self::Map(map) => Ok(map),
            other => Err(other),
        }
    }
}

// impl_value_from
macro_rules! impl_value_from {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_value_from!(
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    f32 => Float64,
    f64 => Float64,
    String => Text,
    DictMap => Map,
);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self::Uint(v), Self::Int)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
