mod entity;
mod relation;

pub use entity::*;
pub use relation::*;

use crate::{
    error::AttrError,
    value::{DictMap, Value},
};
use std::any::type_name;

///
/// FieldValue
///
/// Conversion boundary between typed struct fields and `Value`.
///
/// `from_value` performs plain assignment only: integers accept both the
/// signed and unsigned representation when the number fits, floats also take
/// any integer, nothing else is coerced.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

/// Store `value` into `slot` if it has the slot's shape.
pub fn assign<T: FieldValue>(slot: &mut T, value: &Value) -> Result<(), AttrError> {
    let Some(v) = T::from_value(value) else {
        return Err(AttrError::Mismatch {
            expected: type_name::<T>(),
            found: value.kind_name(),
        });
    };
    *slot = v;

    Ok(())
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(ToString::to_string)
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(*v),
            Value::Int(v) => Some(*v as Self),
            Value::Uint(v) => Some(*v as Self),
            _ => None,
        }
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float64(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Option<Self> {
        f64::from_value(value).map(|v| v as Self)
    }
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FieldValue for DictMap {
    fn to_value(&self) -> Value {
        Value::Map(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_map().cloned()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Self::new)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };

        items.iter().map(T::from_value).collect()
    }
}

// impl_field_value_int
macro_rules! impl_field_value_int {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(v) => (*v).try_into().ok(),
                        Value::Uint(v) => (*v).try_into().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value_int!(i8, i16, i32, i64, u8, u16, u32, u64);

///
/// TESTS
///
