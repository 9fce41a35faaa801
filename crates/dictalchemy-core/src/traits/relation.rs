use crate::{traits::Dictable, value::Value};

///
/// Related
///
/// Read view of a relationship attribute.
///
/// The `One` / `Entity` variants are the capability test used by `asdict`:
/// only values exposed as `dyn Dictable` are recursed into.
///

pub enum Related<'a> {
    /// Empty singular relation.
    Null,
    One(&'a dyn Dictable),
    Many(Vec<RelatedItem<'a>>),
    /// Collection keyed by an attribute of its members; emitted as a map.
    Keyed(Vec<(String, RelatedItem<'a>)>),
    /// Related value with no dict capability; emitted unconverted.
    Value(Value),
}

impl<'a> Related<'a> {
    /// Collect a collection of dictable entities.
    pub fn many<T, I>(items: I) -> Self
    where
        T: Dictable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self::Many(
            items
                .into_iter()
                .map(|item| RelatedItem::Entity(item))
                .collect(),
        )
    }

    /// Collect a keyed collection of dictable entities.
    pub fn keyed<K, T, I>(items: I) -> Self
    where
        K: ToString + 'a,
        T: Dictable + 'a,
        I: IntoIterator<Item = (&'a K, &'a T)>,
    {
        Self::Keyed(
            items
                .into_iter()
                .map(|(key, item)| (key.to_string(), RelatedItem::Entity(item)))
                .collect(),
        )
    }
}

///
/// RelatedItem
/// One element of a collection relation.
///

pub enum RelatedItem<'a> {
    Entity(&'a dyn Dictable),
    /// Plain element; coerced with `Value::into_map`.
    Value(Value),
}

///
/// RelatedMut
///
/// Write view of a relationship attribute.
/// Only singular relations are updated by `fromdict`.
///

pub enum RelatedMut<'a> {
    Null,
    One(&'a mut dyn Dictable),
    Many,
    Value,
}
