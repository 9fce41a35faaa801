use crate::{
    error::DictError,
    value::{DictMap, Value},
};
use derive_more::{Deref, IntoIterator};
use std::collections::BTreeMap;

///
/// FollowOptions
///
/// Option bundle that can be attached to a followed relation and parsed
/// from a keyword-style plain mapping.
///

pub trait FollowOptions: Default + Sized {
    fn from_bundle(bundle: &DictMap) -> Result<Self, DictError>;
}

///
/// FollowSpec
///
/// Relations to traverse, each with the options of the nested call.
/// Iterates in sorted name order.
///

#[derive(Clone, Debug, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct FollowSpec<O>(BTreeMap<String, O>);

impl<O> FollowSpec<O> {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Follow `name` with explicit nested options.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, options: O) -> Self {
        self.0.insert(name.into(), options);
        self
    }
}

impl<O: FollowOptions> FollowSpec<O> {
    /// Normalize a dynamic follow argument.
    ///
    /// - `Null` → nothing followed
    /// - `List` of names → each name with default options
    /// - `Map` → name → bundle (`Null` bundle means default options)
    pub fn from_value(value: &Value) -> Result<Self, DictError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::List(items) => items
                .iter()
                .map(|item| {
                    item.as_text()
                        .map(|name| (name.to_string(), O::default()))
                        .ok_or(DictError::MalformedFollowSpec {
                            found: item.kind_name(),
                        })
                })
                .collect(),
            Value::Map(entries) => entries
                .iter()
                .map(|(name, bundle)| {
                    let options = match bundle {
                        Value::Null => O::default(),
                        Value::Map(bundle) => {
                            O::from_bundle(bundle).map_err(|err| err.with_field(name))?
                        }
                        other => {
                            return Err(DictError::MalformedFollowSpec {
                                found: other.kind_name(),
                            });
                        }
                    };

                    Ok((name.clone(), options))
                })
                .collect(),
            other => Err(DictError::MalformedFollowSpec {
                found: other.kind_name(),
            }),
        }
    }
}

impl<O> Default for FollowSpec<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, S: Into<String>> FromIterator<(S, O)> for FollowSpec<O> {
    fn from_iter<I: IntoIterator<Item = (S, O)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, options)| (name.into(), options))
                .collect(),
        )
    }
}

impl<O> From<BTreeMap<String, O>> for FollowSpec<O> {
    fn from(entries: BTreeMap<String, O>) -> Self {
        Self(entries)
    }
}

// Shorthand: a sequence of names, each followed with default options.
impl<O: Default, S: Into<String>> From<Vec<S>> for FollowSpec<O> {
    fn from(names: Vec<S>) -> Self {
        names.into_iter().map(|name| (name, O::default())).collect()
    }
}

impl<O: Default, S: Into<String>, const N: usize> From<[S; N]> for FollowSpec<O> {
    fn from(names: [S; N]) -> Self {
        names.into_iter().map(|name| (name, O::default())).collect()
    }
}

///
/// TESTS
///
