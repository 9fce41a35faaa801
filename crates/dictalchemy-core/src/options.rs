//! Per-call conversion options.
//!
//! Every field mirrors a keyword accepted by `asdict` / `fromdict`; unset
//! fields defer to the class configuration. Both option types can also be
//! parsed from a keyword-style plain mapping, which is how nested follow
//! bundles arrive from dynamic input.
use crate::{
    config::DEFAULT_METHOD,
    error::DictError,
    follow::{FollowOptions, FollowSpec},
    value::{DictMap, Value},
};
use std::collections::BTreeSet;

///
/// AsDictOptions
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AsDictOptions {
    pub exclude: BTreeSet<String>,
    pub exclude_underscore: Option<bool>,
    pub exclude_pk: bool,
    pub follow: FollowSpec<Self>,
    pub include: BTreeSet<String>,
    /// Named serializer applied to followed relations.
    pub method: Option<String>,
}

impl AsDictOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn exclude_underscore(mut self, exclude_underscore: bool) -> Self {
        self.exclude_underscore = Some(exclude_underscore);
        self
    }

    #[must_use]
    pub const fn exclude_pk(mut self, exclude_pk: bool) -> Self {
        self.exclude_pk = exclude_pk;
        self
    }

    #[must_use]
    pub fn follow(mut self, follow: impl Into<FollowSpec<Self>>) -> Self {
        self.follow = follow.into();
        self
    }

    #[must_use]
    pub fn follow_with(mut self, name: impl Into<String>, options: Self) -> Self {
        self.follow = std::mem::take(&mut self.follow).with(name, options);
        self
    }

    #[must_use]
    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Serializer name used for followed relations.
    #[must_use]
    pub fn method_name(&self) -> &str {
        self.method.as_deref().unwrap_or(DEFAULT_METHOD)
    }
}

impl FollowOptions for AsDictOptions {
    fn from_bundle(bundle: &DictMap) -> Result<Self, DictError> {
        let mut options = Self::default();
        for (key, value) in bundle {
            match key.as_str() {
                "exclude" => options.exclude = parse_names(key, value)?,
                "exclude_underscore" => options.exclude_underscore = parse_flag(key, value)?,
                "exclude_pk" => options.exclude_pk = parse_flag(key, value)?.unwrap_or(false),
                "follow" => options.follow = FollowSpec::from_value(value)?,
                "include" => options.include = parse_names(key, value)?,
                "method" => options.method = parse_text(key, value)?,
                _ => return Err(unknown_option(key)),
            }
        }

        Ok(options)
    }
}

impl TryFrom<&Value> for AsDictOptions {
    type Error = DictError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        parse_bundle(value)
    }
}

///
/// FromDictOptions
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FromDictOptions {
    pub exclude: BTreeSet<String>,
    pub exclude_underscore: Option<bool>,
    pub allow_pk: Option<bool>,
    pub follow: FollowSpec<Self>,
    pub include: BTreeSet<String>,
}

impl FromDictOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn exclude_underscore(mut self, exclude_underscore: bool) -> Self {
        self.exclude_underscore = Some(exclude_underscore);
        self
    }

    #[must_use]
    pub const fn allow_pk(mut self, allow_pk: bool) -> Self {
        self.allow_pk = Some(allow_pk);
        self
    }

    #[must_use]
    pub fn follow(mut self, follow: impl Into<FollowSpec<Self>>) -> Self {
        self.follow = follow.into();
        self
    }

    #[must_use]
    pub fn follow_with(mut self, name: impl Into<String>, options: Self) -> Self {
        self.follow = std::mem::take(&mut self.follow).with(name, options);
        self
    }

    #[must_use]
    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(names.into_iter().map(Into::into));
        self
    }
}

impl FollowOptions for FromDictOptions {
    fn from_bundle(bundle: &DictMap) -> Result<Self, DictError> {
        let mut options = Self::default();
        for (key, value) in bundle {
            match key.as_str() {
                "exclude" => options.exclude = parse_names(key, value)?,
                "exclude_underscore" => options.exclude_underscore = parse_flag(key, value)?,
                "allow_pk" => options.allow_pk = parse_flag(key, value)?,
                "follow" => options.follow = FollowSpec::from_value(value)?,
                "include" => options.include = parse_names(key, value)?,
                _ => return Err(unknown_option(key)),
            }
        }

        Ok(options)
    }
}

impl TryFrom<&Value> for FromDictOptions {
    type Error = DictError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        parse_bundle(value)
    }
}

// ---- parsing helpers ---------------------------------------------------

fn parse_bundle<O: FollowOptions>(value: &Value) -> Result<O, DictError> {
    match value {
        Value::Null => Ok(O::default()),
        Value::Map(bundle) => O::from_bundle(bundle),
        other => Err(DictError::InvalidOption {
            option: "<bundle>".to_string(),
            reason: format!("expected a map, found {}", other.kind_name()),
        }),
    }
}

fn parse_names(option: &str, value: &Value) -> Result<BTreeSet<String>, DictError> {
    let invalid = |found: &'static str| DictError::InvalidOption {
        option: option.to_string(),
        reason: format!("expected a list of names, found {found}"),
    };

    match value {
        Value::Null => Ok(BTreeSet::new()),
        Value::List(items) => items
            .iter()
            .map(|item| {
                item.as_text()
                    .map(ToString::to_string)
                    .ok_or_else(|| invalid(item.kind_name()))
            })
            .collect(),
        other => Err(invalid(other.kind_name())),
    }
}

fn parse_flag(option: &str, value: &Value) -> Result<Option<bool>, DictError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(flag) => Ok(Some(*flag)),
        other => Err(DictError::InvalidOption {
            option: option.to_string(),
            reason: format!("expected a bool, found {}", other.kind_name()),
        }),
    }
}

fn parse_text(option: &str, value: &Value) -> Result<Option<String>, DictError> {
    match value {
        Value::Null => Ok(None),
        Value::Text(text) => Ok(Some(text.clone())),
        other => Err(DictError::InvalidOption {
            option: option.to_string(),
            reason: format!("expected a name, found {}", other.kind_name()),
        }),
    }
}

fn unknown_option(option: &str) -> DictError {
    DictError::InvalidOption {
        option: option.to_string(),
        reason: "unknown option".to_string(),
    }
}

///
/// TESTS
///
