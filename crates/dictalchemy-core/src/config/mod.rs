//! Per-class conversion configuration.
//!
//! - `DictConfig` is the class-level default set (declared or installed)
//! - `registry` is the class augmenter (`make_dictable`)
//! - `resolve` merges class defaults with per-call options

pub mod registry;
pub mod resolve;

pub use registry::{forget_dictable, make_dictable};
pub use resolve::{ResolvedConfig, resolve_asdict, resolve_fromdict};

use serde::Deserialize;
use std::collections::BTreeSet;

///
/// CONSTANTS
///

/// Names excluded from every conversion unless a class says otherwise.
pub const DEFAULT_EXCLUDE: &[&str] = &[];

/// Underscore-prefixed fields are hidden by default.
pub const DEFAULT_EXCLUDE_UNDERSCORE: bool = true;

/// Primary keys are protected from `fromdict` by default.
pub const DEFAULT_FROMDICT_ALLOW_PK: bool = false;

/// Serializer applied to followed relations when no method is named.
pub const DEFAULT_METHOD: &str = "asdict";

///
/// DictConfig
///
/// Class-level conversion defaults. Every field falls back to its built-in
/// default when absent, both in `Default` and when deserialized.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DictConfig {
    pub exclude: BTreeSet<String>,
    pub exclude_underscore: bool,
    pub fromdict_allow_pk: bool,
    pub asdict_include: BTreeSet<String>,
    pub fromdict_include: BTreeSet<String>,
}

impl DictConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_exclude_underscore(mut self, exclude_underscore: bool) -> Self {
        self.exclude_underscore = exclude_underscore;
        self
    }

    #[must_use]
    pub const fn with_fromdict_allow_pk(mut self, allow_pk: bool) -> Self {
        self.fromdict_allow_pk = allow_pk;
        self
    }

    #[must_use]
    pub fn with_asdict_include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asdict_include = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_fromdict_include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fromdict_include = names.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for DictConfig {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDE.iter().map(ToString::to_string).collect(),
            exclude_underscore: DEFAULT_EXCLUDE_UNDERSCORE,
            fromdict_allow_pk: DEFAULT_FROMDICT_ALLOW_PK,
            asdict_include: BTreeSet::new(),
            fromdict_include: BTreeSet::new(),
        }
    }
}

///
/// TESTS
///
