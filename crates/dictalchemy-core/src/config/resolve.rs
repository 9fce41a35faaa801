use crate::{
    config::DictConfig,
    model::entity::EntityModel,
    options::{AsDictOptions, FromDictOptions},
};
use std::collections::BTreeSet;

///
/// ResolvedConfig
///
/// Effective configuration of one conversion call.
/// `exclude` always dominates `include`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResolvedConfig {
    pub exclude: BTreeSet<String>,
    pub include: BTreeSet<String>,
    /// Only meaningful for `fromdict`; always false for `asdict`.
    pub allow_pk: bool,
}

impl ResolvedConfig {
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.contains(name)
    }

    /// `(columns ∪ synonyms ∪ include) − exclude`, in sorted order.
    #[must_use]
    pub fn selected_fields(&self, model: &EntityModel) -> BTreeSet<String> {
        model
            .column_fields()
            .into_iter()
            .chain(model.synonym_fields())
            .map(ToString::to_string)
            .chain(self.include.iter().cloned())
            .filter(|name| !self.is_excluded(name))
            .collect()
    }
}

/// Resolve the `asdict` direction.
#[must_use]
pub fn resolve_asdict(
    model: &EntityModel,
    class: &DictConfig,
    options: &AsDictOptions,
) -> ResolvedConfig {
    let mut exclude = resolve_exclude(model, class, &options.exclude, options.exclude_underscore);
    if options.exclude_pk {
        exclude.extend(model.primary_key_fields().into_iter().map(ToString::to_string));
    }

    ResolvedConfig {
        exclude,
        include: union(&options.include, &class.asdict_include),
        allow_pk: false,
    }
}

/// Resolve the `fromdict` direction.
#[must_use]
pub fn resolve_fromdict(
    model: &EntityModel,
    class: &DictConfig,
    options: &FromDictOptions,
) -> ResolvedConfig {
    ResolvedConfig {
        exclude: resolve_exclude(model, class, &options.exclude, options.exclude_underscore),
        include: union(&options.include, &class.fromdict_include),
        allow_pk: options.allow_pk.unwrap_or(class.fromdict_allow_pk),
    }
}

// call-site exclude ∪ class exclude, plus underscore fields when enabled
fn resolve_exclude(
    model: &EntityModel,
    class: &DictConfig,
    call_exclude: &BTreeSet<String>,
    call_exclude_underscore: Option<bool>,
) -> BTreeSet<String> {
    let mut exclude = union(call_exclude, &class.exclude);
    if call_exclude_underscore.unwrap_or(class.exclude_underscore) {
        exclude.extend(model.underscore_fields().into_iter().map(ToString::to_string));
    }

    exclude
}

fn union(call: &BTreeSet<String>, class: &BTreeSet<String>) -> BTreeSet<String> {
    call.union(class).cloned().collect()
}

///
/// TESTS
///
