//! Class augmenter.
//!
//! Installs class-level configuration for an entity type at runtime,
//! overriding what the type declares. Entries are keyed by model path and
//! read by `Dictable::class_config` on every conversion.
use crate::{config::DictConfig, traits::EntitySchema};
use std::{
    collections::BTreeMap,
    sync::{LazyLock, PoisonError, RwLock},
};

static CLASS_CONFIGS: LazyLock<RwLock<BTreeMap<&'static str, DictConfig>>> =
    LazyLock::new(|| RwLock::new(BTreeMap::new()));

/// Install `config` as the class configuration of `E`.
///
/// Overwrites any previous installation and returns it; installing the same
/// configuration twice is observably a no-op.
///
/// Entries are keyed by `EntityModel::path`, which does not include generic
/// arguments: every instantiation of a generic entity (`Page<A>`, `Page<B>`)
/// shares one class configuration.
pub fn make_dictable<E: EntitySchema>(config: DictConfig) -> Option<DictConfig> {
    let path = E::MODEL.path;
    tracing::debug!(entity = path, ?config, "installing class dict configuration");

    CLASS_CONFIGS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(path, config)
}

/// Remove an installed configuration, reverting `E` to its declared one.
pub fn forget_dictable<E: EntitySchema>() -> Option<DictConfig> {
    CLASS_CONFIGS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(E::MODEL.path)
}

/// Installed configuration for the entity at `path`, if any.
#[must_use]
pub fn lookup(path: &str) -> Option<DictConfig> {
    CLASS_CONFIGS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(path)
        .cloned()
}

///
/// TESTS
///
