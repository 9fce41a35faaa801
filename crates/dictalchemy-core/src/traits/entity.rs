use crate::{
    config::{DEFAULT_METHOD, DictConfig, registry},
    convert::{self, DictIter},
    error::{AttrError, DictError},
    model::entity::EntityModel,
    options::{AsDictOptions, FromDictOptions},
    traits::{Related, RelatedMut},
    value::{DictMap, Value},
};

// ============================================================================
// ENTITY METADATA & ACCESS
// ============================================================================
//
// These traits are the contract the conversion layer consumes from the
// mapped type. They carry no conversion logic of their own.
//

///
/// EntitySchema
/// Type-level model; the key under which class configuration is stored.
///

pub trait EntitySchema {
    const MODEL: &'static EntityModel;
}

///
/// Entity
///
/// Instance-level metadata and attribute access.
///
/// `get_attr` may answer for names outside the model (computed properties);
/// such names are only read when explicitly included.
///

pub trait Entity {
    fn model(&self) -> &'static EntityModel;

    fn get_attr(&self, name: &str) -> Option<Value>;

    fn set_attr(&mut self, name: &str, value: &Value) -> Result<(), AttrError>;

    fn related(&self, _name: &str) -> Option<Related<'_>> {
        None
    }

    fn related_mut(&mut self, _name: &str) -> Option<RelatedMut<'_>> {
        None
    }
}

// ============================================================================
// DICT CAPABILITY
// ============================================================================

///
/// Dictable
///
/// Serialize / deserialize / iterate capability for an entity.
/// Implement it (or derive it) to opt an entity into relation traversal.
///

pub trait Dictable: Entity {
    /// Class configuration declared on the type itself.
    fn declared_config(&self) -> DictConfig {
        DictConfig::default()
    }

    /// Effective class configuration: a `make_dictable` override if one was
    /// installed, otherwise the declared configuration.
    fn class_config(&self) -> DictConfig {
        registry::lookup(self.model().path).unwrap_or_else(|| self.declared_config())
    }

    /// Full-default conversion. Never follows, so it cannot fail.
    fn asdict(&self) -> DictMap {
        convert::asdict_fields(self, &AsDictOptions::default())
    }

    /// Conversion with per-call options. A followed singular relation that is
    /// empty is emitted as `null` rather than left out.
    fn asdict_with(&self, options: &AsDictOptions) -> Result<DictMap, DictError> {
        convert::asdict(self, options)
    }

    /// Dispatch to the serializer called `method`.
    ///
    /// This is how followed relations are converted when the parent call
    /// names a method. `None` means the entity has no such serializer.
    fn asdict_via(
        &self,
        method: &str,
        options: &AsDictOptions,
    ) -> Option<Result<DictMap, DictError>> {
        (method == DEFAULT_METHOD).then(|| self.asdict_with(options))
    }

    fn fromdict(&mut self, data: &DictMap) -> Result<(), DictError> {
        convert::fromdict(self, data, &FromDictOptions::default())
    }

    fn fromdict_with(&mut self, data: &DictMap, options: &FromDictOptions) -> Result<(), DictError> {
        convert::fromdict(self, data, options)
    }

    /// Key/value pairs of a full-default `asdict`, recomputed on every call.
    fn iter_dict(&self) -> DictIter {
        DictIter::new(self.asdict())
    }
}
