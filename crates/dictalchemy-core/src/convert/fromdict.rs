use crate::{
    config::{ResolvedConfig, resolve_fromdict},
    error::{AttrError, DictError},
    model::entity::EntityModel,
    obs::sink::{self, FollowKind, MetricsEvent},
    options::FromDictOptions,
    traits::{Dictable, RelatedMut},
    value::DictMap,
};
use tracing::{debug, trace};

///
/// Applied
/// Per-call bookkeeping reported to the metrics sink.
///

#[derive(Default)]
struct Applied {
    applied: u64,
    ignored: u64,
}

/// Update `entity` in place from `data`.
///
/// Keys are applied in map order and there is no rollback: when an error is
/// returned, keys processed before the failing one stay applied. Keys that
/// are unknown or not updatable are ignored silently.
pub fn fromdict<E: Dictable + ?Sized>(
    entity: &mut E,
    data: &DictMap,
    options: &FromDictOptions,
) -> Result<(), DictError> {
    let model = entity.model();
    debug!(
        entity = model.path,
        keys = data.len(),
        follow = options.follow.len(),
        "fromdict"
    );

    let resolved = resolve_fromdict(model, &entity.class_config(), options);

    match apply(entity, model, &resolved, data, options) {
        Ok(stats) => {
            sink::record(MetricsEvent::FromDict {
                entity_path: model.path,
                applied: stats.applied,
                ignored: stats.ignored,
            });

            Ok(())
        }
        Err(err) => {
            sink::record(MetricsEvent::Rejected {
                entity_path: model.path,
                kind: err.kind(),
            });

            Err(err)
        }
    }
}

fn apply<E: Dictable + ?Sized>(
    entity: &mut E,
    model: &EntityModel,
    resolved: &ResolvedConfig,
    data: &DictMap,
    options: &FromDictOptions,
) -> Result<Applied, DictError> {
    let primary_keys = model.primary_key_fields();
    let updatable = resolved.selected_fields(model);
    let mut stats = Applied::default();

    // simple fields
    for (key, value) in data {
        if !resolved.allow_pk && primary_keys.contains(key.as_str()) {
            return Err(DictError::PrimaryKeyProtected {
                entity: model.entity_name,
                field: key.clone(),
            });
        }

        if !updatable.contains(key) {
            trace!(entity = model.path, key = %key, "key not updatable, ignored");
            stats.ignored += 1;
            continue;
        }

        match entity.set_attr(key, value) {
            Ok(()) => stats.applied += 1,
            Err(AttrError::Unknown) => {
                trace!(entity = model.path, key = %key, "attribute not exposed, ignored");
                stats.ignored += 1;
            }
            Err(AttrError::Mismatch { expected, found }) => {
                return Err(DictError::InvalidValue {
                    entity: model.entity_name,
                    field: key.clone(),
                    expected,
                    found,
                });
            }
        }
    }

    // singular relations; collections are not traversed for update
    for (name, args) in &options.follow {
        let Some(nested) = data.get(name) else {
            continue;
        };

        if !model.is_relationship(name) {
            return Err(DictError::NotARelationship {
                entity: model.entity_name,
                field: name.clone(),
            });
        }

        if let Some(RelatedMut::One(child)) = entity.related_mut(name) {
            let nested = nested
                .as_map()
                .ok_or(DictError::NotMappable {
                    found: nested.kind_name(),
                })
                .map_err(|err| err.with_field(name))?;

            child
                .fromdict_with(nested, args)
                .map_err(|err| err.with_field(name))?;

            sink::record(MetricsEvent::Follow {
                entity_path: model.path,
                kind: FollowKind::One,
            });
        }
    }

    Ok(stats)
}
