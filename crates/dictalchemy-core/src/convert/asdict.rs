use crate::{
    config::{ResolvedConfig, resolve_asdict},
    error::DictError,
    model::entity::EntityModel,
    obs::sink::{self, FollowKind, MetricsEvent},
    options::AsDictOptions,
    traits::{Dictable, Related, RelatedItem},
    value::{DictMap, Value},
};
use tracing::{debug, trace};

/// Serialize `entity` into a plain mapping, following the requested relations.
///
/// Followed relations are converted with the serializer named by
/// `options.method` (`asdict` when unset) and their own bundle options.
/// An empty singular relation is emitted as `null`; the key is kept rather
/// than omitted.
///
/// Fails when `follow` names a field that is not a relationship, when a
/// followed entity lacks the named serializer, or when a followed collection
/// yields an item that is not a mapping.
pub fn asdict<E: Dictable + ?Sized>(
    entity: &E,
    options: &AsDictOptions,
) -> Result<DictMap, DictError> {
    let model = entity.model();
    debug!(
        entity = model.path,
        exclude_pk = options.exclude_pk,
        follow = options.follow.len(),
        "asdict"
    );

    let resolved = resolve_asdict(model, &entity.class_config(), options);
    let mut data = collect_fields(entity, model, &resolved);

    match follow_relations(entity, model, options, &mut data) {
        Ok(()) => {
            sink::record(MetricsEvent::AsDict {
                entity_path: model.path,
                fields: data.len() as u64,
            });

            Ok(data)
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

/// Field selection only: `options.follow` is not consulted, so this never fails.
pub fn asdict_fields<E: Dictable + ?Sized>(entity: &E, options: &AsDictOptions) -> DictMap {
    let model = entity.model();
    let resolved = resolve_asdict(model, &entity.class_config(), options);
    let data = collect_fields(entity, model, &resolved);

    sink::record(MetricsEvent::AsDict {
        entity_path: model.path,
        fields: data.len() as u64,
    });

    data
}

// Values are read as-is; no copy beyond what `get_attr` hands out.
fn collect_fields<E: Dictable + ?Sized>(
    entity: &E,
    model: &EntityModel,
    resolved: &ResolvedConfig,
) -> DictMap {
    let mut data = DictMap::new();
    for name in resolved.selected_fields(model) {
        match entity.get_attr(&name) {
            Some(value) => {
                data.insert(name, value);
            }
            None => trace!(entity = model.path, field = %name, "attribute not exposed, skipped"),
        }
    }

    data
}

fn follow_relations<E: Dictable + ?Sized>(
    entity: &E,
    model: &EntityModel,
    options: &AsDictOptions,
    data: &mut DictMap,
) -> Result<(), DictError> {
    let method = options.method_name();
    for (name, args) in &options.follow {
        if !model.is_relationship(name) {
            return Err(DictError::NotARelationship {
                entity: model.entity_name,
                field: name.clone(),
            });
        }

        let Some(related) = entity.related(name) else {
            trace!(entity = model.path, relation = %name, "relation not exposed, skipped");
            continue;
        };

        let (kind, value) = match related {
            Related::Null => (FollowKind::Passthrough, Value::Null),
            Related::Value(value) => (FollowKind::Passthrough, value),
            Related::One(child) => {
                let nested = serialize(child, method, args).map_err(|err| err.with_field(name))?;
                (FollowKind::One, Value::Map(nested))
            }
            Related::Many(items) => {
                let list = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        follow_item(item, method, args)
                            .map_err(|err| err.with_index(index).with_field(name))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                (FollowKind::Many(list.len() as u64), Value::List(list))
            }
            Related::Keyed(items) => {
                let map = items
                    .into_iter()
                    .map(|(key, item)| {
                        follow_item(item, method, args)
                            .map(|value| (key.clone(), value))
                            .map_err(|err| err.with_field(&key).with_field(name))
                    })
                    .collect::<Result<DictMap, _>>()?;
                (FollowKind::Many(map.len() as u64), Value::Map(map))
            }
        };

        sink::record(MetricsEvent::Follow {
            entity_path: model.path,
            kind,
        });
        data.insert(name.clone(), value);
    }

    Ok(())
}

fn serialize(child: &dyn Dictable, method: &str, args: &AsDictOptions) -> Result<DictMap, DictError> {
    child
        .asdict_via(method, args)
        .unwrap_or_else(|| {
            Err(DictError::UnknownMethod {
                entity: child.model().entity_name,
                method: method.to_string(),
            })
        })
}

fn follow_item(
    item: RelatedItem<'_>,
    method: &str,
    args: &AsDictOptions,
) -> Result<Value, DictError> {
    match item {
        RelatedItem::Entity(child) => serialize(child, method, args).map(Value::Map),
        RelatedItem::Value(value) => value
            .into_map()
            .map(Value::Map)
            .map_err(|other| DictError::NotMappable {
                found: other.kind_name(),
            }),
    }
}
