use serde::Serialize;
use std::{cell::RefCell, collections::BTreeMap};

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

///
/// EventState
/// Ephemeral, in-memory counters for conversion calls.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // entrypoints
    pub asdict_calls: u64,
    pub fromdict_calls: u64,

    // fields
    pub fields_emitted: u64,
    pub keys_applied: u64,
    pub keys_ignored: u64,

    // relations
    pub follow_one: u64,
    pub follow_many: u64,
    pub follow_items: u64,
    pub follow_passthrough: u64,

    // failures
    pub rejected_configuration: u64,
    pub rejected_primary_key: u64,
    pub rejected_follow_spec: u64,
    pub rejected_value: u64,
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub asdict_calls: u64,
    pub fromdict_calls: u64,
    pub fields_emitted: u64,
    pub keys_applied: u64,
    pub keys_ignored: u64,
    pub follows: u64,
    pub rejected: u64,
}

///
/// EventReport
/// Snapshot handed out to callers; entities sorted by path.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub entities: Vec<EntitySummary>,
}

///
/// EntitySummary
///

#[derive(Clone, Debug, Serialize)]
pub struct EntitySummary {
    pub path: String,
    pub counters: EntityCounters,
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

#[must_use]
pub fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    EventReport {
        ops: snap.ops,
        entities: snap
            .entities
            .into_iter()
            .map(|(path, counters)| EntitySummary { path, counters })
            .collect(),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_all_clears_state() {
        with_state_mut(|m| {
            m.ops.asdict_calls = 3;
            m.entities.insert(
                "alpha".to_string(),
                EntityCounters {
                    asdict_calls: 1,
                    ..Default::default()
                },
            );
        });

        reset_all();

        let report = report();
        assert_eq!(report.ops, EventOps::default());
        assert!(report.entities.is_empty());
    }

    #[test]
    fn report_lists_entities_by_path() {
        reset_all();
        with_state_mut(|m| {
            for path in ["beta", "alpha"] {
                m.entities.insert(path.to_string(), EntityCounters::default());
            }
        });

        let paths: Vec<_> = report().entities.into_iter().map(|e| e.path).collect();
        assert_eq!(paths, ["alpha", "beta"]);
    }
}
