//! Metrics sink boundary.
//!
//! Conversion logic MUST NOT touch `obs::metrics` directly.
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`.
use crate::{error::ErrorKind, obs::metrics};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// FollowKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FollowKind {
    One,
    /// Collection relation with the number of items converted.
    Many(u64),
    /// Null or non-dictable value emitted unconverted.
    Passthrough,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    AsDict {
        entity_path: &'static str,
        fields: u64,
    },
    FromDict {
        entity_path: &'static str,
        applied: u64,
        ignored: u64,
    },
    Follow {
        entity_path: &'static str,
        kind: FollowKind,
    },
    Rejected {
        entity_path: &'static str,
        kind: ErrorKind,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into global metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::AsDict {
                entity_path,
                fields,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.asdict_calls = m.ops.asdict_calls.saturating_add(1);
                    m.ops.fields_emitted = m.ops.fields_emitted.saturating_add(fields);

                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.asdict_calls = entry.asdict_calls.saturating_add(1);
                    entry.fields_emitted = entry.fields_emitted.saturating_add(fields);
                });
            }

            MetricsEvent::FromDict {
                entity_path,
                applied,
                ignored,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.fromdict_calls = m.ops.fromdict_calls.saturating_add(1);
                    m.ops.keys_applied = m.ops.keys_applied.saturating_add(applied);
                    m.ops.keys_ignored = m.ops.keys_ignored.saturating_add(ignored);

                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.fromdict_calls = entry.fromdict_calls.saturating_add(1);
                    entry.keys_applied = entry.keys_applied.saturating_add(applied);
                    entry.keys_ignored = entry.keys_ignored.saturating_add(ignored);
                });
            }

            MetricsEvent::Follow { entity_path, kind } => {
                metrics::with_state_mut(|m| {
                    match kind {
                        FollowKind::One => m.ops.follow_one = m.ops.follow_one.saturating_add(1),
                        FollowKind::Many(items) => {
                            m.ops.follow_many = m.ops.follow_many.saturating_add(1);
                            m.ops.follow_items = m.ops.follow_items.saturating_add(items);
                        }
                        FollowKind::Passthrough => {
                            m.ops.follow_passthrough = m.ops.follow_passthrough.saturating_add(1);
                        }
                    }

                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.follows = entry.follows.saturating_add(1);
                });
            }

            MetricsEvent::Rejected { entity_path, kind } => {
                metrics::with_state_mut(|m| {
                    let counter = match kind {
                        ErrorKind::Configuration => &mut m.ops.rejected_configuration,
                        ErrorKind::PrimaryKeyProtection => &mut m.ops.rejected_primary_key,
                        ErrorKind::MalformedFollowSpec => &mut m.ops.rejected_follow_spec,
                        ErrorKind::InvalidValue => &mut m.ops.rejected_value,
                    };
                    *counter = counter.saturating_add(1);

                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.rejected = entry.rejected.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Route events on this thread to `sink` for the duration of `f`.
///
/// The previous sink is restored on return and on unwind.
pub fn with_metrics_sink<R>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> R) -> R {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let previous = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = previous;
            });
        }
    }

    let previous = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(previous);

    f()
}

///
/// TESTS
///
