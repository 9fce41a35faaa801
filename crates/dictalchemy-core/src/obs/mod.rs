//! Observability: conversion telemetry (metrics) and sink abstractions.
//!
//! Conversions never log failures; they report them as `Rejected` events
//! and return the error. Diagnostic logging goes through `tracing`.

pub mod metrics;
pub mod sink;

// re-exports
pub use metrics::{EntityCounters, EventOps, EventReport};
pub use sink::{
    FollowKind, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink,
};
