//! Readiness state machine applied to a single pod.

use chrono::{DateTime, Duration, Utc};

use crate::types::{ConditionStatus, PodPhase, PodRecord};

/// Per-pod verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodAvailability {
    Available,
    Unavailable,
    /// The pod contributes no verdict (Pending without a start time);
    /// readiness is decided by the service's other pods.
    Skipped,
}

/// Classify one pod's reported status.
///
/// Pending pods inside the grace window are treated as available on the
/// assumption they are still starting up. Running pods are available only
/// when they report a `Ready` condition with status `True`; a missing
/// `Ready` condition is no evidence of readiness. Every other phase has no
/// path to readiness.
///
/// `now` is passed in rather than read from the wall clock so the state
/// machine stays deterministic under test.
pub fn evaluate_pod(
    pod: &PodRecord,
    pending_grace_seconds: i64,
    now: DateTime<Utc>,
) -> PodAvailability {
    match pod.phase {
        PodPhase::Pending => match pod.started_at {
            None => PodAvailability::Skipped,
            Some(started_at) => {
                let elapsed = now.signed_duration_since(started_at);
                if elapsed < Duration::seconds(pending_grace_seconds) {
                    PodAvailability::Available
                } else {
                    PodAvailability::Unavailable
                }
            }
        },
        PodPhase::Running => match pod.ready_condition() {
            Some(ready) if ready.status == ConditionStatus::True => PodAvailability::Available,
            _ => PodAvailability::Unavailable,
        },
        PodPhase::Succeeded | PodPhase::Failed | PodPhase::Unknown => PodAvailability::Unavailable,
    }
}
