//! Simplified Service and Pod records snapshotted from the cluster API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::{Pod, Service};
use serde::{Deserialize, Serialize};

/// The condition type that signals pod readiness in `status.conditions[]`.
pub const READY_CONDITION: &str = "Ready";

/// Snapshot of a Service taken once per run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Service name; absent for malformed API objects.
    pub name: Option<String>,
    pub namespace: String,
    /// Label selector over backing pods. Empty means the service has no
    /// resolvable backing set.
    pub selector: BTreeMap<String, String>,
}

impl ServiceRecord {
    /// `namespace.name` identifier, falling back to `unknown` for unnamed
    /// services.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "unknown".to_string())
    }
}

impl From<&Service> for ServiceRecord {
    fn from(svc: &Service) -> Self {
        Self {
            name: svc.metadata.name.clone(),
            namespace: svc.metadata.namespace.clone().unwrap_or_default(),
            selector: svc
                .spec
                .as_ref()
                .and_then(|spec| spec.selector.clone())
                .unwrap_or_default(),
        }
    }
}

/// Pod lifecycle phase as a closed enum so the readiness state machine can
/// match exhaustively. Phases this check does not recognize collapse into
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    #[default]
    Unknown,
}

impl PodPhase {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("Pending") => Self::Pending,
            Some("Running") => Self::Running,
            Some("Succeeded") => Self::Succeeded,
            Some("Failed") => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

/// Condition status tri-state from Kubernetes (`"True"`, `"False"`,
/// `"Unknown"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

impl ConditionStatus {
    fn parse(raw: &str) -> Self {
        match raw {
            "True" => Self::True,
            "False" => Self::False,
            _ => Self::Unknown,
        }
    }
}

/// Pod condition from `status.conditions[]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodCondition {
    /// Condition type: "Ready", "ContainersReady", "Initialized", etc.
    pub condition_type: String,
    pub status: ConditionStatus,
}

/// Snapshot of a Pod fetched per service per run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodRecord {
    pub name: String,
    pub namespace: String,
    pub phase: PodPhase,
    pub started_at: Option<DateTime<Utc>>,
    pub conditions: Vec<PodCondition>,
}

impl PodRecord {
    /// `namespace.name` identifier used in failure reporting.
    pub fn display_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// The `Ready` condition, if the pod reports one.
    pub fn ready_condition(&self) -> Option<&PodCondition> {
        self.conditions
            .iter()
            .find(|c| c.condition_type == READY_CONDITION)
    }
}

impl From<&Pod> for PodRecord {
    fn from(pod: &Pod) -> Self {
        let status = pod.status.as_ref();
        Self {
            name: pod.metadata.name.clone().unwrap_or_default(),
            namespace: pod.metadata.namespace.clone().unwrap_or_default(),
            phase: PodPhase::parse(status.and_then(|s| s.phase.as_deref())),
            started_at: status.and_then(|s| s.start_time.as_ref()).map(|t| t.0),
            conditions: status
                .and_then(|s| s.conditions.as_ref())
                .map(|conds| {
                    conds
                        .iter()
                        .map(|c| PodCondition {
                            condition_type: c.type_.clone(),
                            status: ConditionStatus::parse(&c.status),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_parsing_collapses_unrecognized_values() {
        assert_eq!(PodPhase::parse(Some("Pending")), PodPhase::Pending);
        assert_eq!(PodPhase::parse(Some("Running")), PodPhase::Running);
        assert_eq!(PodPhase::parse(Some("Evicted")), PodPhase::Unknown);
        assert_eq!(PodPhase::parse(None), PodPhase::Unknown);
    }

    #[test]
    fn condition_status_parsing() {
        assert_eq!(ConditionStatus::parse("True"), ConditionStatus::True);
        assert_eq!(ConditionStatus::parse("False"), ConditionStatus::False);
        assert_eq!(ConditionStatus::parse("maybe"), ConditionStatus::Unknown);
    }

    #[test]
    fn pod_display_name_is_namespace_qualified() {
        let pod = PodRecord {
            name: "web-1".to_string(),
            namespace: "prod".to_string(),
            ..PodRecord::default()
        };
        assert_eq!(pod.display_name(), "prod.web-1");
    }

    #[test]
    fn ready_condition_lookup() {
        let pod = PodRecord {
            conditions: vec![
                PodCondition {
                    condition_type: "Initialized".to_string(),
                    status: ConditionStatus::True,
                },
                PodCondition {
                    condition_type: READY_CONDITION.to_string(),
                    status: ConditionStatus::False,
                },
            ],
            ..PodRecord::default()
        };
        let ready = pod.ready_condition().unwrap();
        assert_eq!(ready.status, ConditionStatus::False);
    }
}
