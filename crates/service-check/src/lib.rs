//! Point-in-time availability check for cluster services.
//!
//! One evaluation pass: list services, narrow them with name/namespace
//! filters, resolve each service's label selector into a pod query, classify
//! every backing pod through the readiness state machine, and fold the
//! results into a single OK / WARNING / CRITICAL verdict.

pub mod check;
pub mod cluster;
pub mod evaluate;
pub mod filter;
pub mod selector;
pub mod types;

pub use check::{run_check, CheckStatus, RunOutcome};
pub use cluster::{ClusterApi, ClusterConfig, ClusterError, KubeCluster};
pub use evaluate::{evaluate_pod, PodAvailability};
pub use filter::{filter_services, FilterRules};
pub use selector::label_query;
pub use types::{ConditionStatus, PodCondition, PodPhase, PodRecord, ServiceRecord};
