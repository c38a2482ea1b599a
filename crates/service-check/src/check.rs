//! The evaluation pass: resolve, look up, classify, aggregate.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::cluster::{ClusterApi, ClusterError};
use crate::evaluate::{evaluate_pod, PodAvailability};
use crate::filter::{filter_services, FilterRules};
use crate::selector::label_query;

/// Overall verdict of a run, mapped to monitoring exit codes by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    /// The filters selected no services; nothing was evaluated.
    Warning,
    Critical,
    /// The run could not be completed (fatal API error).
    Unknown,
}

impl CheckStatus {
    /// Conventional monitoring exit code for this status.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }
}

/// Aggregate result of one evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Number of services that passed the filters.
    pub services_checked: usize,
    /// Identifiers with no available backing pod (`namespace.name` of each
    /// unavailable pod) and services whose pod lookup errored (service
    /// name).
    pub failed: Vec<String>,
    /// Services whose backing pods could not be determined: missing name,
    /// empty selector, or a lookup that returned no pods.
    pub unresolved: Vec<String>,
}

impl RunOutcome {
    pub fn status(&self) -> CheckStatus {
        if self.services_checked == 0 {
            CheckStatus::Warning
        } else if self.failed.is_empty() && self.unresolved.is_empty() {
            CheckStatus::Ok
        } else {
            CheckStatus::Critical
        }
    }

    /// Single terminal status line. Unresolved services are reported ahead
    /// of availability failures; both clauses appear when both apply.
    pub fn render(&self) -> String {
        match self.status() {
            CheckStatus::Ok => {
                format!("OK: all {} services available", self.services_checked)
            }
            CheckStatus::Warning => {
                "WARNING: no services matched the requested filters".to_string()
            }
            CheckStatus::Critical => {
                let mut clauses = Vec::new();
                if !self.unresolved.is_empty() {
                    clauses.push(format!("unresolved: {}", self.unresolved.join(" ")));
                }
                if !self.failed.is_empty() {
                    clauses.push(format!("not available: {}", self.failed.join(" ")));
                }
                format!("CRITICAL: {}", clauses.join("; "))
            }
            CheckStatus::Unknown => "UNKNOWN".to_string(),
        }
    }
}

/// Run one evaluation pass over the cluster.
///
/// Services are processed sequentially in listing order. Only the initial
/// service listing is fatal; a pod-lookup failure is recorded against that
/// service and the run continues.
pub async fn run_check<A: ClusterApi + ?Sized>(
    api: &A,
    rules: &FilterRules,
    pending_grace_seconds: i64,
    now: DateTime<Utc>,
) -> Result<RunOutcome, ClusterError> {
    let services = api.list_services().await?;
    let services = filter_services(services, rules);
    if services.is_empty() {
        warn!("No services matched the requested filters");
        return Ok(RunOutcome::default());
    }

    let mut outcome = RunOutcome {
        services_checked: services.len(),
        ..RunOutcome::default()
    };

    for service in &services {
        let name = service.display_name();
        if service.name.is_none() {
            warn!(namespace = %service.namespace, "Service has no name, cannot check it");
            outcome.unresolved.push(name);
            continue;
        }

        let Some(query) = label_query(&service.selector) else {
            warn!(service = %name, "Service has an empty selector, cannot resolve backing pods");
            outcome.unresolved.push(name);
            continue;
        };

        let pods = match api.list_pods(&query).await {
            Ok(pods) => pods,
            Err(e) => {
                warn!(service = %name, error = %e, "Pod lookup failed");
                outcome.failed.push(name);
                continue;
            }
        };

        if pods.is_empty() {
            warn!(service = %name, selector = %query, "Selector matched no pods");
            outcome.unresolved.push(name);
            continue;
        }

        let verdicts: Vec<PodAvailability> = pods
            .iter()
            .map(|pod| evaluate_pod(pod, pending_grace_seconds, now))
            .collect();

        if verdicts.contains(&PodAvailability::Available) {
            debug!(service = %name, pods = pods.len(), "Service has an available pod");
            continue;
        }

        for (pod, verdict) in pods.iter().zip(&verdicts) {
            if *verdict == PodAvailability::Unavailable {
                outcome.failed.push(pod.display_name());
            }
        }
    }

    Ok(outcome)
}
