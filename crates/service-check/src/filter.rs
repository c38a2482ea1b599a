//! Name and namespace filtering over the listed services.

use crate::types::ServiceRecord;

/// Include/exclude rules applied to the service set before evaluation.
///
/// Empty lists are inactive: no name list means all names, no include list
/// means all namespaces. The exclude list is applied after the include list
/// and wins for any namespace present in both.
#[derive(Debug, Clone, Default)]
pub struct FilterRules {
    /// Allow-list of service names.
    pub names: Vec<String>,
    /// Allow-list of namespaces.
    pub include_namespaces: Vec<String>,
    /// Deny-list of namespaces, applied after the allow-list.
    pub exclude_namespaces: Vec<String>,
}

impl FilterRules {
    fn matches(&self, service: &ServiceRecord) -> bool {
        if !self.names.is_empty() {
            let Some(name) = service.name.as_deref() else {
                return false;
            };
            if !self.names.iter().any(|n| n == name) {
                return false;
            }
        }
        if !self.include_namespaces.is_empty()
            && !self.include_namespaces.contains(&service.namespace)
        {
            return false;
        }
        !self.exclude_namespaces.contains(&service.namespace)
    }
}

/// Apply `rules` to `services`, preserving the original relative order.
///
/// An empty result is not an error here; the caller reports it as the
/// "nothing to check" condition.
pub fn filter_services(services: Vec<ServiceRecord>, rules: &FilterRules) -> Vec<ServiceRecord> {
    services
        .into_iter()
        .filter(|svc| rules.matches(svc))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svc(namespace: &str, name: &str) -> ServiceRecord {
        ServiceRecord {
            name: Some(name.to_string()),
            namespace: namespace.to_string(),
            ..ServiceRecord::default()
        }
    }

    fn names(services: &[ServiceRecord]) -> Vec<String> {
        services.iter().map(ServiceRecord::display_name).collect()
    }

    #[test]
    fn no_rules_returns_input_unchanged() {
        let services = vec![svc("default", "web"), svc("prod", "db"), svc("dev", "api")];
        let filtered = filter_services(services.clone(), &FilterRules::default());
        assert_eq!(names(&filtered), names(&services));
    }

    #[test]
    fn name_list_restricts_to_listed_services() {
        let services = vec![svc("default", "web"), svc("prod", "db")];
        let rules = FilterRules {
            names: vec!["db".to_string()],
            ..FilterRules::default()
        };
        assert_eq!(names(&filter_services(services, &rules)), vec!["db"]);
    }

    #[test]
    fn include_namespaces_acts_as_allow_list() {
        let services = vec![svc("default", "web"), svc("prod", "db"), svc("prod", "api")];
        let rules = FilterRules {
            include_namespaces: vec!["prod".to_string()],
            ..FilterRules::default()
        };
        assert_eq!(names(&filter_services(services, &rules)), vec!["db", "api"]);
    }

    #[test]
    fn exclude_wins_over_include_for_same_namespace() {
        let services = vec![svc("prod", "db"), svc("dev", "api")];
        let rules = FilterRules {
            include_namespaces: vec!["prod".to_string(), "dev".to_string()],
            exclude_namespaces: vec!["prod".to_string()],
            ..FilterRules::default()
        };
        assert_eq!(names(&filter_services(services, &rules)), vec!["api"]);
    }

    #[test]
    fn exclude_applies_without_include() {
        let services = vec![svc("kube-system", "dns"), svc("default", "web")];
        let rules = FilterRules {
            exclude_namespaces: vec!["kube-system".to_string()],
            ..FilterRules::default()
        };
        assert_eq!(names(&filter_services(services, &rules)), vec!["web"]);
    }

    #[test]
    fn unnamed_services_never_match_a_name_list() {
        let unnamed = ServiceRecord {
            name: None,
            namespace: "default".to_string(),
            ..ServiceRecord::default()
        };
        let rules = FilterRules {
            names: vec!["web".to_string()],
            ..FilterRules::default()
        };
        assert!(filter_services(vec![unnamed], &rules).is_empty());
    }

    #[test]
    fn empty_result_is_returned_not_an_error() {
        let services = vec![svc("default", "web")];
        let rules = FilterRules {
            names: vec!["missing".to_string()],
            ..FilterRules::default()
        };
        assert!(filter_services(services, &rules).is_empty());
    }
}
