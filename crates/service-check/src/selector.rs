//! Label-selector resolution for pod lookups.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Build the label-selector query string for a service's selector map.
///
/// Terms are `key=value` pairs joined with commas, in lexicographic key
/// order (the `BTreeMap` iteration order). Returns `None` for an empty
/// selector: an empty query would match every pod in the cluster, so the
/// caller must treat such a service as unresolved instead of querying.
pub fn label_query(selector: &BTreeMap<String, String>) -> Option<String> {
    if selector.is_empty() {
        return None;
    }
    let mut query = String::new();
    for (key, value) in selector {
        if !query.is_empty() {
            query.push(',');
        }
        let _ = write!(query, "{key}={value}");
    }
    Some(query)
}
