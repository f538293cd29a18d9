//! Canonical cache keys

use std::fmt;

/// Canonical identity of a cached request: resource name plus parameters.
///
/// Parameters are sorted at construction so that logically identical requests
/// produce identical keys regardless of argument order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    resource: String,
    params: Vec<(String, String)>,
}

impl QueryKey {
    /// Key for a parameterless request (e.g. a full list)
    pub fn new(resource: impl Into<String>) -> Self {
        Self { resource: resource.into(), params: Vec::new() }
    }

    /// Key with parameters; pairs are sorted by name, then value
    pub fn with_params<I, K, V>(resource: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params: Vec<(String, String)> =
            params.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        params.sort();
        Self { resource: resource.into(), params }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// True if this key belongs to the given resource family.
    ///
    /// Used for prefix invalidation: every `creators` key matches the
    /// `creators` prefix regardless of filter parameters.
    pub fn matches_prefix(&self, resource: &str) -> bool {
        self.resource == resource
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={value}")?;
        }
        Ok(())
    }
}
