//! Low-level connection options and the defaults layered under them.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::Driver;

/// How failures are reported. Always `exception`: every failure is an `Err`.
pub const ERROR_MODE: &str = "error_mode";
/// Shape of fetched rows. Defaults to rows keyed by column name.
pub const FETCH_MODE: &str = "fetch_mode";
/// Seconds to wait: connect timeout for server engines, busy timeout for `SQLite`.
pub const TIMEOUT: &str = "timeout";

/// String-keyed, loosely typed options passed through to a connection.
///
/// ```rust
/// use sql_connector::prelude::*;
/// use serde_json::json;
///
/// let opts = ConnectionOptions::new().with("fetch_mode", json!("num"));
/// let merged = opts.merged_over_defaults();
/// assert_eq!(merged.get("fetch_mode"), Some(&json!("num")));
/// assert_eq!(merged.get("error_mode"), Some(&json!("exception")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionOptions(BTreeMap<String, Value>);

impl ConnectionOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed set every connection starts from.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new()
            .with(ERROR_MODE, Value::from("exception"))
            .with(FETCH_MODE, Value::from("assoc"))
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// These options layered over [`ConnectionOptions::defaults`]; ours win on collision.
    #[must_use]
    pub fn merged_over_defaults(&self) -> Self {
        let mut merged = Self::defaults();
        merged
            .0
            .extend(self.0.iter().map(|(key, value)| (key.clone(), value.clone())));
        merged
    }

    /// Keys the native drivers do not read.
    pub fn uninterpreted_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|key| ![ERROR_MODE, FETCH_MODE, TIMEOUT].contains(key))
    }

    /// The `timeout` option as a duration.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConnectionFailed` if the value is not a non-negative integer.
    pub(crate) fn timeout(&self, driver: Driver) -> Result<Option<Duration>> {
        match self.get(TIMEOUT) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_u64().map(|secs| Some(Duration::from_secs(secs))).ok_or_else(
                || {
                    Error::connection_failed(
                        driver,
                        format!("option `{TIMEOUT}` must be a whole number of seconds, got {value}"),
                    )
                },
            ),
        }
    }
}

impl From<Map<String, Value>> for ConnectionOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for ConnectionOptions {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_apply_when_nothing_supplied() {
        let merged = ConnectionOptions::new().merged_over_defaults();
        assert_eq!(merged, ConnectionOptions::defaults());
        assert_eq!(merged.get(ERROR_MODE), Some(&json!("exception")));
        assert_eq!(merged.get(FETCH_MODE), Some(&json!("assoc")));
    }

    #[test]
    fn caller_options_override_defaults() {
        let merged = ConnectionOptions::new()
            .with(FETCH_MODE, "num")
            .with("persistent", true)
            .merged_over_defaults();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(FETCH_MODE), Some(&json!("num")));
        assert_eq!(merged.get("persistent"), Some(&json!(true)));
        assert_eq!(merged.uninterpreted_keys().collect::<Vec<_>>(), vec!["persistent"]);
    }

    #[test]
    fn timeout_is_read_as_seconds() {
        let opts = ConnectionOptions::new().with(TIMEOUT, 5);
        assert_eq!(
            opts.timeout(Driver::Pgsql).unwrap(),
            Some(Duration::from_secs(5))
        );
        assert_eq!(ConnectionOptions::new().timeout(Driver::Pgsql).unwrap(), None);
    }

    #[test]
    fn non_integer_timeout_is_rejected() {
        let opts = ConnectionOptions::new().with(TIMEOUT, "soon");
        let err = opts.timeout(Driver::Mysql).unwrap_err();
        assert!(matches!(err, Error::ConnectionFailed { driver: Driver::Mysql, .. }));
    }

    #[test]
    fn builds_from_json_map() {
        let Value::Object(map) = json!({"timeout": 3, "fetch_mode": "obj"}) else {
            unreachable!()
        };
        let opts = ConnectionOptions::from(map);
        assert_eq!(opts.len(), 2);
        assert_eq!(opts.get(TIMEOUT), Some(&json!(3)));
    }
}
