//! The render context: user data plus injected values.
//!
//! Two values are injected into every render:
//!
//! - `now`: a [`Timestamp`] captured when the context is built
//! - `source_file`: the data file path exactly as it was given
//!
//! # Precedence
//!
//! User data wins. A data file that defines `now` or `source_file` itself
//! shadows the injected value, matching how template globals behave in Jinja.
//! The collision is never silent: it is logged at `warn` level and the
//! shadowed names are available from [`RenderContext::shadowed`].

use std::collections::HashMap;

use minijinja::Value;

use crate::data::InputData;
use crate::timestamp::Timestamp;

/// Name of the injected timestamp variable.
pub const NOW_KEY: &str = "now";

/// Name of the injected data path variable.
pub const SOURCE_FILE_KEY: &str = "source_file";

/// The full set of variables a template is rendered with.
#[derive(Debug, Clone)]
pub struct RenderContext {
    values: HashMap<String, Value>,
    shadowed: Vec<&'static str>,
    now: Timestamp,
}

impl RenderContext {
    /// Builds a context stamped with the current time.
    pub fn new(data: &InputData) -> Self {
        Self::at(data, Timestamp::now())
    }

    /// Builds a context with an explicit timestamp.
    pub fn at(data: &InputData, now: Timestamp) -> Self {
        let source_file = data.source().to_string_lossy().into_owned();
        let injected: [(&'static str, Value); 2] = [
            (NOW_KEY, Value::from(now)),
            (SOURCE_FILE_KEY, Value::from(source_file)),
        ];

        let mut values = HashMap::with_capacity(data.len() + injected.len());
        let mut shadowed = Vec::new();

        for (key, value) in injected {
            if data.get(key).is_some() {
                log::warn!(
                    "{} defines `{}`, which shadows the injected value",
                    data.source().display(),
                    key
                );
                shadowed.push(key);
            } else {
                values.insert(key.to_string(), value);
            }
        }

        for (key, value) in data.iter() {
            values.insert(key.to_string(), Value::from_serialize(value));
        }

        Self {
            values,
            shadowed,
            now,
        }
    }

    /// The timestamp that was injected (or would have been, if shadowed).
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Injected names that the data file overrides.
    pub fn shadowed(&self) -> &[&'static str] {
        &self.shadowed
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub(crate) fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixed_now() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    }

    #[test]
    fn test_injects_now_and_source_file() {
        let data = InputData::from_yaml_str("conf/db2.yaml", "name: DB2\n").unwrap();
        let ctx = RenderContext::at(&data, fixed_now());

        assert_eq!(ctx.get("name").unwrap().as_str(), Some("DB2"));
        assert_eq!(
            ctx.get(SOURCE_FILE_KEY).unwrap().as_str(),
            Some("conf/db2.yaml")
        );
        assert_eq!(
            ctx.get(NOW_KEY).unwrap().to_string(),
            "2024-01-02 03:04:05+00:00"
        );
        assert!(ctx.shadowed().is_empty());
    }

    #[test]
    fn test_user_data_shadows_injected_keys() {
        let yaml = "now: yesterday\nsource_file: elsewhere.yaml\n";
        let data = InputData::from_yaml_str("db2.yaml", yaml).unwrap();
        let ctx = RenderContext::at(&data, fixed_now());

        assert_eq!(ctx.get(NOW_KEY).unwrap().as_str(), Some("yesterday"));
        assert_eq!(
            ctx.get(SOURCE_FILE_KEY).unwrap().as_str(),
            Some("elsewhere.yaml")
        );
        assert_eq!(ctx.shadowed(), &[NOW_KEY, SOURCE_FILE_KEY]);
        assert_eq!(ctx.now(), fixed_now());
    }

    #[test]
    fn test_partial_shadowing() {
        let data = InputData::from_yaml_str("db2.yaml", "source_file: x\n").unwrap();
        let ctx = RenderContext::at(&data, fixed_now());

        assert_eq!(ctx.shadowed(), &[SOURCE_FILE_KEY]);
        assert!(ctx.get(NOW_KEY).is_some());
    }
}
