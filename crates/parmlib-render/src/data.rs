//! Loading member data from YAML files.
//!
//! Data files are read as ISO-8859-1 (every byte maps to the code point of
//! the same value), so files produced on or for z/OS code pages that survived
//! conversion to Latin-1 load without decode errors. The top-level document
//! must be a mapping: its keys become template variables.
//!
//! # Example
//!
//! ```rust
//! use parmlib_render::InputData;
//!
//! let data = InputData::from_yaml_str("db2.yaml", "name: DB2\nlines: [1, 2]\n").unwrap();
//! assert_eq!(data.len(), 2);
//! assert!(data.get("name").is_some());
//! ```

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// The parsed contents of a data file.
///
/// Keys keep the order they have in the file. No schema is applied; whatever
/// the file contains is handed to the template as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct InputData {
    source: PathBuf,
    values: Mapping,
}

impl InputData {
    /// Reads and parses a data file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => Error::DataNotFound(path.to_path_buf()),
            _ => Error::DataRead {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let text = decode_latin1(&bytes);
        log::debug!("read {} bytes from {}", bytes.len(), path.display());
        Self::from_yaml_str(path, &text)
    }

    /// Parses YAML text. `source` is only used in error messages and as the
    /// value of `source_file` when rendering.
    pub fn from_yaml_str(source: impl Into<PathBuf>, text: &str) -> Result<Self> {
        let source = source.into();

        let mut value: Value = serde_yaml::from_str(text).map_err(|e| Error::Parse {
            path: source.clone(),
            source: e,
        })?;
        value.apply_merge().map_err(|e| Error::Parse {
            path: source.clone(),
            source: e,
        })?;

        let values = match value {
            Value::Mapping(map) => map,
            other => {
                return Err(Error::NotAMapping {
                    path: source,
                    found: kind_name(&other),
                })
            }
        };

        if let Some(key) = values.keys().find(|k| !k.is_string()) {
            return Err(Error::NonStringKey {
                path: source,
                key: describe_key(key),
            });
        }

        log::debug!("loaded {} keys from {}", values.len(), source.display());
        Ok(Self { source, values })
    }

    /// The path the data was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Looks up a top-level value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Top-level keys, in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().filter_map(Value::as_str)
    }

    /// Top-level entries, in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .filter_map(|(k, v)| k.as_str().map(|k| (k, v)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Decodes ISO-8859-1 bytes. Infallible: all 256 byte values are assigned.
///
/// This is true Latin-1, not the WHATWG `windows-1252` label, so 0x80..=0x9F
/// become the C1 controls U+0080..=U+009F.
pub fn decode_latin1(bytes: &[u8]) -> Cow<'_, str> {
    encoding_rs::mem::decode_latin1(bytes)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty document",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn describe_key(key: &Value) -> String {
    serde_yaml::to_string(key)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mapping_keeps_file_order() {
        let data = InputData::from_yaml_str("x.yaml", "zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        let keys: Vec<_> = data.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_nested_values_are_kept() {
        let yaml = "sysname: SYS1\nlpars:\n  - name: LP01\n    cpus: 4\n";
        let data = InputData::from_yaml_str("x.yaml", yaml).unwrap();
        let lpars = data.get("lpars").unwrap().as_sequence().unwrap();
        assert_eq!(lpars.len(), 1);
        assert_eq!(lpars[0]["cpus"].as_u64(), Some(4));
    }

    #[test]
    fn test_merge_keys_are_applied() {
        let yaml = "base: &base\n  region: 0M\nstep:\n  <<: *base\n  pgm: IEFBR14\n";
        let data = InputData::from_yaml_str("x.yaml", yaml).unwrap();
        let step = data.get("step").unwrap();
        assert_eq!(step["region"].as_str(), Some("0M"));
        assert!(step.get("<<").is_none());
    }

    #[test]
    fn test_sequence_is_not_a_mapping() {
        let err = InputData::from_yaml_str("x.yaml", "- a\n- b\n").unwrap_err();
        match err {
            Error::NotAMapping { found, .. } => assert_eq!(found, "a sequence"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_scalar_is_not_a_mapping() {
        let err = InputData::from_yaml_str("x.yaml", "42\n").unwrap_err();
        assert!(matches!(err, Error::NotAMapping { found: "a number", .. }));
    }

    #[test]
    fn test_non_string_key_rejected() {
        let err = InputData::from_yaml_str("x.yaml", "name: DB2\n1: one\n").unwrap_err();
        match err {
            Error::NonStringKey { key, .. } => assert_eq!(key, "1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = InputData::from_yaml_str("bad.yaml", "name: [unclosed\n").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.yaml");
        let err = InputData::load(&path).unwrap_err();
        assert!(matches!(err, Error::DataNotFound(p) if p == path));
    }

    #[test]
    fn test_load_decodes_latin1() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("data.yaml");
        // "owner: Jos\xe9" is not valid UTF-8
        std::fs::write(&path, b"owner: Jos\xe9\n").unwrap();

        let data = InputData::load(&path).unwrap();
        assert_eq!(data.get("owner").unwrap().as_str(), Some("José"));
        assert_eq!(data.source(), path.as_path());
    }

    #[test]
    fn test_decode_latin1_full_range() {
        let bytes: Vec<u8> = (0..=255).collect();
        let text = decode_latin1(&bytes);
        assert_eq!(text.chars().count(), 256);
        assert_eq!(text.chars().last(), Some('\u{ff}'));
    }

    #[test]
    fn test_decode_latin1_c1_range_is_not_windows_1252() {
        // windows-1252 would give '€' for 0x80
        assert_eq!(decode_latin1(&[0x80, 0x9f, b'A']), "\u{80}\u{9f}A");
    }
}
