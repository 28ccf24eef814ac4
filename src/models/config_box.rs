use std::fmt;
use std::ops::Index;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Read-only mapping loaded from a YAML or JSON file.
///
/// Entries can be reached by key (`cfg.get("root_dir")`, `cfg["root_dir"]`)
/// or field-style (`cfg.section("data_ingestion")?.attr("root_dir")?`,
/// `cfg.lookup("data_ingestion.root_dir")`). The whole box can also be
/// deserialized into a typed struct with [`ConfigBox::to_typed`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigBox {
    inner: Map<String, Value>,
}

impl ConfigBox {
    pub fn new(inner: Map<String, Value>) -> Self {
        Self { inner }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Field-style access; a missing name is an error rather than `None`
    pub fn attr(&self, name: &str) -> Result<&Value> {
        self.inner
            .get(name)
            .ok_or_else(|| Error::MissingKey(name.to_string()))
    }

    /// Nested mapping under `name`, boxed so it can be navigated the same way
    pub fn section(&self, name: &str) -> Result<ConfigBox> {
        ConfigBox::try_from(self.attr(name)?.clone())
    }

    /// Walk a dotted path such as `model.params.depth` or `stages.0.name`
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.inner.get(parts.next()?)?;
        for part in parts {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn attr_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        Ok(serde_json::from_value(self.attr(name)?.clone())?)
    }

    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.inner.clone()))?)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.inner
    }
}

impl From<Map<String, Value>> for ConfigBox {
    fn from(inner: Map<String, Value>) -> Self {
        Self::new(inner)
    }
}

impl TryFrom<Value> for ConfigBox {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(inner) => Ok(Self { inner }),
            other => Err(Error::type_mismatch("mapping", &other)),
        }
    }
}

impl Index<&str> for ConfigBox {
    type Output = Value;

    /// Panics if `key` is absent, like indexing any other map
    fn index(&self, key: &str) -> &Value {
        &self.inner[key]
    }
}

impl fmt::Display for ConfigBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string_pretty(&self.inner).map_err(|_| fmt::Error)?;
        write!(f, "{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ConfigBox {
        ConfigBox::try_from(json!({
            "artifacts_root": "artifacts",
            "data_ingestion": {
                "root_dir": "artifacts/data_ingestion",
                "source_url": "https://example.com/data.zip"
            },
            "stages": [{"name": "ingest"}, {"name": "train"}],
            "epochs": 10
        }))
        .unwrap()
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct DataIngestion {
        root_dir: String,
        source_url: String,
    }

    #[test]
    fn test_key_and_field_access_agree() {
        let cfg = sample();
        assert_eq!(cfg["artifacts_root"], json!("artifacts"));
        assert_eq!(cfg.get("artifacts_root"), Some(&json!("artifacts")));
        assert_eq!(cfg.attr("artifacts_root").unwrap(), &json!("artifacts"));
        assert_eq!(cfg.len(), 4);
        assert!(cfg.contains_key("epochs"));
    }

    #[test]
    fn test_section_and_lookup() {
        let cfg = sample();
        let ingestion = cfg.section("data_ingestion").unwrap();
        assert_eq!(ingestion["root_dir"], json!("artifacts/data_ingestion"));
        assert_eq!(
            cfg.lookup("data_ingestion.root_dir"),
            Some(&json!("artifacts/data_ingestion"))
        );
        assert_eq!(cfg.lookup("stages.1.name"), Some(&json!("train")));
        assert_eq!(cfg.lookup("stages.7.name"), None);
        assert_eq!(cfg.lookup("epochs.nope"), None);
    }

    #[test]
    fn test_missing_and_mistyped_fields() {
        let cfg = sample();
        assert!(matches!(cfg.attr("nope"), Err(Error::MissingKey(k)) if k == "nope"));
        assert!(matches!(
            cfg.section("epochs"),
            Err(Error::TypeMismatch { expected: "mapping", found: "number" })
        ));
    }

    #[test]
    fn test_typed_access() {
        let cfg = sample();
        let epochs: u32 = cfg.attr_as("epochs").unwrap();
        assert_eq!(epochs, 10);

        let ingestion: DataIngestion = cfg.section("data_ingestion").unwrap().to_typed().unwrap();
        assert_eq!(
            ingestion,
            DataIngestion {
                root_dir: "artifacts/data_ingestion".to_string(),
                source_url: "https://example.com/data.zip".to_string(),
            }
        );
    }

    #[test]
    fn test_non_mapping_is_rejected() {
        let err = ConfigBox::try_from(json!("just a string")).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { found: "string", .. }));
    }

    #[test]
    fn test_serializes_as_plain_mapping() {
        let cfg = sample();
        let value = serde_json::to_value(&cfg).unwrap();
        assert_eq!(value["epochs"], json!(10));
        let back: ConfigBox = serde_json::from_value(value).unwrap();
        assert_eq!(back, cfg);
    }
}
