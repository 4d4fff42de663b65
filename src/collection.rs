//! Collection descriptors and the attribute tables they are built from
//!
//! A [`Collection`] tells the collection manager which attributes to attach to
//! the files it publishes. It is built from an [`AttributeTable`], an ordered
//! list of glob patterns each paired with a set of scalar attributes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use prost_types::value::Kind;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ClientError, Result};
use crate::manager::proto;

/// JSON-compatible scalar attached to a file or used as a retrieve filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<AttributeValue> for prost_types::Value {
    fn from(value: AttributeValue) -> Self {
        let kind = match value {
            AttributeValue::Bool(b) => Kind::BoolValue(b),
            AttributeValue::Number(n) => Kind::NumberValue(n),
            AttributeValue::String(s) => Kind::StringValue(s),
        };
        prost_types::Value { kind: Some(kind) }
    }
}

impl TryFrom<serde_json::Value> for AttributeValue {
    type Error = ClientError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Bool(b) => Ok(AttributeValue::Bool(b)),
            serde_json::Value::Number(n) => n.as_f64().map(AttributeValue::Number).ok_or_else(|| {
                ClientError::InvalidAttributes(format!("number {} is out of range", n))
            }),
            serde_json::Value::String(s) => Ok(AttributeValue::String(s)),
            other => Err(ClientError::InvalidAttributes(format!(
                "expected a string, boolean or number, got {}",
                other
            ))),
        }
    }
}

/// Attribute key/value pairs, ordered by key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, AttributeValue>);

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }

    /// Parse a JSON object of scalars, e.g. `{"images": true, "size": 3}`
    pub fn from_json(input: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| ClientError::InvalidAttributes(format!("not valid JSON: {}", e)))?;

        let serde_json::Value::Object(object) = value else {
            return Err(ClientError::InvalidAttributes(
                "expected a JSON object of key/value pairs".to_string(),
            ));
        };

        let mut attributes = AttributeMap::new();
        for (key, value) in object {
            let value = AttributeValue::try_from(value).map_err(|e| match e {
                ClientError::InvalidAttributes(reason) => {
                    ClientError::InvalidAttributes(format!("attribute {}: {}", key, reason))
                }
                other => other,
            })?;
            attributes.insert(key, value);
        }
        Ok(attributes)
    }

    pub fn to_struct(&self) -> prost_types::Struct {
        prost_types::Struct {
            fields: self
                .0
                .iter()
                .map(|(k, v)| (k.clone(), v.clone().into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A glob pattern and the attributes applied to files matching it
#[derive(Debug, Clone, PartialEq)]
pub struct FileAttributeRule {
    pub pattern: String,
    pub attributes: AttributeMap,
}

impl FileAttributeRule {
    pub fn new(pattern: impl Into<String>, attributes: AttributeMap) -> Self {
        Self {
            pattern: pattern.into(),
            attributes,
        }
    }
}

/// Pattern to attribute table used to build a [`Collection`] on push
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeTable {
    rules: Vec<FileAttributeRule>,
}

impl Default for AttributeTable {
    fn default() -> Self {
        Self::new(vec![
            FileAttributeRule::new("*.jpg", [("images", true)].into_iter().collect()),
            FileAttributeRule::new("*.json", [("metadata", true)].into_iter().collect()),
        ])
    }
}

impl AttributeTable {
    pub fn new(rules: Vec<FileAttributeRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[FileAttributeRule] {
        &self.rules
    }

    /// Load a table from a JSON file shaped like
    /// `{"*.jpg": {"images": true}, "*.json": {"metadata": true}}`.
    ///
    /// Rules come out ordered by pattern.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ClientError::config(path, format!("failed to read file: {}", e)))?;

        let raw: BTreeMap<String, serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(&contents)
                .map_err(|e| ClientError::config(path, format!("failed to parse JSON: {}", e)))?;

        let mut rules = Vec::with_capacity(raw.len());
        for (pattern, attrs) in raw {
            let mut attributes = AttributeMap::new();
            for (key, value) in attrs {
                let value = AttributeValue::try_from(value).map_err(|e| {
                    ClientError::config(path, format!("pattern {}, attribute {}: {}", pattern, key, e))
                })?;
                attributes.insert(key, value);
            }
            rules.push(FileAttributeRule::new(pattern, attributes));
        }

        Ok(Self::new(rules))
    }
}

/// Ordered file rules sent with a publish request
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub files: Vec<FileAttributeRule>,
}

impl Collection {
    /// Build a collection with one file rule per table entry.
    pub fn build(table: &AttributeTable) -> Self {
        let files = table
            .rules()
            .iter()
            .map(|rule| {
                for (key, value) in rule.attributes.iter() {
                    info!(
                        "Applying attribute {}={} to file pattern {}",
                        key, value, rule.pattern
                    );
                }
                rule.clone()
            })
            .collect();

        Self { files }
    }
}

impl From<Collection> for proto::Collection {
    fn from(collection: Collection) -> Self {
        proto::Collection {
            files: collection
                .files
                .into_iter()
                .map(|rule| proto::File {
                    attributes: Some(rule.attributes.to_struct()),
                    file: rule.pattern,
                })
                .collect(),
        }
    }
}
