//! Main ConfigNode type for yamlconf
//!
//! A ConfigNode is one section of a configuration tree. Every nested mapping
//! of the source document becomes a child node, and every leaf is
//! interpolated and cast once, while the tree is built.

use std::fmt;
use std::ops::Index;
use std::path::Path;

use indexmap::IndexMap;

use crate::document::{self, Document, RawValue};
use crate::error::{Error, Result};
use crate::interpolation::{self, Environment, ProcessEnv};
use crate::value::Value;

/// Replacement emitted for redacted keys
pub const SECRET_MASK: &str = "************";

/// Options fixed when a tree is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeOptions {
    /// Reject `insert`, `remove` and `get_mut` on every node of the tree
    pub frozen: bool,
    /// Dotted paths redacted by `to_dict` and `Display` when no secrets are
    /// passed explicitly
    pub secrets: Vec<String>,
}

impl NodeOptions {
    /// Set the frozen flag
    pub fn frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    /// Set the default redaction targets
    pub fn secrets<I, S>(mut self, secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secrets = secrets.into_iter().map(Into::into).collect();
        self
    }
}

/// One section of a configuration tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigNode {
    store: IndexMap<String, Value>,
    options: NodeOptions,
}

impl ConfigNode {
    /// Build a tree from a document, resolving placeholders against the
    /// process environment
    pub fn new(document: Document) -> Result<Self> {
        Self::with_options(document, NodeOptions::default())
    }

    /// Build a tree with custom options
    pub fn with_options(document: Document, options: NodeOptions) -> Result<Self> {
        Self::with_env(document, options, &ProcessEnv)
    }

    /// Build a tree with custom options and environment
    pub fn with_env(
        document: Document,
        options: NodeOptions,
        env: &dyn Environment,
    ) -> Result<Self> {
        let node = Self::build(document, &options, env)?;
        log::debug!("Built config with {} top-level keys", node.len());
        Ok(node)
    }

    fn build(document: Document, options: &NodeOptions, env: &dyn Environment) -> Result<Self> {
        let mut store = IndexMap::with_capacity(document.len());

        for (key, raw) in document {
            let value = match raw {
                RawValue::Mapping(child) => Value::Node(
                    Self::build(child, options, env).map_err(|e| e.under(&key))?,
                ),
                other => interpolation::interpolate_with(&other, env)
                    .map_err(|e| e.under(&key))?
                    .map(Value::from)
                    .unwrap_or(Value::Null),
            };
            store.insert(key, value);
        }

        Ok(Self {
            store,
            options: options.clone(),
        })
    }

    /// Load configuration from a YAML (or JSON) file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_options(path, NodeOptions::default())
    }

    /// Load configuration from a file with options
    pub fn load_with_options(path: impl AsRef<Path>, options: NodeOptions) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading config from {}", path.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::source_read(path.display().to_string(), e.to_string()))?;

        Self::from_yaml_with_options(&content, options)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_yaml_with_options(yaml, NodeOptions::default())
    }

    /// Load configuration from a YAML string with options
    pub fn from_yaml_with_options(yaml: &str, options: NodeOptions) -> Result<Self> {
        Self::with_options(document::parse_document(yaml)?, options)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(document::parse_json_document(json)?)
    }

    /// Get a value by a sequence of keys
    ///
    /// Each key but the last selects a child section. Only the last key may
    /// be missing, in which case `Ok(None)` is returned. An intermediate key
    /// that is absent, holds a falsy value (null, `false`, `0`, empty string,
    /// list or section) or holds a non-section value is an error.
    ///
    /// ```
    /// use yamlconf::ConfigNode;
    ///
    /// let config = ConfigNode::from_yaml("config:\n  a:\n    b: value\n").unwrap();
    /// assert_eq!(config.get(&["config", "a", "b"]).unwrap().unwrap().as_str(), Some("value"));
    /// assert!(config.get(&["config", "a", "missing"]).unwrap().is_none());
    /// assert!(config.get(&["missing", "b"]).is_err());
    /// ```
    pub fn get(&self, keys: &[&str]) -> Result<Option<&Value>> {
        match keys {
            [] => Err(Error::invalid_argument("get() requires at least one key")),
            [key] => Ok(self.store.get(*key)),
            [first, rest @ ..] => {
                let child = match self.store.get(*first) {
                    Some(value) if value.is_truthy() => value,
                    _ => return Err(Error::missing_key(*first)),
                };
                let node = child.as_node().ok_or_else(|| {
                    let mut err = Error::missing_key(*first);
                    err.cause = Some(format!("Expected a section, found {}", child.type_name()));
                    err
                })?;
                node.get(rest).map_err(|e| e.under(first))
            }
        }
    }

    /// Get a value by a sequence of keys, falling back to `default` when the
    /// last key is missing
    pub fn get_or<'a>(&'a self, keys: &[&str], default: &'a Value) -> Result<&'a Value> {
        Ok(self.get(keys)?.unwrap_or(default))
    }

    /// Get a value by dotted path (e.g., "database.host")
    pub fn get_path(&self, path: &str) -> Result<Option<&Value>> {
        let keys: Vec<&str> = path.split('.').collect();
        self.get(&keys)
    }

    /// Check whether this node has the given immediate key
    pub fn contains_key(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    /// Mutable access to an immediate value
    pub fn get_mut(&mut self, key: &str) -> Result<Option<&mut Value>> {
        self.ensure_mutable(key)?;
        Ok(self.store.get_mut(key))
    }

    /// Set an immediate key, returning the previous value
    ///
    /// The value is stored as given; no interpolation is applied.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let key = key.into();
        self.ensure_mutable(&key)?;
        Ok(self.store.insert(key, value.into()))
    }

    /// Remove an immediate key, returning its value
    pub fn remove(&mut self, key: &str) -> Result<Value> {
        self.ensure_mutable(key)?;
        self.store
            .shift_remove(key)
            .ok_or_else(|| Error::missing_key(key))
    }

    fn ensure_mutable(&self, key: &str) -> Result<()> {
        if self.options.frozen {
            return Err(Error::frozen(key));
        }
        Ok(())
    }

    /// Whether writes are rejected
    pub fn is_frozen(&self) -> bool {
        self.options.frozen
    }

    /// Number of immediate keys
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if this node has no keys
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Iterate over immediate keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.store.keys().map(String::as_str)
    }

    /// Iterate over immediate key/value pairs in document order
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.store.iter()
    }

    /// Export as a plain nested mapping
    ///
    /// `secrets` are dotted paths from the root of this node. A matching key
    /// is emitted as [`SECRET_MASK`] whatever its value, so redacting a
    /// section hides it as a whole. An empty slice falls back to the secrets
    /// from [`NodeOptions`].
    pub fn to_dict<S: AsRef<str>>(&self, secrets: &[S]) -> Document {
        if secrets.is_empty() {
            let defaults: Vec<&str> =
                self.options.secrets.iter().map(String::as_str).collect();
            self.redacted("", &defaults)
        } else {
            let secrets: Vec<&str> = secrets.iter().map(|s| s.as_ref()).collect();
            self.redacted("", &secrets)
        }
    }

    fn redacted(&self, prefix: &str, secrets: &[&str]) -> Document {
        let mut result = Document::with_capacity(self.store.len());

        for (key, value) in &self.store {
            let full_key = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };

            let exported = if secrets.contains(&full_key.as_str()) {
                RawValue::String(SECRET_MASK.to_string())
            } else {
                match value {
                    Value::Null => RawValue::Null,
                    Value::Scalar(p) => p.to_raw(),
                    Value::List(items) => {
                        RawValue::Sequence(items.iter().map(|p| p.to_raw()).collect())
                    }
                    Value::Node(node) => RawValue::Mapping(node.redacted(&full_key, secrets)),
                }
            };
            result.insert(key.clone(), exported);
        }

        result
    }

    /// Export as pretty-printed JSON (2-space indent)
    ///
    /// JSON has no infinity or NaN, so non-finite floats are written as the
    /// strings `inf`, `-inf` and `NaN` rather than `null`.
    pub fn to_json<S: AsRef<str>>(&self, secrets: &[S]) -> Result<String> {
        let dict: Document = self
            .to_dict(secrets)
            .into_iter()
            .map(|(key, value)| (key, json_safe(value)))
            .collect();
        serde_json::to_string_pretty(&dict).map_err(|e| Error::serialize("JSON", e.to_string()))
    }

    /// Export as YAML
    pub fn to_yaml<S: AsRef<str>>(&self, secrets: &[S]) -> Result<String> {
        serde_yaml::to_string(&self.to_dict(secrets))
            .map_err(|e| Error::serialize("YAML", e.to_string()))
    }
}

fn json_safe(value: RawValue) -> RawValue {
    match value {
        RawValue::Float(f) if !f.is_finite() => RawValue::String(f.to_string()),
        RawValue::Sequence(items) => {
            RawValue::Sequence(items.into_iter().map(json_safe).collect())
        }
        RawValue::Mapping(map) => {
            RawValue::Mapping(map.into_iter().map(|(k, v)| (k, json_safe(v))).collect())
        }
        other => other,
    }
}

impl Index<&str> for ConfigNode {
    type Output = Value;

    /// Panics if the key is missing; use [`ConfigNode::get`] to avoid that
    fn index(&self, key: &str) -> &Value {
        &self.store[key]
    }
}

impl<'a> IntoIterator for &'a ConfigNode {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.iter()
    }
}

impl fmt::Display for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json::<&str>(&[]).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}
