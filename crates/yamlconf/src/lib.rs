//! yamlconf: YAML configuration with environment interpolation
//!
//! This crate loads a YAML (or JSON) document into a tree of [`ConfigNode`]s,
//! resolving `${VAR}` and `${VAR:default}` placeholders against the
//! environment and inferring booleans, numbers and comma separated lists from
//! string values. Selected keys can be redacted when exporting for logs.
//!
//! # Example
//!
//! ```rust
//! use yamlconf::{ConfigNode, Value};
//!
//! let yaml = r#"
//! database:
//!   host: ${YAMLCONF_DOC_HOST:localhost}
//!   port: "5432"
//!   password: hunter2
//! "#;
//!
//! let config = ConfigNode::from_yaml(yaml).unwrap();
//! assert_eq!(config.get(&["database", "host"]).unwrap(), Some(&Value::from("localhost")));
//! assert_eq!(config.get_path("database.port").unwrap(), Some(&Value::from(5432)));
//!
//! let safe = config.to_json(&["database.password"]).unwrap();
//! assert!(!safe.contains("hunter2"));
//! ```

pub mod cast;
pub mod document;
pub mod error;
pub mod interpolation;
pub mod value;

mod config;

pub use cast::Cast;
pub use config::{ConfigNode, NodeOptions, SECRET_MASK};
pub use document::{parse_document, Document, RawValue};
pub use error::{Error, ErrorKind, Result};
pub use interpolation::{Environment, ProcessEnv};
pub use value::{Primitive, Value};
