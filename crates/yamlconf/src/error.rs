//! Error types for yamlconf
//!
//! Every failure carries a kind, the dotted key path it happened at when one
//! is known, and an actionable help message.

use std::fmt;

/// Result type alias for yamlconf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for yamlconf operations
#[derive(Debug, Clone)]
pub struct Error {
    /// The kind of error that occurred
    pub kind: ErrorKind,
    /// Dotted key path in the config where the error occurred (e.g., "database.port")
    pub path: Option<String>,
    /// Actionable help message
    pub help: Option<String>,
    /// Underlying cause (as string for Clone compatibility)
    pub cause: Option<String>,
}

/// Categories of errors that can occur
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A placeholder names a variable that is unset and has no default
    #[error("Environment variable not found: {var_name}")]
    EnvironmentResolution { var_name: String },
    /// The configuration source could not be read
    #[error("Failed to read configuration source: {source_path}")]
    SourceRead { source_path: String },
    /// The document is not well-formed or has an unsupported shape
    #[error("Parse error")]
    DocumentParse,
    /// An intermediate key of a lookup does not resolve to a section
    #[error("Missing key: {key}")]
    MissingKey { key: String },
    /// Attempted write on a frozen node
    #[error("Config is frozen, cannot modify key: {key}")]
    FrozenMutation { key: String },
    /// A config tree could not be rendered in an output format
    #[error("Failed to serialize configuration as {format}")]
    Serialize { format: String },
    /// A call was made with arguments it cannot accept
    #[error("Invalid argument")]
    InvalidArgument,
}

impl Error {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: None,
            help: None,
            cause: None,
        }
    }

    /// Create an environment variable resolution error
    pub fn env_not_found(var_name: impl Into<String>) -> Self {
        let var = var_name.into();
        Self::new(ErrorKind::EnvironmentResolution {
            var_name: var.clone(),
        })
        .with_help(format!(
            "Set the {} environment variable or provide a default: ${{{}:value}}",
            var, var
        ))
    }

    /// Create a source read error
    pub fn source_read(source_path: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            cause: Some(cause.into()),
            ..Self::new(ErrorKind::SourceRead {
                source_path: source_path.into(),
            })
        }
        .with_help("Check that the file exists and is readable")
    }

    /// Create a document parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            cause: Some(message.into()),
            ..Self::new(ErrorKind::DocumentParse)
        }
    }

    /// Create a missing key error
    pub fn missing_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(ErrorKind::MissingKey { key: key.clone() }).with_help(format!(
            "Check that '{}' exists and holds a non-empty section",
            key
        ))
    }

    /// Create a frozen mutation error
    pub fn frozen(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::FrozenMutation { key: key.into() })
            .with_help("Build the config with NodeOptions::frozen(false) to allow writes")
    }

    /// Create an export error for the given output format
    pub fn serialize(format: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            cause: Some(cause.into()),
            ..Self::new(ErrorKind::Serialize {
                format: format.into(),
            })
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            cause: Some(message.into()),
            ..Self::new(ErrorKind::InvalidArgument)
        }
    }

    /// Add path context to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Prefix the path context with a parent key, so errors raised deep in
    /// the tree report the full dotted path from the root
    pub fn under(mut self, parent: &str) -> Self {
        self.path = Some(match self.path.take() {
            Some(child) => format!("{}.{}", parent, child),
            None => parent.to_string(),
        });
        self
    }

    /// Add help message to the error
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(path) = &self.path {
            write!(f, "\n  Path: {}", path)?;
        }

        if let Some(cause) = &self.cause {
            write!(f, "\n  {}", cause)?;
        }

        if let Some(help) = &self.help {
            write!(f, "\n  Help: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}
