//! Error types for folder scanning, JSON reading and workbook export

use std::fmt;

/// Failures raised by a directory capability handle
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HandleError {
    #[error("'{name}' not found")]
    NotFound { name: String },

    #[error("'{name}' is not a directory")]
    NotADirectory { name: String },

    #[error("'{name}' is not a file")]
    NotAFile { name: String },

    #[error("Invalid entry name: '{name}'")]
    InvalidName { name: String },

    #[error("IO error on '{name}': {message}")]
    Io { name: String, message: String },
}

impl HandleError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Map an IO error for the named entry, keeping "not found" distinguishable
    pub fn from_io(name: impl Into<String>, error: &std::io::Error) -> Self {
        let name = name.into();
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { name },
            _ => Self::Io {
                name,
                message: error.to_string(),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// JSON parsing errors
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self { message, location }
    }

    pub fn from_serde(error: &serde_json::Error) -> Self {
        let location = if error.line() > 0 {
            Some((error.line(), error.column()))
        } else {
            None
        };
        // serde_json appends "at line X column Y" itself; keep the bare description
        let message = error
            .to_string()
            .split(" at line ")
            .next()
            .unwrap_or_default()
            .to_string();
        Self::new(format!("Invalid JSON: {}", message), location)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Errors from flattening a JSON value into a row
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlattenError {
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("nesting deeper than {limit} levels at '{path}'")]
    TooDeep { path: String, limit: usize },
}

/// Per-file failure. Recorded against the file, never aborts the batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FileError {
    #[error("Could not locate file: {0}")]
    Resolution(HandleError),

    #[error("Could not read file: {0}")]
    Read(HandleError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Unsupported top-level JSON value: {kind} (expected an object or array)")]
    Shape { kind: &'static str },

    #[error("Could not flatten record {index}: {source}")]
    Flatten {
        index: usize,
        #[source]
        source: FlattenError,
    },
}

/// Errors that abort a whole scan or generate operation
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Too many files: found {count} JSON files (limit: {limit})")]
    TooManyFiles { count: usize, limit: usize },

    #[error("Folder selection is not supported in this environment")]
    UnsupportedEnvironment,

    #[error("Manual path input requires a live directory handle: '{path}'")]
    RequiresLiveHandle { path: String },

    #[error("No folder has been scanned yet")]
    NoFolderSelected,

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Could not open folder: {0}")]
    Handle(#[from] HandleError),

    #[error("Spreadsheet generation failed: {0}")]
    Emit(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExportError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::TooManyFiles { count, limit } => format!(
                "Too many files! Found {} JSON files, but the limit is {} files to prevent \
                 memory issues. Please select a folder with fewer files or split your data \
                 into smaller folders.",
                count, limit
            ),
            Self::UnsupportedEnvironment => {
                "Folder selection is not supported in this environment.".to_string()
            }
            Self::RequiresLiveHandle { .. } => {
                "Manual path input requires a live directory handle. Please use the folder picker."
                    .to_string()
            }
            Self::NoFolderSelected => "Please select and scan a folder first.".to_string(),
            Self::Other(err) => format!("Unexpected error: {}", err),
            _ => self.to_string(),
        }
    }
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for handle operations
pub type HandleResult<T> = Result<T, HandleError>;

/// Name of a JSON value's type, as used in error messages
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
