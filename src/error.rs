//! Error types for the AdLab studio
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Error context and chaining
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for studio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,

    // Catalog errors (3xx)
    CatalogFetch = 300,
    CatalogTimeout = 301,
    CatalogDecode = 302,

    // Validation errors (4xx)
    SelectionIncomplete = 400,
    BriefMissing = 401,
    InvalidCount = 402,
    UnknownSelection = 403,

    // Generation errors (5xx)
    GenerationFailed = 500,
    GenerationBusy = 501,

    // Internal errors (9xx)
    InternalError = 900,
    NotSupported = 901,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Catalog errors
            400..=499 => 40, // Validation errors
            500..=599 => 50, // Generation errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for the studio
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation {
        message: String,
        field: Option<String>,
    },

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Catalog Errors
    // ─────────────────────────────────────────────────────────────

    /// Row fetch from the catalog failed
    #[error("Failed to fetch {resource} from catalog: {message}")]
    CatalogFetch { resource: String, message: String },

    /// Catalog request timed out
    #[error("Catalog request for {resource} timed out after {timeout_secs}s")]
    CatalogTimeout {
        resource: String,
        timeout_secs: u64,
    },

    /// Catalog response could not be decoded
    #[error("Failed to decode {resource} rows: {message}")]
    CatalogDecode { resource: String, message: String },

    /// HTTP transport error while talking to the catalog
    #[error("Catalog transport error: {0}")]
    Http(#[from] reqwest::Error),

    // ─────────────────────────────────────────────────────────────
    // Validation Errors
    // ─────────────────────────────────────────────────────────────

    /// Company, product, and persona must all be selected
    #[error("Selection incomplete: {missing} not selected")]
    SelectionIncomplete { missing: &'static str },

    /// A brief must be supplied or explicitly opted out of
    #[error("No campaign brief: supply brief text or opt out explicitly")]
    BriefMissing,

    /// Requested concept count is not a positive integer within limits
    #[error("Invalid concept count {count}: must be between 1 and {max}")]
    InvalidCount { count: u32, max: u32 },

    /// A selected identifier is not present in its candidate list
    #[error("Selected {kind} '{id}' is not in the candidate list")]
    UnknownSelection { kind: &'static str, id: String },

    // ─────────────────────────────────────────────────────────────
    // Generation Errors
    // ─────────────────────────────────────────────────────────────

    /// The generation collaborator failed
    #[error("Concept generation failed: {message}")]
    GenerationFailed { message: String },

    /// A generation call is already in flight
    #[error("Concept generation already in progress")]
    GenerationBusy,

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Feature not supported
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::CatalogFetch { .. } => ErrorCode::CatalogFetch,
            Error::CatalogTimeout { .. } => ErrorCode::CatalogTimeout,
            Error::CatalogDecode { .. } => ErrorCode::CatalogDecode,
            Error::Http(e) if e.is_timeout() => ErrorCode::CatalogTimeout,
            Error::Http(e) if e.is_decode() => ErrorCode::CatalogDecode,
            Error::Http(_) => ErrorCode::CatalogFetch,

            Error::SelectionIncomplete { .. } => ErrorCode::SelectionIncomplete,
            Error::BriefMissing => ErrorCode::BriefMissing,
            Error::InvalidCount { .. } => ErrorCode::InvalidCount,
            Error::UnknownSelection { .. } => ErrorCode::UnknownSelection,

            Error::GenerationFailed { .. } => ErrorCode::GenerationFailed,
            Error::GenerationBusy => ErrorCode::GenerationBusy,

            Error::NotSupported(_) => ErrorCode::NotSupported,
            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::CatalogFetch { .. }
                | Error::CatalogTimeout { .. }
                | Error::Http(_)
                | Error::GenerationBusy
                | Error::Io(_)
                | Error::IoRead { .. }
                | Error::IoWrite { .. }
        )
    }

    /// Check if the error is fatal (the CLI should exit)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConfigNotFound { .. }
                | Error::ConfigParse { .. }
                | Error::ConfigValidation { .. }
                | Error::Internal(_)
        )
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => {
                Some("Run 'adlab config init' to create a default configuration file.")
            }
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'adlab config validate' to see details.",
            ),
            Error::ConfigValidation { .. } => Some(
                "Review the configuration file and fix the invalid values. See documentation for valid options.",
            ),

            Error::CatalogFetch { .. } => Some(
                "Check your network connection and verify the catalog base URL and API key are correct.",
            ),
            Error::CatalogTimeout { .. } => Some(
                "The catalog may be slow or unreachable. Raise 'timeout_secs' under [catalog] or try again.",
            ),
            Error::CatalogDecode { .. } => Some(
                "The catalog returned rows in an unexpected shape. Verify the base URL points at the campaign schema.",
            ),

            Error::SelectionIncomplete { .. } => {
                Some("Select a company, product, and user persona before generating.")
            }
            Error::BriefMissing => Some(
                "Provide a campaign brief with --brief, or pass --no-brief to generate without one.",
            ),
            Error::InvalidCount { .. } => {
                Some("Request at least one concept; 'max_count' under [generator] caps the batch size.")
            }
            Error::UnknownSelection { .. } => Some(
                "List the candidates with 'adlab catalog' and select an id from the current company.",
            ),

            Error::GenerationFailed { .. } => {
                Some("No concepts were added. The selections are intact; try generating again.")
            }
            Error::GenerationBusy => Some("Wait for the current generation to finish, then retry."),

            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let suggestion = self.suggestion();

        let mut output = format!("\x1b[31mError [{}]\x1b[0m: {}\n", code.as_str(), self);

        if let Some(hint) = suggestion {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        let code = self.code();
        format!("[{}] {}", code.as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors (for ergonomic error creation)
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    /// Create a config parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Error::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create a config validation error
    pub fn config_validation(message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a catalog fetch error
    pub fn catalog_fetch(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Error::CatalogFetch {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create a catalog decode error
    pub fn catalog_decode(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Error::CatalogDecode {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create a generation failed error
    pub fn generation_failed(message: impl Into<String>) -> Self {
        Error::GenerationFailed {
            message: message.into(),
        }
    }

    /// Create an unknown selection error
    pub fn unknown_selection(kind: &'static str, id: impl Into<String>) -> Self {
        Error::UnknownSelection {
            kind,
            id: id.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
