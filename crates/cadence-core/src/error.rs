//! Error types for the Cadence library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// How the generative service rejected a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFailure {
    /// Bad, revoked or under-privileged credential (401/403)
    Credential,
    /// Quota or rate limit exhausted on the service side (429)
    RateLimited,
    /// Model unknown or not offered in the caller's region (404, or a 400
    /// `FAILED_PRECONDITION`)
    ModelUnavailable,
    /// The service itself is failing (5xx)
    Unavailable,
    /// The request never produced an HTTP response
    Transport,
    /// Any other rejection (usually a 400 about the request content)
    Other,
}

impl ServiceFailure {
    /// Classify an HTTP status and error body returned by the service.
    ///
    /// The body is consulted for the textual status codes the Gemini API
    /// puts in its error envelope, since a 400 can still carry a permission
    /// problem.
    pub fn classify(status: u16, body: &str) -> Self {
        let lowered = body.to_lowercase();
        match status {
            401 | 403 => Self::Credential,
            429 => Self::RateLimited,
            404 => Self::ModelUnavailable,
            500..=599 => Self::Unavailable,
            _ if lowered.contains("permission")
                || lowered.contains("forbidden")
                || lowered.contains("api key not valid")
                || lowered.contains("api_key_invalid") =>
            {
                Self::Credential
            }
            _ if lowered.contains("resource_exhausted") || lowered.contains("quota") => {
                Self::RateLimited
            }
            _ if lowered.contains("failed_precondition")
                || lowered.contains("location is not supported") =>
            {
                Self::ModelUnavailable
            }
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceFailure::Credential => "credential rejected",
            ServiceFailure::RateLimited => "rate limited",
            ServiceFailure::ModelUnavailable => "model unavailable",
            ServiceFailure::Unavailable => "service unavailable",
            ServiceFailure::Transport => "transport failure",
            ServiceFailure::Other => "request rejected",
        }
    }
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the user can do about an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remedy {
    /// Supply or replace the API credential
    ReconfigureCredential,
    /// Wait and run the same command again
    RetryLater,
    /// Try again with different form values
    ChangeInput,
    /// Fill in a missing or invalid field
    FixInput,
    /// The local generation quota is used up
    QuotaReached,
    /// Nothing actionable for the user
    None,
}

impl Remedy {
    /// Readable hint shown next to the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Remedy::ReconfigureCredential => Some(
                "Check GEMINI_API_KEY (or api_key in the config file) and that the project has access to the model.",
            ),
            Remedy::RetryLater => Some("The service is busy or unreachable. Try again in a moment."),
            Remedy::ChangeInput => {
                Some("The model returned unusable content. Adjust the form and generate again.")
            }
            Remedy::FixInput => Some("Fill in the required field and try again."),
            Remedy::QuotaReached => Some("The generation quota for this session is used up."),
            Remedy::None => None,
        }
    }
}

/// Comprehensive error type for all Cadence operations.
#[derive(Error, Debug)]
pub enum CadenceError {
    /// The API credential is not configured
    #[error("Missing credential: set {variable} or api_key in the config file")]
    MissingCredential { variable: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The generative service rejected the call
    #[error("Generation service error ({failure}{}): {message}", .status.map(|s| format!(", HTTP {s}")).unwrap_or_default())]
    Service {
        failure: ServiceFailure,
        status: Option<u16>,
        message: String,
    },
    /// The service answered successfully but without any text
    #[error("The generation service returned an empty response")]
    EmptyResponse,
    /// The service answered with content that does not match the schema
    #[error("Malformed generation response: {reason}")]
    MalformedResponse { reason: String },
    /// The image model answered without inline image data
    #[error("The model did not return any image data; try a different prompt")]
    NoImageData,
    /// The local usage quota is exhausted
    #[error("Generation quota exhausted ({used}/{limit})")]
    QuotaExhausted { used: u32, limit: u32 },
    /// A generation is already running in this session
    #[error("A generation is already in progress")]
    GenerationInProgress,
    /// Plan not found in history
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: String },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> CadenceError {
        CadenceError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> CadenceError {
        CadenceError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl CadenceError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a malformed response error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Creates a service error from an HTTP status and response body.
    pub fn service(status: u16, body: impl Into<String>) -> Self {
        let message = body.into();
        Self::Service {
            failure: ServiceFailure::classify(status, &message),
            status: Some(status),
            message,
        }
    }

    /// Whether the error comes from the shape of a service response rather
    /// than from the service refusing the call.
    pub fn is_response_shape(&self) -> bool {
        matches!(
            self,
            Self::EmptyResponse | Self::MalformedResponse { .. } | Self::NoImageData
        )
    }

    /// Maps the error to the action the user should take.
    pub fn remedy(&self) -> Remedy {
        match self {
            Self::MissingCredential { .. } => Remedy::ReconfigureCredential,
            Self::Service { failure, .. } => match failure {
                ServiceFailure::Credential | ServiceFailure::ModelUnavailable => {
                    Remedy::ReconfigureCredential
                }
                ServiceFailure::RateLimited
                | ServiceFailure::Unavailable
                | ServiceFailure::Transport => Remedy::RetryLater,
                ServiceFailure::Other => Remedy::ChangeInput,
            },
            Self::EmptyResponse | Self::MalformedResponse { .. } | Self::NoImageData => {
                Remedy::ChangeInput
            }
            Self::InvalidInput { .. } => Remedy::FixInput,
            Self::QuotaExhausted { .. } => Remedy::QuotaReached,
            Self::GenerationInProgress => Remedy::RetryLater,
            Self::Configuration { .. }
            | Self::PlanNotFound { .. }
            | Self::Database { .. }
            | Self::FileSystem { .. }
            | Self::XdgDirectory(_)
            | Self::Serialization { .. } => Remedy::None,
        }
    }
}

impl From<reqwest::Error> for CadenceError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::service(status.as_u16(), error.to_string()),
            None => Self::Service {
                failure: ServiceFailure::Transport,
                status: None,
                message: error.to_string(),
            },
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CadenceError::database(message).with_source(e))
    }
}

/// Result type alias for Cadence operations
pub type Result<T> = std::result::Result<T, CadenceError>;
