//! Error types for the Azure DevOps provider

use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for raw remote client calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

/// Transport-level errors reported by the remote client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Check the configured personal access token.")]
    Unauthorized,

    #[error("Access denied. The token does not have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Whether the remote confirmed the target does not exist (HTTP 404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Errors raised while driving a resource through its lifecycle
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Identity string could not be parsed
    #[error("Invalid identity {value:?}: {reason}")]
    InvalidIdentity { value: String, reason: String },

    /// The remote call failed; the underlying message is kept verbatim
    #[error("Error {operation}: {source}")]
    RemoteOperation {
        operation: String,
        #[source]
        source: ApiError,
    },

    /// The remote confirmed the target is absent
    #[error("{0}")]
    NotFound(String),

    /// The remote returned data that breaks an assumed invariant
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    /// A local field constraint failed before any remote call
    #[error("Invalid value for {attribute}: {reason}")]
    Validation { attribute: String, reason: String },
}

impl ResourceError {
    pub fn invalid_identity(value: impl Into<String>, reason: impl ToString) -> Self {
        ResourceError::InvalidIdentity {
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub fn remote(operation: impl Into<String>, source: ApiError) -> Self {
        ResourceError::RemoteOperation {
            operation: operation.into(),
            source,
        }
    }

    pub fn validation(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        ResourceError::Validation {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Create ~/.azdo-provider/config.yaml or set AZDO_ORG_SERVICE_URL.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Personal access token not configured. Set AZDO_PERSONAL_ACCESS_TOKEN or add it to the config file.")]
    MissingToken,

    #[error("Organization URL not configured. Set AZDO_ORG_SERVICE_URL or add it to the config file.")]
    MissingOrgUrl,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
