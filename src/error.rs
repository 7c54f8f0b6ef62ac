use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the server
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("HTTP {status} - {body}")]
    #[diagnostic(code(calendly_mcp::api))]
    Api { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    #[diagnostic(code(calendly_mcp::http))]
    Http(#[from] reqwest::Error),

    #[error("Unknown tool: {0}")]
    #[diagnostic(code(calendly_mcp::unknown_tool))]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    #[diagnostic(code(calendly_mcp::invalid_arguments))]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("URL parse error: {0}")]
    #[diagnostic(code(calendly_mcp::url))]
    Url(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(calendly_mcp::serialization))]
    Serialization(#[from] serde_json::Error),

    #[error("Environment error: {0}")]
    #[diagnostic(code(calendly_mcp::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(calendly_mcp::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(calendly_mcp::io))]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(calendly_mcp::other))]
    Other(String),
}

impl Error {
    /// Whether the error was caused by the caller rather than upstream
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Error::UnknownTool(_) | Error::InvalidArguments { .. })
    }
}

/// Type alias for Result with our Error type
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
