use thiserror::Error;

/// Errors raised while resolving flags and environment into a configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<&'static str>),

    #[error("invalid port '{value}' for --{field}")]
    InvalidPort { field: &'static str, value: String },
}

/// Errors raised while talking to the manager.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{method} {url} failed: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
