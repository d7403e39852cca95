// Copyright(C) Mundis.
use {msig_config::ConfigError, thiserror::Error};

pub type SdkResult<T> = Result<T, SdkError>;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("HTTP status {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Invalid JSON response: {error}")]
    InvalidJson { error: String, body: String },
    #[error("GraphQL error: {}", .0.join("; "))]
    Graphql(Vec<String>),
    #[error("SDK error {code}: {message}")]
    Sdk { code: i64, message: String },
    #[error("No SDK binding configured for `{0}`, set binding.sdk_url")]
    BindingUnavailable(String),
    #[error("All endpoints failed, last error: {0}")]
    AllEndpointsFailed(Box<SdkError>),
    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SdkError {
    /// Failures where another endpoint may succeed.
    pub fn is_transport(&self) -> bool {
        matches!(self, SdkError::Transport(_))
            || matches!(self, SdkError::Http { status, .. } if *status >= 500)
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => SdkError::Http {
                status: status.as_u16(),
                body: e.to_string(),
            },
            None => SdkError::Transport(e.to_string()),
        }
    }
}
