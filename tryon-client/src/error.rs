/// Error type for all HTTP operations of this crate
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    NetworkError(String),
    JsonError(String),
    ServerError(String),
    /// The remote resource does not exist (HTTP 404)
    NotFound(String),
    /// The generation service answered without any image
    EmptyResult,
    DecodeError(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ClientError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            ClientError::ServerError(msg) => write!(f, "Server error: {}", msg),
            ClientError::NotFound(what) => write!(f, "Not found: {}", what),
            ClientError::EmptyResult => write!(f, "No image received from the generation service"),
            ClientError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}
