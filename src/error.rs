use crate::wizard::WizardError;
use std::fmt;

/// Central error types for the Virtual Vogue app
#[derive(Debug)]
pub enum AppError {
    /// Database error (rusqlite)
    Database(rusqlite::Error),
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Validation error (e.g. invalid inputs)
    Validation(String),
    /// Resource not found
    NotFound(String),
    /// Permission denied (e.g. camera)
    PermissionDenied(String),
    /// Image processing error
    ImageProcessing(String),
    /// Catalog or generation service unreachable or misbehaving
    Network(String),
    /// Refused wizard transition
    Wizard(WizardError),
    /// Broken configuration file
    Config(String),
    /// General error
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            AppError::ImageProcessing(msg) => write!(f, "Image processing error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Wizard(e) => write!(f, "{}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Database(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<WizardError> for AppError {
    fn from(e: WizardError) -> Self {
        AppError::Wizard(e)
    }
}

impl From<tryon_client::ClientError> for AppError {
    fn from(e: tryon_client::ClientError) -> Self {
        match e {
            tryon_client::ClientError::NotFound(what) => AppError::NotFound(what),
            tryon_client::ClientError::EmptyResult | tryon_client::ClientError::DecodeError(_) => {
                AppError::ImageProcessing(e.to_string())
            }
            other => AppError::Network(other.to_string()),
        }
    }
}

/// User-friendly error messages for UI
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) => "A database error occurred. Please try again.".to_string(),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => format!("{} was not found.", msg),
            AppError::PermissionDenied(msg) => format!("Permission required: {}", msg),
            AppError::ImageProcessing(msg) => msg.clone(),
            AppError::Network(_) => "Something went wrong! Please try again.".to_string(),
            AppError::Wizard(e) => e.user_message(),
            AppError::Config(msg) => format!("Invalid configuration: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }
}
