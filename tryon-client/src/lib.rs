//! # Try-On Client
//!
//! HTTP clients used by the Virtual Vogue app.
//!
//! This crate provides:
//! - A multipart client for the external try-on image generation service
//! - A REST client for a remote product collection
//! - A helper to fetch catalog images by URL
//!
//! ## Separation of Concerns
//!
//! This crate only speaks HTTP. It does **not**:
//! - Hold wizard state (handled by the application)
//! - Decide which catalog backend is active (handled by the application)
//! - Map remote products into application models (handled by the application)
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use tryon_client::{GenerationRequest, GenerationService};
//!
//! let service = GenerationService::new("https://tryon.example.com/generate")?;
//! let image = service.generate(&request).await?;
//! println!("received {} bytes", image.bytes.len());
//! ```

pub mod catalog;
pub mod error;
pub mod fetch;
pub mod generation;
pub mod models;

#[cfg(test)]
mod test_server;

pub use catalog::{filter_by_owner, CatalogClient};
pub use error::ClientError;
pub use fetch::{fetch_image, FetchedImage};
pub use generation::GenerationService;
pub use models::{
    GeneratedPng, GenerationRequest, GenerationResponse, ImagePart, ProductChanges,
    ProductPayload, RemoteProduct,
};

/// User agent sent with every request
pub(crate) const USER_AGENT: &str = "VirtualVogue/0.1.0";

pub(crate) fn build_client() -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ClientError::NetworkError(format!("Client build failed: {}", e)))
}
