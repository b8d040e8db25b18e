pub mod catalog;
pub mod generation_service;
pub mod product_service;
pub mod static_catalog;

pub use catalog::{reconcile_deleted, Catalog};
pub use generation_service::{generate_for, load_image_source, ImageGenerator};
