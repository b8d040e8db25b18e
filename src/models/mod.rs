pub mod category;
pub mod product;
pub mod try_on;
pub mod user;

pub use category::{BodyRegion, Gender, ProductCategory};
pub use product::{Product, ProductInput, ProductPatch};
pub use try_on::{
    GeneratedImage, GenerationParams, ImageFile, ImageSlot, TryOnRequest, DOWNLOAD_FILE_NAME,
    INITIAL_REQUEST,
};
pub use user::{derive_role, Role, User, DEFAULT_ROLES_CLAIM};
