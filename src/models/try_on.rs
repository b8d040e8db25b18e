use crate::models::{BodyRegion, Gender, ProductCategory};
use base64::Engine;
use tryon_client::{GeneratedPng, ImagePart};

/// File name of the saved try-on result
pub const DOWNLOAD_FILE_NAME: &str = "generated-outfit.png";

/// An image selected by the user, held in memory for the current session
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_part(&self) -> ImagePart {
        ImagePart {
            file_name: self.name.clone(),
            mime: self.mime.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Garment,
    Human,
}

impl ImageSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSlot::Garment => "garment",
            ImageSlot::Human => "human",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub denoise_steps: u32,
    pub seed: i64,
    pub number_of_images: u32,
}

impl GenerationParams {
    pub const DEFAULT: GenerationParams = GenerationParams {
        denoise_steps: 50,
        seed: 42,
        number_of_images: 1,
    };
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fields of one try-on as collected by the wizard
#[derive(Debug, Clone, PartialEq)]
pub struct TryOnRequest {
    pub garment_image: Option<ImageFile>,
    pub human_image: Option<ImageFile>,
    pub garment_description: String,
    pub gender: Option<Gender>,
    pub category: BodyRegion,
    pub params: GenerationParams,
}

/// State of a fresh wizard pass; start-over resets to exactly this
pub const INITIAL_REQUEST: TryOnRequest = TryOnRequest {
    garment_image: None,
    human_image: None,
    garment_description: String::new(),
    gender: None,
    category: BodyRegion::UpperBody,
    params: GenerationParams::DEFAULT,
};

impl Default for TryOnRequest {
    fn default() -> Self {
        INITIAL_REQUEST
    }
}

impl TryOnRequest {
    /// First image slot that is absent or empty, garment before human
    pub fn missing_image(&self) -> Option<ImageSlot> {
        let present = |img: &Option<ImageFile>| img.as_ref().is_some_and(|i| !i.is_empty());

        if !present(&self.garment_image) {
            Some(ImageSlot::Garment)
        } else if !present(&self.human_image) {
            Some(ImageSlot::Human)
        } else {
            None
        }
    }

    pub fn product_category(&self) -> Option<ProductCategory> {
        self.gender
            .map(|gender| ProductCategory::new(gender, self.category))
    }
}

/// The composite returned by the generation service
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub png: Vec<u8>,
    pub base64: String,
}

impl GeneratedImage {
    pub fn from_png(png: Vec<u8>) -> Self {
        let base64 = base64::engine::general_purpose::STANDARD.encode(&png);
        Self { png, base64 }
    }

    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", self.base64)
    }
}

impl From<GeneratedPng> for GeneratedImage {
    fn from(generated: GeneratedPng) -> Self {
        Self {
            png: generated.bytes,
            base64: generated.base64,
        }
    }
}
