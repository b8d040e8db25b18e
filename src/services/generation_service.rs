use crate::error::AppError;
use crate::filesystem;
use crate::image_processing;
use crate::models::{GeneratedImage, ImageFile, ImageSlot, TryOnRequest};
use crate::services::static_catalog;
use crate::wizard::{Submission, WizardError};
use tryon_client::{GenerationRequest, GenerationService};

/// Turns a complete try-on request into one composite image
#[allow(async_fn_in_trait)]
pub trait ImageGenerator {
    async fn generate(&self, request: &TryOnRequest) -> Result<GeneratedImage, AppError>;
}

/// Builds the wire request; both images must be present
pub fn to_generation_request(request: &TryOnRequest) -> Result<GenerationRequest, AppError> {
    let garment = request
        .garment_image
        .as_ref()
        .filter(|img| !img.is_empty())
        .ok_or(WizardError::MissingImage(ImageSlot::Garment))?;
    let human = request
        .human_image
        .as_ref()
        .filter(|img| !img.is_empty())
        .ok_or(WizardError::MissingImage(ImageSlot::Human))?;

    Ok(GenerationRequest {
        garment_image: garment.to_part(),
        human_image: human.to_part(),
        garment_description: request.garment_description.clone(),
        category: request.category.as_str().to_string(),
        denoise_steps: request.params.denoise_steps,
        seed: request.params.seed,
        number_of_images: request.params.number_of_images,
    })
}

impl ImageGenerator for GenerationService {
    async fn generate(&self, request: &TryOnRequest) -> Result<GeneratedImage, AppError> {
        let wire = to_generation_request(request)?;
        let png = GenerationService::generate(self, &wire).await?;

        let image = GeneratedImage::from(png);
        image_processing::png_dimensions(&image.png)?;
        Ok(image)
    }
}

/// Runs the generator for a prepared submission
pub async fn generate_for<G: ImageGenerator>(
    generator: &G,
    submission: &Submission,
) -> Result<GeneratedImage, AppError> {
    generator.generate(&submission.request).await
}

/// Loads an image from a data URL, an http(s) URL, a bundled catalog image or
/// a path in the app data directory. `name` becomes the file name of the
/// multipart part.
pub async fn load_image_source(source: &str, name: &str) -> Result<ImageFile, AppError> {
    let source = source.trim();

    if source.starts_with("data:") {
        let (mime, bytes) = image_processing::decode_data_url(source)?;
        return Ok(ImageFile::new(name, mime, bytes));
    }

    if source.starts_with("http://") || source.starts_with("https://") {
        let fetched = tryon_client::fetch_image(source).await?;
        let mime = image_processing::sniff_mime(&fetched.bytes)
            .map(str::to_string)
            .or(fetched.mime)
            .unwrap_or_else(|| "image/jpeg".to_string());
        return Ok(ImageFile::new(name, mime, fetched.bytes));
    }

    if let Some(bytes) = static_catalog::bundled_image(source) {
        let mime = image_processing::sniff_mime(bytes).unwrap_or("image/png");
        return Ok(ImageFile::new(name, mime, bytes.to_vec()));
    }

    let path = filesystem::resolve_data_path(source);
    let mut file = image_processing::image_file_from_path(&path)?;
    file.name = name.to_string();
    Ok(file)
}
