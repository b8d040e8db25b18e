use crate::error::AppError;
use crate::models::{GeneratedImage, ImageFile};
use base64::Engine;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Simple MIME type from the file extension
pub fn guess_mime_from_ext(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("heic") | Some("heif") => "image/heic",
        _ => "image/jpeg",
    }
}

/// MIME type from the magic bytes, if the format is recognised
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|format| format.to_mime_type())
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, b64)
}

/// Splits `data:<mime>;base64,<payload>` into MIME type and bytes
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), AppError> {
    let invalid = || AppError::ImageProcessing("Invalid data URL".to_string());

    let rest = url.strip_prefix("data:").ok_or_else(invalid)?;
    let (header, payload) = rest.split_once(',').ok_or_else(invalid)?;
    let mime = header.strip_suffix(";base64").ok_or_else(invalid)?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::ImageProcessing(format!("Invalid base64 payload: {}", e)))?;

    let mime = if mime.is_empty() {
        sniff_mime(&bytes).unwrap_or("application/octet-stream")
    } else {
        mime
    };
    Ok((mime.to_string(), bytes))
}

/// Reads an image from disk for upload
pub fn image_file_from_path(path: &Path) -> Result<ImageFile, AppError> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::ImageProcessing(format!("Failed to read image: {}", e)))?;
    if bytes.is_empty() {
        return Err(AppError::ImageProcessing(format!(
            "Image file is empty: {}",
            path.display()
        )));
    }

    let mime = sniff_mime(&bytes).unwrap_or_else(|| guess_mime_from_ext(path));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    Ok(ImageFile::new(name, mime, bytes))
}

/// Width and height of a PNG; errors if the bytes are not a PNG
pub fn png_dimensions(bytes: &[u8]) -> Result<(u32, u32), AppError> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| AppError::ImageProcessing(format!("Not a valid PNG: {}", e)))?;
    Ok((img.width(), img.height()))
}

/// Flips a capture horizontally, keeping JPEG as JPEG and writing PNG otherwise
pub fn mirror_image(source: &ImageFile) -> Result<ImageFile, AppError> {
    let img = image::load_from_memory(&source.bytes)
        .map_err(|e| AppError::ImageProcessing(format!("Failed to load image: {}", e)))?;
    let flipped = img.fliph();

    let (format, out) = match image::guess_format(&source.bytes) {
        Ok(ImageFormat::Jpeg) => (ImageFormat::Jpeg, DynamicImage::ImageRgb8(flipped.to_rgb8())),
        _ => (ImageFormat::Png, flipped),
    };

    let mut buffer = Cursor::new(Vec::new());
    out.write_to(&mut buffer, format)
        .map_err(|e| AppError::ImageProcessing(format!("Failed to write image: {}", e)))?;

    Ok(ImageFile::new(
        source.name.clone(),
        format.to_mime_type(),
        buffer.into_inner(),
    ))
}

/// Writes the generated PNG into `dir` and returns its path
pub fn save_generated_image(
    dir: &Path,
    file_name: &str,
    image: &GeneratedImage,
) -> Result<PathBuf, AppError> {
    png_dimensions(&image.png)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, &image.png)?;
    log::info!("Saved generated image to {:?}", path);
    Ok(path)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// 2x1 PNG, red on the left and blue on the right
    pub(crate) fn tiny_png() -> Vec<u8> {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_guess_mime_from_ext() {
        assert_eq!(guess_mime_from_ext(Path::new("a/b.JPG")), "image/jpeg");
        assert_eq!(guess_mime_from_ext(Path::new("model.png")), "image/png");
        assert_eq!(guess_mime_from_ext(Path::new("noext")), "image/jpeg");
    }

    #[test]
    fn test_sniff_mime_prefers_content() {
        assert_eq!(sniff_mime(&tiny_png()), Some("image/png"));
        assert_eq!(sniff_mime(b"definitely not an image"), None);
    }

    #[test]
    fn test_data_url_decoding() {
        let png = tiny_png();
        let url = to_data_url("image/png", &png);
        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, png);

        assert!(decode_data_url("https://cdn.example.com/a.png").is_err());
        assert!(decode_data_url("data:image/png,plain").is_err());
        assert!(decode_data_url("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn test_mirror_image_flips_pixels() {
        let source = ImageFile::new("front.png", "image/png", tiny_png());
        let mirrored = mirror_image(&source).unwrap();

        let img = image::load_from_memory(&mirrored.bytes).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(img.get_pixel(1, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_png_dimensions_rejects_other_data() {
        assert_eq!(png_dimensions(&tiny_png()).unwrap(), (2, 1));
        assert!(png_dimensions(b"generated").is_err());
    }

    #[test]
    fn test_save_generated_image() {
        let dir = std::env::temp_dir().join(format!("vv-save-{}", uuid::Uuid::new_v4()));
        let image = GeneratedImage::from_png(tiny_png());

        let path = save_generated_image(&dir, "generated-outfit.png", &image).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), image.png);

        let broken = GeneratedImage::from_png(vec![1, 2, 3]);
        assert!(save_generated_image(&dir, "broken.png", &broken).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_image_file_from_path() {
        let dir = std::env::temp_dir().join(format!("vv-read-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        // Extension lies, content wins
        let path = dir.join("photo.jpg");
        std::fs::write(&path, tiny_png()).unwrap();

        let file = image_file_from_path(&path).unwrap();
        assert_eq!(file.name, "photo.jpg");
        assert_eq!(file.mime, "image/png");

        let empty = dir.join("empty.png");
        std::fs::write(&empty, b"").unwrap();
        assert!(image_file_from_path(&empty).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
