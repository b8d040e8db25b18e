pub mod account;
pub mod admin_dashboard;
pub mod category_select;
pub mod download_image;
pub mod final_image;
pub mod garment_select;
pub mod human_select;
pub mod image_input;
pub mod navigation;
pub mod product_detail;
pub mod product_form;

pub use account::AccountScreen;
pub use admin_dashboard::AdminDashboardScreen;
pub use category_select::CategorySelectScreen;
pub use download_image::ResultScreen;
pub use final_image::GeneratingScreen;
pub use garment_select::GarmentSelectScreen;
pub use human_select::HumanSelectScreen;
pub use navigation::NavigationBar;
pub use product_detail::ProductDetailScreen;
pub use product_form::ProductFormScreen;

use crate::filesystem;
use crate::image_processing;
use crate::models::ImageFile;
use crate::services::static_catalog;
use crate::wizard::{TryOnSession, WizardError};
use crate::Screen;

/// `src` for an image stored as URL, data URL or path in the app data directory
pub fn image_src(source: &str) -> String {
    if source.starts_with("data:") || source.starts_with("http://") || source.starts_with("https://")
    {
        return source.to_string();
    }
    if let Some(bytes) = static_catalog::bundled_image(source) {
        let mime = image_processing::sniff_mime(bytes).unwrap_or("image/png");
        return image_processing::to_data_url(mime, bytes);
    }
    let path = filesystem::resolve_data_path(source);
    match std::fs::read(&path) {
        Ok(bytes) => {
            let mime = image_processing::sniff_mime(&bytes)
                .unwrap_or_else(|| image_processing::guess_mime_from_ext(&path));
            image_processing::to_data_url(mime, &bytes)
        }
        Err(e) => {
            log::debug!("Image {} not readable: {}", source, e);
            source.to_string()
        }
    }
}

/// Steps the wizard back and returns the screen for the new step.
/// A refused transition leaves both step and screen where they are.
pub fn step_back(session: &mut TryOnSession) -> Result<Screen, WizardError> {
    session.back()?;
    Ok(Screen::for_step(session.step()))
}

pub fn preview_src(image: &ImageFile) -> String {
    image_processing::to_data_url(&image.mime, &image.bytes)
}

pub(crate) const PAGE_STYLE: &str =
    "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;";
pub(crate) const ERROR_STYLE: &str = "padding: 12px 16px; background: #ffe6e6; border-radius: 8px; color: #cc0000; font-size: 14px; margin-bottom: 16px; border-left: 3px solid #cc0000;";
pub(crate) const SUCCESS_STYLE: &str = "padding: 12px 16px; background: #d4edda; border-radius: 8px; color: #155724; font-size: 14px; margin-bottom: 16px; border-left: 3px solid #28a745;";
pub(crate) const PRIMARY_BUTTON: &str = "padding: 12px 24px; background: #111111; color: white; border: none; border-radius: 999px; font-size: 16px; cursor: pointer;";
pub(crate) const SECONDARY_BUTTON: &str = "padding: 10px 16px; background: #e0e0e0; color: #333; border: none; border-radius: 8px; font-size: 14px; cursor: pointer;";
pub(crate) const INPUT_STYLE: &str = "width: 100%; padding: 14px 16px; font-size: 16px; border: 2px solid #e0e0e0; border-radius: 8px; background: white; box-sizing: border-box;";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyRegion, Gender, ImageFile, ProductCategory};

    fn image(name: &str) -> ImageFile {
        ImageFile::new(name, "image/png", vec![1, 2, 3])
    }

    #[test]
    fn test_step_back_follows_the_wizard() {
        let mut session = TryOnSession::new();
        session
            .select_category(ProductCategory::new(Gender::Male, BodyRegion::UpperBody))
            .unwrap();
        session.choose_garment(image("garment.png"), None).unwrap();
        session.confirm_human(image("human.png")).unwrap();

        assert_eq!(step_back(&mut session), Ok(Screen::HumanPhoto));
        assert_eq!(step_back(&mut session), Ok(Screen::Garments));
        assert_eq!(step_back(&mut session), Ok(Screen::Home));
    }

    #[test]
    fn test_refused_back_does_not_navigate() {
        let mut session = TryOnSession::new();
        assert!(step_back(&mut session).is_err());

        session
            .select_category(ProductCategory::new(Gender::Female, BodyRegion::LowerBody))
            .unwrap();
        session.choose_garment(image("garment.png"), None).unwrap();
        session.confirm_human(image("human.png")).unwrap();
        session.prepare_submission().unwrap();

        assert!(step_back(&mut session).is_err());
        assert_eq!(Screen::for_step(session.step()), Screen::Generating);
    }
}
