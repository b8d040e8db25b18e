use crate::error::ClientError;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// One binary image field of the multipart generation request
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePart {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Everything the generation service needs for one try-on
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub garment_image: ImagePart,
    pub human_image: ImagePart,
    pub garment_description: String,
    /// `upper_body` or `lower_body`
    pub category: String,
    pub denoise_steps: u32,
    pub seed: i64,
    pub number_of_images: u32,
}

impl GenerationRequest {
    /// Text fields of the multipart body, in wire order.
    ///
    /// Double quotes are stripped from the description; the service rejects them.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "garment_description",
                self.garment_description.replace('"', ""),
            ),
            ("category", self.category.clone()),
            ("denoise_steps", self.denoise_steps.to_string()),
            ("seed", self.seed.to_string()),
            ("number_of_images", self.number_of_images.to_string()),
        ]
    }
}

/// Response body of the generation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Base64 encoded PNG images
    #[serde(default)]
    pub images: Vec<String>,
}

/// The first generated image, both as received and decoded
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPng {
    pub base64: String,
    pub bytes: Vec<u8>,
}

impl GenerationResponse {
    /// Takes the first image; the service may return more but only one is shown
    pub fn into_first_image(self) -> Result<GeneratedPng, ClientError> {
        let base64 = self
            .images
            .into_iter()
            .next()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ClientError::EmptyResult)?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(base64.trim())
            .map_err(|e| ClientError::DecodeError(format!("Invalid base64 image: {}", e)))?;

        Ok(GeneratedPng { base64, bytes })
    }
}

/// Product as stored by the remote collection.
///
/// Older documents only carry the store-generated `_id`, newer ones an `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub email: String,
}

impl RemoteProduct {
    /// Identity used for mutations: `id` wins, `_id` is the fallback
    pub fn identity(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.legacy_id.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Body of `POST /products`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductPayload {
    pub category: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub description: String,
    pub email: String,
}

/// Body of `PUT /products/:id`; absent fields stay untouched
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ProductChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.name.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(name: &str) -> ImagePart {
        ImagePart {
            file_name: name.to_string(),
            mime: "image/jpeg".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_text_fields_strip_quotes() {
        let request = GenerationRequest {
            garment_image: part("garment.jpg"),
            human_image: part("human.jpg"),
            garment_description: "a \"vintage\" denim jacket".to_string(),
            category: "upper_body".to_string(),
            denoise_steps: 50,
            seed: 42,
            number_of_images: 1,
        };

        let fields = request.text_fields();
        assert_eq!(
            fields,
            vec![
                ("garment_description", "a vintage denim jacket".to_string()),
                ("category", "upper_body".to_string()),
                ("denoise_steps", "50".to_string()),
                ("seed", "42".to_string()),
                ("number_of_images", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_first_image_is_decoded() {
        let body = r#"{"images": ["iVBORw0KGgo=", "AAAA"]}"#;
        let response: GenerationResponse = serde_json::from_str(body).unwrap();

        let image = response.into_first_image().unwrap();
        assert_eq!(image.base64, "iVBORw0KGgo=");
        assert_eq!(image.bytes, vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }

    #[test]
    fn test_missing_images_is_empty_result() {
        let response: GenerationResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.into_first_image(), Err(ClientError::EmptyResult));

        let response: GenerationResponse = serde_json::from_str(r#"{"images": []}"#).unwrap();
        assert_eq!(response.into_first_image(), Err(ClientError::EmptyResult));
    }

    #[test]
    fn test_invalid_base64_is_decode_error() {
        let response = GenerationResponse {
            images: vec!["not base64 at all!".to_string()],
        };
        assert!(matches!(
            response.into_first_image(),
            Err(ClientError::DecodeError(_))
        ));
    }

    #[test]
    fn test_remote_product_identity_fallback() {
        let legacy: RemoteProduct = serde_json::from_str(
            r#"{"_id": "65f0c0ffee", "category": "male upper_body", "name": "Tee"}"#,
        )
        .unwrap();
        assert_eq!(legacy.identity(), Some("65f0c0ffee"));
        assert_eq!(legacy.price, 0.0);

        let both: RemoteProduct =
            serde_json::from_str(r#"{"_id": "abc", "id": "p-1", "category": "x"}"#).unwrap();
        assert_eq!(both.identity(), Some("p-1"));

        let none: RemoteProduct = serde_json::from_str(r#"{"id": ""}"#).unwrap();
        assert_eq!(none.identity(), None);
    }

    #[test]
    fn test_changes_skip_absent_fields() {
        let changes = ProductChanges {
            price: Some(19.5),
            ..Default::default()
        };
        assert!(!changes.is_empty());
        assert_eq!(serde_json::to_string(&changes).unwrap(), r#"{"price":19.5}"#);
        assert!(ProductChanges::default().is_empty());
    }
}
