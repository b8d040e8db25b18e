use crate::error::ClientError;
use crate::models::{GeneratedPng, GenerationRequest, GenerationResponse, ImagePart};
use reqwest::multipart::{Form, Part};

/// Client for the external try-on generation service
///
/// One call, one image. There is no retry and no timeout of its own;
/// the transport defaults apply.
pub struct GenerationService {
    endpoint: String,
    client: reqwest::Client,
}

impl GenerationService {
    /// Create a new generation client for `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: endpoint.into(),
            client: crate::build_client()?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send both images and all parameters as one multipart request
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedPng, ClientError> {
        log::info!(
            "Sending try-on request: category={}, denoise_steps={}, seed={}, number_of_images={}",
            request.category,
            request.denoise_steps,
            request.seed,
            request.number_of_images
        );

        let form = build_form(request)?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ClientError::ServerError(format!(
                "Server returned status: {}",
                response.status()
            )));
        }

        let body = response
            .json::<GenerationResponse>()
            .await
            .map_err(|e| ClientError::JsonError(format!("Failed to parse response: {}", e)))?;

        log::debug!("Generation service returned {} image(s)", body.images.len());
        body.into_first_image()
    }
}

fn image_part(image: &ImagePart) -> Result<Part, ClientError> {
    Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.mime)
        .map_err(|e| ClientError::NetworkError(format!("Invalid mime type {}: {}", image.mime, e)))
}

fn build_form(request: &GenerationRequest) -> Result<Form, ClientError> {
    let mut form = Form::new()
        .part("garment_image", image_part(&request.garment_image)?)
        .part("human_image", image_part(&request.human_image)?);

    for (name, value) in request.text_fields() {
        form = form.text(name, value);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::serve_once;

    fn request(mime: &str) -> GenerationRequest {
        let image = ImagePart {
            file_name: "garment-image.jpg".to_string(),
            mime: mime.to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        };
        GenerationRequest {
            garment_image: image.clone(),
            human_image: ImagePart {
                file_name: "human-image.jpg".to_string(),
                ..image
            },
            garment_description: String::new(),
            category: "lower_body".to_string(),
            denoise_steps: 30,
            seed: 7,
            number_of_images: 1,
        }
    }

    #[test]
    fn test_build_form_accepts_image_mime() {
        let form = build_form(&request("image/jpeg")).unwrap();
        assert!(!form.boundary().is_empty());
    }

    #[test]
    fn test_build_form_rejects_invalid_mime() {
        assert!(build_form(&request("not a mime")).is_err());
    }

    #[test]
    fn test_service_keeps_endpoint() {
        let service = GenerationService::new("https://tryon.example.com/api/generate").unwrap();
        assert_eq!(service.endpoint(), "https://tryon.example.com/api/generate");
    }

    #[tokio::test]
    async fn test_generate_sends_every_field_and_decodes_reply() {
        // 8 PNG signature bytes
        let (url, server) = serve_once("200 OK", r#"{"images": ["iVBORw0KGgo=", "AAAA"]}"#);
        let mut req = request("image/jpeg");
        req.garment_image.bytes = vec![0, 255, 13, 10, 1];
        req.garment_description = "Loose \"oversized\" fit".to_string();

        let service = GenerationService::new(format!("{}/tryon", url)).unwrap();
        let image = service.generate(&req).await.unwrap();
        assert_eq!(image.bytes, vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);

        let received = server.join().unwrap();
        assert!(received.request_line().starts_with("POST /tryon "));
        assert!(received.body_contains(b"name=\"garment_image\"; filename=\"garment-image.jpg\""));
        assert!(received.body_contains(b"name=\"human_image\"; filename=\"human-image.jpg\""));
        assert!(received.body_contains(&[0, 255, 13, 10, 1]));
        assert_eq!(
            received.form_field("garment_description").as_deref(),
            Some("Loose oversized fit")
        );
        assert_eq!(received.form_field("category").as_deref(), Some("lower_body"));
        assert_eq!(received.form_field("denoise_steps").as_deref(), Some("30"));
        assert_eq!(received.form_field("seed").as_deref(), Some("7"));
        assert_eq!(received.form_field("number_of_images").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_generate_maps_error_status() {
        let (url, server) = serve_once("500 Internal Server Error", "{}");
        let service = GenerationService::new(url).unwrap();

        let result = service.generate(&request("image/jpeg")).await;
        assert!(matches!(result, Err(ClientError::ServerError(_))));
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_generate_without_images_is_empty_result() {
        let (url, server) = serve_once("200 OK", r#"{"images": []}"#);
        let service = GenerationService::new(url).unwrap();

        let result = service.generate(&request("image/png")).await;
        assert_eq!(result, Err(ClientError::EmptyResult));
        server.join().unwrap();
    }
}
