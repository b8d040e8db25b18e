use crate::error::ClientError;

/// An image downloaded from a catalog URL
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// Content type reported by the server, if any
    pub mime: Option<String>,
}

/// Downloads a catalog image so it can be used as the garment of a try-on
pub async fn fetch_image(url: &str) -> Result<FetchedImage, ClientError> {
    let client = crate::build_client()?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ClientError::NetworkError(format!("Image request failed: {}", e)))?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound(url.to_string()));
    }
    if !response.status().is_success() {
        return Err(ClientError::ServerError(format!(
            "Server returned status: {}",
            response.status()
        )));
    }

    let mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(';').next().unwrap_or(s).trim().to_string());

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClientError::NetworkError(format!("Image download failed: {}", e)))?;

    log::debug!("Fetched {} bytes from {}", bytes.len(), url);
    Ok(FetchedImage {
        bytes: bytes.to_vec(),
        mime,
    })
}
