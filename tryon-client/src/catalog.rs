use crate::error::ClientError;
use crate::models::{ProductChanges, ProductPayload, RemoteProduct};
use reqwest::StatusCode;

/// REST client for a remote product collection
///
/// Routes: `GET /products?category=&email=`, `GET|PUT|DELETE /products/:id`,
/// `POST /products`.
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: base_url.into(),
            client: crate::build_client()?,
        })
    }

    pub fn products_url(&self) -> String {
        format!("{}/products", self.base_url.trim_end_matches('/'))
    }

    pub fn product_url(&self, id: &str) -> String {
        format!("{}/{}", self.products_url(), id)
    }

    /// Lists the products of one category, optionally narrowed to an owner.
    ///
    /// Not every deployment filters by email server side, so the owner filter
    /// is applied again on the returned list.
    pub async fn list_products(
        &self,
        category: &str,
        owner_email: Option<&str>,
    ) -> Result<Vec<RemoteProduct>, ClientError> {
        let mut query = vec![("category", category)];
        if let Some(email) = owner_email.filter(|e| !e.trim().is_empty()) {
            query.push(("email", email));
        }

        let response = self
            .client
            .get(self.products_url())
            .query(&query)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(format!("Request failed: {}", e)))?;

        let products = read_json::<Vec<RemoteProduct>>(response, "products").await?;
        log::debug!(
            "Fetched {} remote products for category '{}'",
            products.len(),
            category
        );
        Ok(filter_by_owner(products, owner_email))
    }

    pub async fn get_product(&self, id: &str) -> Result<RemoteProduct, ClientError> {
        let response = self
            .client
            .get(self.product_url(id))
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(format!("Request failed: {}", e)))?;

        read_json(response, id).await
    }

    /// Creates a product. Each call creates a new document.
    pub async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<RemoteProduct, ClientError> {
        let response = self
            .client
            .post(self.products_url())
            .json(payload)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(format!("Request failed: {}", e)))?;

        read_json(response, "product").await
    }

    pub async fn update_product(
        &self,
        id: &str,
        changes: &ProductChanges,
    ) -> Result<RemoteProduct, ClientError> {
        let response = self
            .client
            .put(self.product_url(id))
            .json(changes)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(format!("Request failed: {}", e)))?;

        read_json(response, id).await
    }

    /// Deletes a product. Returns `false` if it was already gone.
    pub async fn delete_product(&self, id: &str) -> Result<bool, ClientError> {
        let response = self
            .client
            .delete(self.product_url(id))
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(format!("Request failed: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(ClientError::ServerError(format!(
                "Server returned status: {}",
                status
            ))),
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T, ClientError> {
    match response.status() {
        StatusCode::NOT_FOUND => Err(ClientError::NotFound(what.to_string())),
        status if !status.is_success() => Err(ClientError::ServerError(format!(
            "Server returned status: {}",
            status
        ))),
        _ => response
            .json::<T>()
            .await
            .map_err(|e| ClientError::JsonError(format!("Failed to parse response: {}", e))),
    }
}

/// Keeps only the products owned by `owner_email`; a blank filter keeps all
pub fn filter_by_owner(products: Vec<RemoteProduct>, owner_email: Option<&str>) -> Vec<RemoteProduct> {
    match owner_email.map(str::trim).filter(|e| !e.is_empty()) {
        Some(email) => products.into_iter().filter(|p| p.email == email).collect(),
        None => products,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::serve_once;

    fn product(name: &str, email: &str) -> RemoteProduct {
        RemoteProduct {
            id: Some(name.to_lowercase()),
            legacy_id: None,
            category: "female lower_body".to_string(),
            name: name.to_string(),
            price: 10.0,
            image: String::new(),
            description: String::new(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let client = CatalogClient::new("https://shop.example.com/api/").unwrap();
        assert_eq!(client.products_url(), "https://shop.example.com/api/products");
        assert_eq!(
            client.product_url("p-9"),
            "https://shop.example.com/api/products/p-9"
        );
    }

    #[test]
    fn test_filter_by_owner() {
        let products = vec![
            product("Skirt", "ann@example.com"),
            product("Jeans", "bob@example.com"),
            product("Shorts", "ann@example.com"),
        ];

        let ann = filter_by_owner(products.clone(), Some("ann@example.com"));
        assert_eq!(ann.len(), 2);
        assert!(ann.iter().all(|p| p.email == "ann@example.com"));

        assert_eq!(filter_by_owner(products.clone(), None).len(), 3);
        assert_eq!(filter_by_owner(products.clone(), Some("  ")).len(), 3);
        assert!(filter_by_owner(products, Some("eve@example.com")).is_empty());
    }

    #[tokio::test]
    async fn test_list_sends_filters_and_reapplies_owner() {
        let body = r#"[
            {"id": "a", "category": "female lower_body", "name": "Skirt", "email": "ann@example.com"},
            {"_id": "b", "category": "female lower_body", "name": "Jeans", "email": "bob@example.com"}
        ]"#;
        let (url, server) = serve_once("200 OK", body);
        let client = CatalogClient::new(url).unwrap();

        let products = client
            .list_products("female lower_body", Some("ann@example.com"))
            .await
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Skirt");

        let received = server.join().unwrap();
        let line = received.request_line();
        assert!(line.starts_with("GET /products?"));
        assert!(line.contains("category=female+lower_body") || line.contains("category=female%20lower_body"));
        assert!(line.contains("email=ann%40example.com"));
    }

    #[tokio::test]
    async fn test_list_error_status_is_server_error() {
        let (url, server) = serve_once("500 Internal Server Error", "{}");
        let client = CatalogClient::new(url).unwrap();

        let result = client.list_products("male upper_body", None).await;
        assert!(matches!(result, Err(ClientError::ServerError(_))));
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let (url, server) = serve_once("404 Not Found", "{}");
        let client = CatalogClient::new(url).unwrap();

        assert_eq!(
            client.get_product("x").await,
            Err(ClientError::NotFound("x".to_string()))
        );
        assert!(server.join().unwrap().request_line().starts_with("GET /products/x "));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let (url, server) = serve_once("404 Not Found", "{}");
        let client = CatalogClient::new(url).unwrap();
        let changes = ProductChanges {
            price: Some(5.0),
            ..Default::default()
        };

        assert!(matches!(
            client.update_product("gone", &changes).await,
            Err(ClientError::NotFound(_))
        ));
        let received = server.join().unwrap();
        assert!(received.request_line().starts_with("PUT /products/gone "));
        assert!(received.body_contains(br#""price":5.0"#));
    }

    #[tokio::test]
    async fn test_delete_status_mapping() {
        let (url, server) = serve_once("404 Not Found", "{}");
        let client = CatalogClient::new(url).unwrap();
        assert_eq!(client.delete_product("gone").await, Ok(false));
        assert!(server.join().unwrap().request_line().starts_with("DELETE /products/gone "));

        let (url, server) = serve_once("200 OK", "{}");
        let client = CatalogClient::new(url).unwrap();
        assert_eq!(client.delete_product("p-1").await, Ok(true));
        server.join().unwrap();

        let (url, server) = serve_once("503 Service Unavailable", "{}");
        let client = CatalogClient::new(url).unwrap();
        assert!(matches!(
            client.delete_product("p-1").await,
            Err(ClientError::ServerError(_))
        ));
        server.join().unwrap();
    }
}
