use crate::config::AppConfig;
use crate::database;
use crate::error::AppError;
use crate::models::{Product, ProductCategory, ProductInput, ProductPatch, User};
use crate::services::{product_service, static_catalog};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tryon_client::{CatalogClient, RemoteProduct};

/// The product collection behind the admin screens and garment browsing
pub enum Catalog {
    /// SQLite store in the app data directory
    Local { db_path: PathBuf },
    /// REST collection configured via `catalog_url`
    Remote(CatalogClient),
}

impl Catalog {
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        match config.catalog_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(Catalog::Remote(CatalogClient::new(url)?)),
            _ => Ok(Catalog::Local {
                db_path: config.database_file(),
            }),
        }
    }

    fn open(db_path: &Path) -> Result<Connection, AppError> {
        database::init_database(db_path)
    }

    pub async fn list_products(
        &self,
        category: ProductCategory,
        owner_email: Option<&str>,
    ) -> Result<Vec<Product>, AppError> {
        match self {
            Catalog::Local { db_path } => {
                let conn = Self::open(db_path)?;
                product_service::list_products(&conn, category, owner_email)
            }
            Catalog::Remote(client) => {
                let remote = client
                    .list_products(&category.to_string(), owner_email)
                    .await?;
                Ok(convert_remote(remote)
                    .into_iter()
                    .filter(|p| p.category == category)
                    .collect())
            }
        }
    }

    pub async fn list_grouped(
        &self,
        owner_email: Option<&str>,
        category: Option<ProductCategory>,
    ) -> Result<Vec<(ProductCategory, Vec<Product>)>, AppError> {
        match self {
            Catalog::Local { db_path } => {
                let conn = Self::open(db_path)?;
                product_service::list_grouped(&conn, owner_email, category)
            }
            Catalog::Remote(_) => {
                let mut groups = Vec::new();
                for current in ProductCategory::all() {
                    if category.is_some_and(|c| c != *current) {
                        continue;
                    }
                    let products = self.list_products(*current, owner_email).await?;
                    if !products.is_empty() {
                        groups.push((*current, products));
                    }
                }
                Ok(groups)
            }
        }
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, AppError> {
        match self {
            Catalog::Local { db_path } => {
                let conn = Self::open(db_path)?;
                product_service::get_product(&conn, id)
            }
            Catalog::Remote(client) => Product::try_from(client.get_product(id).await?),
        }
    }

    pub async fn create_product(
        &self,
        input: &ProductInput,
        owner_email: &str,
    ) -> Result<Product, AppError> {
        match self {
            Catalog::Local { db_path } => {
                let conn = Self::open(db_path)?;
                product_service::create_product(&conn, input, owner_email)
            }
            Catalog::Remote(client) => {
                if owner_email.trim().is_empty() {
                    return Err(AppError::Validation(
                        "Products must belong to an admin".to_string(),
                    ));
                }
                let payload = input.to_payload(owner_email.trim())?;
                let created = Product::try_from(client.create_product(&payload).await?)?;
                log::info!("Created remote product {}", created.id);
                Ok(created)
            }
        }
    }

    /// Updates a product of `owner_email`; products of other admins are refused
    pub async fn update_product(
        &self,
        id: &str,
        patch: &ProductPatch,
        owner_email: &str,
    ) -> Result<Product, AppError> {
        patch.validate()?;
        let current = self.get_product(id).await?;
        ensure_owner(&current, owner_email)?;

        match self {
            Catalog::Local { db_path } => {
                let conn = Self::open(db_path)?;
                product_service::update_product(&conn, id, patch)
            }
            Catalog::Remote(client) => {
                let effective = patch.without_unchanged(&current);
                if effective.is_empty() {
                    return Ok(current);
                }
                let updated = client
                    .update_product(&current.id, &effective.to_changes())
                    .await?;
                Product::try_from(updated)
            }
        }
    }

    /// Deletes a product of `owner_email`. `Ok(false)` if it was already gone.
    pub async fn delete_product(&self, id: &str, owner_email: &str) -> Result<bool, AppError> {
        let current = match self.get_product(id).await {
            Ok(product) => product,
            Err(AppError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        };
        ensure_owner(&current, owner_email)?;

        let removed = match self {
            Catalog::Local { db_path } => {
                let conn = Self::open(db_path)?;
                product_service::delete_product(&conn, id)?
            }
            Catalog::Remote(client) => client.delete_product(&current.id).await?,
        };
        log::info!("Deleted product {} (removed: {})", current.id, removed);
        Ok(removed)
    }

    /// Products offered on the garment step: an admin browses their own
    /// collection, everybody else the built-in catalog
    pub async fn garment_listing(
        &self,
        user: Option<&User>,
        category: ProductCategory,
    ) -> Vec<Product> {
        match user.filter(|u| u.is_admin()) {
            Some(admin) => self
                .list_products(category, Some(&admin.email))
                .await
                .unwrap_or_else(|e| {
                    log::warn!("Failed to load admin products: {}", e);
                    Vec::new()
                }),
            None => static_catalog::products(category),
        }
    }

    /// Product for the detail screen. An admin sees the gateway copy only if
    /// they own it; otherwise the built-in entry with that id is used.
    pub async fn find_for_detail(
        &self,
        user: Option<&User>,
        category: ProductCategory,
        id: &str,
    ) -> Option<Product> {
        if let Some(admin) = user.filter(|u| u.is_admin()) {
            match self.get_product(id).await {
                Ok(product) if product.is_owned_by(&admin.email) => return Some(product),
                Ok(_) => log::debug!("Product {} belongs to another admin", id),
                Err(e) => log::warn!("Product lookup for {} failed: {}", id, e),
            }
        }
        static_catalog::find(category, id)
    }
}

fn ensure_owner(product: &Product, owner_email: &str) -> Result<(), AppError> {
    if product.is_owned_by(owner_email) {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(format!(
            "Product {} belongs to another admin",
            product.id
        )))
    }
}

/// Drops entries that cannot be read instead of failing the whole list
fn convert_remote(remote: Vec<RemoteProduct>) -> Vec<Product> {
    remote
        .into_iter()
        .filter_map(|r| match Product::try_from(r) {
            Ok(product) => Some(product),
            Err(e) => {
                log::warn!("Skipping remote product: {}", e);
                None
            }
        })
        .collect()
}

/// Removes a deleted product from a cached list, matching either identity
pub fn reconcile_deleted(products: &mut Vec<Product>, deleted: &Product) {
    products.retain(|p| !p.same_identity(deleted) && !deleted.same_identity(p));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyRegion, Gender, Role};

    const ALICE: &str = "alice@example.com";
    const BOB: &str = "bob@example.com";

    fn local_catalog() -> (Catalog, PathBuf) {
        let dir = std::env::temp_dir().join(format!("vv-catalog-{}", uuid::Uuid::new_v4()));
        let catalog = Catalog::Local {
            db_path: dir.join("catalog.db"),
        };
        (catalog, dir)
    }

    fn admin(email: &str) -> User {
        User {
            email: email.to_string(),
            name: None,
            role: Role::Admin,
        }
    }

    fn male_tops() -> ProductCategory {
        ProductCategory::new(Gender::Male, BodyRegion::UpperBody)
    }

    fn input(name: &str) -> ProductInput {
        ProductInput {
            category: Some(male_tops()),
            name: name.to_string(),
            price: 25.0,
            ..Default::default()
        }
    }

    fn product(id: &str, legacy_id: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            legacy_id: legacy_id.map(str::to_string),
            category: male_tops(),
            name: id.to_string(),
            price: 1.0,
            image: String::new(),
            description: String::new(),
            email: ALICE.to_string(),
        }
    }

    #[test]
    fn test_from_config_picks_backend() {
        let config = AppConfig::default();
        assert!(matches!(
            Catalog::from_config(&config).unwrap(),
            Catalog::Local { .. }
        ));

        let config = AppConfig {
            catalog_url: Some("https://shop.example.com/api".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            Catalog::from_config(&config).unwrap(),
            Catalog::Remote(_)
        ));
    }

    #[test]
    fn test_reconcile_deleted_matches_both_identities() {
        let mut cached = vec![
            product("a", Some("legacy-a")),
            product("b", None),
            product("c", Some("legacy-c")),
        ];

        reconcile_deleted(&mut cached, &product("a", None));
        reconcile_deleted(&mut cached, &product("other", Some("legacy-c")));

        let ids: Vec<_> = cached.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[tokio::test]
    async fn test_admin_mutates_only_own_products() {
        let (catalog, dir) = local_catalog();
        let own = catalog.create_product(&input("Alice Tee"), ALICE).await.unwrap();

        let patch = ProductPatch {
            price: Some(10.0),
            ..Default::default()
        };
        assert!(matches!(
            catalog.update_product(&own.id, &patch, BOB).await,
            Err(AppError::PermissionDenied(_))
        ));
        assert!(matches!(
            catalog.delete_product(&own.id, BOB).await,
            Err(AppError::PermissionDenied(_))
        ));

        let updated = catalog.update_product(&own.id, &patch, ALICE).await.unwrap();
        assert_eq!(updated.price, 10.0);

        assert!(catalog.delete_product(&own.id, ALICE).await.unwrap());
        assert!(!catalog.delete_product(&own.id, ALICE).await.unwrap());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_garment_listing_depends_on_role() {
        let (catalog, dir) = local_catalog();
        catalog.create_product(&input("Alice Tee"), ALICE).await.unwrap();
        catalog.create_product(&input("Bob Tee"), BOB).await.unwrap();

        let alice = admin(ALICE);
        let listing = catalog.garment_listing(Some(&alice), male_tops()).await;
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "Alice Tee");

        let shopper = User {
            role: Role::Individual,
            ..admin(ALICE)
        };
        let listing = catalog.garment_listing(Some(&shopper), male_tops()).await;
        assert_eq!(listing, static_catalog::products(male_tops()));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_detail_falls_back_to_static_catalog() {
        let (catalog, dir) = local_catalog();
        let bobs = catalog.create_product(&input("Bob Tee"), BOB).await.unwrap();
        let alice = admin(ALICE);

        // Another admin's product is not shown
        assert_eq!(
            catalog.find_for_detail(Some(&alice), male_tops(), &bobs.id).await,
            None
        );

        let fallback = catalog
            .find_for_detail(Some(&alice), male_tops(), "1")
            .await
            .unwrap();
        assert_eq!(fallback.email, static_catalog::STATIC_OWNER);

        let own = catalog
            .find_for_detail(Some(&admin(BOB)), male_tops(), &bobs.id)
            .await
            .unwrap();
        assert_eq!(own, bobs);

        // Shoppers only see the static entries
        assert!(catalog.find_for_detail(None, male_tops(), &bobs.id).await.is_none());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_grouped_listing_through_catalog() {
        let (catalog, dir) = local_catalog();
        catalog.create_product(&input("Tee"), ALICE).await.unwrap();

        let groups = catalog.list_grouped(Some(ALICE), None).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, male_tops());

        assert!(catalog.list_grouped(Some(BOB), None).await.unwrap().is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }
}
