use crate::error::AppError;
use crate::models::ProductCategory;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use tryon_client::{ProductChanges, ProductPayload, RemoteProduct};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    /// Store-generated identity of older documents, kept for compatibility reads only
    pub legacy_id: Option<String>,
    pub category: ProductCategory,
    pub name: String,
    pub price: f64,
    /// URL, data URL or path relative to the app data directory
    pub image: String,
    pub description: String,
    /// Owning admin
    pub email: String,
}

impl Product {
    /// True if `other` refers to the same product under either identity field
    pub fn same_identity(&self, other: &Product) -> bool {
        if !self.id.is_empty() && self.id == other.id {
            return true;
        }
        matches!(
            (&self.legacy_id, &other.legacy_id),
            (Some(a), Some(b)) if a == b
        )
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        !email.trim().is_empty() && self.email == email.trim()
    }
}

impl<'r> TryFrom<&Row<'r>> for Product {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'r>) -> Result<Self, Self::Error> {
        let category_str: String = row.get(2)?;
        let category = category_str.parse().map_err(|e: AppError| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                e.to_string().into(),
            )
        })?;

        Ok(Product {
            id: row.get(0)?,
            legacy_id: row.get(1)?,
            category,
            name: row.get(3)?,
            price: row.get(4)?,
            image: row.get(5)?,
            description: row.get(6)?,
            email: row.get(7)?,
        })
    }
}

/// Normalizes the two identity fields of the remote collection into `id`
impl TryFrom<RemoteProduct> for Product {
    type Error = AppError;

    fn try_from(remote: RemoteProduct) -> Result<Self, Self::Error> {
        let id = remote
            .identity()
            .ok_or_else(|| AppError::Validation(format!("Product '{}' has no id", remote.name)))?
            .to_string();
        let category = remote.category.parse()?;
        let legacy_id = remote.legacy_id.filter(|legacy| legacy != &id && !legacy.is_empty());

        Ok(Product {
            id,
            legacy_id,
            category,
            name: remote.name,
            price: remote.price,
            image: remote.image,
            description: remote.description,
            email: remote.email,
        })
    }
}

/// Data entered in the product form for a new product
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductInput {
    pub category: Option<ProductCategory>,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub description: String,
}

impl ProductInput {
    /// Name and category are required
    pub fn validate(&self) -> Result<ProductCategory, AppError> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        self.category
            .ok_or_else(|| AppError::Validation("Category is required".to_string()))
    }

    pub fn to_payload(&self, owner_email: &str) -> Result<ProductPayload, AppError> {
        let category = self.validate()?;
        Ok(ProductPayload {
            category: category.to_string(),
            name: self.name.trim().to_string(),
            price: self.price,
            image: self.image.trim().to_string(),
            description: self.description.trim().to_string(),
            email: owner_email.to_string(),
        })
    }
}

/// Partial update of a product; `None` leaves the field as it is
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductPatch {
    pub category: Option<ProductCategory>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.name.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.description.is_none()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Drops every field that already has the requested value
    pub fn without_unchanged(&self, current: &Product) -> ProductPatch {
        ProductPatch {
            category: self.category.filter(|c| c != &current.category),
            name: self.name.clone().filter(|n| n != &current.name),
            price: self.price.filter(|p| *p != current.price),
            image: self.image.clone().filter(|i| i != &current.image),
            description: self
                .description
                .clone()
                .filter(|d| d != &current.description),
        }
    }

    pub fn apply_to(&self, product: &mut Product) {
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(image) = &self.image {
            product.image = image.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
    }

    pub fn to_changes(&self) -> ProductChanges {
        ProductChanges {
            category: self.category.map(|c| c.to_string()),
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
            description: self.description.clone(),
        }
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be empty".to_string()));
    }
    if name.len() > 200 {
        return Err(AppError::Validation(
            "Name must not exceed 200 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation(
            "Price must be a positive number".to_string(),
        ));
    }
    Ok(())
}
