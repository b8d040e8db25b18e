use crate::error::AppError;
use crate::models::{Product, ProductCategory, ProductInput, ProductPatch};
use rusqlite::{Connection, OptionalExtension};

const PRODUCT_COLUMNS: &str = "id, legacy_id, category, name, price, image, description, email";

/// Stores a new product owned by `owner_email`. Every call creates a new row.
pub fn create_product(
    conn: &Connection,
    input: &ProductInput,
    owner_email: &str,
) -> Result<Product, AppError> {
    if owner_email.trim().is_empty() {
        return Err(AppError::Validation(
            "Products must belong to an admin".to_string(),
        ));
    }
    let payload = input.to_payload(owner_email.trim())?;
    let product = Product {
        id: uuid::Uuid::new_v4().to_string(),
        legacy_id: None,
        category: input.validate()?,
        name: payload.name,
        price: payload.price,
        image: payload.image,
        description: payload.description,
        email: payload.email,
    };

    insert_product(conn, &product)?;
    log::info!("Created product {} ({})", product.id, product.category);
    Ok(product)
}

/// Inserts a fully formed product, e.g. one imported from the remote collection
pub fn insert_product(conn: &Connection, product: &Product) -> Result<(), AppError> {
    conn.execute(
        "INSERT INTO products (id, legacy_id, category, name, price, image, description, email)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        (
            &product.id,
            &product.legacy_id,
            product.category.to_string(),
            &product.name,
            product.price,
            &product.image,
            &product.description,
            &product.email,
        ),
    )?;
    Ok(())
}

/// Looks a product up by `id`, falling back to the legacy identity
pub fn get_product(conn: &Connection, id: &str) -> Result<Product, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM products WHERE id = ?1 OR legacy_id = ?1
         ORDER BY (id = ?1) DESC LIMIT 1",
        PRODUCT_COLUMNS
    ))?;

    stmt.query_row([id], |row| Product::try_from(row))
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("Product {}", id)))
}

/// Applies the supplied fields. Nothing to change is a successful no-op.
pub fn update_product(
    conn: &Connection,
    id: &str,
    patch: &ProductPatch,
) -> Result<Product, AppError> {
    patch.validate()?;
    let current = get_product(conn, id)?;

    let effective = patch.without_unchanged(&current);
    if effective.is_empty() {
        log::debug!("Update of product {} changed nothing", current.id);
        return Ok(current);
    }

    let mut updated = current;
    effective.apply_to(&mut updated);

    let rows_affected = conn.execute(
        "UPDATE products
         SET category = ?1, name = ?2, price = ?3, image = ?4, description = ?5
         WHERE id = ?6",
        (
            updated.category.to_string(),
            &updated.name,
            updated.price,
            &updated.image,
            &updated.description,
            &updated.id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(AppError::NotFound(format!("Product {}", id)));
    }

    Ok(updated)
}

/// Removes a product by either identity. Returns whether a row was removed.
pub fn delete_product(conn: &Connection, id: &str) -> Result<bool, AppError> {
    let rows_affected = conn.execute(
        "DELETE FROM products WHERE id = ?1 OR legacy_id = ?1",
        [id],
    )?;
    Ok(rows_affected > 0)
}

/// Products of one category, optionally narrowed to one owner
pub fn list_products(
    conn: &Connection,
    category: ProductCategory,
    owner_email: Option<&str>,
) -> Result<Vec<Product>, AppError> {
    let category = category.to_string();
    let (query, params): (String, Vec<&str>) = match owner_email.map(str::trim) {
        Some(email) if !email.is_empty() => (
            format!(
                "SELECT {} FROM products WHERE category = ?1 AND email = ?2 ORDER BY name",
                PRODUCT_COLUMNS
            ),
            vec![category.as_str(), email],
        ),
        _ => (
            format!(
                "SELECT {} FROM products WHERE category = ?1 ORDER BY name",
                PRODUCT_COLUMNS
            ),
            vec![category.as_str()],
        ),
    };

    let mut stmt = conn.prepare(&query)?;
    let products = stmt
        .query_map(rusqlite::params_from_iter(params), |row| {
            Product::try_from(row)
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(products)
}

/// All products grouped by category, in the order of `ProductCategory::all()`.
/// Empty groups are left out.
pub fn list_grouped(
    conn: &Connection,
    owner_email: Option<&str>,
    category: Option<ProductCategory>,
) -> Result<Vec<(ProductCategory, Vec<Product>)>, AppError> {
    let mut groups = Vec::new();
    for current in ProductCategory::all() {
        if category.is_some_and(|c| c != *current) {
            continue;
        }
        let products = list_products(conn, *current, owner_email)?;
        if !products.is_empty() {
            groups.push((*current, products));
        }
    }
    Ok(groups)
}
