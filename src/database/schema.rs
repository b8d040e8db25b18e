use rusqlite::{Connection, Result};

const SCHEMA_VERSION: i32 = 1;

/// Initialize the product store schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    // Schema version table for future migrations
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if current_version < SCHEMA_VERSION {
        create_schema(conn)?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [SCHEMA_VERSION],
        )?;
    }

    Ok(())
}

/// Version 1: the products table
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY NOT NULL,
            legacy_id TEXT UNIQUE,
            category TEXT CHECK(category IN (
                'male upper_body', 'male lower_body',
                'female upper_body', 'female lower_body'
            )) NOT NULL,
            name TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0 CHECK(price >= 0),
            image TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_products_email ON products(email)",
        [],
    )?;

    conn.execute(
        "CREATE TRIGGER IF NOT EXISTS update_products_timestamp
         AFTER UPDATE ON products
         BEGIN
            UPDATE products SET updated_at = CURRENT_TIMESTAMP WHERE id = NEW.id;
         END",
        [],
    )?;

    Ok(())
}
