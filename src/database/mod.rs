pub mod schema;

use crate::error::AppError;
use rusqlite::Connection;
use std::path::Path;

/// Opens the product store at `db_path` and brings the schema up to date
pub fn init_database(db_path: &Path) -> Result<Connection, AppError> {
    // Make sure the directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path)?;
    schema::init_schema(&conn)?;
    log::debug!("Database ready at {:?}", db_path);

    Ok(conn)
}

/// Fresh store in memory, used by the test modules
#[cfg(test)]
pub fn open_in_memory() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    schema::init_schema(&conn).unwrap();
    conn
}
