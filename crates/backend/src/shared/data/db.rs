use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Схема каталога: бренды и товары. SKU уникален
const SCHEMA: &[(&str, &str)] = &[
    (
        "a001_brand",
        r#"
        CREATE TABLE IF NOT EXISTS a001_brand (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
    (
        "a001_brand_name_idx",
        "CREATE INDEX IF NOT EXISTS idx_a001_brand_name ON a001_brand (name);",
    ),
    (
        "a002_product",
        r#"
        CREATE TABLE IF NOT EXISTS a002_product (
            id TEXT PRIMARY KEY NOT NULL,
            sku TEXT NOT NULL,
            brand_id TEXT NOT NULL,
            product_name TEXT NOT NULL,
            description TEXT,
            cost_price REAL,
            selling_price REAL,
            color TEXT,
            size TEXT,
            category TEXT,
            image_url TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
    (
        "a002_product_sku_idx",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_a002_product_sku ON a002_product (sku);",
    ),
];

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Connecting to database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    for (name, sql) in SCHEMA {
        tracing::debug!("Ensuring schema object {}", name);
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;

    tracing::info!("Database initialized");
    Ok(())
}

/// Глобальное подключение к БД (ошибка, если initialize_database не вызывался)
pub fn get_connection() -> anyhow::Result<&'static DatabaseConnection> {
    DB_CONN
        .get()
        .ok_or_else(|| anyhow::anyhow!("Database connection has not been initialized"))
}
