use async_trait::async_trait;
use contracts::domain::a002_product::{NewProduct, ProductUpdate};
use sea_orm::DbErr;

use super::error::StoreError;
use crate::domain::a002_product;
use crate::shared::data::db::get_connection;

/// Хранилище товаров, в которое пишет импорт
///
/// `Ok(false)`: операция не выполнена (ошибка записи конкретных строк),
/// `Err`: хранилище недоступно, прогон прерывается.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn create_many(&self, items: &[NewProduct]) -> Result<bool, StoreError>;

    async fn update_many(&self, items: &[ProductUpdate]) -> Result<bool, StoreError>;

    async fn delete_many_by_sku(&self, skus: &[String]) -> Result<bool, StoreError>;
}

/// Хранилище товаров в SQLite (a002_product)
pub struct DbProductStore;

impl DbProductStore {
    fn ensure_available() -> Result<(), StoreError> {
        get_connection()
            .map(|_| ())
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    /// Ошибка сервиса -> `Ok(false)` для ошибок строк, `Err` для отказа БД
    fn outcome(operation: &str, result: anyhow::Result<()>) -> Result<bool, StoreError> {
        let Err(e) = result else {
            return Ok(true);
        };
        if let Some(db_err) = e.chain().find_map(|cause| cause.downcast_ref::<DbErr>()) {
            if is_store_failure(db_err) {
                tracing::error!("Product store failure during {}: {}", operation, db_err);
                return Err(StoreError::Unavailable(db_err.to_string()));
            }
        }
        tracing::error!("Failed to {} products: {}", operation, e);
        Ok(false)
    }
}

/// Отказ соединения или схемы (а не нарушение ограничения конкретной строки)
fn is_store_failure(err: &DbErr) -> bool {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => true,
        DbErr::Exec(_) | DbErr::Query(_) => {
            err.sql_err().is_none() && !err.to_string().contains("constraint failed")
        }
        _ => false,
    }
}

#[async_trait]
impl ProductStore for DbProductStore {
    async fn create_many(&self, items: &[NewProduct]) -> Result<bool, StoreError> {
        Self::ensure_available()?;
        let result = a002_product::service::create_many(items).await.map(|_| ());
        Self::outcome("create", result)
    }

    async fn update_many(&self, items: &[ProductUpdate]) -> Result<bool, StoreError> {
        Self::ensure_available()?;
        let result = a002_product::service::update_many(items).await.map(|_| ());
        Self::outcome("update", result)
    }

    async fn delete_many_by_sku(&self, skus: &[String]) -> Result<bool, StoreError> {
        Self::ensure_available()?;
        let result = a002_product::service::delete_many_by_sku(skus)
            .await
            .map(|_| ());
        Self::outcome("delete", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_brand;
    use crate::shared::data::db::initialize_database;
    use crate::usecases::u501_bulk_product_import::{
        DbBrandSource, ExecutorSettings, ImportError, ImportExecutor, ProgressTracker,
    };
    use contracts::domain::a001_brand::{BrandDto, BrandId};
    use contracts::usecases::u501_bulk_product_import::ImportRecord;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
    use std::sync::Arc;
    use std::time::Duration;

    fn new_product(sku: &str, brand_id: BrandId) -> NewProduct {
        NewProduct {
            sku: sku.into(),
            brand_id,
            product_name: format!("Product {}", sku),
            description: None,
            cost_price: Some(10.0),
            selling_price: None,
            color: None,
            size: None,
            category: None,
            image_url: None,
        }
    }

    fn product_update(sku: &str, brand_id: BrandId) -> ProductUpdate {
        ProductUpdate {
            sku: sku.into(),
            brand_id,
            product_name: format!("Product {}", sku),
            description: None,
            cost_price: None,
            selling_price: Some(20.0),
            color: None,
            size: None,
            category: None,
            image_url: None,
        }
    }

    fn add_record(line: usize, sku: &str) -> ImportRecord {
        let mut r = ImportRecord::new(line);
        r.action = "add".into();
        r.sku = sku.into();
        r.brand = "Acme".into();
        r.product_name = format!("Product {}", sku);
        r
    }

    // Глобальное подключение инициализируется один раз на процесс,
    // поэтому оба сценария проверяются в одном тесте.
    #[tokio::test]
    async fn test_db_store_row_failures_and_store_failure() {
        let db_file =
            std::env::temp_dir().join(format!("u501_store_{}.db", uuid::Uuid::new_v4()));
        initialize_database(&db_file).await.unwrap();

        let brand_id = BrandId::new(
            a001_brand::service::create(BrandDto {
                name: "Acme".into(),
                description: None,
            })
            .await
            .unwrap(),
        );
        let store = DbProductStore;

        // Ошибки отдельных строк: Ok(false), прогон продолжается
        assert!(store.create_many(&[new_product("S1", brand_id)]).await.unwrap());
        assert!(!store.create_many(&[new_product("S1", brand_id)]).await.unwrap());
        assert!(store.update_many(&[product_update("S1", brand_id)]).await.unwrap());
        assert!(!store
            .update_many(&[product_update("MISSING", brand_id)])
            .await
            .unwrap());
        assert!(!store
            .delete_many_by_sku(&["MISSING".to_string()])
            .await
            .unwrap());
        assert!(store.delete_many_by_sku(&["S1".to_string()]).await.unwrap());

        // Таблица пропала: отказ хранилища
        get_connection()
            .unwrap()
            .execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                "DROP TABLE a002_product".to_string(),
            ))
            .await
            .unwrap();

        let err = store
            .create_many(&[new_product("S2", brand_id)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));

        // Прогон прерывается после первой пачки
        let tracker = Arc::new(ProgressTracker::new());
        tracker.create_session("db".into(), None);
        let executor = ImportExecutor::new(
            tracker.clone(),
            Arc::new(DbProductStore),
            Arc::new(DbBrandSource),
            ExecutorSettings {
                chunk_size: 2,
                chunk_pause: Duration::ZERO,
            },
        );
        let records: Vec<_> = (0..6)
            .map(|i| add_record(i + 2, &format!("S{}", i)))
            .collect();
        let err = executor.process_records("db", records).await.unwrap_err();
        assert!(matches!(err, ImportError::Store(_)));

        let progress = tracker.get_progress("db").unwrap();
        assert_eq!(progress.current_batch, 1);
        assert!(progress.results.is_empty());
        assert!(progress.summary.is_none());

        let _ = std::fs::remove_file(&db_file);
    }
}
