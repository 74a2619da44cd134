use super::repository;
use crate::shared::data::db::get_connection;
use contracts::domain::a002_product::aggregate::{NewProduct, Product, ProductUpdate};
use sea_orm::TransactionTrait;
use std::collections::HashSet;

/// Создать товары одной транзакцией. Дубликат SKU откатывает всю транзакцию
pub async fn create_many(items: &[NewProduct]) -> anyhow::Result<usize> {
    let txn = get_connection()?.begin().await?;

    for item in items {
        let product = Product::from_new(item.clone());
        repository::insert_txn(&txn, &product).await?;
    }

    txn.commit().await?;
    Ok(items.len())
}

/// Обновить товары по SKU одной транзакцией
/// Если хотя бы один SKU не найден - транзакция откатывается
pub async fn update_many(updates: &[ProductUpdate]) -> anyhow::Result<usize> {
    let txn = get_connection()?.begin().await?;

    for update in updates {
        let mut product = repository::find_by_sku_txn(&txn, &update.sku)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Product with SKU {} not found", update.sku))?;
        product.apply_update(update);
        repository::update_txn(&txn, &product).await?;
    }

    txn.commit().await?;
    Ok(updates.len())
}

/// Удалить товары по списку SKU. Все SKU должны существовать
pub async fn delete_many_by_sku(skus: &[String]) -> anyhow::Result<u64> {
    let unique: HashSet<&str> = skus.iter().map(String::as_str).collect();
    let txn = get_connection()?.begin().await?;

    let deleted = repository::delete_by_skus_txn(&txn, skus).await?;
    if deleted != unique.len() as u64 {
        // Drop без commit = rollback
        anyhow::bail!(
            "Expected to delete {} products, matched {}",
            unique.len(),
            deleted
        );
    }

    txn.commit().await?;
    Ok(deleted)
}

pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    repository::list_all().await
}

pub async fn get_by_sku(sku: &str) -> anyhow::Result<Option<Product>> {
    repository::find_by_sku(sku.trim()).await
}
