use chrono::Utc;
use contracts::domain::a001_brand::BrandId;
use contracts::domain::a002_product::aggregate::{Product, ProductId};
use contracts::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub sku: String,
    pub brand_id: String,
    pub product_name: String,
    pub description: Option<String>,
    pub cost_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Product {
            id: ProductId::from_string(&m.id).unwrap_or_else(|_| ProductId::new_v4()),
            sku: m.sku,
            brand_id: BrandId::from_string(&m.brand_id).unwrap_or_else(|_| BrandId(Uuid::nil())),
            product_name: m.product_name,
            description: m.description,
            cost_price: m.cost_price,
            selling_price: m.selling_price,
            color: m.color,
            size: m.size,
            category: m.category,
            image_url: m.image_url,
            metadata: EntityMetadata {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
            },
        }
    }
}

fn to_active(aggregate: &Product) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.id.as_string()),
        sku: Set(aggregate.sku.clone()),
        brand_id: Set(aggregate.brand_id.as_string()),
        product_name: Set(aggregate.product_name.clone()),
        description: Set(aggregate.description.clone()),
        cost_price: Set(aggregate.cost_price),
        selling_price: Set(aggregate.selling_price),
        color: Set(aggregate.color.clone()),
        size: Set(aggregate.size.clone()),
        category: Set(aggregate.category.clone()),
        image_url: Set(aggregate.image_url.clone()),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    let items = Entity::find()
        .order_by_asc(Column::Sku)
        .all(get_connection()?)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn find_by_sku(sku: &str) -> anyhow::Result<Option<Product>> {
    let result = Entity::find()
        .filter(Column::Sku.eq(sku))
        .one(get_connection()?)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn find_by_sku_txn(txn: &DatabaseTransaction, sku: &str) -> anyhow::Result<Option<Product>> {
    let result = Entity::find()
        .filter(Column::Sku.eq(sku))
        .one(txn)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert_txn(txn: &DatabaseTransaction, aggregate: &Product) -> anyhow::Result<()> {
    to_active(aggregate).insert(txn).await?;
    Ok(())
}

pub async fn update_txn(txn: &DatabaseTransaction, aggregate: &Product) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(txn).await?;
    Ok(())
}

/// Жесткое удаление по списку SKU. Возвращает число удаленных строк
pub async fn delete_by_skus_txn(txn: &DatabaseTransaction, skus: &[String]) -> anyhow::Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::Sku.is_in(skus.iter().cloned()))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}
