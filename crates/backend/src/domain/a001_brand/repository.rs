use chrono::Utc;
use contracts::domain::a001_brand::aggregate::{Brand, BrandId};
use contracts::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_brand")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Brand {
    fn from(m: Model) -> Self {
        Brand {
            id: BrandId::from_string(&m.id).unwrap_or_else(|_| BrandId::new_v4()),
            name: m.name,
            description: m.description,
            metadata: EntityMetadata {
                created_at: m.created_at.unwrap_or_else(Utc::now),
                updated_at: m.updated_at.unwrap_or_else(Utc::now),
            },
        }
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Brand>> {
    let items = Entity::find()
        .order_by_asc(Column::Name)
        .all(get_connection()?)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Brand>> {
    let result = Entity::find_by_id(id.to_string())
        .one(get_connection()?)
        .await?;
    Ok(result.map(Into::into))
}

/// Найти бренд по названию (без учета регистра)
/// ВАЖНО: name должен быть уже trimmed
pub async fn find_by_name_ignore_case(name: &str) -> anyhow::Result<Option<Brand>> {
    let name_lower = name.to_lowercase();
    // SQLite LOWER() не работает с кириллицей, сравниваем на стороне приложения
    let found = list_all()
        .await?
        .into_iter()
        .find(|b| b.name.trim().to_lowercase() == name_lower);
    Ok(found)
}

pub async fn insert(aggregate: &Brand) -> anyhow::Result<Uuid> {
    let uuid = aggregate.id.value();
    let active = ActiveModel {
        id: Set(aggregate.id.as_string()),
        name: Set(aggregate.name.clone()),
        description: Set(aggregate.description.clone()),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
    };
    active.insert(get_connection()?).await?;
    Ok(uuid)
}
