use async_trait::async_trait;
use contracts::domain::a001_brand::{Brand, BrandId};
use std::collections::HashMap;

use crate::domain::a001_brand;

/// Источник списка брендов для импорта
#[async_trait]
pub trait BrandSource: Send + Sync {
    async fn list_brands(&self) -> anyhow::Result<Vec<Brand>>;
}

/// Бренды из БД (a001_brand)
pub struct DbBrandSource;

#[async_trait]
impl BrandSource for DbBrandSource {
    async fn list_brands(&self) -> anyhow::Result<Vec<Brand>> {
        a001_brand::service::list_all().await
    }
}

/// Снимок справочника брендов: название (без учета регистра) -> id
///
/// Загружается один раз перед прогоном и не меняется во время импорта.
#[derive(Debug, Clone, Default)]
pub struct BrandDirectory {
    by_name: HashMap<String, BrandId>,
}

impl BrandDirectory {
    pub fn from_brands<I>(brands: I) -> Self
    where
        I: IntoIterator<Item = Brand>,
    {
        let mut by_name = HashMap::new();
        for brand in brands {
            let key = normalize(&brand.name);
            if key.is_empty() {
                continue;
            }
            if by_name.contains_key(&key) {
                tracing::warn!("Duplicate brand name \"{}\", keeping the first one", brand.name);
                continue;
            }
            by_name.insert(key, brand.id);
        }
        Self { by_name }
    }

    pub async fn load(source: &dyn BrandSource) -> anyhow::Result<Self> {
        let brands = source.list_brands().await?;
        Ok(Self::from_brands(brands))
    }

    /// Точное совпадение без учета регистра. Нечеткий поиск не выполняется
    pub fn resolve(&self, name: &str) -> Option<BrandId> {
        self.by_name.get(&normalize(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
