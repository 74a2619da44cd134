use super::repository;
use contracts::domain::a001_brand::aggregate::{Brand, BrandDto};
use uuid::Uuid;

/// Создание бренда. Название уникально без учета регистра
pub async fn create(dto: BrandDto) -> anyhow::Result<Uuid> {
    let mut aggregate = Brand::new_for_insert(dto.name, dto.description);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    if repository::find_by_name_ignore_case(&aggregate.name)
        .await?
        .is_some()
    {
        anyhow::bail!("Brand \"{}\" already exists", aggregate.name);
    }

    repository::insert(&aggregate).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Brand>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Brand>> {
    repository::list_all().await
}
