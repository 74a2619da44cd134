use crate::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrandId(pub Uuid);

impl BrandId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for BrandId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(BrandId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Бренд товара. Название используется как внешний ключ при импорте из CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Brand {
    pub fn new_for_insert(name: String, description: Option<String>) -> Self {
        Self {
            id: BrandId::new_v4(),
            name,
            description,
            metadata: EntityMetadata::new(),
        }
    }

    /// Валидация перед записью
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Brand name must not be empty".into());
        }
        if self.name.chars().count() > 100 {
            return Err("Brand name must be at most 100 characters".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.name = self.name.trim().to_string();
        self.metadata.touch();
    }
}

// ============================================================================
// DTO
// ============================================================================

/// Форма создания бренда
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_validate() {
        let brand = Brand::new_for_insert("  ".into(), None);
        assert!(brand.validate().is_err());

        let brand = Brand::new_for_insert("Acme".into(), None);
        assert!(brand.validate().is_ok());
    }

    #[test]
    fn test_before_write_trims_name() {
        let mut brand = Brand::new_for_insert("  Acme Co ".into(), None);
        brand.before_write();
        assert_eq!(brand.name, "Acme Co");
    }

    #[test]
    fn test_brand_id_roundtrip_string() {
        let id = BrandId::new_v4();
        assert_eq!(BrandId::from_string(&id.as_string()), Ok(id));
        assert!(BrandId::from_string("not-a-uuid").is_err());
    }
}
