use crate::domain::a001_brand::BrandId;
use crate::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
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

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Товар каталога. SKU уникален и служит ключом для update/remove
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    #[serde(rename = "brandId")]
    pub brand_id: BrandId,
    #[serde(rename = "productName")]
    pub product_name: String,
    pub description: Option<String>,
    #[serde(rename = "costPrice")]
    pub cost_price: Option<f64>,
    #[serde(rename = "sellingPrice")]
    pub selling_price: Option<f64>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Product {
    /// Собрать новую запись из payload создания
    pub fn from_new(new: NewProduct) -> Self {
        Self {
            id: ProductId::new_v4(),
            sku: new.sku,
            brand_id: new.brand_id,
            product_name: new.product_name,
            description: new.description,
            cost_price: new.cost_price,
            selling_price: new.selling_price,
            color: new.color,
            size: new.size,
            category: new.category,
            image_url: new.image_url,
            metadata: EntityMetadata::new(),
        }
    }

    /// Применить изменения. Пустые (None) поля не затирают существующие значения
    pub fn apply_update(&mut self, update: &ProductUpdate) {
        self.brand_id = update.brand_id;
        self.product_name = update.product_name.clone();

        if update.description.is_some() {
            self.description = update.description.clone();
        }
        if update.cost_price.is_some() {
            self.cost_price = update.cost_price;
        }
        if update.selling_price.is_some() {
            self.selling_price = update.selling_price;
        }
        if update.color.is_some() {
            self.color = update.color.clone();
        }
        if update.size.is_some() {
            self.size = update.size.clone();
        }
        if update.category.is_some() {
            self.category = update.category.clone();
        }
        if update.image_url.is_some() {
            self.image_url = update.image_url.clone();
        }
        self.metadata.touch();
    }
}

/// Payload создания товара (create-many)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub sku: String,
    #[serde(rename = "brandId")]
    pub brand_id: BrandId,
    #[serde(rename = "productName")]
    pub product_name: String,
    pub description: Option<String>,
    #[serde(rename = "costPrice")]
    pub cost_price: Option<f64>,
    #[serde(rename = "sellingPrice")]
    pub selling_price: Option<f64>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

/// Payload обновления товара по SKU (update-many)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub sku: String,
    #[serde(rename = "brandId")]
    pub brand_id: BrandId,
    #[serde(rename = "productName")]
    pub product_name: String,
    pub description: Option<String>,
    #[serde(rename = "costPrice")]
    pub cost_price: Option<f64>,
    #[serde(rename = "sellingPrice")]
    pub selling_price: Option<f64>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product() -> NewProduct {
        NewProduct {
            sku: "SKU-1".into(),
            brand_id: BrandId::new_v4(),
            product_name: "Lamp".into(),
            description: Some("Desk lamp".into()),
            cost_price: Some(10.0),
            selling_price: Some(25.0),
            color: Some("Black".into()),
            size: None,
            category: None,
            image_url: None,
        }
    }

    #[test]
    fn test_apply_update_keeps_existing_optional_fields() {
        let mut product = Product::from_new(new_product());
        let update = ProductUpdate {
            sku: "SKU-1".into(),
            brand_id: product.brand_id,
            product_name: "Lamp v2".into(),
            description: None,
            cost_price: None,
            selling_price: Some(30.0),
            color: None,
            size: Some("L".into()),
            category: None,
            image_url: None,
        };

        product.apply_update(&update);

        assert_eq!(product.product_name, "Lamp v2");
        assert_eq!(product.description.as_deref(), Some("Desk lamp"));
        assert_eq!(product.cost_price, Some(10.0));
        assert_eq!(product.selling_price, Some(30.0));
        assert_eq!(product.color.as_deref(), Some("Black"));
        assert_eq!(product.size.as_deref(), Some("L"));
    }
}
