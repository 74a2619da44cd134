use serde::{Deserialize, Serialize};

/// Действие над товаром в строке CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportAction {
    Add,
    Update,
    Remove,
}

impl ImportAction {
    pub const ALL: [ImportAction; 3] = [ImportAction::Add, ImportAction::Update, ImportAction::Remove];

    /// Разбор значения колонки `action` (без учета регистра)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "add" => Some(ImportAction::Add),
            "update" => Some(ImportAction::Update),
            "remove" => Some(ImportAction::Remove),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportAction::Add => "add",
            ImportAction::Update => "update",
            ImportAction::Remove => "remove",
        }
    }

    /// add/update требуют brand и product_name, remove только sku
    pub fn requires_details(&self) -> bool {
        matches!(self, ImportAction::Add | ImportAction::Update)
    }
}

impl std::fmt::Display for ImportAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Одна строка CSV после разбора (до выполнения)
///
/// `action` хранится как есть, чтобы невалидное значение можно было показать
/// пользователю. Пустые необязательные ячейки превращаются в `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRecord {
    /// Номер строки в исходном тексте (1-based, заголовок = 1)
    pub line: usize,
    pub action: String,
    pub sku: String,
    pub brand: String,
    pub product_name: String,
    pub description: Option<String>,
    pub cost_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

impl ImportRecord {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            action: String::new(),
            sku: String::new(),
            brand: String::new(),
            product_name: String::new(),
            description: None,
            cost_price: None,
            selling_price: None,
            color: None,
            size: None,
            category: None,
            image_url: None,
        }
    }

    pub fn parsed_action(&self) -> Option<ImportAction> {
        ImportAction::parse(&self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action_case_insensitive() {
        assert_eq!(ImportAction::parse("add"), Some(ImportAction::Add));
        assert_eq!(ImportAction::parse(" UPDATE "), Some(ImportAction::Update));
        assert_eq!(ImportAction::parse("Remove"), Some(ImportAction::Remove));
        assert_eq!(ImportAction::parse("delete"), None);
        assert_eq!(ImportAction::parse(""), None);
    }

    #[test]
    fn test_requires_details() {
        assert!(ImportAction::Add.requires_details());
        assert!(ImportAction::Update.requires_details());
        assert!(!ImportAction::Remove.requires_details());
    }
}
