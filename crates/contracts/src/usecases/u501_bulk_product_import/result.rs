use serde::{Deserialize, Serialize};

use super::record::ImportRecord;

/// Результат обработки одной строки импорта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub record: ImportRecord,
    pub success: bool,
    pub error: Option<String>,
    /// false, если бренд не найден в справочнике (мутация не выполнялась)
    pub brand_found: bool,
}

impl BatchResult {
    pub fn succeeded(record: ImportRecord) -> Self {
        Self {
            record,
            success: true,
            error: None,
            brand_found: true,
        }
    }

    pub fn failed(record: ImportRecord, error: impl Into<String>, brand_found: bool) -> Self {
        Self {
            record,
            success: false,
            error: Some(error.into()),
            brand_found,
        }
    }
}

/// Счетчики по одному действию
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStats {
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    AllSucceeded,
    PartialFailure,
    AllFailed,
}

/// Итог прогона импорта (агрегированное уведомление)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub kind: SummaryKind,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub add: ActionStats,
    pub update: ActionStats,
    pub remove: ActionStats,
    pub message: String,
}
