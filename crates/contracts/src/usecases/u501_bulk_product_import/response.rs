use serde::{Deserialize, Serialize};

use super::progress::ImportStatus;
use super::record::ImportRecord;

/// Ответ на validate: разобранные строки и ошибки валидации
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub records: Vec<ImportRecord>,
    pub errors: Vec<String>,
    /// true, если ошибок нет и есть хотя бы одна строка
    pub can_submit: bool,
}

/// Ответ на prepare/upload: создана сессия импорта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareResponse {
    pub session_id: String,
    pub status: ImportStatus,
    pub record_count: usize,
    pub errors: Vec<String>,
}

/// Ответ на confirm (запуск обработки)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmResponse {
    pub session_id: String,
    pub status: ImportStartStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStartStatus {
    Started,
    Failed,
}
