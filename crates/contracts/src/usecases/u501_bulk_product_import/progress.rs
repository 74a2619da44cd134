use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::result::{BatchResult, ImportSummary};

/// Состояние сессии импорта
///
/// validating -> ready | rejected -> processing -> completed | completed_with_errors | failed.
/// Закрытие сессии возвращает в idle (сессия удаляется).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    /// CSV разбирается
    Validating,
    /// Ошибок нет, ожидается подтверждение пользователя
    Ready,
    /// Есть ошибки валидации, отправка заблокирована
    Rejected,
    /// Идет обработка пачек
    Processing,
    /// Все строки обработаны успешно
    Completed,
    /// Обработка завершена, часть строк с ошибками
    CompletedWithErrors,
    /// Прогон прерван (ошибка хранилища)
    Failed,
}

impl ImportStatus {
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            ImportStatus::Completed | ImportStatus::CompletedWithErrors | ImportStatus::Failed
        )
    }
}

/// Текущий прогресс сессии импорта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportProgress {
    pub session_id: String,
    pub status: ImportStatus,
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,

    /// Номер последней обработанной пачки (1-based)
    pub current_batch: usize,
    pub total_batches: usize,
    /// Сколько строк обработано
    pub current: usize,
    pub total: usize,

    pub validation_errors: Vec<String>,

    /// Результаты по строкам, в порядке исходного файла
    pub results: Vec<BatchResult>,
    pub summary: Option<ImportSummary>,

    /// Сообщение о прерывании прогона
    pub error_message: Option<String>,
}

impl ImportProgress {
    pub fn new(session_id: String, file_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            status: ImportStatus::Validating,
            file_name,
            created_at: now,
            started_at: None,
            completed_at: None,
            updated_at: now,
            current_batch: 0,
            total_batches: 0,
            current: 0,
            total: 0,
            validation_errors: Vec::new(),
            results: Vec::new(),
            summary: None,
            error_message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ImportStatus::CompletedWithErrors).unwrap();
        assert_eq!(json, "\"completed_with_errors\"");

        let status: ImportStatus = serde_json::from_str("\"ready\"").unwrap();
        assert_eq!(status, ImportStatus::Ready);
    }

    #[test]
    fn test_finished_statuses() {
        assert!(!ImportStatus::Ready.is_finished());
        assert!(!ImportStatus::Processing.is_finished());
        assert!(ImportStatus::Failed.is_finished());
        assert!(ImportStatus::Completed.is_finished());
    }
}
