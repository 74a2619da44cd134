use contracts::usecases::u501_bulk_product_import::{
    BatchResult, ImportProgress, ImportRecord, ImportStatus, ImportSummary,
};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::error::ImportError;

/// Сессия импорта: прогресс для клиента + разобранные строки
#[derive(Debug, Clone)]
struct ImportSession {
    progress: ImportProgress,
    records: Vec<ImportRecord>,
}

/// Трекер сессий импорта (in-memory, для real-time мониторинга)
///
/// Методы обновления молча игнорируют неизвестные session_id: сессию могли
/// закрыть, пока прогон еще идет.
#[derive(Clone, Default)]
pub struct ProgressTracker {
    sessions: Arc<RwLock<HashMap<String, ImportSession>>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ImportSession>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ImportSession>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_progress(&self, session_id: &str, f: impl FnOnce(&mut ImportProgress)) {
        let mut sessions = self.write();
        if let Some(session) = sessions.get_mut(session_id) {
            f(&mut session.progress);
            session.progress.updated_at = chrono::Utc::now();
        }
    }

    /// Создать новую сессию (статус validating)
    pub fn create_session(&self, session_id: String, file_name: Option<String>) {
        let mut sessions = self.write();
        sessions.insert(
            session_id.clone(),
            ImportSession {
                progress: ImportProgress::new(session_id, file_name),
                records: Vec::new(),
            },
        );
    }

    pub fn get_progress(&self, session_id: &str) -> Option<ImportProgress> {
        self.read().get(session_id).map(|s| s.progress.clone())
    }

    /// Сохранить результат разбора: ready, если ошибок нет и есть строки
    pub fn set_validation(
        &self,
        session_id: &str,
        records: Vec<ImportRecord>,
        errors: Vec<String>,
    ) -> Option<ImportStatus> {
        let mut sessions = self.write();
        let session = sessions.get_mut(session_id)?;

        let status = if errors.is_empty() && !records.is_empty() {
            ImportStatus::Ready
        } else {
            ImportStatus::Rejected
        };

        session.progress.status = status;
        session.progress.total = records.len();
        session.progress.validation_errors = errors;
        session.progress.updated_at = chrono::Utc::now();
        session.records = records;
        Some(status)
    }

    /// Перевести сессию ready -> processing и вернуть строки для обработки
    pub fn begin_processing(
        &self,
        session_id: &str,
        total_batches: impl FnOnce(usize) -> usize,
    ) -> Result<Vec<ImportRecord>, ImportError> {
        let mut sessions = self.write();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| ImportError::SessionNotFound(session_id.to_string()))?;

        if session.progress.status != ImportStatus::Ready {
            return Err(ImportError::NotReady {
                session_id: session_id.to_string(),
                status: session.progress.status,
            });
        }

        let now = chrono::Utc::now();
        let progress = &mut session.progress;
        progress.status = ImportStatus::Processing;
        progress.started_at = Some(now);
        progress.updated_at = now;
        progress.current_batch = 0;
        progress.total_batches = total_batches(session.records.len());
        progress.current = 0;
        progress.total = session.records.len();
        progress.results.clear();
        progress.summary = None;

        Ok(session.records.clone())
    }

    /// Зафиксировать обработанную пачку
    pub fn record_batch(
        &self,
        session_id: &str,
        current_batch: usize,
        total_batches: usize,
        total: usize,
        results: &[BatchResult],
    ) {
        self.with_progress(session_id, |p| {
            p.current_batch = current_batch;
            p.total_batches = total_batches;
            p.total = total;
            p.current += results.len();
            p.results.extend_from_slice(results);
        });
    }

    /// Завершить сессию с итогом
    pub fn complete_session(&self, session_id: &str, status: ImportStatus, summary: ImportSummary) {
        self.with_progress(session_id, |p| {
            p.status = status;
            p.summary = Some(summary);
            p.completed_at = Some(chrono::Utc::now());
        });
    }

    /// Прогон прерван: необработанные строки так и не будут выполнены
    pub fn fail_session(&self, session_id: &str, message: String) {
        self.with_progress(session_id, |p| {
            p.status = ImportStatus::Failed;
            p.error_message = Some(message);
            p.completed_at = Some(chrono::Utc::now());
        });
    }

    /// Закрыть сессию (строки и результаты удаляются)
    pub fn close_session(&self, session_id: &str) -> bool {
        self.write().remove(session_id).is_some()
    }

    /// Удалить старые завершенные сессии (для очистки памяти)
    pub fn cleanup_old_sessions(&self, max_age_hours: i64) -> usize {
        let mut sessions = self.write();
        let before = sessions.len();
        let now = chrono::Utc::now();
        sessions.retain(|_, session| match session.progress.completed_at {
            Some(completed_at) => (now - completed_at).num_hours() < max_age_hours,
            // Активные и ожидающие подтверждения сессии не трогаем
            None => true,
        });
        before - sessions.len()
    }

    pub fn session_count(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::u501_bulk_product_import::SummaryKind;

    fn record(sku: &str) -> ImportRecord {
        let mut r = ImportRecord::new(2);
        r.action = "remove".into();
        r.sku = sku.into();
        r
    }

    fn summary() -> ImportSummary {
        ImportSummary {
            kind: SummaryKind::AllSucceeded,
            total: 0,
            succeeded: 0,
            failed: 0,
            add: Default::default(),
            update: Default::default(),
            remove: Default::default(),
            message: String::new(),
        }
    }

    #[test]
    fn test_validation_sets_ready_or_rejected() {
        let tracker = ProgressTracker::new();
        tracker.create_session("a".into(), None);
        tracker.create_session("b".into(), None);
        tracker.create_session("c".into(), None);

        assert_eq!(
            tracker.get_progress("a").unwrap().status,
            ImportStatus::Validating
        );

        let status = tracker.set_validation("a", vec![record("S1")], vec![]);
        assert_eq!(status, Some(ImportStatus::Ready));

        let status = tracker.set_validation("b", vec![record("S1")], vec!["Line 2: x".into()]);
        assert_eq!(status, Some(ImportStatus::Rejected));

        let status = tracker.set_validation("c", vec![], vec![]);
        assert_eq!(status, Some(ImportStatus::Rejected));

        assert_eq!(tracker.set_validation("missing", vec![], vec![]), None);
    }

    #[test]
    fn test_begin_processing_requires_ready() {
        let tracker = ProgressTracker::new();
        tracker.create_session("s".into(), None);

        let err = tracker.begin_processing("s", |_| 1).unwrap_err();
        assert!(matches!(err, ImportError::NotReady { .. }));

        tracker.set_validation("s", vec![record("S1"), record("S2")], vec![]);
        let records = tracker.begin_processing("s", |n| n).unwrap();
        assert_eq!(records.len(), 2);

        let progress = tracker.get_progress("s").unwrap();
        assert_eq!(progress.status, ImportStatus::Processing);
        assert_eq!(progress.total_batches, 2);
        assert!(progress.started_at.is_some());

        // Повторный запуск запрещен
        let err = tracker.begin_processing("s", |_| 1).unwrap_err();
        assert!(matches!(
            err,
            ImportError::NotReady {
                status: ImportStatus::Processing,
                ..
            }
        ));

        let err = tracker.begin_processing("missing", |_| 1).unwrap_err();
        assert!(matches!(err, ImportError::SessionNotFound(_)));
    }

    #[test]
    fn test_record_batch_accumulates_in_order() {
        let tracker = ProgressTracker::new();
        tracker.create_session("s".into(), None);
        tracker.record_batch("s", 1, 2, 3, &[BatchResult::succeeded(record("S1"))]);
        tracker.record_batch(
            "s",
            2,
            2,
            3,
            &[
                BatchResult::succeeded(record("S2")),
                BatchResult::failed(record("S3"), "boom", true),
            ],
        );

        let progress = tracker.get_progress("s").unwrap();
        assert_eq!(progress.current_batch, 2);
        assert_eq!(progress.current, 3);
        let skus: Vec<_> = progress.results.iter().map(|r| r.record.sku.as_str()).collect();
        assert_eq!(skus, vec!["S1", "S2", "S3"]);
    }

    #[test]
    fn test_close_and_cleanup() {
        let tracker = ProgressTracker::new();
        tracker.create_session("done".into(), None);
        tracker.create_session("pending".into(), None);
        tracker.complete_session("done", ImportStatus::Completed, summary());

        // max_age 0 часов: любая завершенная сессия считается старой
        assert_eq!(tracker.cleanup_old_sessions(0), 1);
        assert!(tracker.get_progress("done").is_none());
        assert!(tracker.get_progress("pending").is_some());

        assert!(tracker.close_session("pending"));
        assert!(!tracker.close_session("pending"));
        assert_eq!(tracker.session_count(), 0);
    }

    #[test]
    fn test_fail_session() {
        let tracker = ProgressTracker::new();
        tracker.create_session("s".into(), None);
        tracker.fail_session("s", "Upload failed: db down".into());
        let progress = tracker.get_progress("s").unwrap();
        assert_eq!(progress.status, ImportStatus::Failed);
        assert_eq!(progress.error_message.as_deref(), Some("Upload failed: db down"));
        assert!(progress.status.is_finished());
    }
}
