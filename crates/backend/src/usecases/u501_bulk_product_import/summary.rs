use contracts::usecases::u501_bulk_product_import::{
    ActionStats, BatchResult, ImportAction, ImportSummary, SummaryKind,
};

/// Посчитать итог прогона по результатам строк
pub fn summarize(results: &[BatchResult]) -> ImportSummary {
    let mut add = ActionStats::default();
    let mut update = ActionStats::default();
    let mut remove = ActionStats::default();

    for result in results {
        let stats = match result.record.parsed_action() {
            Some(ImportAction::Add) => &mut add,
            Some(ImportAction::Update) => &mut update,
            Some(ImportAction::Remove) => &mut remove,
            None => continue,
        };
        if result.success {
            stats.succeeded += 1;
        } else {
            stats.failed += 1;
        }
    }

    let total = results.len();
    let succeeded = results.iter().filter(|r| r.success).count();
    let failed = total - succeeded;

    let kind = if failed == 0 {
        SummaryKind::AllSucceeded
    } else if succeeded == 0 {
        SummaryKind::AllFailed
    } else {
        SummaryKind::PartialFailure
    };

    let message = match kind {
        SummaryKind::AllSucceeded => format!(
            "Successfully processed {} products: {} added, {} updated, {} removed",
            total, add.succeeded, update.succeeded, remove.succeeded
        ),
        SummaryKind::PartialFailure => format!(
            "Import completed with errors: {} succeeded, {} failed",
            succeeded, failed
        ),
        SummaryKind::AllFailed => format!("Import failed: all {} operations failed", total),
    };

    ImportSummary {
        kind,
        total,
        succeeded,
        failed,
        add,
        update,
        remove,
        message,
    }
}

/// Итоговое уведомление в лог
pub fn notify(session_id: &str, summary: &ImportSummary) {
    match summary.kind {
        SummaryKind::AllSucceeded => tracing::info!("Import {}: {}", session_id, summary.message),
        SummaryKind::PartialFailure => tracing::warn!("Import {}: {}", session_id, summary.message),
        SummaryKind::AllFailed => tracing::error!("Import {}: {}", session_id, summary.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::u501_bulk_product_import::ImportRecord;

    fn record(action: &str, sku: &str) -> ImportRecord {
        let mut r = ImportRecord::new(2);
        r.action = action.to_string();
        r.sku = sku.to_string();
        r
    }

    #[test]
    fn test_all_succeeded() {
        let results = vec![
            BatchResult::succeeded(record("add", "S1")),
            BatchResult::succeeded(record("add", "S2")),
            BatchResult::succeeded(record("update", "S3")),
            BatchResult::succeeded(record("remove", "S4")),
        ];
        let summary = summarize(&results);
        assert_eq!(summary.kind, SummaryKind::AllSucceeded);
        assert_eq!(summary.add, ActionStats { succeeded: 2, failed: 0 });
        assert_eq!(summary.update.succeeded, 1);
        assert_eq!(summary.remove.succeeded, 1);
        assert_eq!(
            summary.message,
            "Successfully processed 4 products: 2 added, 1 updated, 1 removed"
        );
    }

    #[test]
    fn test_partial_failure() {
        let results = vec![
            BatchResult::succeeded(record("add", "S1")),
            BatchResult::failed(record("update", "S2"), "boom", true),
            BatchResult::failed(record("remove", "S3"), "Brand \"X\" not found", false),
        ];
        let summary = summarize(&results);
        assert_eq!(summary.kind, SummaryKind::PartialFailure);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.update, ActionStats { succeeded: 0, failed: 1 });
        assert_eq!(summary.remove, ActionStats { succeeded: 0, failed: 1 });
    }

    #[test]
    fn test_all_failed_counts_unknown_actions_in_total_only() {
        let results = vec![
            BatchResult::failed(record("add", "S1"), "boom", true),
            BatchResult::failed(record("archive", "S2"), "Unknown action: archive", true),
        ];
        let summary = summarize(&results);
        assert_eq!(summary.kind, SummaryKind::AllFailed);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.add.failed, 1);
        assert_eq!(summary.message, "Import failed: all 2 operations failed");
    }
}
