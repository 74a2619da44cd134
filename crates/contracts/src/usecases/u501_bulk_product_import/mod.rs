pub mod progress;
pub mod record;
pub mod request;
pub mod response;
pub mod result;

pub use progress::{ImportProgress, ImportStatus};
pub use record::{ImportAction, ImportRecord};
pub use request::ImportRequest;
pub use response::{ConfirmResponse, ImportStartStatus, PrepareResponse, ValidateResponse};
pub use result::{ActionStats, BatchResult, ImportSummary, SummaryKind};

use crate::usecases::common::UseCaseMetadata;

/// Массовое создание, обновление и удаление товаров из CSV файла
pub struct BulkProductImport;

impl UseCaseMetadata for BulkProductImport {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "bulk_product_import"
    }

    fn display_name() -> &'static str {
        "Bulk product import"
    }
}
