/// Идентификация UseCase в логах и ответах API
pub trait UseCaseMetadata {
    /// Индекс, он же префикс маршрутов: "u501"
    fn usecase_index() -> &'static str;

    /// "bulk_product_import"
    fn usecase_name() -> &'static str;

    fn display_name() -> &'static str;

    /// "u501_bulk_product_import"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }

    /// "Bulk product import (u501_bulk_product_import)"
    fn label() -> String {
        format!("{} ({})", Self::display_name(), Self::full_name())
    }
}
