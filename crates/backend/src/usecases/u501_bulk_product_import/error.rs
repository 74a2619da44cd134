use contracts::usecases::common::UseCaseError;
use contracts::usecases::u501_bulk_product_import::ImportStatus;
use thiserror::Error;

/// Ошибки хранилища товаров, прерывающие весь прогон импорта
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Product store unavailable: {0}")]
    Unavailable(String),
}

/// Ошибки UseCase импорта товаров
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import session not found: {0}")]
    SessionNotFound(String),

    #[error("Import session {session_id} is not ready for processing (status: {status:?})")]
    NotReady {
        session_id: String,
        status: ImportStatus,
    },

    #[error("Excel files are not yet supported. Please save the file as CSV.")]
    ExcelNotSupported,

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("File is not valid UTF-8 text")]
    InvalidEncoding,

    #[error("Failed to load brands: {0}")]
    BrandDirectory(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ImportError> for UseCaseError {
    fn from(err: ImportError) -> Self {
        let message = err.to_string();
        match err {
            ImportError::SessionNotFound(_) => UseCaseError::not_found(message),
            ImportError::NotReady { .. } => UseCaseError::conflict(message),
            ImportError::ExcelNotSupported
            | ImportError::UnsupportedFile(_)
            | ImportError::InvalidEncoding => UseCaseError::unsupported_media(message),
            ImportError::BrandDirectory(_) | ImportError::Store(_) => {
                UseCaseError::internal(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usecase_error_codes() {
        let err: UseCaseError = ImportError::SessionNotFound("abc".into()).into();
        assert_eq!(err.code, "NOT_FOUND");

        let err: UseCaseError = ImportError::NotReady {
            session_id: "abc".into(),
            status: ImportStatus::Rejected,
        }
        .into();
        assert_eq!(err.code, "CONFLICT");

        let err: UseCaseError = ImportError::ExcelNotSupported.into();
        assert_eq!(err.code, "UNSUPPORTED_MEDIA_TYPE");
        assert!(err.message.contains("not yet supported"));

        let err: UseCaseError = ImportError::from(StoreError::Unavailable("db".into())).into();
        assert_eq!(err.code, "INTERNAL_ERROR");
    }
}
