use serde::{Deserialize, Serialize};

/// Ошибка UseCase в форме, пригодной для передачи клиенту
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCaseError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

impl UseCaseError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Структурные ошибки / ошибки валидации CSV (блокируют отправку)
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    /// Операция недопустима в текущем состоянии сессии
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn unsupported_media(message: impl Into<String>) -> Self {
        Self::new("UNSUPPORTED_MEDIA_TYPE", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.details.is_empty() {
            write!(f, ": {}", self.details.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for UseCaseError {}

impl From<anyhow::Error> for UseCaseError {
    fn from(err: anyhow::Error) -> Self {
        UseCaseError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_details() {
        let err = UseCaseError::validation("CSV is invalid")
            .with_details(vec!["Line 2: SKU is required".into(), "Line 3: x".into()]);
        assert_eq!(
            err.to_string(),
            "[VALIDATION_ERROR] CSV is invalid: Line 2: SKU is required; Line 3: x"
        );
    }

    #[test]
    fn test_from_anyhow() {
        let err: UseCaseError = anyhow::anyhow!("db down").into();
        assert_eq!(err.code, "INTERNAL_ERROR");
        assert_eq!(err.message, "db down");
    }
}
