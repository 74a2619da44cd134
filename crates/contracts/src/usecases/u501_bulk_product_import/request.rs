use serde::{Deserialize, Serialize};

/// Запрос на разбор CSV (validate / prepare)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Содержимое CSV (вставленный текст или прочитанный файл)
    pub csv_text: String,

    /// Имя исходного файла, если текст загружен из файла
    #[serde(default)]
    pub file_name: Option<String>,
}
