use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Параметры пакетного импорта товаров
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Размер пачки (строк), обрабатываемой параллельно
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Пауза между пачками, мс
    #[serde(default = "default_chunk_pause_ms")]
    pub chunk_pause_ms: u64,
    /// Через сколько часов завершенные сессии удаляются из памяти
    #[serde(default = "default_session_max_age_hours")]
    pub session_max_age_hours: i64,
}

impl ImportConfig {
    pub fn chunk_pause(&self) -> Duration {
        Duration::from_millis(self.chunk_pause_ms)
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_pause_ms: default_chunk_pause_ms(),
            session_max_age_hours: default_session_max_age_hours(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_chunk_size() -> usize {
    500
}

fn default_chunk_pause_ms() -> u64 {
    100
}

fn default_session_max_age_hours() -> i64 {
    24
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"

[server]
port = 3000

[import]
chunk_size = 500
chunk_pause_ms = 100
session_max_age_hours = 24
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

/// Разбор и проверка конфигурации
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.import.chunk_size == 0 {
        anyhow::bail!("import.chunk_size must be greater than 0");
    }
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}
