//! expense-config - 配置加载库

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use thiserror::Error;

use secrecy::Secret;

/// 环境变量前缀，嵌套键用 `__` 分隔（如 `EXPENSE_DATABASE__URL`）
pub const ENV_PREFIX: &str = "EXPENSE_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    /// 数据库名
    pub name: String,
    /// 集合名
    pub collection: String,
}

/// 服务器配置（gRPC 与 HTTP 共用）
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` 形式的地址
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// API 文档静态资源配置
#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_swagger_file")]
    pub swagger_file: PathBuf,
    #[serde(default = "default_swagger_ui_dir")]
    pub swagger_ui_dir: PathBuf,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            swagger_file: default_swagger_file(),
            swagger_ui_dir: default_swagger_ui_dir(),
        }
    }
}

fn default_swagger_file() -> PathBuf {
    PathBuf::from("docs/expense.swagger.json")
}

fn default_swagger_ui_dir() -> PathBuf {
    PathBuf::from("docs/swagger-ui")
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "current_env")]
    pub app_env: String,
    pub database: DatabaseConfig,
    pub grpc: ServerConfig,
    pub http: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub docs: DocsConfig,
}

fn default_app_name() -> String {
    "expense-manager".to_string()
}

fn current_env() -> String {
    std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_dir, Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 使用指定的环境变量 provider 加载配置
    ///
    /// 合并顺序：`default.toml` → `{APP_ENV}.toml` → 环境变量，后者覆盖前者。
    pub fn load_with_env(config_dir: impl AsRef<Path>, env: Env) -> Result<Self, ConfigError> {
        let dir = config_dir.as_ref();
        let app_env = current_env();

        let config: Self = Figment::new()
            .merge(Toml::file(dir.join("default.toml")))
            .merge(Toml::file(dir.join(format!("{}.toml", app_env))))
            .merge(env)
            .extract()?;

        Ok(config)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

#[cfg(test)]
mod tests;
