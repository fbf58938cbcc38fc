//! Gateway 配置

use std::path::PathBuf;

use expense_config::AppConfig;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API 描述文件（`/swagger.json`）
    pub swagger_file: PathBuf,
    /// 文档 UI 静态资源目录（`/swagger-ui/`）
    pub swagger_ui_dir: PathBuf,
}

impl GatewayConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            swagger_file: config.docs.swagger_file.clone(),
            swagger_ui_dir: config.docs.swagger_ui_dir.clone(),
        }
    }
}
