//! 基础设施资源管理
//!
//! 进程启动时创建一次，之后所有请求共享

use expense_config::AppConfig;
use expense_errors::{AppError, AppResult};
use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};
use secrecy::ExposeSecret;
use tracing::info;

/// 基础设施资源容器
#[derive(Clone)]
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// 配置中指定的数据库（持有客户端连接池）
    database: Database,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    ///
    /// 连接后执行一次 `ping`，数据库不可达时直接返回错误。
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let client = Client::with_uri_str(config.database.url.expose_secret())
            .await
            .map_err(|e| AppError::database(format!("Invalid database url: {}", e)))?;

        let database = client.database(&config.database.name);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::database(format!("Cannot connect to database: {}", e)))?;

        info!(
            database = %config.database.name,
            collection = %config.database.collection,
            "Connected to database"
        );

        Ok(Self { config, database })
    }

    /// 获取配置中指定的集合
    pub fn collection<T: Send + Sync>(&self) -> Collection<T> {
        self.database.collection(&self.config.database.collection)
    }
}
