//! API 文档静态资源

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::GatewayConfig;

/// `/swagger.json` 和 `/swagger-ui/*`
pub fn docs_routes(config: &GatewayConfig) -> Router {
    Router::new()
        .route_service("/swagger.json", ServeFile::new(&config.swagger_file))
        .nest_service("/swagger-ui", ServeDir::new(&config.swagger_ui_dir))
}
