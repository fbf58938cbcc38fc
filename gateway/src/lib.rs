//! Expense REST Gateway
//!
//! 把 REST/JSON 请求转码为对 expense gRPC 服务的调用，并提供 API 文档静态资源。

mod config;
mod docs;
mod error;
mod grpc;
mod routing;
mod transcode;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use grpc::GrpcClients;
pub use transcode::{
    DeleteExpenseResponseBody, ExpenseBody, ExpenseListBody, ExpenseRequestBody,
    ExpenseResponseBody, ExpenseWithIdBody,
};

use axum::Router;
use expense_bootstrap::GatewayContext;
use expense_errors::AppResult;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 连接 gRPC 服务并构建 gateway 路由
pub async fn build(ctx: GatewayContext) -> AppResult<Router> {
    info!("Connecting to expense service at {}", ctx.grpc_endpoint);
    let clients = GrpcClients::new(ctx.grpc_endpoint).await?;

    let config = GatewayConfig::from_app_config(&ctx.config);

    Ok(app(clients, &config, ctx.metrics))
}

/// 构建路由（先创建带状态的路由，再合并无状态的路由）
pub fn app(clients: GrpcClients, config: &GatewayConfig, metrics: Option<PrometheusHandle>) -> Router {
    let mut router = transcode::expense_routes()
        .with_state(clients)
        .merge(routing::api_routes())
        .merge(docs::docs_routes(config));

    if let Some(handle) = metrics {
        router = router.merge(routing::metrics_routes(handle));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use std::fs;
    use tempfile::TempDir;
    use tonic::transport::Channel;
    use tower::ServiceExt;

    /// 指向已关闭端口的客户端，所有 RPC 都会失败
    async fn unreachable_clients() -> GrpcClients {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let channel = Channel::from_shared(format!("http://{}", addr))
            .unwrap()
            .connect_lazy();
        GrpcClients::from_channel(channel)
    }

    fn docs_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("expense.swagger.json"),
            r#"{"swagger":"2.0","info":{"title":"expense.proto"}}"#,
        )
        .unwrap();
        fs::create_dir(dir.path().join("swagger-ui")).unwrap();
        fs::write(
            dir.path().join("swagger-ui").join("index.html"),
            "<html>swagger</html>",
        )
        .unwrap();
        dir
    }

    async fn test_app(dir: &TempDir) -> Router {
        let config = GatewayConfig {
            swagger_file: dir.path().join("expense.swagger.json"),
            swagger_ui_dir: dir.path().join("swagger-ui"),
        };
        app(unreachable_clients().await, &config, None)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = docs_dir();
        let response = test_app(&dir)
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_serves_swagger_json() {
        let dir = docs_dir();
        let response = test_app(&dir)
            .await
            .oneshot(
                Request::builder()
                    .uri("/swagger.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("expense.proto"));
    }

    #[tokio::test]
    async fn test_serves_swagger_ui_assets() {
        let dir = docs_dir();
        let response = test_app(&dir)
            .await
            .oneshot(
                Request::builder()
                    .uri("/swagger-ui/index.html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "<html>swagger</html>");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_before_rpc() {
        let dir = docs_dir();
        let response = test_app(&dir)
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/expense")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        // 上游不可达，若请求被转发会得到 502
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
    }

    #[tokio::test]
    async fn test_body_without_json_content_type_is_rejected() {
        let dir = docs_dir();
        let response = test_app(&dir)
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/expense")
                    .body(Body::from(r#"{"expense":{"title":"Lunch"}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["title"], "Validation Error");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let dir = docs_dir();
        let response = test_app(&dir)
            .await
            .oneshot(Request::builder().uri("/v1/expense").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], 502);
        assert_eq!(json["title"], "External Service Error");
    }

    #[tokio::test]
    async fn test_metrics_route_absent_without_recorder() {
        let dir = docs_dir();
        let response = test_app(&dir)
            .await
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_build_fails_when_server_is_down() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = GrpcClients::new(format!("http://{}", addr))
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), 502);
    }
}
