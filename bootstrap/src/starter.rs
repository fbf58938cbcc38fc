//! 服务启动器
//!
//! gRPC 服务和转码 gateway 在同一进程内启动

use std::future::{Future, IntoFuture};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use expense_config::AppConfig;
use expense_errors::AppResult;
use expense_telemetry::init_metrics;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::transport::server::Router;
use tracing::{error, info, warn};

use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};
use crate::shutdown::ShutdownController;

/// 构建 gateway 时可用的上下文
pub struct GatewayContext {
    /// gRPC 服务地址（`http://host:port`），gateway 作为客户端连接
    pub grpc_endpoint: String,
    /// 应用配置
    pub config: AppConfig,
    /// Prometheus handle（recorder 安装失败时为空）
    pub metrics: Option<PrometheusHandle>,
}

/// 运行 gRPC 服务和 HTTP gateway
///
/// 启动顺序：
/// 1. 加载配置
/// 2. 初始化运行时（日志、metrics）
/// 3. 连接数据库
/// 4. 绑定 gRPC 端口并启动 gRPC 服务
/// 5. 调用 `gateway_builder` 连接 gRPC 服务并构建 HTTP 路由
/// 6. 绑定 HTTP 端口并启动 gateway
///
/// 任一步骤失败都会返回错误，不做降级或重试。
///
/// # 示例
///
/// ```ignore
/// run_server(
///     "config",
///     |infra, mut server| async move {
///         let service = MyServiceImpl::new(infra.collection());
///         Ok(server.add_service(MyServiceServer::new(service)))
///     },
///     |ctx| async move { build_gateway(ctx).await },
/// )
/// .await
/// ```
pub async fn run_server<S, SFut, G, GFut>(
    config_dir: &str,
    service_builder: S,
    gateway_builder: G,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: FnOnce(Infrastructure, Server) -> SFut,
    SFut: Future<Output = AppResult<Router>>,
    G: FnOnce(GatewayContext) -> GFut,
    GFut: Future<Output = AppResult<axum::Router>>,
{
    // 1. 加载配置
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);

    let metrics = match init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder, metrics disabled");
            None
        }
    };

    info!("Starting {} service", config.app_name);

    // 3. 连接数据库
    let infra = Infrastructure::from_config(config.clone())
        .await
        .inspect_err(|e| error!(error = %e, "Cannot initialize infrastructure"))?;

    // 4. 绑定 gRPC 端口，先监听再连接，保证 gateway 拨号时服务已就绪
    let grpc_listener = TcpListener::bind(config.grpc.address())
        .await
        .inspect_err(|e| error!(error = %e, address = %config.grpc.address(), "Failed to listen"))?;
    let grpc_addr = grpc_listener.local_addr()?;

    let router = service_builder(infra, Server::builder())
        .await
        .inspect_err(|e| error!(error = %e, "Failed to build gRPC service"))?;

    let shutdown = ShutdownController::new();
    let grpc_shutdown = shutdown.signal();
    let mut grpc_task = tokio::spawn(async move {
        router
            .serve_with_incoming_shutdown(TcpListenerStream::new(grpc_listener), grpc_shutdown)
            .await
    });

    info!(%grpc_addr, "Serving gRPC");

    // 5. 构建 gateway
    let context = GatewayContext {
        grpc_endpoint: format!("http://{}", dial_address(grpc_addr)),
        config: config.clone(),
        metrics,
    };
    let app = gateway_builder(context)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to register gateway"))?;

    // 6. 启动 gateway
    let http_listener = TcpListener::bind(config.http.address())
        .await
        .inspect_err(|e| error!(error = %e, address = %config.http.address(), "Failed to listen"))?;
    let http_addr = http_listener.local_addr()?;

    info!(%http_addr, "Serving gRPC-Gateway");
    info!("Swagger running on http://{}/swagger-ui/", http_addr);

    let signal_controller = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_controller.shutdown();
    });

    let http_server = axum::serve(http_listener, app)
        .with_graceful_shutdown(shutdown.signal())
        .into_future();
    tokio::pin!(http_server);

    tokio::select! {
        result = &mut http_server => {
            result?;
            shutdown.shutdown();
            grpc_task.await??;
        }
        result = &mut grpc_task => {
            // gRPC 服务只应在关闭信号之后退出
            result??;
            shutdown.shutdown();
            http_server.await?;
        }
    }

    info!("Service stopped");

    Ok(())
}

/// 监听地址为未指定地址时，改用回环地址拨号
fn dial_address(addr: SocketAddr) -> SocketAddr {
    match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port())
        }
        IpAddr::V6(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), addr.port())
        }
        _ => addr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dial_address_replaces_unspecified() {
        let addr: SocketAddr = "0.0.0.0:5000".parse().unwrap();
        assert_eq!(dial_address(addr).to_string(), "127.0.0.1:5000");

        let addr: SocketAddr = "[::]:5000".parse().unwrap();
        assert_eq!(dial_address(addr).to_string(), "[::1]:5000");
    }

    #[test]
    fn test_dial_address_keeps_specific_host() {
        let addr: SocketAddr = "192.168.1.10:5000".parse().unwrap();
        assert_eq!(dial_address(addr), addr);
    }
}
