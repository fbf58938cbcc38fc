//! 测试辅助：在随机端口上启动使用内存仓储的 gRPC 服务

use std::net::SocketAddr;
use std::sync::Arc;

use expense_manager::api::ExpenseServiceImpl;
use expense_manager::application::ServiceHandler;
use expense_manager::infrastructure::persistence::InMemoryExpenseRepository;
use expense_manager::proto::expense_service_server::ExpenseServiceServer;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

pub async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let repo = Arc::new(InMemoryExpenseRepository::new());
    let handler = Arc::new(ServiceHandler::new(repo));
    let service = ExpenseServiceImpl::new(handler);

    tokio::spawn(async move {
        Server::builder()
            .add_service(ExpenseServiceServer::new(service))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    addr
}
