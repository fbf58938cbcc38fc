//! gRPC 客户端

pub mod expense {
    tonic::include_proto!("expense.v1");
}

use expense::expense_service_client::ExpenseServiceClient;
use expense_errors::{AppError, AppResult};
use tonic::transport::Channel;

/// gRPC 客户端集合
#[derive(Clone)]
pub struct GrpcClients {
    pub expense: ExpenseServiceClient<Channel>,
}

impl GrpcClients {
    /// 连接 gRPC 服务，连接失败直接返回错误
    pub async fn new(endpoint: String) -> AppResult<Self> {
        let channel = Channel::from_shared(endpoint)
            .map_err(|e| AppError::internal(format!("Invalid gRPC endpoint: {}", e)))?
            .connect()
            .await
            .map_err(|e| AppError::external_service(format!("Failed to dial server: {}", e)))?;

        Ok(Self::from_channel(channel))
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            expense: ExpenseServiceClient::new(channel),
        }
    }
}
