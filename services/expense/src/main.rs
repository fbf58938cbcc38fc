//! expense-manager Service - Expense CRUD over gRPC and REST

use std::sync::Arc;

use expense_bootstrap::{GatewayContext, Infrastructure, run_server};
use expense_errors::AppError;
use tonic_reflection::server::Builder as ReflectionBuilder;
use tracing::info;

use expense_manager::FILE_DESCRIPTOR_SET;
use expense_manager::api::ExpenseServiceImpl;
use expense_manager::application::ServiceHandler;
use expense_manager::infrastructure::persistence::MongoExpenseRepository;
use expense_manager::proto::expense_service_server::ExpenseServiceServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("APP_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    run_server(
        &config_dir,
        |infra: Infrastructure, mut server| async move {
            info!("Initializing expense service...");

            let repo = Arc::new(MongoExpenseRepository::new(infra.collection()));
            let handler = Arc::new(ServiceHandler::new(repo));
            let service = ExpenseServiceImpl::new(handler);

            let reflection_service = ReflectionBuilder::configure()
                .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
                .build_v1()
                .map_err(|e| AppError::internal(format!("Failed to build reflection service: {}", e)))?;

            Ok(server
                .add_service(ExpenseServiceServer::new(service))
                .add_service(reflection_service))
        },
        |ctx: GatewayContext| expense_gateway::build(ctx),
    )
    .await
}
