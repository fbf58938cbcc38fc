//! API layer - gRPC service implementations

mod conversions;
mod grpc_service;

pub use grpc_service::ExpenseServiceImpl;
