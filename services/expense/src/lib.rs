//! Expense service library

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

// Proto generated code modules
pub mod expense {
    pub mod v1 {
        tonic::include_proto!("expense.v1");
    }
}

pub use expense::v1 as proto;

/// File descriptor set for gRPC reflection
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("expense_descriptor");
