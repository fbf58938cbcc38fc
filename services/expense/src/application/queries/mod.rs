//! 读操作查询

mod expense_queries;

pub use expense_queries::*;
