//! 仓储接口

mod expense_repository;

pub use expense_repository::ExpenseRepository;
