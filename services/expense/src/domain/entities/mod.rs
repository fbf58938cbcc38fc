//! 领域实体

mod expense;

pub use expense::{Expense, ExpenseDetails};
