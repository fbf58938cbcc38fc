//! 值对象

mod expense_id;

pub use expense_id::ExpenseId;
