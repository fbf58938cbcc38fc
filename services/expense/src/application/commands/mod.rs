//! 写操作命令

mod expense_commands;

pub use expense_commands::*;
