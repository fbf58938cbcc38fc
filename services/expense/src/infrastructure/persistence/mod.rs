//! Persistence implementations

mod document;
mod memory;
mod mongo;

pub use document::{ExpenseDocument, ExpenseFilter};
pub use memory::InMemoryExpenseRepository;
pub use mongo::MongoExpenseRepository;
