//! Proto 与领域模型之间的转换

use crate::domain::{Expense, ExpenseDetails};
use crate::proto;

impl From<proto::Expense> for ExpenseDetails {
    fn from(expense: proto::Expense) -> Self {
        Self {
            title: expense.title,
            description: expense.description,
            amount: expense.amount,
            price: expense.price,
            date: expense.date,
        }
    }
}

impl From<&ExpenseDetails> for proto::Expense {
    fn from(details: &ExpenseDetails) -> Self {
        Self {
            title: details.title.clone(),
            description: details.description.clone(),
            amount: details.amount,
            price: details.price,
            date: details.date.clone(),
        }
    }
}

impl From<&Expense> for proto::ExpenseWithId {
    fn from(expense: &Expense) -> Self {
        let details = expense.details();
        Self {
            id: expense.id().to_string(),
            title: details.title.clone(),
            description: details.description.clone(),
            amount: details.amount,
            price: details.price,
            date: details.date.clone(),
        }
    }
}
