//! In-memory implementation of ExpenseRepository

use async_trait::async_trait;
use expense_errors::AppResult;
use tokio::sync::RwLock;

use crate::domain::{Expense, ExpenseDetails, ExpenseId, ExpenseRepository};

/// 按插入顺序保存记录的内存仓储
#[derive(Default)]
pub struct InMemoryExpenseRepository {
    expenses: RwLock<Vec<Expense>>,
}

impl InMemoryExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn insert(&self, details: &ExpenseDetails) -> AppResult<ExpenseId> {
        let id = ExpenseId::generate();
        self.expenses
            .write()
            .await
            .push(Expense::new(id, details.clone()));
        Ok(id)
    }

    async fn find_by_id(&self, id: &ExpenseId) -> AppResult<Option<Expense>> {
        let expenses = self.expenses.read().await;
        Ok(expenses.iter().find(|e| e.id() == id).cloned())
    }

    async fn replace(&self, expense: &Expense) -> AppResult<bool> {
        let mut expenses = self.expenses.write().await;
        match expenses.iter_mut().find(|e| e.id() == expense.id()) {
            Some(existing) => {
                *existing = expense.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ExpenseId) -> AppResult<bool> {
        let mut expenses = self.expenses.write().await;
        let before = expenses.len();
        expenses.retain(|e| e.id() != id);
        Ok(expenses.len() < before)
    }

    async fn find_all(&self) -> AppResult<Vec<Expense>> {
        Ok(self.expenses.read().await.clone())
    }
}
