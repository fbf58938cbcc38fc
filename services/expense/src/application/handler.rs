//! Business logic handler

use std::sync::Arc;

use expense_errors::{AppError, AppResult};
use tracing::info;

use crate::domain::{Expense, ExpenseId, ExpenseRepository};

use super::commands::*;
use super::queries::*;

pub struct ServiceHandler {
    repo: Arc<dyn ExpenseRepository>,
}

impl ServiceHandler {
    pub fn new(repo: Arc<dyn ExpenseRepository>) -> Self {
        Self { repo }
    }

    /// 创建费用
    pub async fn create_expense(&self, cmd: CreateExpenseCommand) -> AppResult<Expense> {
        let id = self.repo.insert(&cmd.details).await?;

        info!(expense_id = %id, "Created an expense");

        Ok(Expense::new(id, cmd.details))
    }

    /// 按 ID 获取费用
    pub async fn get_expense(&self, query: GetExpenseQuery) -> AppResult<Expense> {
        let id = ExpenseId::parse(&query.id)?;
        let expense = self.find_existing(&id).await?;

        info!(expense_id = %id, "Fetched an expense");

        Ok(expense)
    }

    /// 更新费用
    ///
    /// 所有字段被请求中的值整体覆盖，请求中缺省的字段会变成空值或 0。
    pub async fn update_expense(&self, cmd: UpdateExpenseCommand) -> AppResult<Expense> {
        let id = ExpenseId::parse(&cmd.id)?;
        let mut expense = self.find_existing(&id).await?;

        expense.replace_details(cmd.details);

        if !self.repo.replace(&expense).await? {
            return Err(not_found(&id));
        }

        info!(expense_id = %id, "Updated an expense");

        Ok(expense)
    }

    /// 删除费用，返回调用方提供的 ID
    pub async fn delete_expense(&self, cmd: DeleteExpenseCommand) -> AppResult<String> {
        let id = ExpenseId::parse(&cmd.id)?;

        if !self.repo.delete(&id).await? {
            return Err(not_found(&id));
        }

        info!(expense_id = %id, "Deleted an expense");

        Ok(cmd.id)
    }

    /// 获取全部费用
    pub async fn list_expenses(&self, _query: ListExpensesQuery) -> AppResult<Vec<Expense>> {
        let expenses = self.repo.find_all().await?;

        info!(count = expenses.len(), "Fetched all expenses");

        Ok(expenses)
    }

    async fn find_existing(&self, id: &ExpenseId) -> AppResult<Expense> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: &ExpenseId) -> AppError {
    AppError::not_found(format!("Cannot find expense with the specified ID: {}", id))
}
