//! 费用仓储接口

use async_trait::async_trait;
use expense_errors::AppResult;

use crate::domain::entities::{Expense, ExpenseDetails};
use crate::domain::value_objects::ExpenseId;

/// 费用仓储接口
///
/// 每个方法对应一次单文档操作（`find_all` 除外），不做重试。
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// 插入新记录，返回存储分配的标识
    async fn insert(&self, details: &ExpenseDetails) -> AppResult<ExpenseId>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: &ExpenseId) -> AppResult<Option<Expense>>;

    /// 整体替换，返回是否匹配到记录
    async fn replace(&self, expense: &Expense) -> AppResult<bool>;

    /// 删除，返回是否删除了记录
    async fn delete(&self, id: &ExpenseId) -> AppResult<bool>;

    /// 按存储自然顺序返回全部记录
    async fn find_all(&self) -> AppResult<Vec<Expense>>;
}
