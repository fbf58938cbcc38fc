//! 费用实体

use crate::domain::value_objects::ExpenseId;

/// 调用方提供的费用字段
///
/// 不做任何校验，原样存储。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDetails {
    pub title: String,
    pub description: String,
    pub amount: i32,
    pub price: i32,
    pub date: String,
}

/// 已存储的费用记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    id: ExpenseId,
    details: ExpenseDetails,
}

impl Expense {
    pub fn new(id: ExpenseId, details: ExpenseDetails) -> Self {
        Self { id, details }
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn details(&self) -> &ExpenseDetails {
        &self.details
    }

    /// 用新字段整体替换（标识不变）
    pub fn replace_details(&mut self, details: ExpenseDetails) {
        self.details = details;
    }
}
