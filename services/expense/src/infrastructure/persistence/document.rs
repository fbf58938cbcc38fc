//! 存储文档与查询条件

use expense_errors::{AppError, AppResult};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use serde::{Deserialize, Serialize};

use crate::domain::{Expense, ExpenseDetails, ExpenseId};

/// 集合中的费用文档
///
/// 缺失的字段按空值解码。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    // 已有集合中使用的键名
    #[serde(rename = "descrition")]
    pub description: String,
    pub amount: i32,
    pub price: i32,
    pub date: String,
}

impl ExpenseDocument {
    /// 待插入的新文档，`_id` 由存储分配
    pub fn from_details(details: &ExpenseDetails) -> Self {
        Self {
            id: None,
            title: details.title.clone(),
            description: details.description.clone(),
            amount: details.amount,
            price: details.price,
            date: details.date.clone(),
        }
    }

    pub fn into_expense(self) -> AppResult<Expense> {
        let id = self
            .id
            .ok_or_else(|| AppError::internal("Stored expense has no _id"))?;

        Ok(Expense::new(
            ExpenseId::from(id),
            ExpenseDetails {
                title: self.title,
                description: self.description,
                amount: self.amount,
                price: self.price,
                date: self.date,
            },
        ))
    }
}

impl From<&Expense> for ExpenseDocument {
    fn from(expense: &Expense) -> Self {
        Self {
            id: Some(expense.id().as_object_id()),
            ..Self::from_details(expense.details())
        }
    }
}

/// 查询条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseFilter {
    /// 全部文档
    All,
    /// 按 `_id` 精确匹配
    ById(ExpenseId),
}

impl ExpenseFilter {
    pub fn to_document(&self) -> Document {
        match self {
            Self::All => Document::new(),
            Self::ById(id) => doc! { "_id": id.as_object_id() },
        }
    }
}
