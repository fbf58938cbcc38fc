//! MongoDB implementation of ExpenseRepository

use std::time::Instant;

use async_trait::async_trait;
use expense_bootstrap::record_db_query;
use expense_errors::{AppError, AppResult};
use mongodb::Collection;
use mongodb::error::ErrorKind;

use crate::domain::{Expense, ExpenseDetails, ExpenseId, ExpenseRepository};

use super::document::{ExpenseDocument, ExpenseFilter};

/// 单个集合的共享句柄
///
/// `Collection` 内部持有驱动的连接池，clone 代价很低。
#[derive(Clone)]
pub struct MongoExpenseRepository {
    collection: Collection<ExpenseDocument>,
}

impl MongoExpenseRepository {
    pub fn new(collection: Collection<ExpenseDocument>) -> Self {
        Self { collection }
    }

    fn observe<T, E>(&self, operation: &str, started: Instant, result: &Result<T, E>) {
        record_db_query(
            operation,
            self.collection.name(),
            started.elapsed().as_secs_f64() * 1000.0,
            result.is_ok(),
        );
    }
}

#[async_trait]
impl ExpenseRepository for MongoExpenseRepository {
    async fn insert(&self, details: &ExpenseDetails) -> AppResult<ExpenseId> {
        let started = Instant::now();
        let result = self
            .collection
            .insert_one(ExpenseDocument::from_details(details))
            .await;
        self.observe("insert_one", started, &result);

        let inserted = result.map_err(|e| AppError::internal(format!("Cannot insert expense: {}", e)))?;

        ExpenseId::try_from(inserted.inserted_id)
    }

    async fn find_by_id(&self, id: &ExpenseId) -> AppResult<Option<Expense>> {
        let started = Instant::now();
        let result = self
            .collection
            .find_one(ExpenseFilter::ById(*id).to_document())
            .await;
        self.observe("find_one", started, &result);

        match result.map_err(find_one_error)? {
            Some(document) => document.into_expense().map(Some),
            None => Ok(None),
        }
    }

    async fn replace(&self, expense: &Expense) -> AppResult<bool> {
        let started = Instant::now();
        let result = self
            .collection
            .replace_one(
                ExpenseFilter::ById(*expense.id()).to_document(),
                ExpenseDocument::from(expense),
            )
            .await;
        self.observe("replace_one", started, &result);

        let updated = result.map_err(|e| {
            AppError::internal(format!("Cannot update expense in database: {}", e))
        })?;

        Ok(updated.matched_count > 0)
    }

    async fn delete(&self, id: &ExpenseId) -> AppResult<bool> {
        let started = Instant::now();
        let result = self
            .collection
            .delete_one(ExpenseFilter::ById(*id).to_document())
            .await;
        self.observe("delete_one", started, &result);

        let deleted = result.map_err(|e| {
            AppError::internal(format!("Cannot delete expense with the specified ID: {}", e))
        })?;

        Ok(deleted.deleted_count > 0)
    }

    async fn find_all(&self) -> AppResult<Vec<Expense>> {
        let started = Instant::now();
        let result = self.collection.find(ExpenseFilter::All.to_document()).await;
        self.observe("find", started, &result);

        let mut cursor =
            result.map_err(|e| AppError::internal(format!("Unknown internal error: {}", e)))?;

        let mut expenses = Vec::new();
        while cursor
            .advance()
            .await
            .map_err(|e| AppError::internal(format!("Unknown internal error: {}", e)))?
        {
            let document = cursor.deserialize_current().map_err(decode_error)?;
            expenses.push(document.into_expense()?);
        }

        Ok(expenses)
    }
}

/// 单条查询的错误分类：无法解码的文档按不存在处理，其余为数据库错误
fn find_one_error(e: mongodb::error::Error) -> AppError {
    match *e.kind {
        ErrorKind::BsonDeserialization(_) => {
            AppError::not_found(format!("Cannot find expense with the specified ID: {}", e))
        }
        _ => AppError::database(format!("Cannot find expense: {}", e)),
    }
}

/// 列表中任一文档解码失败都是内部错误
fn decode_error(e: mongodb::error::Error) -> AppError {
    AppError::internal(format!("Error while decoding data: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;
    use serde::de::Error as _;

    fn deserialization_error() -> mongodb::error::Error {
        mongodb::error::Error::from(bson::de::Error::custom(
            "invalid type: integer, expected a string",
        ))
    }

    fn connection_error() -> mongodb::error::Error {
        mongodb::error::Error::from(std::io::ErrorKind::ConnectionRefused)
    }

    #[test]
    fn test_undecodable_document_is_not_found() {
        let err = find_one_error(deserialization_error());
        assert!(matches!(
            err,
            AppError::NotFound(ref m) if m.starts_with("Cannot find expense with the specified ID")
        ));
        assert_eq!(err.grpc_code(), tonic::Code::NotFound);
    }

    #[test]
    fn test_find_one_connection_failure_is_database_error() {
        let err = find_one_error(connection_error());
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.grpc_code(), tonic::Code::Internal);
    }

    #[test]
    fn test_list_decode_failure_is_internal() {
        let err = decode_error(deserialization_error());
        assert!(matches!(
            err,
            AppError::Internal(ref m) if m.starts_with("Error while decoding data")
        ));
        assert_eq!(err.grpc_code(), tonic::Code::Internal);
    }
}
