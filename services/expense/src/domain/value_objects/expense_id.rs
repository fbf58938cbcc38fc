//! 费用标识值对象

use std::fmt;

use expense_errors::{AppError, AppResult};
use mongodb::bson::Bson;
use mongodb::bson::oid::ObjectId;

/// 费用标识，由存储在插入时分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpenseId(ObjectId);

impl ExpenseId {
    /// 生成新的标识
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// 从十六进制字符串解析
    pub fn parse(value: &str) -> AppResult<Self> {
        ObjectId::parse_str(value)
            .map(Self)
            .map_err(|_| AppError::validation("Cannot parse ID"))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for ExpenseId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

/// 存储返回的标识必须是 ObjectId
impl TryFrom<Bson> for ExpenseId {
    type Error = AppError;

    fn try_from(value: Bson) -> Result<Self, Self::Error> {
        match value {
            Bson::ObjectId(oid) => Ok(Self(oid)),
            other => Err(AppError::internal(format!(
                "Cannot convert to Object ID: unexpected {:?}",
                other.element_type()
            ))),
        }
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}
