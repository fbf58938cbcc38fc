//! 费用命令

use crate::domain::ExpenseDetails;

/// 创建费用
#[derive(Debug, Clone)]
pub struct CreateExpenseCommand {
    pub details: ExpenseDetails,
}

/// 更新费用（整体覆盖所有字段）
#[derive(Debug, Clone)]
pub struct UpdateExpenseCommand {
    /// 调用方提供的原始 ID，由 handler 解析
    pub id: String,
    pub details: ExpenseDetails,
}

/// 删除费用
#[derive(Debug, Clone)]
pub struct DeleteExpenseCommand {
    pub id: String,
}
