//! 费用查询

/// 按 ID 查询费用
#[derive(Debug, Clone)]
pub struct GetExpenseQuery {
    pub id: String,
}

/// 查询全部费用（不分页、不排序、不过滤）
#[derive(Debug, Clone, Default)]
pub struct ListExpensesQuery;
