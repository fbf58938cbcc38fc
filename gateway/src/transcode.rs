//! REST → gRPC 转码
//!
//! JSON 字段名与 proto 消息字段一致，缺省字段按空值处理。
//! 请求体须带 `Content-Type: application/json`，否则返回 400。

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GatewayError;
use crate::grpc::GrpcClients;
use crate::grpc::expense as pb;

pub fn expense_routes() -> Router<GrpcClients> {
    Router::new()
        .route("/v1/expense", get(get_all_expense).post(create_expense))
        .route(
            "/v1/expense/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseBody {
    pub title: String,
    pub description: String,
    pub amount: i32,
    pub price: i32,
    pub date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExpenseRequestBody {
    pub expense: Option<ExpenseBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseResponseBody {
    pub id: String,
    pub expense: ExpenseBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteExpenseResponseBody {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseWithIdBody {
    pub id: String,
    pub title: String,
    pub description: String,
    pub amount: i32,
    pub price: i32,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseListBody {
    pub expense: Vec<ExpenseWithIdBody>,
}

impl From<ExpenseBody> for pb::Expense {
    fn from(body: ExpenseBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            amount: body.amount,
            price: body.price,
            date: body.date,
        }
    }
}

impl From<pb::Expense> for ExpenseBody {
    fn from(expense: pb::Expense) -> Self {
        Self {
            title: expense.title,
            description: expense.description,
            amount: expense.amount,
            price: expense.price,
            date: expense.date,
        }
    }
}

impl From<pb::ExpenseWithId> for ExpenseWithIdBody {
    fn from(expense: pb::ExpenseWithId) -> Self {
        Self {
            id: expense.id,
            title: expense.title,
            description: expense.description,
            amount: expense.amount,
            price: expense.price,
            date: expense.date,
        }
    }
}

fn response_body(id: String, expense: Option<pb::Expense>) -> ExpenseResponseBody {
    ExpenseResponseBody {
        id,
        expense: expense.map(Into::into).unwrap_or_default(),
    }
}

async fn create_expense(
    State(clients): State<GrpcClients>,
    body: Result<Json<ExpenseRequestBody>, JsonRejection>,
) -> Result<Json<ExpenseResponseBody>, GatewayError> {
    let Json(body) = body?;
    debug!("Transcoding CreateExpense");

    let mut client = clients.expense;
    let response = client
        .create_expense(pb::CreateExpenseRequest {
            expense: body.expense.map(Into::into),
        })
        .await?
        .into_inner();

    Ok(Json(response_body(response.id, response.expense)))
}

async fn get_expense(
    State(clients): State<GrpcClients>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseResponseBody>, GatewayError> {
    debug!(%id, "Transcoding GetExpense");

    let mut client = clients.expense;
    let response = client
        .get_expense(pb::GetExpenseRequest { id })
        .await?
        .into_inner();

    Ok(Json(response_body(response.id, response.expense)))
}

async fn update_expense(
    State(clients): State<GrpcClients>,
    Path(id): Path<String>,
    body: Result<Json<ExpenseRequestBody>, JsonRejection>,
) -> Result<Json<ExpenseResponseBody>, GatewayError> {
    let Json(body) = body?;
    debug!(%id, "Transcoding UpdateExpense");

    let mut client = clients.expense;
    let response = client
        .update_expense(pb::UpdateExpenseRequest {
            id,
            expense: body.expense.map(Into::into),
        })
        .await?
        .into_inner();

    Ok(Json(response_body(response.id, response.expense)))
}

async fn delete_expense(
    State(clients): State<GrpcClients>,
    Path(id): Path<String>,
) -> Result<Json<DeleteExpenseResponseBody>, GatewayError> {
    debug!(%id, "Transcoding DeleteExpense");

    let mut client = clients.expense;
    let response = client
        .delete_expense(pb::DeleteExpenseRequest { id })
        .await?
        .into_inner();

    Ok(Json(DeleteExpenseResponseBody { id: response.id }))
}

async fn get_all_expense(
    State(clients): State<GrpcClients>,
) -> Result<Json<ExpenseListBody>, GatewayError> {
    debug!("Transcoding GetAllExpense");

    let mut client = clients.expense;
    let response = client
        .get_all_expense(pb::GetAllExpenseRequest {})
        .await?
        .into_inner();

    Ok(Json(ExpenseListBody {
        expense: response.expense.into_iter().map(Into::into).collect(),
    }))
}
