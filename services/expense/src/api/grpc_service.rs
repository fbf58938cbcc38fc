//! gRPC service implementation

use std::sync::Arc;
use std::time::Instant;

use expense_bootstrap::record_grpc_request;
use expense_errors::AppResult;
use tonic::{Request, Response, Status};

use crate::application::ServiceHandler;
use crate::application::commands::*;
use crate::application::queries::*;
use crate::proto::expense_service_server::ExpenseService;
use crate::proto::*;

const SERVICE_NAME: &str = "expense.v1.ExpenseService";

pub struct ExpenseServiceImpl {
    handler: Arc<ServiceHandler>,
}

impl ExpenseServiceImpl {
    pub fn new(handler: Arc<ServiceHandler>) -> Self {
        Self { handler }
    }
}

#[tonic::async_trait]
impl ExpenseService for ExpenseServiceImpl {
    async fn create_expense(
        &self,
        request: Request<CreateExpenseRequest>,
    ) -> Result<Response<CreateExpenseResponse>, Status> {
        let started = Instant::now();
        let req = request.into_inner();

        let cmd = CreateExpenseCommand {
            details: req.expense.map(Into::into).unwrap_or_default(),
        };

        let result = self.handler.create_expense(cmd).await;
        observe("CreateExpense", started, &result);
        let expense = result?;

        Ok(Response::new(CreateExpenseResponse {
            id: expense.id().to_string(),
            expense: Some(expense.details().into()),
        }))
    }

    async fn get_expense(
        &self,
        request: Request<GetExpenseRequest>,
    ) -> Result<Response<GetExpenseResponse>, Status> {
        let started = Instant::now();
        let req = request.into_inner();

        let result = self.handler.get_expense(GetExpenseQuery { id: req.id }).await;
        observe("GetExpense", started, &result);
        let expense = result?;

        Ok(Response::new(GetExpenseResponse {
            id: expense.id().to_string(),
            expense: Some(expense.details().into()),
        }))
    }

    async fn update_expense(
        &self,
        request: Request<UpdateExpenseRequest>,
    ) -> Result<Response<UpdateExpenseResponse>, Status> {
        let started = Instant::now();
        let req = request.into_inner();

        // 缺省的 expense 视为全部字段为空值，仍然整体覆盖
        let cmd = UpdateExpenseCommand {
            id: req.id,
            details: req.expense.map(Into::into).unwrap_or_default(),
        };

        let result = self.handler.update_expense(cmd).await;
        observe("UpdateExpense", started, &result);
        let expense = result?;

        Ok(Response::new(UpdateExpenseResponse {
            id: expense.id().to_string(),
            expense: Some(expense.details().into()),
        }))
    }

    async fn delete_expense(
        &self,
        request: Request<DeleteExpenseRequest>,
    ) -> Result<Response<DeleteExpenseResponse>, Status> {
        let started = Instant::now();
        let req = request.into_inner();

        let result = self
            .handler
            .delete_expense(DeleteExpenseCommand { id: req.id })
            .await;
        observe("DeleteExpense", started, &result);

        Ok(Response::new(DeleteExpenseResponse { id: result? }))
    }

    async fn get_all_expense(
        &self,
        _request: Request<GetAllExpenseRequest>,
    ) -> Result<Response<GetAllExpenseResponse>, Status> {
        let started = Instant::now();

        let result = self.handler.list_expenses(ListExpensesQuery).await;
        observe("GetAllExpense", started, &result);
        let expenses = result?;

        Ok(Response::new(GetAllExpenseResponse {
            expense: expenses.iter().map(ExpenseWithId::from).collect(),
        }))
    }
}

fn observe<T>(method: &str, started: Instant, result: &AppResult<T>) {
    let status = match result {
        Ok(_) => "Ok".to_string(),
        Err(e) => format!("{:?}", e.grpc_code()),
    };
    record_grpc_request(
        SERVICE_NAME,
        method,
        &status,
        started.elapsed().as_secs_f64() * 1000.0,
    );
}
