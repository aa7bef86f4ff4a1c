//! Expenses API endpoints

use api_types::{
    ApiResponse,
    expense::{AmountInput, ExpenseNew, ExpenseView},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use chrono::Utc;
use engine::{Money, NewExpense};

use crate::{ServerError, server::ServerState};

pub(crate) fn map_expense(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        amount: expense.amount.to_major(),
        category: expense.category,
        date: expense.date,
        description: expense.description,
        created_at: expense.created_at,
    }
}

fn parse_amount(amount: AmountInput) -> Result<Money, ServerError> {
    match amount {
        AmountInput::Number(value) => Money::from_major(value)
            .ok_or_else(|| ServerError::Generic("invalid amount".to_string())),
        AmountInput::Text(text) => Ok(text.parse::<Money>()?),
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<ExpenseView>>>, ServerError> {
    let expenses = state
        .engine
        .list_expenses()
        .await?
        .into_iter()
        .map(map_expense)
        .collect();

    Ok(Json(ApiResponse::ok(expenses)))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseView>>), ServerError> {
    let Json(payload) = payload.map_err(|rejection| ServerError::Generic(rejection.body_text()))?;

    let category = payload.category.filter(|c| !c.trim().is_empty());
    let (Some(amount), Some(category)) = (payload.amount, category) else {
        return Err(ServerError::Generic(
            "Amount and category are required".to_string(),
        ));
    };

    let amount = parse_amount(amount)?;
    let date = payload.date.unwrap_or_else(|| state.today());
    let expense = state
        .engine
        .create_expense(
            NewExpense::new(amount, category, date, payload.description),
            Utc::now(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(map_expense(expense)))))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ServerError> {
    let Path(id) = id.map_err(|_| ServerError::NotFound("expense not found".to_string()))?;

    state.engine.delete_expense(id).await?;
    Ok(Json(ApiResponse::message("Expense deleted successfully")))
}
