use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{dto::MessageResponse, extractors::AuthUser},
    error::ApiError,
    expenses::{
        dto::{AddExpenseRequest, ExpenseItem, SavingsResponse},
        repo::Expense,
    },
    extract::ValidJson,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/add_expense", post(add_expense))
        .route("/get_expenses", get(get_expenses))
        .route("/get_savings", get(get_savings))
}

#[instrument(skip(state, payload))]
pub async fn add_expense(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    ValidJson(payload): ValidJson<AddExpenseRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    payload.validate()?;

    Expense::insert(
        &state.db,
        &email,
        payload.category.trim(),
        payload.amount,
        &payload.date,
    )
    .await?;

    info!(owner = %email, category = %payload.category, amount = payload.amount, "expense recorded");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Expense added successfully")),
    ))
}

#[instrument(skip(state))]
pub async fn get_expenses(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<Vec<ExpenseItem>>, ApiError> {
    let items = Expense::list_by_owner(&state.db, &email)
        .await?
        .into_iter()
        .map(|e| ExpenseItem {
            category: e.category,
            amount: e.amount,
            date: e.expense_date,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_savings(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<SavingsResponse>, ApiError> {
    let spent = Expense::sum_for_owner(&state.db, &email).await?;
    let savings = state.config.savings_budget - spent;
    Ok(Json(SavingsResponse { savings }))
}
