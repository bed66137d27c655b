//! Budget routes: CRUD, availability, statistics, emergency fund.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::routes::{app_error_response, error_response, internal_error};
use gasto_core::policy::{self, Action};
use gasto_db::entities::sea_orm_active_enums::BudgetStatus;
use gasto_db::repositories::budget::{
    BudgetError, BudgetFilter, BudgetRepository, CreateBudgetInput, UpdateBudgetInput,
};
use gasto_db::{SummaryRepository, repositories::summary::SummaryError};
use gasto_shared::AppError;

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets/all", get(list_budgets))
        .route("/budgets/available", get(get_available_budget))
        .route("/budgets/statistics", get(get_statistics))
        .route("/budgets/emergency-fund", get(get_emergency_fund))
        .route("/budgets/category/{category_id}", get(get_by_category))
        .route("/budgets/create", post(create_budget))
        .route("/budgets/{id}", get(get_budget))
        .route("/budgets/{id}", put(update_budget))
        .route("/budgets/{id}", delete(delete_budget))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a budget.
#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    /// Category the ceiling applies to.
    pub category_id: Uuid,
    /// Allocated ceiling.
    pub max_amount: Decimal,
    /// Period start.
    pub start_date: chrono::NaiveDate,
    /// Period end.
    pub end_date: chrono::NaiveDate,
    /// Initial status: active, inactive, expired.
    pub status: Option<String>,
}

/// Request body for updating a budget.
#[derive(Debug, Deserialize)]
pub struct UpdateBudgetRequest {
    /// New category.
    pub category_id: Option<Uuid>,
    /// New ceiling.
    pub max_amount: Option<Decimal>,
    /// New period start.
    pub start_date: Option<chrono::NaiveDate>,
    /// New period end.
    pub end_date: Option<chrono::NaiveDate>,
    /// New status.
    pub status: Option<String>,
}

/// Query parameters for listing budgets.
#[derive(Debug, Deserialize)]
pub struct ListBudgetsQuery {
    /// Filter by creating user.
    pub user_id: Option<Uuid>,
    /// Filter by category.
    pub category_id: Option<Uuid>,
    /// Filter by status.
    pub status: Option<String>,
}

/// Query parameters for the availability endpoint.
#[derive(Debug, Deserialize)]
pub struct AvailableBudgetQuery {
    /// The category to compute availability for.
    pub category_id: Uuid,
    /// Optionally narrow to a department.
    pub department_id: Option<Uuid>,
}

fn parse_budget_status(s: &str) -> Option<BudgetStatus> {
    match s.to_lowercase().as_str() {
        "active" => Some(BudgetStatus::Active),
        "inactive" => Some(BudgetStatus::Inactive),
        "expired" => Some(BudgetStatus::Expired),
        _ => None,
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/budgets/all` - List budgets with optional filters.
async fn list_budgets(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListBudgetsQuery>,
) -> impl IntoResponse {
    let status = match query.status.as_deref() {
        Some(raw) => match parse_budget_status(raw) {
            Some(status) => Some(status),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_status",
                    "Status must be one of: active, inactive, expired",
                );
            }
        },
        None => None,
    };

    let repo = BudgetRepository::new((*state.db).clone());
    let filter = BudgetFilter {
        user_id: query.user_id,
        category_id: query.category_id,
        status,
    };

    match repo.list_budgets(filter).await {
        Ok(budgets) => (StatusCode::OK, Json(json!({ "budgets": budgets }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list budgets");
            internal_error()
        }
    }
}

/// GET `/budgets/available?category_id=&department_id=` - Availability.
///
/// Returns both the raw (possibly negative) figure and the floored
/// display figure for each scope.
async fn get_available_budget(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<AvailableBudgetQuery>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    let category = match repo.available_for_category(query.category_id).await {
        Ok(result) => result,
        Err(e) => return map_budget_error(e),
    };

    let mut body = json!({
        "category_id": category.category_id,
        "total_budget": category.availability.allocated,
        "total_approved": category.availability.approved,
        "available_budget": category.availability.raw(),
        "display_available": category.availability.display(),
    });

    if let Some(department_id) = query.department_id {
        let department = match repo.available_for_department(department_id).await {
            Ok(result) => result,
            Err(e) => return map_budget_error(e),
        };

        body["department"] = json!({
            "id": department.department_id,
            "name": department.department_name,
            "budget": department.availability.allocated,
            "approved": department.availability.approved,
            "available": department.availability.raw(),
            "display_available": department.availability.display(),
        });
    }

    (StatusCode::OK, Json(body)).into_response()
}

/// GET `/budgets/statistics` - Budgets grouped by category and status.
async fn get_statistics(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::ViewStatistics) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can view statistics",
        );
    }

    let repo = SummaryRepository::new((*state.db).clone(), state.trends.clone());

    match repo.statistics(auth.company_id()).await {
        Ok(rows) => {
            let body: Vec<serde_json::Value> = rows
                .into_iter()
                .map(|r| {
                    json!({
                        "category_id": r.category_id,
                        "category_name": r.category_name,
                        "status": r.status,
                        "count": r.count,
                        "total": r.total,
                        "formatted_total": r.formatted_total,
                    })
                })
                .collect();

            (StatusCode::OK, Json(json!({ "statistics": body }))).into_response()
        }
        Err(SummaryError::Database(e)) => {
            error!(error = %e, "Failed to compute statistics");
            internal_error()
        }
    }
}

/// GET `/budgets/emergency-fund` - Suggested reserve with trend deltas.
async fn get_emergency_fund(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::ViewEmergencyFund) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can view the emergency fund",
        );
    }

    let repo = SummaryRepository::new((*state.db).clone(), state.trends.clone());

    match repo.emergency_fund(auth.company_id()).await {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "total_budget": report.total_budget,
                "emergency_fund": report.reserve,
                "total_expenses": report.total_expenses,
                "last_direction": report.last_direction,
            })),
        )
            .into_response(),
        Err(SummaryError::Database(e)) => {
            error!(error = %e, "Failed to compute emergency fund");
            internal_error()
        }
    }
}

/// GET `/budgets/category/{category_id}` - Budgets of a category.
async fn get_by_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(category_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());
    let filter = BudgetFilter {
        category_id: Some(category_id),
        ..Default::default()
    };

    match repo.list_budgets(filter).await {
        Ok(budgets) => (StatusCode::OK, Json(json!({ "budgets": budgets }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list budgets by category");
            internal_error()
        }
    }
}

/// GET `/budgets/{id}` - Get a single budget.
async fn get_budget(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    match repo.get_budget(id).await {
        Ok(budget) => (StatusCode::OK, Json(json!({ "budget": budget }))).into_response(),
        Err(e) => map_budget_error(e),
    }
}

/// POST `/budgets/create` - Create a budget (admin only).
async fn create_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBudgetRequest>,
) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::CreateBudget) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can create budgets",
        );
    }

    let status = match payload.status.as_deref() {
        Some(raw) => match parse_budget_status(raw) {
            Some(status) => Some(status),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_status",
                    "Status must be one of: active, inactive, expired",
                );
            }
        },
        None => None,
    };

    let repo = BudgetRepository::new((*state.db).clone());
    let input = CreateBudgetInput {
        category_id: payload.category_id,
        user_id: auth.user_id(),
        max_amount: payload.max_amount,
        start_date: payload.start_date,
        end_date: payload.end_date,
        status,
    };

    match repo.create_budget(input).await {
        Ok(budget) => {
            info!(budget_id = %budget.id, category_id = %budget.category_id, "Budget created");
            (StatusCode::CREATED, Json(json!({ "budget": budget }))).into_response()
        }
        Err(e) => map_budget_error(e),
    }
}

/// PUT `/budgets/{id}` - Update a budget (admin only).
async fn update_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBudgetRequest>,
) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::UpdateBudget) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can update budgets",
        );
    }

    let status = match payload.status.as_deref() {
        Some(raw) => match parse_budget_status(raw) {
            Some(status) => Some(status),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_status",
                    "Status must be one of: active, inactive, expired",
                );
            }
        },
        None => None,
    };

    let repo = BudgetRepository::new((*state.db).clone());
    let input = UpdateBudgetInput {
        category_id: payload.category_id,
        max_amount: payload.max_amount,
        start_date: payload.start_date,
        end_date: payload.end_date,
        status,
    };

    match repo.update_budget(id, input).await {
        Ok(budget) => {
            info!(budget_id = %budget.id, "Budget updated");
            (StatusCode::OK, Json(json!({ "budget": budget }))).into_response()
        }
        Err(e) => map_budget_error(e),
    }
}

/// DELETE `/budgets/{id}` - Delete a budget (admin only).
async fn delete_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if !policy::can(&auth.actor(), Action::DeleteBudget) {
        return error_response(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Only administrators can delete budgets",
        );
    }

    let repo = BudgetRepository::new((*state.db).clone());

    match repo.delete_budget(id).await {
        Ok(()) => {
            info!(budget_id = %id, "Budget deleted");
            (
                StatusCode::OK,
                Json(json!({ "message": "Budget deleted successfully" })),
            )
                .into_response()
        }
        Err(e) => map_budget_error(e),
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps budget errors to HTTP responses via the shared taxonomy.
fn map_budget_error(e: BudgetError) -> axum::response::Response {
    app_error_response(&AppError::from(e))
}
