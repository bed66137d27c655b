//! Summary repository: statistics and the emergency fund view.
//!
//! Both views are derived aggregates over budget and transaction rows.
//! The emergency fund view additionally compares its figures against
//! the previous computation held in an injected TTL cache; the cache is
//! a display convenience and tolerates staleness.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use gasto_core::summary::{FigureDelta, SummaryService, Trend, TrendCache};

use crate::entities::{
    budgets, categories, transactions,
    sea_orm_active_enums::{BudgetStatus, TransactionKind, TransactionStatus},
};

/// Error types for summary operations.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Budgets of one category in one status.
#[derive(Debug, Clone)]
pub struct BudgetStatisticsRow {
    /// Category ID.
    pub category_id: Uuid,
    /// Category name.
    pub category_name: String,
    /// Budget status of the bucket.
    pub status: BudgetStatus,
    /// Number of budgets in the bucket.
    pub count: u64,
    /// Sum of `max_amount` over the bucket.
    pub total: Decimal,
    /// Currency-formatted total for display.
    pub formatted_total: String,
}

/// Emergency fund report with per-figure deltas.
#[derive(Debug, Clone)]
pub struct EmergencyFundReport {
    /// Total active budget with its delta.
    pub total_budget: FigureDelta,
    /// Suggested 10% reserve with its delta.
    pub reserve: FigureDelta,
    /// Completed expense total with its delta.
    pub total_expenses: FigureDelta,
    /// Direction reported by an earlier run, for display continuity.
    pub last_direction: Option<Trend>,
}

/// Stable sort key for grouping by status.
const fn status_key(status: &BudgetStatus) -> u8 {
    match status {
        BudgetStatus::Active => 0,
        BudgetStatus::Inactive => 1,
        BudgetStatus::Expired => 2,
    }
}

/// Summary repository.
#[derive(Clone)]
pub struct SummaryRepository {
    db: DatabaseConnection,
    trends: TrendCache,
}

impl SummaryRepository {
    /// Creates a new summary repository with an injected trend cache.
    #[must_use]
    pub const fn new(db: DatabaseConnection, trends: TrendCache) -> Self {
        Self { db, trends }
    }

    /// Budgets of a company grouped by category and status.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn statistics(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<BudgetStatisticsRow>, SummaryError> {
        let category_rows = categories::Entity::find()
            .filter(categories::Column::CompanyId.eq(company_id))
            .all(&self.db)
            .await?;

        if category_rows.is_empty() {
            return Ok(vec![]);
        }

        let category_ids: Vec<Uuid> = category_rows.iter().map(|c| c.id).collect();
        let category_names: BTreeMap<Uuid, String> = category_rows
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let budget_rows = budgets::Entity::find()
            .filter(budgets::Column::CategoryId.is_in(category_ids))
            .all(&self.db)
            .await?;

        let mut buckets: BTreeMap<(Uuid, u8), (BudgetStatus, u64, Decimal)> = BTreeMap::new();
        for budget in budget_rows {
            let key = (budget.category_id, status_key(&budget.status));
            let entry = buckets
                .entry(key)
                .or_insert((budget.status, 0, Decimal::ZERO));
            entry.1 += 1;
            entry.2 += budget.max_amount;
        }

        Ok(buckets
            .into_iter()
            .map(|((category_id, _), (status, count, total))| BudgetStatisticsRow {
                category_id,
                category_name: category_names
                    .get(&category_id)
                    .cloned()
                    .unwrap_or_default(),
                status,
                count,
                total,
                formatted_total: SummaryService::format_currency(total),
            })
            .collect())
    }

    /// Computes the emergency fund report for a company.
    ///
    /// Figures: total active budget, 10% suggested reserve, completed
    /// expense total. Each is compared against the previous run (1-hour
    /// cache); the winning direction of the budget total is kept for 3
    /// hours purely for display continuity.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn emergency_fund(
        &self,
        company_id: Uuid,
    ) -> Result<EmergencyFundReport, SummaryError> {
        let category_ids: Vec<Uuid> = categories::Entity::find()
            .filter(categories::Column::CompanyId.eq(company_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();

        let total_budget = if category_ids.is_empty() {
            Decimal::ZERO
        } else {
            budgets::Entity::find()
                .filter(budgets::Column::CategoryId.is_in(category_ids))
                .filter(budgets::Column::Status.eq(BudgetStatus::Active))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|b| b.max_amount)
                .sum()
        };

        let total_expenses: Decimal = transactions::Entity::find()
            .filter(transactions::Column::CompanyId.eq(company_id))
            .filter(transactions::Column::Kind.eq(TransactionKind::Expense))
            .filter(transactions::Column::Status.eq(TransactionStatus::Completed))
            .filter(transactions::Column::DeletedAt.is_null())
            .all(&self.db)
            .await?
            .into_iter()
            .map(|t| t.amount)
            .sum();

        let figures = SummaryService::emergency_fund(total_budget, total_expenses);
        let key = format!("emergency-fund:{company_id}");

        let previous = self.trends.previous_figures(&key);
        let last_direction = self.trends.last_direction(&key);

        let budget_delta =
            SummaryService::compare(figures.total_budget, previous.as_ref().map(|f| f.total_budget));
        let reserve_delta =
            SummaryService::compare(figures.reserve, previous.as_ref().map(|f| f.reserve));
        let expenses_delta = SummaryService::compare(
            figures.total_expenses,
            previous.as_ref().map(|f| f.total_expenses),
        );

        if matches!(budget_delta.trend, Trend::Increased | Trend::Decreased) {
            self.trends.store_direction(&key, budget_delta.trend);
        }
        self.trends.store_figures(&key, figures);

        Ok(EmergencyFundReport {
            total_budget: budget_delta,
            reserve: reserve_delta,
            total_expenses: expenses_delta,
            last_direction,
        })
    }
}
