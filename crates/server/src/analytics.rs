//! Analytics API endpoints

use api_types::{
    ApiResponse,
    analytics::{AlertKind, AlertView, CategoryTotalView, MonthlySummaryView, SpendingAlertView},
};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

fn map_category_total(total: engine::CategoryTotal) -> CategoryTotalView {
    CategoryTotalView {
        category: total.category,
        total: total.total.to_major(),
    }
}

fn map_month(summary: engine::MonthlySummary) -> MonthlySummaryView {
    MonthlySummaryView {
        month: summary.month.to_string(),
        categories: summary
            .categories
            .into_iter()
            .map(map_category_total)
            .collect(),
        total: summary.total.to_major(),
    }
}

fn map_alert(alert: engine::Alert) -> AlertView {
    AlertView {
        kind: match alert.kind {
            engine::AlertKind::Warning => AlertKind::Warning,
            engine::AlertKind::Danger => AlertKind::Danger,
        },
        message: alert.message,
        current: alert.current.to_major(),
        limit: alert.limit.to_major(),
    }
}

pub async fn monthly(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<MonthlySummaryView>>>, ServerError> {
    let months = state
        .engine
        .monthly_summary()
        .await?
        .into_iter()
        .map(map_month)
        .collect();
    Ok(Json(ApiResponse::ok(months)))
}

pub async fn categories(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<CategoryTotalView>>>, ServerError> {
    let categories = state
        .engine
        .category_summary()
        .await?
        .into_iter()
        .map(map_category_total)
        .collect();
    Ok(Json(ApiResponse::ok(categories)))
}

/// Budget check for the current month, as seen from the configured timezone.
pub async fn spending_alert(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<SpendingAlertView>>, ServerError> {
    let alert = state.engine.spending_alert(state.today()).await?;

    Ok(Json(ApiResponse::ok(SpendingAlertView {
        monthly_total: alert.monthly_total.to_major(),
        monthly_limit: alert.monthly_limit.to_major(),
        alerts: alert.alerts.into_iter().map(map_alert).collect(),
    })))
}
