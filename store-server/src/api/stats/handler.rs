//! Stats API Handlers
//!
//! 营收以 payment 表为准 (送达时登记收款)，订单量以 orders 表为准。
//! 所有窗口按服务器本地时区计算，与订单号中的日期段一致。

use std::collections::HashMap;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::stats;
use crate::utils::AppResult;
use crate::utils::time;

// ============================================================================
// Response Types
// ============================================================================

/// Sales overview: current vs. previous period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOverview {
    pub revenue_this_month: f64,
    pub revenue_last_month: f64,
    pub orders_today: i64,
    pub orders_yesterday: i64,
}

/// Revenue for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRevenuePoint {
    /// Month key, e.g. `2025-08`
    pub month: String,
    pub total: f64,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/stats/overview - 销售概览
pub async fn overview(State(state): State<ServerState>) -> AppResult<Json<SalesOverview>> {
    let pool = state.db.read();

    let today = time::today();
    let yesterday = today.pred_opt().unwrap_or(today);

    let today_start = time::day_start_millis(today);
    let today_end = time::day_end_millis(today);
    let this_month_start = time::month_start_millis(today);
    let last_month_start = time::month_start_millis(time::shift_months_back(today, 1));

    let revenue_this_month = stats::revenue_between(pool, this_month_start, today_end).await?;
    let revenue_last_month =
        stats::revenue_between(pool, last_month_start, this_month_start).await?;
    let orders_today = stats::orders_between(pool, today_start, today_end).await?;
    let orders_yesterday =
        stats::orders_between(pool, time::day_start_millis(yesterday), today_start).await?;

    Ok(Json(SalesOverview {
        revenue_this_month,
        revenue_last_month,
        orders_today,
        orders_yesterday,
    }))
}

/// GET /api/stats/monthly - 最近 12 个月的营收 (从旧到新，缺月补 0)
pub async fn monthly(State(state): State<ServerState>) -> AppResult<Json<Vec<MonthlyRevenuePoint>>> {
    let today = time::today();
    let window_start = time::month_start_millis(time::shift_months_back(today, 11));

    let rows = stats::monthly_revenue(state.db.read(), window_start).await?;
    let by_month: HashMap<String, f64> = rows.into_iter().collect();

    let mut points = Vec::with_capacity(12);
    for back in (0..12u32).rev() {
        let month = time::month_key(time::shift_months_back(today, back));
        let total = by_month.get(&month).copied().unwrap_or(0.0);
        points.push(MonthlyRevenuePoint { month, total });
    }

    Ok(Json(points))
}
