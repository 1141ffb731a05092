//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PHONE_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderCreate, OrderStatusUpdate, OrderSummary};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
}

/// Query params for order search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
}

fn default_limit() -> i32 {
    50
}

/// Validate the shipping fields of a create payload
fn validate_shipping(payload: &OrderCreate) -> AppResult<()> {
    validate_required_text(&payload.receiver_name, "receiver_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.receiver_phone, "receiver_phone", MAX_PHONE_LEN)?;
    validate_required_text(&payload.province, "province", MAX_NAME_LEN)?;
    validate_required_text(&payload.district, "district", MAX_NAME_LEN)?;
    validate_required_text(&payload.ward, "ward", MAX_NAME_LEN)?;
    validate_required_text(&payload.street_address, "street_address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;
    Ok(())
}

/// POST /api/orders - 下单
///
/// 单号生成、库存扣减、订单写入在同一个事务内完成。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    validate_shipping(&payload)?;

    let order = order::create(state.db.write(), payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - 获取订单列表 (分页)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    let orders = order::find_all(state.db.read(), query.limit, query.offset).await?;
    Ok(Json(orders))
}

/// GET /api/orders/search - 按单号或收货人电话搜索
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    if query.q.trim().is_empty() {
        return Err(AppError::validation("q must not be empty"));
    }

    let orders = order::search(state.db.read(), &query.q, query.limit, query.offset).await?;
    Ok(Json(orders))
}

/// GET /api/orders/user/:user_id - 获取用户的订单列表
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    let orders = order::find_by_user(state.db.read(), user_id).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 获取订单详情 (含明细和支付记录)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = order::get_detail(state.db.read(), &id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
        })?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/status - 推进订单状态
///
/// 推进到 DELIVERED 时在同一事务内登记货到付款的收款记录。
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = order::update_status(state.db.write(), &id, &payload.status).await?;
    Ok(Json(order))
}
