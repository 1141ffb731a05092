//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`ApiResponse`] - 统一错误与响应类型 (from shared::error)
//! - [`money`] - 精确金额计算
//! - [`time`] - 时间与日期区间工具
//! - [`validation`] - 请求字段校验
//! - [`logger`] - 日志初始化

pub mod logger;
pub mod money;
pub mod time;
pub mod validation;

// Re-export the unified error types so handlers and repositories
// can use crate::utils::{AppError, AppResult} directly.
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Boxed error type for main and other top-level fallible paths
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
