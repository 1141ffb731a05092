//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查接口
//! - [`orders`] - 订单管理接口
//! - [`stats`] - 销售统计接口

pub mod health;
pub mod orders;
pub mod stats;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
