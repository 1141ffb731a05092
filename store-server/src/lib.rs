//! Bookstore Order Server - 书店订单服务
//!
//! # 架构概述
//!
//! 本模块是订单服务的主入口，提供以下核心功能：
//!
//! - **订单生命周期** (`db/repository/order`): 下单、状态机推进、查询
//! - **库存扣减** (`db/repository/book`): 下单事务内的原子扣减
//! - **货到付款** (`db/repository/payment`): 送达时登记收款
//! - **销售统计** (`db/repository/stats`): 营收与订单量聚合
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! store-server/src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (连接池 + repository)
//! ├── routes.rs      # 路由组装和中间件
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use db::DbService;
pub use routes::{build_app, build_router};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ___    __________
   /   |  / ____/ __ )
  / /| | / /_  / __  |
 / ___ |/ __/ / /_/ /
/_/  |_/_/   /_____/
   Bookstore Order Server
    "#
    );
}
