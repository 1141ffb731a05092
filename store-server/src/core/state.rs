use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 通过 axum 的 `State` 注入到各个 handler。Clone 成本极低:
/// [`DbService`] 内部只是连接池句柄。
///
/// # 使用示例
///
/// ```ignore
/// // 读查询走只读连接池
/// let orders = repository::order::find_all(state.db.read(), 50, 0).await?;
///
/// // 写操作走单连接的写池
/// let order = repository::order::create(state.db.write(), payload).await?;
/// ```
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 数据库服务 (读/写连接池)
    pub db: DbService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 打开数据库并执行迁移，数据库不可用时返回错误。
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;

        Ok(Self {
            config: config.clone(),
            db,
        })
    }
}
