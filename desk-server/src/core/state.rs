//! Server State
//!
//! 持有所有服务的共享引用，使用 Clone 浅拷贝传递。

use sqlx::SqlitePool;

use crate::bookings::BookingLifecycle;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// 服务器状态 - 持有配置、数据库和生命周期引擎
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | lifecycle | BookingLifecycle | 预订生命周期引擎 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub lifecycle: BookingLifecycle,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 1. 确保工作目录存在
    /// 2. 打开数据库 (work_dir/database/desk.db) 并执行迁移
    /// 3. 构造生命周期引擎
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_dir = format!("{}/database", config.work_dir);
        std::fs::create_dir_all(&db_dir)
            .map_err(|e| AppError::internal(format!("Failed to create {}: {}", db_dir, e)))?;

        let db = DbService::new(&format!("{}/desk.db", db_dir)).await?;
        let lifecycle = BookingLifecycle::new(db.pool.clone());

        Ok(Self {
            config: config.clone(),
            db,
            lifecycle,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
