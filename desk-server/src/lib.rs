//! Heron Desk Server - 酒店前台管理服务节点
//!
//! # 架构概述
//!
//! 本模块是 Desk Server 的主入口，提供以下核心功能：
//!
//! - **预订生命周期** (`bookings`): 签入/签出/取消状态机与结算引擎
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (WAL)
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! desk-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── bookings/      # 预订生命周期引擎
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod bookings;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use bookings::{BookingError, BookingLifecycle};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    __  __
   / / / /__  _________  ____
  / /_/ / _ \/ ___/ __ \/ __ \
 / __  /  __/ /  / /_/ / / / /
/_/ /_/\___/_/   \____/_/ /_/
    ____            __
   / __ \___  _____/ /__
  / / / / _ \/ ___/ //_/
 / /_/ /  __(__  ) ,<
/_____/\___/____/_/|_|
    "#
    );
}
