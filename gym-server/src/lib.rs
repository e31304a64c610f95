//! Gym Server - 健身房会员生命周期服务
//!
//! # 架构概述
//!
//! - **会员生命周期** (`membership`): 到期计算、续费紧急度、表单校验、续费、提醒文案，纯函数无 I/O
//! - **数据库** (`db`): SQLite 会员仓储 (sqlx)
//! - **提醒** (`notify`): 短信 / WhatsApp 深度链接
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! gym-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── membership/    # 会员生命周期规则
//! ├── db/            # 数据库层
//! ├── notify/        # 提醒分发
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、时间、错误转换
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod membership;
pub mod notify;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};

/// 初始化日志 (控制台 + `<WORK_DIR>/logs`)
pub fn setup_logging(config: &Config) -> anyhow::Result<()> {
    let log_dir = config.log_dir();
    init_logger_with_file(
        &config.log_level,
        config.log_json,
        Some(log_dir.as_path()),
        config.log_retention_days,
    )
}
