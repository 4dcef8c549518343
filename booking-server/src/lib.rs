//! LuxStay Booking Server - 度假房源预订平台服务端
//!
//! # 架构概述
//!
//! 单进程 HTTP 服务，包含以下核心功能：
//!
//! - **预订** (`bookings`): 日期冲突检测 + 按房源互斥的预订创建
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储预订记录
//! - **搜索** (`search`): Meilisearch 房源索引与多字段查询
//! - **媒体** (`media`): 房源图片存储与限时签名链接
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── bookings/      # 预订领域逻辑
//! ├── db/            # 数据库层
//! ├── search/        # 搜索索引层
//! ├── media/         # 媒体存储与签名链接
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod bookings;
pub mod core;
pub mod db;
pub mod media;
pub mod search;
pub mod utils;

// Re-export 公共类型
pub use bookings::BookingService;
pub use crate::core::{Config, Server, ServerState};
pub use db::DbService;
pub use media::MediaService;
pub use search::SearchService;
pub use utils::{AppError, AppResult};

/// 设置运行环境 (日志；生产环境写入滚动日志文件)
pub fn setup_environment(config: &Config) {
    // 目录缺失在 ServerState::initialize 中才是硬错误
    let _ = config.ensure_work_dir_structure();

    if config.is_production() {
        let logs_dir = config.logs_dir();
        utils::logger::init_logger_with_file(logs_dir.to_str());
    } else {
        utils::logger::init_logger();
    }
}

pub fn print_banner() {
    println!(
        r#"
    __                _____ __
   / /   __  ___  __ / ___// /_____ ___  __
  / /   / / / / |/_/ \__ \/ __/ __ `/ / / /
 / /___/ /_/ />  <  ___/ / /_/ /_/ / /_/ /
/_____/\__,_/_/|_| /____/\__/\__,_/\__, /
                                  /____/
    "#
    );
}
