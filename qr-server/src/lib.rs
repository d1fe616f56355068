//! QR Order Server - 扫码点餐本机服务
//!
//! # 架构概述
//!
//! 每台点餐平板 / 后厨屏各运行一个进程，对前端提供 JSON HTTP 接口；
//! 本地状态 (购物车、桌号、后厨口令、今日合计) 保存在嵌入式 redb 中，
//! 订单数据读写托管后端 (REST + realtime)。
//!
//! - **购物车** (`cart`): 本机 item → 数量
//! - **菜单** (`catalog`): 后端菜单或内置菜单，分类 + 关键字
//! - **下单** (`orders`): 三步非事务提交
//! - **后厨** (`kitchen`): 按桌分组、状态流转、今日合计对账
//! - **实时** (`realtime`): 后端行变化 → 面板重新拉取
//! - **HTTP API** (`api`): 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! qr-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── store/         # 本地 KV 存储 (redb)
//! ├── cart/          # 购物车
//! ├── catalog/       # 菜单
//! ├── orders/        # 下单
//! ├── kitchen/       # 后厨面板
//! ├── realtime/      # 变更监听
//! ├── middleware/    # 请求日志、后厨门禁
//! ├── routes/        # 路由组装
//! ├── api/           # HTTP 处理器
//! └── utils/         # 日志、日期、校验
//! ```

pub mod api;
pub mod cart;
pub mod catalog;
pub mod core;
pub mod kitchen;
pub mod middleware;
pub mod orders;
pub mod realtime;
pub mod routes;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use cart::CartStore;
pub use catalog::Catalog;
pub use crate::core::{Config, Server, ServerState};
pub use kitchen::{KitchenBoard, KitchenConsole};
pub use routes::build_app;
pub use store::LocalStore;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorBody, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: `.env`、日志、工作目录
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 可选
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
    std::fs::create_dir_all(&work_dir)?;
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  ____  ____     ___          _
 / __ \|  _ \   / _ \ _ __ __| | ___ _ __
| |  | | |_) | | | | | '__/ _` |/ _ \ '__|
| |__| |  _ <  | |_| | | | (_| |  __/ |
 \___\_\_| \_\  \___/|_|  \__,_|\___|_|
    "#
    );
}
