//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`tables`] - 桌号选择
//! - [`menu`] - 菜单浏览、菜品详情
//! - [`cart`] - 购物车
//! - [`orders`] - 下单、下单成功页
//! - [`kitchen`] - 后厨面板

pub mod cart;
pub mod health;
pub mod kitchen;
pub mod menu;
pub mod orders;
pub mod tables;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
