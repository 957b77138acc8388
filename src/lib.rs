//! # 商品目录服务
//!
//! 提供商品目录的服务端实现：
//! - 基于 SQLite 的商品仓储（必填字段校验、身份分配、创建顺序）
//! - 将 CRUD 请求翻译为仓储操作的 REST API
//! - 配置加载与日志初始化

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{router, AppState};
pub use config::{Config, ConfigError};
