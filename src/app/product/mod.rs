//! 商品资源：仓储、业务服务与 HTTP 处理器

pub mod handler;
pub mod repository;
pub mod service;
