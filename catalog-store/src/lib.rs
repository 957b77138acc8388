//! # catalog-store
//!
//! 客户端商品目录缓存。`CatalogStore` 持有从服务端拉取的商品集合副本，
//! 只在服务端确认成功后才修改它；展示层通过 `search` / `view` 读取
//! 过滤和排序后的派生视图，派生视图从不写回主集合。

pub mod client;
pub mod config;
pub mod query;
pub mod store;

pub use client::{CatalogClient, ClientError};
pub use config::StoreConfig;
pub use query::{PriceRange, SortKey};
pub use store::{CatalogStore, FailureKind, StoreOutcome};
