//! 客户端商品目录缓存
//!
//! `products` 是服务端集合的值拷贝，而不是实时引用：
//! - `fetch_all` 成功时整体替换（不合并）
//! - `create` 成功时只追加服务端返回的记录，不重新拉取；
//!   与服务端的完全一致要等到下一次 `fetch_all`
//! - `delete` / `update` 成功时按 `id` 删除或原位替换
//!
//! 任何失败都不会修改 `products`，并以 `StoreOutcome` 的形式返回给调用方。
//! 变更操作接收 `&mut self`，同一个实例上同一时刻最多只有一个请求在途。

use catalog_model::{NewProduct, Product, ProductPatch};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::{CatalogClient, ClientError};
use crate::config::StoreConfig;
use crate::query::{self, PriceRange, SortKey};

/// 失败类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    NotFound,
    NetworkOrServer,
}

/// 每个跨网络操作的结构化结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureKind>,
}

impl StoreOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }

    fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(kind),
        }
    }
}

impl From<ClientError> for StoreOutcome {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Validation(message) => Self::failed(FailureKind::Validation, message),
            ClientError::NotFound(message) => Self::failed(FailureKind::NotFound, message),
            ClientError::Server { message, .. } => {
                Self::failed(FailureKind::NetworkOrServer, message)
            }
            ClientError::Config(message) => Self::failed(FailureKind::NetworkOrServer, message),
            ClientError::Network(_) | ClientError::InvalidResponse(_) => Self::failed(
                FailureKind::NetworkOrServer,
                "Network error. Please try again.",
            ),
        }
    }
}

pub struct CatalogStore {
    client: CatalogClient,
    products: Vec<Product>,
    last_query: Option<String>,
}

impl CatalogStore {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            products: Vec::new(),
            last_query: None,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, ClientError> {
        Ok(Self::new(CatalogClient::new(config)?))
    }

    /// 当前的主集合（服务端最后一次确认的状态）
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// 拉取全部商品并整体替换本地副本
    pub async fn fetch_all(&mut self) -> StoreOutcome {
        match self.client.fetch_all().await {
            Ok(products) => {
                debug!("已加载 {} 个商品", products.len());
                let message = format!("Loaded {} products", products.len());
                self.products = products;
                StoreOutcome::ok(message)
            }
            Err(e) => {
                warn!("拉取商品失败: {}", e);
                e.into()
            }
        }
    }

    /// 本地预校验后创建；成功时追加服务端返回的记录
    pub async fn create(&mut self, candidate: &NewProduct) -> StoreOutcome {
        if let Err(e) = candidate.check() {
            return StoreOutcome::failed(FailureKind::Validation, e.to_string());
        }

        match self.client.create(candidate).await {
            Ok(product) => {
                debug!("商品已创建: {}", product.id);
                self.products.push(product);
                StoreOutcome::ok("Product created successfully!")
            }
            Err(e) => {
                warn!("创建商品失败: {}", e);
                e.into()
            }
        }
    }

    /// 本地预校验后更新；成功时原位替换对应记录
    pub async fn update(&mut self, id: Uuid, patch: &ProductPatch) -> StoreOutcome {
        if let Err(e) = patch.check() {
            return StoreOutcome::failed(FailureKind::Validation, e.to_string());
        }

        match self.client.update(id, patch).await {
            Ok(product) => {
                debug!("商品已更新: {}", product.id);
                // 本地没有这条记录时不插入，等下一次 fetch_all 对齐
                if let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) {
                    *slot = product;
                }
                StoreOutcome::ok("Product updated successfully")
            }
            Err(e) => {
                warn!("更新商品 {} 失败: {}", id, e);
                e.into()
            }
        }
    }

    /// 删除成功后从本地副本中移除
    pub async fn delete(&mut self, id: Uuid) -> StoreOutcome {
        match self.client.delete(id).await {
            Ok(message) => {
                debug!("商品已删除: {}", id);
                self.products.retain(|p| p.id != id);
                StoreOutcome::ok(message.unwrap_or_else(|| "Product deleted successfully".to_string()))
            }
            Err(e) => {
                warn!("删除商品 {} 失败: {}", id, e);
                e.into()
            }
        }
    }

    /// 记录搜索词并返回过滤后的视图（保持集合顺序）；空白搜索词清除过滤
    pub fn search(&mut self, term: &str) -> Vec<&Product> {
        let term = term.trim();
        self.last_query = (!term.is_empty()).then(|| term.to_string());
        self.view(SortKey::Newest)
    }

    /// 以当前搜索词过滤后再排序的视图，每次从主集合重新计算
    pub fn view(&self, sort: SortKey) -> Vec<&Product> {
        query::derive_view(&self.products, self.last_query().unwrap_or(""), sort)
    }

    /// 当前过滤视图的价格区间，视图为空时返回 `None`
    pub fn price_range(&self) -> Option<PriceRange> {
        query::price_range(&self.view(SortKey::Newest))
    }
}
