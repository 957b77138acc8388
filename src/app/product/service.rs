//! 商品业务服务

use catalog_model::{NewProduct, Product, ProductPatch};
use tracing::{info, warn};
use uuid::Uuid;

use super::repository::{ProductRepository, RepositoryError};
use crate::core::error::CoreError;

/// 将仓储结果映射为 API 错误，并记录每一次状态变更
#[derive(Clone)]
pub struct ProductService {
    repository: ProductRepository,
}

impl ProductService {
    pub fn new(repository: ProductRepository) -> Self {
        Self { repository }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.repository.list().await?)
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, CoreError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn create_product(&self, candidate: &NewProduct) -> Result<Product, CoreError> {
        match self.repository.create(candidate).await {
            Ok(product) => {
                info!("商品已创建: {} ({})", product.id, product.name);
                Ok(product)
            }
            Err(RepositoryError::Validation(e)) => {
                warn!("拒绝创建商品: {}", e);
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update_product(&self, id: Uuid, patch: &ProductPatch) -> Result<Product, CoreError> {
        let product = self.repository.update_by_id(id, patch).await?;
        info!("商品已更新: {}", product.id);
        Ok(product)
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), CoreError> {
        self.repository.delete_by_id(id).await?;
        info!("商品已删除: {}", id);
        Ok(())
    }
}
