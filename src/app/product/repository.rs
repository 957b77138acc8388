//! 商品仓储
//!
//! 商品集合的唯一事实来源。写入前执行必填字段校验，创建时分配 `id`
//! 与创建时间；列表按插入顺序返回。

use catalog_model::{NewProduct, Product, ProductPatch, ValidationError};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// 仓储错误类型
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("商品不存在: {0}")]
    NotFound(Uuid),
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("存储记录损坏: {0}")]
    Corrupt(String),
}

const COLUMNS: &str = "id, name, price, image, created_at";

#[derive(FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: f64,
    image: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| RepositoryError::Corrupt(format!("id {}: {}", row.id, e)))?;
        Ok(Product {
            id,
            name: row.name,
            price: row.price,
            image: row.image,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 校验候选并持久化，返回带有新分配 `id` 的完整记录
    pub async fn create(&self, candidate: &NewProduct) -> Result<Product, RepositoryError> {
        let valid = candidate.check()?;

        let row: ProductRow = sqlx::query_as(&format!(
            "INSERT INTO products (id, name, price, image, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&valid.name)
        .bind(valid.price)
        .bind(&valid.image)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// 按插入顺序返回全部商品
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM products ORDER BY seq"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM products WHERE id = ?"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.ok_or(RepositoryError::NotFound(id))?.try_into()
    }

    /// 只更新补丁中出现的字段；`id`、创建时间与顺序保持不变
    pub async fn update_by_id(
        &self,
        id: Uuid,
        patch: &ProductPatch,
    ) -> Result<Product, RepositoryError> {
        let patch = patch.check()?;

        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE products SET \
                 name = COALESCE(?, name), \
                 price = COALESCE(?, price), \
                 image = COALESCE(?, image) \
             WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(patch.name)
        .bind(patch.price)
        .bind(patch.image)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound(id))?.try_into()
    }

    /// 硬删除；对同一 `id` 的第二次删除总是返回 `NotFound`
    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }
}
