//! 数据库基础设施

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    /// 按配置连接数据库文件（不存在时创建）并建表
    pub async fn new(config: &DatabaseConfig) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect_with(options)
            .await?;

        let manager = Self { pool };
        manager.create_tables().await?;
        info!("数据库已连接: {}", config.url);
        Ok(manager)
    }

    /// 内存数据库，仅用于测试。
    /// 只保留一个永不过期的连接，否则每个新连接都会看到一个空库。
    pub async fn in_memory() -> Result<Self, Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let manager = Self { pool };
        manager.create_tables().await?;
        Ok(manager)
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create_tables(&self) -> Result<(), Error> {
        // seq 使用 AUTOINCREMENT，删除后的序号不会被复用
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                seq        INTEGER PRIMARY KEY AUTOINCREMENT,
                id         TEXT NOT NULL UNIQUE,
                name       TEXT NOT NULL CHECK (length(name) > 0),
                price      REAL NOT NULL CHECK (price > 0),
                image      TEXT NOT NULL CHECK (length(image) > 0),
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
