//! # catalog-model
//!
//! 服务端与客户端共用的商品目录契约：
//! - `Product` 实体与创建/更新候选
//! - 必填字段校验规则（服务端写入前与客户端发请求前使用同一套规则）
//! - 统一的 `{success, data?, message?}` 响应信封

pub mod envelope;
pub mod product;

pub use envelope::ApiResponse;
pub use product::{NewProduct, Product, ProductPatch, ValidProduct, ValidationError};
