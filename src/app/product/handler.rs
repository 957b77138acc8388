//! 商品 HTTP 处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use catalog_model::{NewProduct, Product, ProductPatch};
use uuid::Uuid;

use crate::app::AppState;
use crate::core::error::CoreError;
use crate::core::response::{acknowledged, created, ok, ApiResult};

/// 非 UUID 的 id 不可能对应任何记录，按 404 处理
fn parse_id(raw: &str) -> Result<Uuid, CoreError> {
    Uuid::parse_str(raw).map_err(|_| CoreError::NotFound("Product not found".to_string()))
}

pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = state.product_service.list_products().await?;
    Ok(ok(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Product> {
    let product = state.product_service.get_product(parse_id(&id)?).await?;
    Ok(ok(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(candidate) = payload?;
    let product = state.product_service.create_product(&candidate).await?;
    Ok(created(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<Product> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let product = state.product_service.update_product(id, &patch).await?;
    Ok(ok(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.product_service.delete_product(parse_id(&id)?).await?;
    Ok(acknowledged("Product deleted successfully"))
}
