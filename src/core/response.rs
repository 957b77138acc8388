//! 核心响应处理模块

use axum::{http::StatusCode, Json};

pub use catalog_model::ApiResponse;

/// 处理器返回类型：状态码 + JSON 信封
pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), super::error::CoreError>;

/// 200 + 数据
pub fn ok<T>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

/// 201 + 新建的数据
pub fn created<T>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

/// 200 + 仅消息
pub fn acknowledged(message: &str) -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::OK, Json(ApiResponse::acknowledged(message)))
}
