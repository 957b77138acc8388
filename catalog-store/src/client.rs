//! 商品目录 HTTP 客户端

use catalog_model::{ApiResponse, NewProduct, Product, ProductPatch};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::config::StoreConfig;

#[derive(Debug, Error)]
pub enum ClientError {
    /// 服务端返回 400
    #[error("{0}")]
    Validation(String),
    /// 服务端返回 404
    #[error("{0}")]
    NotFound(String),
    /// 其他非成功响应
    #[error("server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    /// 连接失败、超时或读取响应体失败
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// 成功状态码但响应体不是预期的信封
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("invalid store config: {0}")]
    Config(String),
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(config: &StoreConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub async fn fetch_all(&self) -> Result<Vec<Product>, ClientError> {
        let request = self.http.get(self.products_url());
        require_data(self.execute(request).await?)
    }

    pub async fn create(&self, candidate: &NewProduct) -> Result<Product, ClientError> {
        let request = self.http.post(self.products_url()).json(candidate);
        require_data(self.execute(request).await?)
    }

    pub async fn update(&self, id: Uuid, patch: &ProductPatch) -> Result<Product, ClientError> {
        let request = self.http.put(self.product_url(id)).json(patch);
        require_data(self.execute(request).await?)
    }

    /// 成功时返回服务端给出的消息
    pub async fn delete(&self, id: Uuid) -> Result<Option<String>, ClientError> {
        let request = self.http.delete(self.product_url(id));
        let envelope: ApiResponse<serde_json::Value> = self.execute(request).await?;
        Ok(envelope.message)
    }

    fn products_url(&self) -> String {
        format!("{}/api/products", self.base_url)
    }

    fn product_url(&self, id: Uuid) -> String {
        format!("{}/api/products/{}", self.base_url, id)
    }

    /// 发送请求并把任何非成功结果归类为 `ClientError`
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope = serde_json::from_str::<ApiResponse<T>>(&body);
        match envelope {
            Ok(envelope) if status.is_success() && envelope.success => Ok(envelope),
            Ok(envelope) => {
                let message = envelope
                    .message
                    .unwrap_or_else(|| format!("Request failed with HTTP {}", status.as_u16()));
                Err(classify(status, message))
            }
            Err(e) if status.is_success() => Err(ClientError::InvalidResponse(format!(
                "{} (body={})",
                e,
                truncate_for_error(&body)
            ))),
            Err(_) => Err(classify(
                status,
                format!("Request failed with HTTP {}", status.as_u16()),
            )),
        }
    }
}

fn classify(status: StatusCode, message: String) -> ClientError {
    match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

fn require_data<T>(envelope: ApiResponse<T>) -> Result<T, ClientError> {
    envelope
        .data
        .ok_or_else(|| ClientError::InvalidResponse("response had no data".to_string()))
}

fn truncate_for_error(body: &str) -> String {
    const LIMIT: usize = 200;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let client = CatalogClient::new(&StoreConfig::new("http://localhost:5000/")).unwrap();
        assert_eq!(client.products_url(), "http://localhost:5000/api/products");

        let id = Uuid::nil();
        assert_eq!(
            client.product_url(id),
            "http://localhost:5000/api/products/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_classify_by_status() {
        assert!(matches!(
            classify(StatusCode::BAD_REQUEST, "x".into()),
            ClientError::Validation(_)
        ));
        assert!(matches!(
            classify(StatusCode::NOT_FOUND, "x".into()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            classify(StatusCode::BAD_GATEWAY, "x".into()),
            ClientError::Server { status: 502, .. }
        ));
    }

    #[test]
    fn test_zero_timeout_client_is_refused() {
        let config = StoreConfig::new("http://localhost:5000").with_timeout_seconds(0);
        assert!(matches!(
            CatalogClient::new(&config),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_long_prices_survive_decoding() {
        let body = r#"{"success":true,"data":[{"id":"00000000-0000-0000-0000-000000000000","name":"Odd","price":0.30000000000000004,"image":"odd.png","created_at":"2024-01-01T00:00:00Z"}]}"#;
        let envelope: ApiResponse<Vec<Product>> = serde_json::from_str(body).unwrap();
        let products = require_data(envelope).unwrap();

        assert_eq!(products[0].price, 0.1 + 0.2);
        assert_eq!(crate::query::filter(&products, "0.30000000000000004").len(), 1);
    }

    #[test]
    fn test_truncate_for_error() {
        let long = "a".repeat(300);
        assert_eq!(truncate_for_error(&long).len(), 203);
        assert_eq!(truncate_for_error("short"), "short");
    }
}
