//! 商品实体与字段校验

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// 已持久化的商品记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 由仓储在创建时分配，之后不可变
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    /// 展示图片的 URL 或路径
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// 字段校验失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}: {}", .fields.join(", "))]
pub struct ValidationError {
    message: &'static str,
    fields: Vec<String>,
}

impl ValidationError {
    fn missing(fields: Vec<String>) -> Self {
        Self {
            message: "Please provide all required fields",
            fields,
        }
    }

    fn invalid(fields: Vec<String>) -> Self {
        Self {
            message: "Invalid product fields",
            fields,
        }
    }

    /// 未通过校验的字段名，按字母序排列
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// 创建候选（不含 `id`）
///
/// 所有字段都允许缺省，以便缺字段的请求体也能被解析并得到明确的校验错误，
/// 而不是反序列化失败。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, range(exclusive_min = 0.0))]
    pub price: Option<f64>,
    #[validate(required, length(min = 1))]
    pub image: Option<String>,
}

/// 通过校验的创建候选，字段均已去除首尾空白
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProduct {
    pub name: String,
    pub price: f64,
    pub image: String,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            image: Some(image.into()),
        }
    }

    /// 校验必填字段并返回规范化后的候选
    pub fn check(&self) -> Result<ValidProduct, ValidationError> {
        let trimmed = Self {
            name: trim(&self.name),
            price: self.price,
            image: trim(&self.image),
        };

        let mut fields = failed_fields(trimmed.validate());
        if trimmed.price.is_some_and(|p| !p.is_finite()) {
            fields.push("price".to_string());
        }

        let absent = blank(&trimmed.name) || trimmed.price.is_none() || blank(&trimmed.image);
        match (trimmed.name, trimmed.price, trimmed.image) {
            (Some(name), Some(price), Some(image)) if fields.is_empty() => {
                Ok(ValidProduct { name, price, image })
            }
            _ if absent => Err(ValidationError::missing(normalize(fields))),
            _ => Err(ValidationError::invalid(normalize(fields))),
        }
    }
}

/// 部分更新：缺省字段保持原值，出现的字段遵循与创建相同的规则
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(exclusive_min = 0.0))]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub image: Option<String>,
}

impl ProductPatch {
    /// 校验出现的字段并返回规范化后的补丁
    pub fn check(&self) -> Result<ProductPatch, ValidationError> {
        let trimmed = Self {
            name: trim(&self.name),
            price: self.price,
            image: trim(&self.image),
        };

        let mut fields = failed_fields(trimmed.validate());
        if trimmed.price.is_some_and(|p| !p.is_finite()) {
            fields.push("price".to_string());
        }

        if fields.is_empty() {
            Ok(trimmed)
        } else {
            Err(ValidationError::invalid(normalize(fields)))
        }
    }
}

fn trim(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|s| s.trim().to_string())
}

/// 缺省或只有空白
fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn failed_fields(result: Result<(), validator::ValidationErrors>) -> Vec<String> {
    match result {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect(),
    }
}

fn normalize(mut fields: Vec<String>) -> Vec<String> {
    fields.sort();
    fields.dedup();
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_candidate_is_trimmed() {
        let candidate = NewProduct::new("  Red Mug ", 9.99, " /img/red.png");
        let valid = candidate.check().unwrap();
        assert_eq!(valid.name, "Red Mug");
        assert_eq!(valid.price, 9.99);
        assert_eq!(valid.image, "/img/red.png");
    }

    #[test]
    fn test_missing_fields_are_reported_sorted() {
        let candidate = NewProduct {
            name: None,
            price: Some(3.0),
            image: Some("   ".to_string()),
        };
        let err = candidate.check().unwrap_err();
        assert_eq!(err.fields(), &["image".to_string(), "name".to_string()]);
        assert_eq!(
            err.to_string(),
            "Please provide all required fields: image, name"
        );
    }

    #[test]
    fn test_price_must_be_positive_and_finite() {
        for price in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = NewProduct::new("Mug", price, "mug.png").check().unwrap_err();
            assert_eq!(err.fields(), &["price".to_string()], "price {price}");
            assert_eq!(err.to_string(), "Invalid product fields: price");
        }
        assert!(NewProduct::default().check().is_err());
    }

    #[test]
    fn test_absent_field_wins_over_invalid_price() {
        let candidate = NewProduct {
            name: None,
            ..NewProduct::new("", -2.0, "mug.png")
        };
        let err = candidate.check().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please provide all required fields: name, price"
        );

        let candidate = NewProduct {
            price: None,
            ..NewProduct::new("Mug", 1.0, "mug.png")
        };
        assert_eq!(
            candidate.check().unwrap_err().to_string(),
            "Please provide all required fields: price"
        );
    }

    #[test]
    fn test_candidate_parses_with_missing_fields() {
        let candidate: NewProduct = serde_json::from_str(r#"{"name":"Mug"}"#).unwrap();
        assert_eq!(candidate.price, None);
        assert!(candidate.check().is_err());
    }

    #[test]
    fn test_patch_validates_only_present_fields() {
        let patch = ProductPatch {
            price: Some(12.5),
            ..Default::default()
        };
        assert_eq!(patch.check().unwrap().price, Some(12.5));

        let patch = ProductPatch {
            name: Some(" ".to_string()),
            ..Default::default()
        };
        let err = patch.check().unwrap_err();
        assert_eq!(err.to_string(), "Invalid product fields: name");
    }
}
