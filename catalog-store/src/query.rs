//! 派生视图：搜索过滤、排序与价格区间
//!
//! 这里的函数只读取商品切片并返回引用向量，不会修改传入的集合。

use catalog_model::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

/// 排序方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// 保持集合原有顺序
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    NameAsc,
    NameDesc,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortKey::Newest),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "name-asc" => Ok(SortKey::NameAsc),
            "name-desc" => Ok(SortKey::NameDesc),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// 已编译的搜索条件：名称不区分大小写地包含搜索词，
/// 或搜索词可解析为与价格相等的数字
struct Matcher {
    needle: String,
    number: Option<f64>,
}

impl Matcher {
    fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
            number: term.parse::<f64>().ok(),
        }
    }

    fn matches(&self, product: &Product) -> bool {
        product.name.to_lowercase().contains(&self.needle)
            || self.number.is_some_and(|n| n == product.price)
    }
}

/// 过滤；空白搜索词返回全部商品
pub fn filter<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let term = term.trim();
    if term.is_empty() {
        return products.iter().collect();
    }

    let matcher = Matcher::new(term);
    products.iter().filter(|p| matcher.matches(p)).collect()
}

/// 稳定排序：键相等的元素保持原有相对顺序
pub fn sort(view: &mut [&Product], key: SortKey) {
    match key {
        SortKey::Newest => {}
        SortKey::PriceLow => view.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => view.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::NameAsc => view.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::NameDesc => view.sort_by(|a, b| compare_names(&b.name, &a.name)),
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// 先过滤再排序
pub fn derive_view<'a>(products: &'a [Product], term: &str, key: SortKey) -> Vec<&'a Product> {
    let mut view = filter(products, term);
    sort(&mut view, key);
    view
}

/// 视图中的最低价与最高价
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub lowest: f64,
    pub highest: f64,
}

pub fn price_range(view: &[&Product]) -> Option<PriceRange> {
    let mut prices = view.iter().map(|p| p.price);
    let first = prices.next()?;
    Some(prices.fold(
        PriceRange {
            lowest: first,
            highest: first,
        },
        |range, price| PriceRange {
            lowest: range.lowest.min(price),
            highest: range.highest.max(price),
        },
    ))
}
