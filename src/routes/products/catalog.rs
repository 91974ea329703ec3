//! 店面目录的筛选与分页

use std::collections::BTreeMap;

use crate::models::{Category, Product};

pub const DEFAULT_PER_PAGE: usize = 10;
pub const MAX_PER_PAGE: usize = 100;

const ALL_LABEL: &str = "ALL";
const VINTAGE_LABEL: &str = "VINTAGE COLLECTION";

/// 同一时间只有一个筛选条件生效
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFilter {
    All,
    VintageCollection,
    Category(Category),
    /// 未知分类，不匹配任何商品
    Unknown,
}

impl CatalogFilter {
    pub fn every() -> impl Iterator<Item = CatalogFilter> {
        [CatalogFilter::All, CatalogFilter::VintageCollection]
            .into_iter()
            .chain(Category::ALL.into_iter().map(CatalogFilter::Category))
    }

    pub fn label(&self) -> &'static str {
        match self {
            CatalogFilter::All => ALL_LABEL,
            CatalogFilter::VintageCollection => VINTAGE_LABEL,
            CatalogFilter::Category(c) => c.as_str(),
            CatalogFilter::Unknown => "UNKNOWN",
        }
    }

    /// 分类名区分大小写；无法识别的分类得到空结果而不是错误
    pub fn from_label(raw: &str) -> Self {
        match raw.trim() {
            "" | ALL_LABEL => CatalogFilter::All,
            VINTAGE_LABEL => CatalogFilter::VintageCollection,
            other => other
                .parse()
                .map(CatalogFilter::Category)
                .unwrap_or(CatalogFilter::Unknown),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CatalogFilter::All => true,
            CatalogFilter::VintageCollection => product.is_vintage(),
            CatalogFilter::Category(c) => product.category() == Some(*c),
            CatalogFilter::Unknown => false,
        }
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// 每个筛选标签对应的商品数
pub fn filter_counts(products: &[Product]) -> BTreeMap<&'static str, usize> {
    CatalogFilter::every()
        .map(|f| (f.label(), products.iter().filter(|p| f.matches(p)).count()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 从 1 开始
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: Option<usize>, per_page: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// 越界的页码返回空切片
pub fn paginate<T>(items: &[T], request: PageRequest) -> Page<'_, T> {
    let per_page = request.per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let start = request
        .page
        .saturating_sub(1)
        .saturating_mul(per_page)
        .min(total_items);
    let end = start.saturating_add(per_page).min(total_items);

    Page {
        items: &items[start..end],
        page: request.page,
        per_page,
        total_items,
        total_pages,
    }
}
