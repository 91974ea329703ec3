use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};

use crate::{
    AppState,
    error::AppError,
    models::Product,
    utils::success_to_api_response,
};

use super::catalog::{CatalogFilter, PageRequest, filter_counts, paginate};
use super::model::{ListProductsQuery, ListProductsResponse, ProductCountsResponse, ProductItem};

#[axum::debug_handler]
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;

    let filter = query
        .category
        .as_deref()
        .map_or(CatalogFilter::All, CatalogFilter::from_label);
    let page_request = PageRequest::new(query.page, query.per_page);

    tracing::debug!("Fetching products with filter {}", filter.label());
    let products = Product::list_active(&state.pool).await.map_err(|e| {
        AppError::internal("Failed to fetch products", &e, state.config.error_details(&e))
    })?;

    let filtered = filter.apply(&products);
    let page = paginate(&filtered, page_request);

    Ok(success_to_api_response(ListProductsResponse {
        products: page.items.iter().map(|p| ProductItem::from(*p)).collect(),
        total: page.total_items,
        page: page.page,
        per_page: page.per_page,
        total_pages: page.total_pages,
    }))
}

#[axum::debug_handler]
pub async fn product_counts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = Product::list_active(&state.pool).await.map_err(|e| {
        AppError::internal("Failed to fetch products", &e, state.config.error_details(&e))
    })?;

    Ok(success_to_api_response(ProductCountsResponse {
        counts: filter_counts(&products),
    }))
}
