//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{CATEGORIES, Category, MenuItem};

use crate::catalog::{MenuSource, NO_MATCH_MESSAGE, resolve_category};
use crate::core::ServerState;
use crate::utils::validation::{MAX_QUERY_LEN, validate_optional_text, validate_table_code};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub cat: Option<String>,
    pub q: Option<String>,
}

/// 菜单浏览页
#[derive(Debug, Serialize)]
pub struct MenuView {
    pub table_code: String,
    pub categories: &'static [Category],
    pub active: Category,
    pub query: String,
    pub items: Vec<MenuItem>,
    pub source: MenuSource,
    /// 无结果时的提示
    pub message: Option<&'static str>,
    pub cart_count: i64,
}

/// 菜品详情页
#[derive(Debug, Serialize)]
pub struct ItemDetail {
    pub item: MenuItem,
    pub category: Category,
    /// 购物车中的数量
    pub qty: i64,
    pub cart_count: i64,
}

/// GET /api/tables/:code/menu?cat=&q= - 分类浏览 + 关键字搜索
pub async fn browse(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Query(params): Query<BrowseQuery>,
) -> AppResult<Json<MenuView>> {
    validate_table_code(&code)?;
    validate_optional_text(&params.q, "q", MAX_QUERY_LEN)?;

    let active = *resolve_category(params.cat.as_deref()).info();
    let query = params.q.unwrap_or_default();

    // 打开菜单页时重新拉取
    let catalog = state.refresh_catalog().await;
    let items: Vec<MenuItem> = catalog
        .browse(active.key, &query)
        .into_iter()
        .cloned()
        .collect();
    let message = items.is_empty().then_some(NO_MATCH_MESSAGE);

    Ok(Json(MenuView {
        table_code: code,
        categories: &CATEGORIES,
        active,
        query,
        items,
        source: catalog.source(),
        message,
        cart_count: state.cart.count(),
    }))
}

/// GET /api/items/:id - 菜品详情
pub async fn item_detail(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ItemDetail>> {
    let catalog = state.catalog().await;
    let item = catalog
        .find(&id)
        .cloned()
        .ok_or_else(|| AppError::with_message(ErrorCode::ProductNotFound, format!("Menu item {id} not found")))?;

    Ok(Json(ItemDetail {
        category: *item.cat.info(),
        qty: state.cart.qty_of(&item.id),
        cart_count: state.cart.count(),
        item,
    }))
}
