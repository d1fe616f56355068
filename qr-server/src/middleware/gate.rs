//! 后厨门禁中间件
//!
//! 只是 UI 门禁，不是安全边界：口令以明文保存在本地存储中。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::ServerState;
use crate::utils::AppError;

const KITCHEN_PREFIX: &str = "/api/kitchen";

/// Paths under `/api/kitchen` reachable while locked
const PUBLIC_KITCHEN_PATHS: &[&str] = &["/api/kitchen/login"];

/// 后厨门禁 - 要求已输入口令
///
/// # 跳过检查的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/kitchen` 路径
/// - `/api/kitchen/login`
///
/// 未解锁时返回 401。
pub async fn require_kitchen_access(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !is_kitchen_path(path) || PUBLIC_KITCHEN_PATHS.contains(&path) {
        return Ok(next.run(req).await);
    }

    if !state.kitchen.is_unlocked() {
        tracing::warn!(path = %path, "Kitchen route rejected: console locked");
        return Err(AppError::not_authenticated());
    }

    Ok(next.run(req).await)
}

fn is_kitchen_path(path: &str) -> bool {
    path == KITCHEN_PREFIX
        || path
            .strip_prefix(KITCHEN_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}
