//! Table selection handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::store::keys;
use crate::utils::validation::{validate_party_size, validate_table_code};
use crate::utils::AppResult;

/// 桌号选择页
#[derive(Debug, Serialize)]
pub struct TableSelection {
    pub options: Vec<String>,
    /// 上次选择的桌号
    pub selected: Option<String>,
    pub party: Option<u32>,
    /// 菜单页链接 (已选择桌号时)
    pub menu_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectTableRequest {
    pub table_code: String,
    #[serde(default)]
    pub party: Option<u32>,
}

fn selection(state: &ServerState) -> AppResult<TableSelection> {
    let selected = state.store.get_string(keys::TABLE)?;
    let party = state
        .store
        .get_string(keys::PARTY)?
        .and_then(|p| p.parse::<u32>().ok());
    let menu_link = selected.as_ref().map(|code| format!("/t/{code}"));

    Ok(TableSelection {
        options: state.config.table_options.clone(),
        selected,
        party,
        menu_link,
    })
}

/// GET /api/tables - 桌号选项与当前选择
pub async fn landing(State(state): State<ServerState>) -> AppResult<Json<TableSelection>> {
    Ok(Json(selection(&state)?))
}

/// POST /api/tables/select - 记录桌号 (和人数)
pub async fn select(
    State(state): State<ServerState>,
    Json(payload): Json<SelectTableRequest>,
) -> AppResult<Json<TableSelection>> {
    let table_code = payload.table_code.trim();
    validate_table_code(table_code)?;
    if let Some(party) = payload.party {
        validate_party_size(party)?;
    }

    state.store.set_string(keys::TABLE, table_code)?;
    if let Some(party) = payload.party {
        state.store.set_string(keys::PARTY, &party.to_string())?;
    }

    tracing::info!(table_code = %table_code, party = ?payload.party, "Table selected");
    Ok(Json(selection(&state)?))
}
