// src/handlers/itens.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::UsuarioAutenticado,
    models::estoque::{AtualizarItemPayload, CriarItemPayload, Item, Movimentacao},
};

#[utoipa::path(
    post,
    path = "/api/itens",
    request_body = CriarItemPayload,
    responses(
        (status = 201, description = "Item cadastrado", body = Item),
        (status = 409, description = "Código já existe"),
    ),
    security(("bearer_auth" = [])),
    tag = "itens"
)]
pub async fn criar_item(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Json(payload): Json<CriarItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state
        .estoque_service
        .criar_item(&app_state.db_pool, usuario.id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/api/itens",
    responses((status = 200, description = "Itens ativos", body = [Item])),
    security(("bearer_auth" = [])),
    tag = "itens"
)]
pub async fn listar_itens(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let itens = app_state.item_repo.listar(&app_state.db_pool).await?;
    Ok(Json(itens))
}

#[utoipa::path(
    get,
    path = "/api/itens/{id}",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Detalhe do item", body = Item),
        (status = 404, description = "Item não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "itens"
)]
pub async fn buscar_item(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .item_repo
        .buscar(&app_state.db_pool, id)
        .await?
        .ok_or(AppError::ItemNaoEncontrado)?;
    Ok(Json(item))
}

#[utoipa::path(
    put,
    path = "/api/itens/{id}",
    params(("id" = Uuid, Path, description = "ID do item")),
    request_body = AtualizarItemPayload,
    responses(
        (status = 200, description = "Item atualizado", body = Item),
        (status = 404, description = "Item não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "itens"
)]
pub async fn atualizar_item(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state
        .item_repo
        .atualizar_cadastro(&app_state.db_pool, id, &payload)
        .await?
        .ok_or(AppError::ItemNaoEncontrado)?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/itens/{id}",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 204, description = "Item desativado"),
        (status = 404, description = "Item não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "itens"
)]
pub async fn desativar_item(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    // Exclusão lógica: o histórico de movimentações permanece íntegro.
    let desativado = app_state
        .item_repo
        .desativar(&app_state.db_pool, id)
        .await?;
    if !desativado {
        return Err(AppError::ItemNaoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/itens/{id}/movimentacoes",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses((status = 200, description = "Movimentações recentes do item", body = [Movimentacao])),
    security(("bearer_auth" = [])),
    tag = "itens"
)]
pub async fn historico_item(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .item_repo
        .buscar(&app_state.db_pool, id)
        .await?
        .ok_or(AppError::ItemNaoEncontrado)?;

    let movimentacoes = app_state
        .movimentacao_repo
        .listar_por_item(&app_state.db_pool, id, 50)
        .await?;
    Ok(Json(movimentacoes))
}
