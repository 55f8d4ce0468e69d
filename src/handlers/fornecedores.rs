// src/handlers/fornecedores.rs

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
    models::estoque::{Fornecedor, FornecedorPayload},
};

#[utoipa::path(
    post,
    path = "/api/fornecedores",
    request_body = FornecedorPayload,
    responses((status = 201, description = "Fornecedor cadastrado", body = Fornecedor)),
    security(("bearer_auth" = [])),
    tag = "fornecedores"
)]
pub async fn criar_fornecedor(
    State(app_state): State<AppState>,
    Json(payload): Json<FornecedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let fornecedor = app_state
        .fornecedor_repo
        .criar(&app_state.db_pool, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(fornecedor)))
}

#[utoipa::path(
    get,
    path = "/api/fornecedores",
    responses((status = 200, description = "Fornecedores ativos", body = [Fornecedor])),
    security(("bearer_auth" = [])),
    tag = "fornecedores"
)]
pub async fn listar_fornecedores(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let fornecedores = app_state.fornecedor_repo.listar(&app_state.db_pool).await?;
    Ok(Json(fornecedores))
}

#[utoipa::path(
    get,
    path = "/api/fornecedores/{id}",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Detalhe do fornecedor", body = Fornecedor),
        (status = 404, description = "Fornecedor não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "fornecedores"
)]
pub async fn buscar_fornecedor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let fornecedor = app_state
        .fornecedor_repo
        .buscar(&app_state.db_pool, id)
        .await?
        .ok_or(AppError::FornecedorNaoEncontrado)?;
    Ok(Json(fornecedor))
}

#[utoipa::path(
    put,
    path = "/api/fornecedores/{id}",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    request_body = FornecedorPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Fornecedor),
        (status = 404, description = "Fornecedor não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "fornecedores"
)]
pub async fn atualizar_fornecedor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FornecedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let fornecedor = app_state
        .fornecedor_repo
        .atualizar(&app_state.db_pool, id, &payload)
        .await?
        .ok_or(AppError::FornecedorNaoEncontrado)?;
    Ok(Json(fornecedor))
}

#[utoipa::path(
    delete,
    path = "/api/fornecedores/{id}",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 204, description = "Fornecedor desativado"),
        (status = 404, description = "Fornecedor não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "fornecedores"
)]
pub async fn desativar_fornecedor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let desativado = app_state
        .fornecedor_repo
        .desativar(&app_state.db_pool, id)
        .await?;
    if !desativado {
        return Err(AppError::FornecedorNaoEncontrado);
    }
    Ok(StatusCode::NO_CONTENT)
}
