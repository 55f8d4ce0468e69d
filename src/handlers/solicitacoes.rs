// src/handlers/solicitacoes.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::UsuarioAutenticado,
    models::solicitacao::{CriarSolicitacaoPayload, FiltroSolicitacoes, Solicitacao},
};

#[utoipa::path(
    post,
    path = "/api/solicitacoes",
    request_body = CriarSolicitacaoPayload,
    responses((status = 201, description = "Solicitação registrada", body = Solicitacao)),
    security(("bearer_auth" = [])),
    tag = "solicitacoes"
)]
pub async fn criar_solicitacao(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Json(payload): Json<CriarSolicitacaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validate_consistency().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("data_devolucao_prevista", e);
        AppError::ValidationError(errors)
    })?;

    let solicitacao = app_state
        .solicitacao_service
        .criar(&app_state.db_pool, usuario.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(solicitacao)))
}

#[utoipa::path(
    get,
    path = "/api/solicitacoes",
    params(FiltroSolicitacoes),
    responses((status = 200, description = "Solicitações", body = [Solicitacao])),
    security(("bearer_auth" = [])),
    tag = "solicitacoes"
)]
pub async fn listar_solicitacoes(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroSolicitacoes>,
) -> Result<impl IntoResponse, AppError> {
    let solicitacoes = app_state
        .solicitacao_service
        .listar(&app_state.db_pool, &filtro)
        .await?;
    Ok(Json(solicitacoes))
}

#[utoipa::path(
    get,
    path = "/api/solicitacoes/{id}",
    params(("id" = Uuid, Path, description = "ID da solicitação")),
    responses(
        (status = 200, description = "Detalhe da solicitação", body = Solicitacao),
        (status = 404, description = "Solicitação não encontrada"),
    ),
    security(("bearer_auth" = [])),
    tag = "solicitacoes"
)]
pub async fn buscar_solicitacao(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let solicitacao = app_state
        .solicitacao_service
        .buscar(&app_state.db_pool, id)
        .await?;
    Ok(Json(solicitacao))
}

#[utoipa::path(
    post,
    path = "/api/solicitacoes/{id}/aprovar",
    params(("id" = Uuid, Path, description = "ID da solicitação")),
    responses(
        (status = 200, description = "Solicitação aprovada", body = Solicitacao),
        (status = 409, description = "Transição de status inválida"),
    ),
    security(("bearer_auth" = [])),
    tag = "solicitacoes"
)]
pub async fn aprovar_solicitacao(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let solicitacao = app_state
        .solicitacao_service
        .aprovar(&app_state.db_pool, id)
        .await?;
    Ok(Json(solicitacao))
}

#[utoipa::path(
    post,
    path = "/api/solicitacoes/{id}/atender",
    params(("id" = Uuid, Path, description = "ID da solicitação")),
    responses(
        (status = 200, description = "Solicitação atendida e estoque movimentado", body = Solicitacao),
        (status = 409, description = "Transição de status inválida"),
        (status = 422, description = "Estoque insuficiente"),
    ),
    security(("bearer_auth" = [])),
    tag = "solicitacoes"
)]
pub async fn atender_solicitacao(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let solicitacao = app_state
        .solicitacao_service
        .atender(&app_state.db_pool, usuario.id, id)
        .await?;
    Ok(Json(solicitacao))
}

#[utoipa::path(
    post,
    path = "/api/solicitacoes/{id}/cancelar",
    params(("id" = Uuid, Path, description = "ID da solicitação")),
    responses(
        (status = 200, description = "Solicitação cancelada", body = Solicitacao),
        (status = 409, description = "Transição de status inválida"),
    ),
    security(("bearer_auth" = [])),
    tag = "solicitacoes"
)]
pub async fn cancelar_solicitacao(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let solicitacao = app_state
        .solicitacao_service
        .cancelar(&app_state.db_pool, id)
        .await?;
    Ok(Json(solicitacao))
}
