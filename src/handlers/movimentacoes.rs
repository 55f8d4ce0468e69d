// src/handlers/movimentacoes.rs

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
    models::estoque::{
        AtualizarMovimentacaoPayload, FiltroMovimentacoes, Movimentacao,
        RegistrarMovimentacaoPayload,
    },
};

fn erro_de_consistencia(e: validator::ValidationError) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add("data_devolucao_prevista", e);
    AppError::ValidationError(errors)
}

#[utoipa::path(
    post,
    path = "/api/movimentacoes",
    request_body = RegistrarMovimentacaoPayload,
    responses(
        (status = 201, description = "Movimentação registrada", body = Movimentacao),
        (status = 404, description = "Item não encontrado"),
        (status = 422, description = "Estoque insuficiente"),
    ),
    security(("bearer_auth" = [])),
    tag = "movimentacoes"
)]
pub async fn registrar_movimentacao(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Json(payload): Json<RegistrarMovimentacaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    // Validação padrão do Validator
    payload.validate()?;
    // Consistência entre campos: retirada exige data prevista de devolução.
    payload.validate_consistency().map_err(erro_de_consistencia)?;

    let movimentacao = app_state
        .estoque_service
        .registrar_movimentacao(
            &app_state.db_pool,
            usuario.id,
            payload.item_id,
            payload.tipo,
            payload.quantidade,
            payload.data_devolucao_prevista,
            payload.observacao.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(movimentacao)))
}

#[utoipa::path(
    get,
    path = "/api/movimentacoes",
    params(FiltroMovimentacoes),
    responses((status = 200, description = "Histórico de movimentações", body = [Movimentacao])),
    security(("bearer_auth" = [])),
    tag = "movimentacoes"
)]
pub async fn listar_movimentacoes(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroMovimentacoes>,
) -> Result<impl IntoResponse, AppError> {
    let movimentacoes = app_state
        .movimentacao_repo
        .listar(&app_state.db_pool, &filtro)
        .await?;
    Ok(Json(movimentacoes))
}

#[utoipa::path(
    put,
    path = "/api/movimentacoes/{id}",
    params(("id" = Uuid, Path, description = "ID da movimentação")),
    request_body = AtualizarMovimentacaoPayload,
    responses(
        (status = 200, description = "Movimentação editada", body = Movimentacao),
        (status = 404, description = "Movimentação não encontrada"),
        (status = 422, description = "Estoque insuficiente"),
    ),
    security(("bearer_auth" = [])),
    tag = "movimentacoes"
)]
pub async fn atualizar_movimentacao(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarMovimentacaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validate_consistency().map_err(erro_de_consistencia)?;

    let movimentacao = app_state
        .estoque_service
        .atualizar_movimentacao(
            &app_state.db_pool,
            id,
            payload.tipo,
            payload.quantidade,
            payload.data_devolucao_prevista,
            payload.observacao.as_deref(),
        )
        .await?;

    Ok(Json(movimentacao))
}

#[utoipa::path(
    delete,
    path = "/api/movimentacoes/{id}",
    params(("id" = Uuid, Path, description = "ID da movimentação")),
    responses(
        (status = 204, description = "Movimentação excluída e efeito retraído"),
        (status = 404, description = "Movimentação não encontrada"),
    ),
    security(("bearer_auth" = [])),
    tag = "movimentacoes"
)]
pub async fn excluir_movimentacao(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .estoque_service
        .excluir_movimentacao(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
