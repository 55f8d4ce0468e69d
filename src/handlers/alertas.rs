// src/handlers/alertas.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::alerta::{RegistroStatus, RespostaAlertas, RespostaCriticos, RespostaReposicao},
};

#[utoipa::path(
    get,
    path = "/api/itens/{id}/status",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Status de estoque do item", body = RegistroStatus),
        (status = 404, description = "Item não encontrado"),
    ),
    security(("bearer_auth" = [])),
    tag = "alertas"
)]
pub async fn status_item(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let registro = app_state
        .alerta_service
        .status_item(&app_state.db_pool, id)
        .await?;
    Ok(Json(registro))
}

#[utoipa::path(
    get,
    path = "/api/alertas/estoque",
    responses((status = 200, description = "Resumo e alertas de estoque", body = RespostaAlertas)),
    security(("bearer_auth" = [])),
    tag = "alertas"
)]
pub async fn alertas_estoque(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resposta = app_state.alerta_service.alertas(&app_state.db_pool).await?;
    Ok(Json(resposta))
}

#[utoipa::path(
    get,
    path = "/api/alertas/criticos",
    responses((status = 200, description = "Itens em situação crítica", body = RespostaCriticos)),
    security(("bearer_auth" = [])),
    tag = "alertas"
)]
pub async fn itens_criticos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resposta = app_state
        .alerta_service
        .itens_criticos(&app_state.db_pool)
        .await?;
    Ok(Json(resposta))
}

#[utoipa::path(
    get,
    path = "/api/alertas/reposicao",
    responses((status = 200, description = "Itens que precisam de reposição, mais urgentes primeiro", body = RespostaReposicao)),
    security(("bearer_auth" = [])),
    tag = "alertas"
)]
pub async fn itens_reposicao(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resposta = app_state
        .alerta_service
        .itens_reposicao(&app_state.db_pool)
        .await?;
    Ok(Json(resposta))
}
