// src/handlers/relatorios.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::relatorio::{ParametrosRelatorio, RelatorioInventarioPeriodico},
};

#[utoipa::path(
    get,
    path = "/api/relatorios/inventario-periodico",
    params(ParametrosRelatorio),
    responses(
        (status = 200, description = "Relatório de inventário periódico", body = RelatorioInventarioPeriodico),
        (status = 400, description = "Período inválido"),
    ),
    security(("bearer_auth" = [])),
    tag = "relatorios"
)]
pub async fn inventario_periodico(
    State(app_state): State<AppState>,
    Query(parametros): Query<ParametrosRelatorio>,
) -> Result<impl IntoResponse, AppError> {
    let relatorio = app_state
        .relatorio_service
        .relatorio_inventario_periodico(
            &app_state.db_pool,
            parametros.data_inicio,
            parametros.data_fim,
            parametros.categoria.as_deref(),
        )
        .await?;
    Ok(Json(relatorio))
}
