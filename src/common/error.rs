// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia. O motor de
// estoque devolve erros tipados; a tradução para HTTP acontece só aqui.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Saída (ou retirada) maior que o saldo disponível. Recuperável:
    // vira falha de validação para o chamador, nunca derruba o processo.
    #[error("Estoque insuficiente. Disponível: {disponivel}")]
    EstoqueInsuficiente { disponivel: i32 },

    #[error("Período inválido")]
    PeriodoInvalido(String),

    #[error("Item não encontrado")]
    ItemNaoEncontrado,

    #[error("Fornecedor não encontrado")]
    FornecedorNaoEncontrado,

    #[error("Movimentação não encontrada")]
    MovimentacaoNaoEncontrada,

    #[error("Solicitação não encontrada")]
    SolicitacaoNaoEncontrada,

    #[error("Código de item já existe: {0}")]
    CodigoJaExiste(String),

    #[error("Transição de status inválida: {0}")]
    TransicaoSolicitacaoInvalida(String),

    #[error("Token inválido")]
    TokenInvalido,

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EstoqueInsuficiente { disponivel } => {
                let body = Json(json!({
                    "error": format!("Estoque insuficiente. Disponível: {disponivel}"),
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::PeriodoInvalido(msg) => {
                let body = Json(json!({ "error": msg }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::ItemNaoEncontrado => (StatusCode::NOT_FOUND, "Item não encontrado."),
            AppError::FornecedorNaoEncontrado => {
                (StatusCode::NOT_FOUND, "Fornecedor não encontrado.")
            }
            AppError::MovimentacaoNaoEncontrada => {
                (StatusCode::NOT_FOUND, "Movimentação não encontrada.")
            }
            AppError::SolicitacaoNaoEncontrada => {
                (StatusCode::NOT_FOUND, "Solicitação não encontrada.")
            }
            AppError::CodigoJaExiste(codigo) => {
                let body = Json(json!({
                    "error": format!("Já existe um item com o código '{codigo}'."),
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::TransicaoSolicitacaoInvalida(msg) => {
                let body = Json(json!({ "error": msg }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::TokenInvalido | AppError::JwtError(_) => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
