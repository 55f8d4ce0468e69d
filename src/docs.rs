// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Itens ---
        handlers::itens::criar_item,
        handlers::itens::listar_itens,
        handlers::itens::buscar_item,
        handlers::itens::atualizar_item,
        handlers::itens::desativar_item,
        handlers::itens::historico_item,

        // --- Fornecedores ---
        handlers::fornecedores::criar_fornecedor,
        handlers::fornecedores::listar_fornecedores,
        handlers::fornecedores::buscar_fornecedor,
        handlers::fornecedores::atualizar_fornecedor,
        handlers::fornecedores::desativar_fornecedor,

        // --- Movimentações ---
        handlers::movimentacoes::registrar_movimentacao,
        handlers::movimentacoes::listar_movimentacoes,
        handlers::movimentacoes::atualizar_movimentacao,
        handlers::movimentacoes::excluir_movimentacao,

        // --- Alertas ---
        handlers::alertas::status_item,
        handlers::alertas::alertas_estoque,
        handlers::alertas::itens_criticos,
        handlers::alertas::itens_reposicao,

        // --- Relatórios ---
        handlers::relatorios::inventario_periodico,

        // --- Solicitações ---
        handlers::solicitacoes::criar_solicitacao,
        handlers::solicitacoes::listar_solicitacoes,
        handlers::solicitacoes::buscar_solicitacao,
        handlers::solicitacoes::aprovar_solicitacao,
        handlers::solicitacoes::atender_solicitacao,
        handlers::solicitacoes::cancelar_solicitacao,
    ),
    components(
        schemas(
            // --- Estoque ---
            models::estoque::Fornecedor,
            models::estoque::FornecedorPayload,
            models::estoque::Item,
            models::estoque::CriarItemPayload,
            models::estoque::AtualizarItemPayload,
            models::estoque::TipoMovimentacao,
            models::estoque::Movimentacao,
            models::estoque::RegistrarMovimentacaoPayload,
            models::estoque::AtualizarMovimentacaoPayload,

            // --- Alertas ---
            models::alerta::StatusEstoque,
            models::alerta::RegistroStatus,
            models::alerta::ResumoAlertas,
            models::alerta::RespostaAlertas,
            models::alerta::RespostaCriticos,
            models::alerta::RespostaReposicao,

            // --- Relatórios ---
            models::relatorio::ItemRelatorio,
            models::relatorio::RelatorioInventarioPeriodico,

            // --- Solicitações ---
            models::solicitacao::TipoSolicitacao,
            models::solicitacao::StatusSolicitacao,
            models::solicitacao::Solicitacao,
            models::solicitacao::CriarSolicitacaoPayload,
        )
    ),
    tags(
        (name = "itens", description = "Cadastro de Itens do Almoxarifado"),
        (name = "fornecedores", description = "Cadastro de Fornecedores"),
        (name = "movimentacoes", description = "Livro de Movimentações de Estoque"),
        (name = "alertas", description = "Alertas e Status de Estoque"),
        (name = "relatorios", description = "Relatório de Inventário Periódico"),
        (name = "solicitacoes", description = "Solicitações de Material")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
