// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let item_routes = Router::new()
        .route(
            "/",
            post(handlers::itens::criar_item).get(handlers::itens::listar_itens),
        )
        .route(
            "/{id}",
            get(handlers::itens::buscar_item)
                .put(handlers::itens::atualizar_item)
                .delete(handlers::itens::desativar_item),
        )
        .route("/{id}/status", get(handlers::alertas::status_item))
        .route("/{id}/movimentacoes", get(handlers::itens::historico_item));

    let fornecedor_routes = Router::new()
        .route(
            "/",
            post(handlers::fornecedores::criar_fornecedor)
                .get(handlers::fornecedores::listar_fornecedores),
        )
        .route(
            "/{id}",
            get(handlers::fornecedores::buscar_fornecedor)
                .put(handlers::fornecedores::atualizar_fornecedor)
                .delete(handlers::fornecedores::desativar_fornecedor),
        );

    let movimentacao_routes = Router::new()
        .route(
            "/",
            post(handlers::movimentacoes::registrar_movimentacao)
                .get(handlers::movimentacoes::listar_movimentacoes),
        )
        .route(
            "/{id}",
            put(handlers::movimentacoes::atualizar_movimentacao)
                .delete(handlers::movimentacoes::excluir_movimentacao),
        );

    let alerta_routes = Router::new()
        .route("/estoque", get(handlers::alertas::alertas_estoque))
        .route("/criticos", get(handlers::alertas::itens_criticos))
        .route("/reposicao", get(handlers::alertas::itens_reposicao));

    let relatorio_routes = Router::new().route(
        "/inventario-periodico",
        get(handlers::relatorios::inventario_periodico),
    );

    let solicitacao_routes = Router::new()
        .route(
            "/",
            post(handlers::solicitacoes::criar_solicitacao)
                .get(handlers::solicitacoes::listar_solicitacoes),
        )
        .route("/{id}", get(handlers::solicitacoes::buscar_solicitacao))
        .route(
            "/{id}/aprovar",
            post(handlers::solicitacoes::aprovar_solicitacao),
        )
        .route(
            "/{id}/atender",
            post(handlers::solicitacoes::atender_solicitacao),
        )
        .route(
            "/{id}/cancelar",
            post(handlers::solicitacoes::cancelar_solicitacao),
        );

    // Combina tudo no router principal. Todas as rotas de negócio ficam
    // atrás do guard: a identidade vem do token, nunca daqui.
    let api_routes = Router::new()
        .nest("/itens", item_routes)
        .nest("/fornecedores", fornecedor_routes)
        .nest("/movimentacoes", movimentacao_routes)
        .nest("/alertas", alerta_routes)
        .nest("/relatorios", relatorio_routes)
        .nest("/solicitacoes", solicitacao_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
