// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{FornecedorRepository, ItemRepository, MovimentacaoRepository, SolicitacaoRepository},
    services::{
        AlertaService, EstoqueService, RelatorioService, SolicitacaoService,
        alerta_service::ParametrosEstoque,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub fornecedor_repo: FornecedorRepository,
    pub item_repo: ItemRepository,
    pub movimentacao_repo: MovimentacaoRepository,
    pub estoque_service: EstoqueService,
    pub alerta_service: AlertaService,
    pub relatorio_service: RelatorioService,
    pub solicitacao_service: SolicitacaoService,
}

fn env_ou<T: std::str::FromStr>(chave: &str, padrao: T) -> T {
    env::var(chave)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(padrao)
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // Limites padrão do classificador: configuração explícita, com os
        // valores de referência como fallback.
        let parametros_estoque = ParametrosEstoque {
            estoque_minimo_padrao: env_ou("ESTOQUE_MINIMO_PADRAO", 300),
            estoque_maximo_padrao: env_ou("ESTOQUE_MAXIMO_PADRAO", 1000),
            fracao_critica: env_ou("FRACAO_CRITICA", 0.5),
        };

        // --- Monta o gráfico de dependências ---
        let fornecedor_repo = FornecedorRepository::new();
        let item_repo = ItemRepository::new();
        let movimentacao_repo = MovimentacaoRepository::new();
        let solicitacao_repo = SolicitacaoRepository::new();

        let estoque_service = EstoqueService::new(item_repo.clone(), movimentacao_repo.clone());
        let alerta_service = AlertaService::new(item_repo.clone(), parametros_estoque);
        let relatorio_service =
            RelatorioService::new(item_repo.clone(), movimentacao_repo.clone());
        let solicitacao_service =
            SolicitacaoService::new(solicitacao_repo, estoque_service.clone());

        Ok(Self {
            db_pool,
            jwt_secret,
            fornecedor_repo,
            item_repo,
            movimentacao_repo,
            estoque_service,
            alerta_service,
            relatorio_service,
            solicitacao_service,
        })
    }
}
