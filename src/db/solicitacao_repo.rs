// src/db/solicitacao_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::solicitacao::{
        FiltroSolicitacoes, Solicitacao, StatusSolicitacao, TipoSolicitacao,
    },
};

#[derive(Clone)]
pub struct SolicitacaoRepository;

impl SolicitacaoRepository {
    pub fn new() -> Self {
        Self
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn inserir<'e, E>(
        &self,
        executor: E,
        item_id: Uuid,
        solicitante_id: Uuid,
        quantidade: i32,
        tipo: TipoSolicitacao,
        data_devolucao_prevista: Option<NaiveDate>,
        observacao: Option<&str>,
    ) -> Result<Solicitacao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let solicitacao = sqlx::query_as::<_, Solicitacao>(
            r#"
            INSERT INTO solicitacoes
                (item_id, solicitante_id, quantidade, tipo, data_devolucao_prevista, observacao)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(solicitante_id)
        .bind(quantidade)
        .bind(tipo)
        .bind(data_devolucao_prevista)
        .bind(observacao)
        .fetch_one(executor)
        .await?;
        Ok(solicitacao)
    }

    pub async fn buscar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Solicitacao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let solicitacao =
            sqlx::query_as::<_, Solicitacao>("SELECT * FROM solicitacoes WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(solicitacao)
    }

    // Trava a solicitação para a transição de status, evitando que duas
    // aprovações/atendimentos concorrentes passem ambos.
    pub async fn buscar_para_atualizacao<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Solicitacao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let solicitacao =
            sqlx::query_as::<_, Solicitacao>("SELECT * FROM solicitacoes WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(solicitacao)
    }

    pub async fn listar<'e, E>(
        &self,
        executor: E,
        filtro: &FiltroSolicitacoes,
    ) -> Result<Vec<Solicitacao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let solicitacoes = sqlx::query_as::<_, Solicitacao>(
            r#"
            SELECT * FROM solicitacoes
            WHERE ($1::status_solicitacao IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR item_id = $2)
            ORDER BY data_solicitacao DESC
            "#,
        )
        .bind(filtro.status)
        .bind(filtro.item_id)
        .fetch_all(executor)
        .await?;
        Ok(solicitacoes)
    }

    pub async fn atualizar_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: StatusSolicitacao,
        data_atendimento: Option<DateTime<Utc>>,
    ) -> Result<Solicitacao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let solicitacao = sqlx::query_as::<_, Solicitacao>(
            r#"
            UPDATE solicitacoes SET
                status = $2,
                data_atendimento = COALESCE($3, data_atendimento)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(data_atendimento)
        .fetch_one(executor)
        .await?;
        Ok(solicitacao)
    }
}
