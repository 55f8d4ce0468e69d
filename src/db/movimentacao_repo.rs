// src/db/movimentacao_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::estoque::{FiltroMovimentacoes, Movimentacao, TipoMovimentacao},
    models::relatorio::MovimentoValorado,
};

#[derive(Clone)]
pub struct MovimentacaoRepository;

impl MovimentacaoRepository {
    pub fn new() -> Self {
        Self
    }

    // Registra a entrada no livro. `data` é atribuída pelo banco na criação e
    // nunca mais muda.
    #[allow(clippy::too_many_arguments)]
    pub async fn inserir<'e, E>(
        &self,
        executor: E,
        item_id: Uuid,
        tipo: TipoMovimentacao,
        quantidade: i32,
        usuario_id: Uuid,
        data_devolucao_prevista: Option<NaiveDate>,
        observacao: Option<&str>,
    ) -> Result<Movimentacao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movimentacao = sqlx::query_as::<_, Movimentacao>(
            r#"
            INSERT INTO movimentacoes
                (item_id, tipo, quantidade, usuario_id, data_devolucao_prevista, observacao)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(tipo)
        .bind(quantidade)
        .bind(usuario_id)
        .bind(data_devolucao_prevista)
        .bind(observacao)
        .fetch_one(executor)
        .await?;
        Ok(movimentacao)
    }

    pub async fn buscar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Movimentacao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movimentacao =
            sqlx::query_as::<_, Movimentacao>("SELECT * FROM movimentacoes WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(movimentacao)
    }

    // Edição restrita a tipo/quantidade/devolução/observação: data e usuário
    // são imutáveis depois de criados.
    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        tipo: TipoMovimentacao,
        quantidade: i32,
        data_devolucao_prevista: Option<NaiveDate>,
        observacao: Option<&str>,
    ) -> Result<Movimentacao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movimentacao = sqlx::query_as::<_, Movimentacao>(
            r#"
            UPDATE movimentacoes SET
                tipo = $2,
                quantidade = $3,
                data_devolucao_prevista = $4,
                observacao = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tipo)
        .bind(quantidade)
        .bind(data_devolucao_prevista)
        .bind(observacao)
        .fetch_one(executor)
        .await?;
        Ok(movimentacao)
    }

    pub async fn excluir<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM movimentacoes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn listar<'e, E>(
        &self,
        executor: E,
        filtro: &FiltroMovimentacoes,
    ) -> Result<Vec<Movimentacao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movimentacoes = sqlx::query_as::<_, Movimentacao>(
            r#"
            SELECT * FROM movimentacoes
            WHERE ($1::tipo_movimentacao IS NULL OR tipo = $1)
              AND ($2::uuid IS NULL OR item_id = $2)
              AND ($3::date IS NULL OR data >= $3::date)
              AND ($4::date IS NULL OR data < $4::date + INTERVAL '1 day')
            ORDER BY data DESC
            "#,
        )
        .bind(filtro.tipo)
        .bind(filtro.item_id)
        .bind(filtro.data_inicio)
        .bind(filtro.data_fim)
        .fetch_all(executor)
        .await?;
        Ok(movimentacoes)
    }

    pub async fn listar_por_item<'e, E>(
        &self,
        executor: E,
        item_id: Uuid,
        limite: i64,
    ) -> Result<Vec<Movimentacao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movimentacoes = sqlx::query_as::<_, Movimentacao>(
            "SELECT * FROM movimentacoes WHERE item_id = $1 ORDER BY data DESC LIMIT $2",
        )
        .bind(item_id)
        .bind(limite)
        .fetch_all(executor)
        .await?;
        Ok(movimentacoes)
    }

    // Movimentos valorados até um instante de corte, para o replay de
    // valoração. Atende pelo índice (item_id, data) / (tipo, data).
    pub async fn listar_valorados_ate<'e, E>(
        &self,
        executor: E,
        corte: DateTime<Utc>,
        categoria: Option<&str>,
    ) -> Result<Vec<MovimentoValorado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movimentos = sqlx::query_as::<_, MovimentoValorado>(
            r#"
            SELECT m.tipo, m.quantidade, i.valor_unitario
            FROM movimentacoes m
            JOIN itens i ON i.id = m.item_id
            WHERE m.data <= $1
              AND ($2::varchar IS NULL OR i.categoria = $2)
            "#,
        )
        .bind(corte)
        .bind(categoria)
        .fetch_all(executor)
        .await?;
        Ok(movimentos)
    }

    // Entradas dentro do período fechado [inicio, fim], valoradas.
    pub async fn listar_entradas_no_periodo<'e, E>(
        &self,
        executor: E,
        inicio: NaiveDate,
        fim: NaiveDate,
        categoria: Option<&str>,
    ) -> Result<Vec<MovimentoValorado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movimentos = sqlx::query_as::<_, MovimentoValorado>(
            r#"
            SELECT m.tipo, m.quantidade, i.valor_unitario
            FROM movimentacoes m
            JOIN itens i ON i.id = m.item_id
            WHERE m.tipo = 'ENTRADA'
              AND m.data >= $1::date
              AND m.data < $2::date + INTERVAL '1 day'
              AND ($3::varchar IS NULL OR i.categoria = $3)
            "#,
        )
        .bind(inicio)
        .bind(fim)
        .bind(categoria)
        .fetch_all(executor)
        .await?;
        Ok(movimentos)
    }
}
