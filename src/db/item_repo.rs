// src/db/item_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::estoque::{AtualizarItemPayload, Item},
};

#[derive(Clone)]
pub struct ItemRepository;

impl ItemRepository {
    pub fn new() -> Self {
        Self
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Item>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let itens = sqlx::query_as::<_, Item>(
            "SELECT * FROM itens WHERE ativo = TRUE ORDER BY descricao ASC",
        )
        .fetch_all(executor)
        .await?;
        Ok(itens)
    }

    // Detalhamento para relatórios: inclui itens inativos, com filtro
    // opcional por categoria.
    pub async fn listar_para_relatorio<'e, E>(
        &self,
        executor: E,
        categoria: Option<&str>,
    ) -> Result<Vec<Item>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let itens = sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM itens
            WHERE ($1::varchar IS NULL OR categoria = $1)
            ORDER BY descricao ASC
            "#,
        )
        .bind(categoria)
        .fetch_all(executor)
        .await?;
        Ok(itens)
    }

    pub async fn buscar<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Item>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM itens WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(item)
    }

    // Trava a linha do item pela duração da transação (FOR UPDATE), para que
    // escritores concorrentes sobre o mesmo item serializem em vez de perder
    // atualizações.
    pub async fn buscar_para_atualizacao<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Item>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, Item>("SELECT * FROM itens WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(item)
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn criar<'e, E>(
        &self,
        executor: E,
        codigo: &str,
        descricao: &str,
        categoria: Option<&str>,
        unidade_medida: &str,
        valor_unitario: Decimal,
        fornecedor_id: Option<Uuid>,
        estoque_minimo: i32,
        estoque_maximo: i32,
    ) -> Result<Item, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO itens
                (codigo, descricao, categoria, unidade_medida, valor_unitario,
                 fornecedor_id, estoque_minimo, estoque_maximo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(codigo)
        .bind(descricao)
        .bind(categoria)
        .bind(unidade_medida)
        .bind(valor_unitario)
        .bind(fornecedor_id)
        .bind(estoque_minimo)
        .bind(estoque_maximo)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::CodigoJaExiste(codigo.to_string());
                }
            }
            e.into()
        })
    }

    // Edição de cadastro. quantidade_atual fica de fora: só o motor de
    // movimentações escreve nela, via atualizar_quantidade.
    pub async fn atualizar_cadastro<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &AtualizarItemPayload,
    ) -> Result<Option<Item>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE itens SET
                descricao = $2,
                categoria = $3,
                unidade_medida = $4,
                valor_unitario = $5,
                fornecedor_id = $6,
                estoque_minimo = $7,
                estoque_maximo = $8,
                atualizado_em = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.descricao)
        .bind(&payload.categoria)
        .bind(&payload.unidade_medida)
        .bind(payload.valor_unitario)
        .bind(payload.fornecedor_id)
        .bind(payload.estoque_minimo)
        .bind(payload.estoque_maximo)
        .fetch_optional(executor)
        .await?;
        Ok(item)
    }

    pub async fn atualizar_quantidade<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        quantidade_atual: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE itens SET quantidade_atual = $2, atualizado_em = now() WHERE id = $1")
            .bind(id)
            .bind(quantidade_atual)
            .execute(executor)
            .await?;
        Ok(())
    }

    // Exclusão lógica: itens com histórico de movimentações nunca são
    // removidos fisicamente (a FK do livro é ON DELETE RESTRICT).
    pub async fn desativar<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("UPDATE itens SET ativo = FALSE, atualizado_em = now() WHERE id = $1")
                .bind(id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
