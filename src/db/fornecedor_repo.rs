// src/db/fornecedor_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::estoque::{Fornecedor, FornecedorPayload},
};

#[derive(Clone)]
pub struct FornecedorRepository;

impl FornecedorRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Fornecedor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fornecedores = sqlx::query_as::<_, Fornecedor>(
            "SELECT * FROM fornecedores WHERE ativo = TRUE ORDER BY nome ASC",
        )
        .fetch_all(executor)
        .await?;
        Ok(fornecedores)
    }

    pub async fn buscar<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Fornecedor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fornecedor = sqlx::query_as::<_, Fornecedor>("SELECT * FROM fornecedores WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(fornecedor)
    }

    pub async fn criar<'e, E>(
        &self,
        executor: E,
        payload: &FornecedorPayload,
    ) -> Result<Fornecedor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fornecedor = sqlx::query_as::<_, Fornecedor>(
            r#"
            INSERT INTO fornecedores (nome, cnpj, contato, telefone, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&payload.nome)
        .bind(&payload.cnpj)
        .bind(&payload.contato)
        .bind(&payload.telefone)
        .bind(&payload.email)
        .fetch_one(executor)
        .await?;
        Ok(fornecedor)
    }

    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &FornecedorPayload,
    ) -> Result<Option<Fornecedor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fornecedor = sqlx::query_as::<_, Fornecedor>(
            r#"
            UPDATE fornecedores SET
                nome = $2,
                cnpj = $3,
                contato = $4,
                telefone = $5,
                email = $6,
                atualizado_em = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.nome)
        .bind(&payload.cnpj)
        .bind(&payload.contato)
        .bind(&payload.telefone)
        .bind(&payload.email)
        .fetch_optional(executor)
        .await?;
        Ok(fornecedor)
    }

    pub async fn desativar<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE fornecedores SET ativo = FALSE, atualizado_em = now() WHERE id = $1",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
