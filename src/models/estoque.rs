// src/models/estoque.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Fornecedores ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Fornecedor {
    pub id: Uuid,
    pub nome: String,
    pub cnpj: Option<String>,
    pub contato: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub ativo: bool,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FornecedorPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    pub cnpj: Option<String>,
    pub contato: Option<String>,
    pub telefone: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
}

// --- Itens ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Item {
    pub id: Uuid,
    pub codigo: String,
    pub descricao: String,
    pub categoria: Option<String>,
    pub unidade_medida: String,
    pub valor_unitario: Decimal,
    pub fornecedor_id: Option<Uuid>,
    // Cache materializado do replay do livro de movimentações.
    pub quantidade_atual: i32,
    pub estoque_minimo: i32,
    pub estoque_maximo: i32,
    pub ativo: bool,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

fn validate_nao_negativo(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CriarItemPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    pub codigo: String,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub descricao: String,

    pub categoria: Option<String>,

    #[validate(length(min = 1, message = "A unidade de medida é obrigatória."))]
    pub unidade_medida: String,

    #[validate(custom(function = validate_nao_negativo))]
    pub valor_unitario: Decimal,

    pub fornecedor_id: Option<Uuid>,

    // O estoque inicial não escreve quantidade_atual diretamente: vira uma
    // movimentação de ENTRADA na mesma transação do cadastro.
    #[validate(range(min = 0, message = "A quantidade inicial não pode ser negativa."))]
    #[serde(default)]
    pub quantidade_inicial: i32,

    #[validate(range(min = 0, message = "O estoque mínimo não pode ser negativo."))]
    #[serde(default)]
    pub estoque_minimo: i32,

    #[validate(range(min = 0, message = "O estoque máximo não pode ser negativo."))]
    #[serde(default)]
    pub estoque_maximo: i32,
}

// Edição de cadastro: quantidade_atual fica de fora de propósito, só o motor
// de movimentações escreve nela.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AtualizarItemPayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub descricao: String,

    pub categoria: Option<String>,

    #[validate(length(min = 1, message = "A unidade de medida é obrigatória."))]
    pub unidade_medida: String,

    #[validate(custom(function = validate_nao_negativo))]
    pub valor_unitario: Decimal,

    pub fornecedor_id: Option<Uuid>,

    #[validate(range(min = 0, message = "O estoque mínimo não pode ser negativo."))]
    pub estoque_minimo: i32,

    #[validate(range(min = 0, message = "O estoque máximo não pode ser negativo."))]
    pub estoque_maximo: i32,
}

// --- Movimentações ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_movimentacao", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoMovimentacao {
    Entrada,
    Saida,
    Retirada,
    Devolucao,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Movimentacao {
    pub id: Uuid,
    pub item_id: Uuid,
    pub tipo: TipoMovimentacao,
    pub quantidade: i32,
    pub usuario_id: Uuid,
    pub data: DateTime<Utc>,
    pub data_devolucao_prevista: Option<NaiveDate>,
    pub observacao: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegistrarMovimentacaoPayload {
    pub item_id: Uuid,

    pub tipo: TipoMovimentacao,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantidade: i32,

    pub data_devolucao_prevista: Option<NaiveDate>,

    pub observacao: Option<String>,
}

impl RegistrarMovimentacaoPayload {
    pub fn validate_consistency(&self) -> Result<(), ValidationError> {
        exigir_devolucao_para_retirada(self.tipo, self.data_devolucao_prevista)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AtualizarMovimentacaoPayload {
    pub tipo: TipoMovimentacao,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantidade: i32,

    pub data_devolucao_prevista: Option<NaiveDate>,

    pub observacao: Option<String>,
}

impl AtualizarMovimentacaoPayload {
    pub fn validate_consistency(&self) -> Result<(), ValidationError> {
        exigir_devolucao_para_retirada(self.tipo, self.data_devolucao_prevista)
    }
}

fn exigir_devolucao_para_retirada(
    tipo: TipoMovimentacao,
    data_devolucao_prevista: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if tipo == TipoMovimentacao::Retirada && data_devolucao_prevista.is_none() {
        let mut err = ValidationError::new("DevolucaoObrigatoria");
        err.message = Some(
            "Para retiradas temporárias é obrigatório informar a data prevista de devolução."
                .into(),
        );
        return Err(err);
    }
    Ok(())
}

// Filtros de listagem do histórico.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct FiltroMovimentacoes {
    pub tipo: Option<TipoMovimentacao>,
    pub item_id: Option<Uuid>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
}
