// src/models/relatorio.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Linha do livro de movimentações já valorada pelo item, insumo do replay
// de valoração histórica.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MovimentoValorado {
    pub tipo: crate::models::estoque::TipoMovimentacao,
    pub quantidade: i32,
    pub valor_unitario: Decimal,
}

// Linha de detalhamento por item (posição atual do cadastro).
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemRelatorio {
    pub codigo: String,
    pub descricao: String,
    pub categoria: Option<String>,
    pub quantidade_atual: i32,
    pub valor_unitario: Decimal,
    pub valor_total: Decimal,
}

// Relatório de inventário periódico: a identidade
// estoque_inicial + compras_liquidas - estoque_final == custo_uso
// fecha de forma exata em Decimal.
#[derive(Debug, Serialize, ToSchema)]
pub struct RelatorioInventarioPeriodico {
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub categoria: Option<String>,
    pub estoque_inicial: Decimal,
    pub compras_liquidas: Decimal,
    pub estoque_disponivel: Decimal,
    pub estoque_final: Decimal,
    pub custo_uso: Decimal,
    pub itens: Vec<ItemRelatorio>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ParametrosRelatorio {
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub categoria: Option<String>,
}
