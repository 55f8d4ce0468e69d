// src/models/alerta.rs

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Status derivado de saúde do estoque. Nunca é persistido: é recalculado a
// cada leitura a partir de quantidade_atual e dos limites do item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusEstoque {
    Critico,
    Baixo,
    Ok,
    Alto,
}

// Saída do classificador puro, ainda sem identidade de item.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificacaoEstoque {
    pub status: StatusEstoque,
    // Limites efetivos (após substituição pelos padrões configurados).
    pub estoque_minimo: i32,
    pub estoque_maximo: i32,
    pub percentual: f64,
    pub requer_acao: bool,
    pub mensagem: String,
    pub nivel_urgencia: u8,
    pub quantidade_reposicao_sugerida: i32,
}

// Registro de status no formato do contrato JSON. nivel_urgencia e
// quantidade_reposicao_sugerida só aparecem na lista de reposição.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegistroStatus {
    pub status: StatusEstoque,
    pub item_id: Uuid,
    pub item_codigo: String,
    pub item_descricao: String,
    pub quantidade_atual: i32,
    pub estoque_minimo: i32,
    pub estoque_maximo: i32,
    pub percentual: f64,
    pub requer_acao: bool,
    pub mensagem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nivel_urgencia: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantidade_reposicao_sugerida: Option<i32>,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct ResumoAlertas {
    pub total_alertas: usize,
    pub criticos: usize,
    pub baixos: usize,
    pub altos: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RespostaAlertas {
    pub resumo: ResumoAlertas,
    pub alertas: Vec<RegistroStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RespostaCriticos {
    pub total: usize,
    pub itens_criticos: Vec<RegistroStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RespostaReposicao {
    pub total: usize,
    pub itens: Vec<RegistroStatus>,
}
