// src/models/solicitacao.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_solicitacao", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoSolicitacao {
    Consumo,
    Temporaria,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_solicitacao", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusSolicitacao {
    Pendente,
    Aprovada,
    Atendida,
    Cancelada,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Solicitacao {
    pub id: Uuid,
    pub item_id: Uuid,
    pub solicitante_id: Uuid,
    pub quantidade: i32,
    pub tipo: TipoSolicitacao,
    pub status: StatusSolicitacao,
    pub data_solicitacao: DateTime<Utc>,
    pub data_atendimento: Option<DateTime<Utc>>,
    pub data_devolucao_prevista: Option<NaiveDate>,
    pub observacao: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CriarSolicitacaoPayload {
    pub item_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantidade: i32,

    pub tipo: TipoSolicitacao,

    pub data_devolucao_prevista: Option<NaiveDate>,

    pub observacao: Option<String>,
}

impl CriarSolicitacaoPayload {
    pub fn validate_consistency(&self) -> Result<(), ValidationError> {
        if self.tipo == TipoSolicitacao::Temporaria && self.data_devolucao_prevista.is_none() {
            let mut err = ValidationError::new("DevolucaoObrigatoria");
            err.message = Some(
                "Para solicitações temporárias é obrigatório informar a data prevista de devolução."
                    .into(),
            );
            return Err(err);
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct FiltroSolicitacoes {
    pub status: Option<StatusSolicitacao>,
    pub item_id: Option<Uuid>,
}
