// src/services/solicitacao_service.rs

use chrono::Utc;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SolicitacaoRepository,
    models::estoque::TipoMovimentacao,
    models::solicitacao::{
        CriarSolicitacaoPayload, FiltroSolicitacoes, Solicitacao, StatusSolicitacao,
        TipoSolicitacao,
    },
    services::EstoqueService,
};

// Máquina de status: PENDENTE -> APROVADA -> ATENDIDA, com cancelamento
// possível enquanto não atendida.
fn validar_transicao(
    atual: StatusSolicitacao,
    destino: StatusSolicitacao,
) -> Result<(), AppError> {
    let permitida = match destino {
        StatusSolicitacao::Aprovada => atual == StatusSolicitacao::Pendente,
        StatusSolicitacao::Atendida | StatusSolicitacao::Cancelada => matches!(
            atual,
            StatusSolicitacao::Pendente | StatusSolicitacao::Aprovada
        ),
        StatusSolicitacao::Pendente => false,
    };

    if permitida {
        Ok(())
    } else {
        Err(AppError::TransicaoSolicitacaoInvalida(format!(
            "Solicitação {atual:?} não pode passar para {destino:?}."
        )))
    }
}

// Atender uma solicitação vira movimentação no livro: consumo sai de vez,
// retirada temporária sai com data prevista de devolução.
fn tipo_de_movimento(tipo: TipoSolicitacao) -> TipoMovimentacao {
    match tipo {
        TipoSolicitacao::Consumo => TipoMovimentacao::Saida,
        TipoSolicitacao::Temporaria => TipoMovimentacao::Retirada,
    }
}

#[derive(Clone)]
pub struct SolicitacaoService {
    solicitacao_repo: SolicitacaoRepository,
    estoque_service: EstoqueService,
}

impl SolicitacaoService {
    pub fn new(solicitacao_repo: SolicitacaoRepository, estoque_service: EstoqueService) -> Self {
        Self {
            solicitacao_repo,
            estoque_service,
        }
    }

    pub async fn criar<'e, E>(
        &self,
        executor: E,
        solicitante_id: Uuid,
        payload: &CriarSolicitacaoPayload,
    ) -> Result<Solicitacao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let solicitacao = self
            .solicitacao_repo
            .inserir(
                executor,
                payload.item_id,
                solicitante_id,
                payload.quantidade,
                payload.tipo,
                payload.data_devolucao_prevista,
                payload.observacao.as_deref(),
            )
            .await?;
        tracing::info!(id = %solicitacao.id, "Solicitação registrada");
        Ok(solicitacao)
    }

    pub async fn buscar<'e, E>(&self, executor: E, id: Uuid) -> Result<Solicitacao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.solicitacao_repo
            .buscar(executor, id)
            .await?
            .ok_or(AppError::SolicitacaoNaoEncontrada)
    }

    pub async fn listar<'e, E>(
        &self,
        executor: E,
        filtro: &FiltroSolicitacoes,
    ) -> Result<Vec<Solicitacao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.solicitacao_repo.listar(executor, filtro).await
    }

    pub async fn aprovar<'e, E>(&self, executor: E, id: Uuid) -> Result<Solicitacao, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let solicitacao = self
            .solicitacao_repo
            .buscar_para_atualizacao(&mut *tx, id)
            .await?
            .ok_or(AppError::SolicitacaoNaoEncontrada)?;

        validar_transicao(solicitacao.status, StatusSolicitacao::Aprovada)?;

        let atualizada = self
            .solicitacao_repo
            .atualizar_status(&mut *tx, id, StatusSolicitacao::Aprovada, None)
            .await?;

        tx.commit().await?;
        Ok(atualizada)
    }

    // Atendimento: transição de status + movimentação de saída/retirada na
    // mesma transação. Se o estoque não cobrir a quantidade, nada muda.
    pub async fn atender<'e, E>(
        &self,
        executor: E,
        usuario_id: Uuid,
        id: Uuid,
    ) -> Result<Solicitacao, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let solicitacao = self
            .solicitacao_repo
            .buscar_para_atualizacao(&mut *tx, id)
            .await?
            .ok_or(AppError::SolicitacaoNaoEncontrada)?;

        validar_transicao(solicitacao.status, StatusSolicitacao::Atendida)?;

        let observacao = format!("Atendimento da solicitação {id}");
        self.estoque_service
            .registrar_movimentacao(
                &mut *tx,
                usuario_id,
                solicitacao.item_id,
                tipo_de_movimento(solicitacao.tipo),
                solicitacao.quantidade,
                solicitacao.data_devolucao_prevista,
                Some(&observacao),
            )
            .await?;

        let atualizada = self
            .solicitacao_repo
            .atualizar_status(&mut *tx, id, StatusSolicitacao::Atendida, Some(Utc::now()))
            .await?;

        tx.commit().await?;
        tracing::info!(id = %id, "Solicitação atendida");
        Ok(atualizada)
    }

    pub async fn cancelar<'e, E>(&self, executor: E, id: Uuid) -> Result<Solicitacao, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let solicitacao = self
            .solicitacao_repo
            .buscar_para_atualizacao(&mut *tx, id)
            .await?
            .ok_or(AppError::SolicitacaoNaoEncontrada)?;

        validar_transicao(solicitacao.status, StatusSolicitacao::Cancelada)?;

        let atualizada = self
            .solicitacao_repo
            .atualizar_status(&mut *tx, id, StatusSolicitacao::Cancelada, None)
            .await?;

        tx.commit().await?;
        Ok(atualizada)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pendente_pode_ser_aprovada_atendida_ou_cancelada() {
        assert!(validar_transicao(StatusSolicitacao::Pendente, StatusSolicitacao::Aprovada).is_ok());
        assert!(validar_transicao(StatusSolicitacao::Pendente, StatusSolicitacao::Atendida).is_ok());
        assert!(
            validar_transicao(StatusSolicitacao::Pendente, StatusSolicitacao::Cancelada).is_ok()
        );
    }

    #[test]
    fn aprovada_nao_volta_nem_reaprova() {
        assert!(
            validar_transicao(StatusSolicitacao::Aprovada, StatusSolicitacao::Aprovada).is_err()
        );
        assert!(
            validar_transicao(StatusSolicitacao::Aprovada, StatusSolicitacao::Pendente).is_err()
        );
        assert!(validar_transicao(StatusSolicitacao::Aprovada, StatusSolicitacao::Atendida).is_ok());
        assert!(
            validar_transicao(StatusSolicitacao::Aprovada, StatusSolicitacao::Cancelada).is_ok()
        );
    }

    #[test]
    fn atendida_e_cancelada_sao_terminais() {
        for origem in [StatusSolicitacao::Atendida, StatusSolicitacao::Cancelada] {
            for destino in [
                StatusSolicitacao::Pendente,
                StatusSolicitacao::Aprovada,
                StatusSolicitacao::Atendida,
                StatusSolicitacao::Cancelada,
            ] {
                assert!(validar_transicao(origem, destino).is_err());
            }
        }
    }

    #[test]
    fn consumo_sai_e_temporaria_retira() {
        assert_eq!(
            tipo_de_movimento(TipoSolicitacao::Consumo),
            TipoMovimentacao::Saida
        );
        assert_eq!(
            tipo_de_movimento(TipoSolicitacao::Temporaria),
            TipoMovimentacao::Retirada
        );
    }
}
