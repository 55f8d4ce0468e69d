// src/services/relatorio_service.rs

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::{ItemRepository, MovimentacaoRepository},
    models::estoque::TipoMovimentacao,
    models::relatorio::{ItemRelatorio, MovimentoValorado, RelatorioInventarioPeriodico},
};

// ---
// Replay de valoração histórica
// ---
// O valor do estoque em uma data de corte é reconstruído dobrando o livro de
// movimentações, nunca lido de quantidade_atual: o replay continua correto
// mesmo que o cache materializado tenha divergido.

/// Contribuição (com sinal) de um movimento para o valor do estoque.
pub fn valor_movimento(tipo: TipoMovimentacao, quantidade: i32, valor_unitario: Decimal) -> Decimal {
    let valor = Decimal::from(quantidade) * valor_unitario;
    match tipo {
        TipoMovimentacao::Entrada | TipoMovimentacao::Devolucao => valor,
        TipoMovimentacao::Saida | TipoMovimentacao::Retirada => -valor,
    }
}

/// Fold do livro: soma das contribuições em Decimal, sem ponto flutuante.
pub fn somar_movimentos(movimentos: &[MovimentoValorado]) -> Decimal {
    movimentos
        .iter()
        .map(|m| valor_movimento(m.tipo, m.quantidade, m.valor_unitario))
        .sum()
}

// Último instante do dia (23:59:59.999999), o corte usado pela valoração.
fn fim_do_dia(data: NaiveDate) -> Result<DateTime<Utc>, AppError> {
    let proximo_dia = data.succ_opt().ok_or_else(|| {
        AppError::PeriodoInvalido("Data fora do intervalo suportado.".to_string())
    })?;
    let meia_noite = proximo_dia
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::PeriodoInvalido("Data inválida.".to_string()))?;
    Ok(meia_noite.and_utc() - Duration::microseconds(1))
}

#[derive(Clone)]
pub struct RelatorioService {
    item_repo: ItemRepository,
    movimentacao_repo: MovimentacaoRepository,
}

impl RelatorioService {
    pub fn new(item_repo: ItemRepository, movimentacao_repo: MovimentacaoRepository) -> Self {
        Self {
            item_repo,
            movimentacao_repo,
        }
    }

    /// Valor monetário do estoque no fim do dia de `data_corte`,
    /// opcionalmente restrito a uma categoria.
    pub async fn valor_estoque_em<'e, E>(
        &self,
        executor: E,
        data_corte: NaiveDate,
        categoria: Option<&str>,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let corte = fim_do_dia(data_corte)?;
        let movimentos = self
            .movimentacao_repo
            .listar_valorados_ate(executor, corte, categoria)
            .await?;
        Ok(somar_movimentos(&movimentos))
    }

    // Relatório de inventário periódico. Roda em uma transação com snapshot
    // único do livro; por isso a identidade
    // inicial + compras - final == custo fecha exata.
    pub async fn relatorio_inventario_periodico<'e, E>(
        &self,
        executor: E,
        data_inicio: NaiveDate,
        data_fim: NaiveDate,
        categoria: Option<&str>,
    ) -> Result<RelatorioInventarioPeriodico, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if data_inicio > data_fim {
            return Err(AppError::PeriodoInvalido(
                "A data inicial não pode ser posterior à data final.".to_string(),
            ));
        }

        let dia_anterior = data_inicio.pred_opt().ok_or_else(|| {
            AppError::PeriodoInvalido("Data fora do intervalo suportado.".to_string())
        })?;

        let mut tx = executor.begin().await?;

        // As três leituras do livro precisam enxergar o mesmo snapshot para
        // a identidade fechar; read committed daria um snapshot por consulta.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        // Estoque inicial: fim do dia anterior ao início do período.
        let estoque_inicial = self
            .valor_estoque_em(&mut *tx, dia_anterior, categoria)
            .await?;

        // Compras (entradas) dentro do período.
        let entradas = self
            .movimentacao_repo
            .listar_entradas_no_periodo(&mut *tx, data_inicio, data_fim, categoria)
            .await?;
        let compras_liquidas: Decimal = entradas
            .iter()
            .map(|m| Decimal::from(m.quantidade) * m.valor_unitario)
            .sum();

        let estoque_final = self.valor_estoque_em(&mut *tx, data_fim, categoria).await?;

        let itens = self
            .item_repo
            .listar_para_relatorio(&mut *tx, categoria)
            .await?;

        tx.commit().await?;

        let estoque_disponivel = estoque_inicial + compras_liquidas;
        // Pode ser negativo quando o período viu devoluções além das compras
        // registradas; é crescimento líquido, não erro.
        let custo_uso = estoque_disponivel - estoque_final;

        let itens = itens
            .into_iter()
            .map(|item| ItemRelatorio {
                valor_total: Decimal::from(item.quantidade_atual) * item.valor_unitario,
                codigo: item.codigo,
                descricao: item.descricao,
                categoria: item.categoria,
                quantidade_atual: item.quantidade_atual,
                valor_unitario: item.valor_unitario,
            })
            .collect();

        Ok(RelatorioInventarioPeriodico {
            data_inicio,
            data_fim,
            categoria: categoria.map(str::to_owned),
            estoque_inicial,
            compras_liquidas,
            estoque_disponivel,
            estoque_final,
            custo_uso,
            itens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn mov(tipo: TipoMovimentacao, quantidade: i32, valor_unitario: Decimal) -> MovimentoValorado {
        MovimentoValorado {
            tipo,
            quantidade,
            valor_unitario,
        }
    }

    #[test]
    fn entradas_e_devolucoes_somam_saidas_e_retiradas_subtraem() {
        assert_eq!(
            valor_movimento(TipoMovimentacao::Entrada, 10, dec!(2.50)),
            dec!(25.00)
        );
        assert_eq!(
            valor_movimento(TipoMovimentacao::Devolucao, 3, dec!(1.10)),
            dec!(3.30)
        );
        assert_eq!(
            valor_movimento(TipoMovimentacao::Saida, 4, dec!(2.00)),
            dec!(-8.00)
        );
        assert_eq!(
            valor_movimento(TipoMovimentacao::Retirada, 1, dec!(9.99)),
            dec!(-9.99)
        );
    }

    #[test]
    fn fold_do_livro_e_exato() {
        let movimentos = vec![
            mov(TipoMovimentacao::Entrada, 100, dec!(0.10)),
            mov(TipoMovimentacao::Saida, 30, dec!(0.10)),
            mov(TipoMovimentacao::Retirada, 20, dec!(0.10)),
            mov(TipoMovimentacao::Devolucao, 20, dec!(0.10)),
        ];
        assert_eq!(somar_movimentos(&movimentos), dec!(7.00));
    }

    #[test]
    fn fold_vazio_e_zero() {
        assert_eq!(somar_movimentos(&[]), Decimal::ZERO);
    }

    fn tipo_arbitrario() -> impl Strategy<Value = TipoMovimentacao> {
        prop_oneof![
            Just(TipoMovimentacao::Entrada),
            Just(TipoMovimentacao::Saida),
            Just(TipoMovimentacao::Retirada),
            Just(TipoMovimentacao::Devolucao),
        ]
    }

    fn movimento_arbitrario() -> impl Strategy<Value = MovimentoValorado> {
        (tipo_arbitrario(), 1i32..500, 0i64..100_000).prop_map(|(tipo, quantidade, centavos)| {
            mov(tipo, quantidade, Decimal::new(centavos, 2))
        })
    }

    proptest! {
        // Identidade do relatório: inicial + compras - final == custo, exata
        // em Decimal para qualquer divisão do livro em antes/durante.
        #[test]
        fn identidade_do_periodo_fecha_exata(
            antes in proptest::collection::vec(movimento_arbitrario(), 0..40),
            durante in proptest::collection::vec(movimento_arbitrario(), 0..40),
        ) {
            let estoque_inicial = somar_movimentos(&antes);

            let compras: Decimal = durante
                .iter()
                .filter(|m| m.tipo == TipoMovimentacao::Entrada)
                .map(|m| Decimal::from(m.quantidade) * m.valor_unitario)
                .sum();

            // Estoque final = replay completo até o fim do período.
            let livro_completo: Vec<MovimentoValorado> =
                antes.iter().chain(durante.iter()).cloned().collect();
            let estoque_final = somar_movimentos(&livro_completo);

            let disponivel = estoque_inicial + compras;
            let custo_uso = disponivel - estoque_final;

            prop_assert_eq!(estoque_inicial + compras - estoque_final, custo_uso);

            // O custo de uso equivale ao consumo líquido do período:
            // saídas + retiradas - devoluções, valorados.
            let consumo: Decimal = durante
                .iter()
                .map(|m| match m.tipo {
                    TipoMovimentacao::Saida | TipoMovimentacao::Retirada => {
                        Decimal::from(m.quantidade) * m.valor_unitario
                    }
                    TipoMovimentacao::Devolucao => {
                        -(Decimal::from(m.quantidade) * m.valor_unitario)
                    }
                    TipoMovimentacao::Entrada => Decimal::ZERO,
                })
                .sum();
            prop_assert_eq!(custo_uso, consumo);
        }
    }

    // Devoluções além das compras: custo de uso negativo é esperado.
    #[test]
    fn crescimento_liquido_da_custo_negativo() {
        let antes = vec![mov(TipoMovimentacao::Entrada, 10, dec!(5.00))];
        let durante = vec![mov(TipoMovimentacao::Devolucao, 4, dec!(5.00))];

        let estoque_inicial = somar_movimentos(&antes);
        let compras = Decimal::ZERO;
        let livro: Vec<MovimentoValorado> =
            antes.iter().chain(durante.iter()).cloned().collect();
        let estoque_final = somar_movimentos(&livro);

        let custo_uso = estoque_inicial + compras - estoque_final;
        assert_eq!(custo_uso, dec!(-20.00));
    }
}
