// src/services/alerta_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ItemRepository,
    models::alerta::{
        ClassificacaoEstoque, RegistroStatus, RespostaAlertas, RespostaCriticos,
        RespostaReposicao, ResumoAlertas, StatusEstoque,
    },
    models::estoque::Item,
};

// Limites padrão aplicados a itens cadastrados sem mínimo/máximo próprios.
// Configuração explícita, carregada no AppState, nunca constante escondida.
#[derive(Debug, Clone)]
pub struct ParametrosEstoque {
    pub estoque_minimo_padrao: i32,
    pub estoque_maximo_padrao: i32,
    pub fracao_critica: f64,
}

impl Default for ParametrosEstoque {
    fn default() -> Self {
        Self {
            estoque_minimo_padrao: 300,
            estoque_maximo_padrao: 1000,
            fracao_critica: 0.5,
        }
    }
}

/// Classifica a saúde do estoque de um item.
///
/// Função pura sobre (quantidade, mínimo, máximo): sem efeitos, estável para
/// chamadas repetidas. A ordem de avaliação importa e é fixa: CRITICO e BAIXO
/// têm precedência sobre ALTO — um item zerado é CRITICO mesmo que o máximo
/// configurado seja patologicamente pequeno.
pub fn classificar(
    quantidade_atual: i32,
    estoque_minimo: i32,
    estoque_maximo: i32,
    parametros: &ParametrosEstoque,
) -> ClassificacaoEstoque {
    let minimo = if estoque_minimo > 0 {
        estoque_minimo
    } else {
        parametros.estoque_minimo_padrao
    };
    let maximo = if estoque_maximo > 0 {
        estoque_maximo
    } else {
        parametros.estoque_maximo_padrao
    };

    let percentual = if minimo == 0 {
        0.0
    } else {
        let bruto = f64::from(quantidade_atual) / f64::from(minimo) * 100.0;
        (bruto * 100.0).round() / 100.0
    };

    let limite_critico = f64::from(minimo) * parametros.fracao_critica;

    let status = if f64::from(quantidade_atual) < limite_critico {
        StatusEstoque::Critico
    } else if quantidade_atual < minimo {
        StatusEstoque::Baixo
    } else if quantidade_atual > maximo {
        StatusEstoque::Alto
    } else {
        StatusEstoque::Ok
    };

    let mensagem = match status {
        StatusEstoque::Critico => format!(
            "CRÍTICO: Estoque abaixo de {:.0}% do mínimo ({quantidade_atual}/{minimo})",
            parametros.fracao_critica * 100.0
        ),
        StatusEstoque::Baixo => {
            format!("BAIXO: Estoque abaixo do mínimo ({quantidade_atual}/{minimo})")
        }
        StatusEstoque::Alto => {
            format!("ALTO: Estoque acima do máximo ({quantidade_atual}/{maximo})")
        }
        StatusEstoque::Ok => format!("OK: Estoque dentro dos limites ({quantidade_atual})"),
    };

    let nivel_urgencia = match status {
        StatusEstoque::Critico => 3,
        StatusEstoque::Baixo => 2,
        StatusEstoque::Alto => 1,
        StatusEstoque::Ok => 0,
    };

    // Sugestão de reposição até o máximo, apenas quando falta estoque.
    let quantidade_reposicao_sugerida = match status {
        StatusEstoque::Critico | StatusEstoque::Baixo => (maximo - quantidade_atual).max(0),
        StatusEstoque::Alto | StatusEstoque::Ok => 0,
    };

    ClassificacaoEstoque {
        status,
        estoque_minimo: minimo,
        estoque_maximo: maximo,
        percentual,
        requer_acao: status != StatusEstoque::Ok,
        mensagem,
        nivel_urgencia,
        quantidade_reposicao_sugerida,
    }
}

fn montar_registro(item: &Item, c: ClassificacaoEstoque, incluir_reposicao: bool) -> RegistroStatus {
    RegistroStatus {
        status: c.status,
        item_id: item.id,
        item_codigo: item.codigo.clone(),
        item_descricao: item.descricao.clone(),
        quantidade_atual: item.quantidade_atual,
        estoque_minimo: c.estoque_minimo,
        estoque_maximo: c.estoque_maximo,
        percentual: c.percentual,
        requer_acao: c.requer_acao,
        mensagem: c.mensagem,
        nivel_urgencia: incluir_reposicao.then_some(c.nivel_urgencia),
        quantidade_reposicao_sugerida: incluir_reposicao
            .then_some(c.quantidade_reposicao_sugerida),
    }
}

#[derive(Clone)]
pub struct AlertaService {
    item_repo: ItemRepository,
    parametros: ParametrosEstoque,
}

impl AlertaService {
    pub fn new(item_repo: ItemRepository, parametros: ParametrosEstoque) -> Self {
        Self {
            item_repo,
            parametros,
        }
    }

    // Feed completo de alertas: todos os itens cuja classificação pede ação,
    // com o resumo para o badge do topo.
    pub async fn alertas<'e, E>(&self, executor: E) -> Result<RespostaAlertas, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let itens = self.item_repo.listar(executor).await?;

        let mut resumo = ResumoAlertas::default();
        let mut alertas = Vec::new();

        for item in &itens {
            let classificacao = classificar(
                item.quantidade_atual,
                item.estoque_minimo,
                item.estoque_maximo,
                &self.parametros,
            );
            if !classificacao.requer_acao {
                continue;
            }

            resumo.total_alertas += 1;
            match classificacao.status {
                StatusEstoque::Critico => resumo.criticos += 1,
                StatusEstoque::Baixo => resumo.baixos += 1,
                StatusEstoque::Alto => resumo.altos += 1,
                StatusEstoque::Ok => {}
            }
            alertas.push(montar_registro(item, classificacao, false));
        }

        Ok(RespostaAlertas { resumo, alertas })
    }

    pub async fn status_item<'e, E>(
        &self,
        executor: E,
        item_id: Uuid,
    ) -> Result<RegistroStatus, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = self
            .item_repo
            .buscar(executor, item_id)
            .await?
            .ok_or(AppError::ItemNaoEncontrado)?;

        let classificacao = classificar(
            item.quantidade_atual,
            item.estoque_minimo,
            item.estoque_maximo,
            &self.parametros,
        );
        Ok(montar_registro(&item, classificacao, false))
    }

    pub async fn itens_criticos<'e, E>(&self, executor: E) -> Result<RespostaCriticos, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let itens = self.item_repo.listar(executor).await?;

        let itens_criticos: Vec<RegistroStatus> = itens
            .iter()
            .filter_map(|item| {
                let classificacao = classificar(
                    item.quantidade_atual,
                    item.estoque_minimo,
                    item.estoque_maximo,
                    &self.parametros,
                );
                (classificacao.status == StatusEstoque::Critico)
                    .then(|| montar_registro(item, classificacao, false))
            })
            .collect();

        Ok(RespostaCriticos {
            total: itens_criticos.len(),
            itens_criticos,
        })
    }

    // Itens que precisam de reposição (crítico ou baixo), mais urgentes
    // primeiro. Aqui os registros carregam nivel_urgencia e a quantidade
    // sugerida para repor até o máximo.
    pub async fn itens_reposicao<'e, E>(&self, executor: E) -> Result<RespostaReposicao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let itens = self.item_repo.listar(executor).await?;

        let mut em_reposicao: Vec<RegistroStatus> = itens
            .iter()
            .filter_map(|item| {
                let classificacao = classificar(
                    item.quantidade_atual,
                    item.estoque_minimo,
                    item.estoque_maximo,
                    &self.parametros,
                );
                matches!(
                    classificacao.status,
                    StatusEstoque::Critico | StatusEstoque::Baixo
                )
                .then(|| montar_registro(item, classificacao, true))
            })
            .collect();

        em_reposicao.sort_by(|a, b| b.nivel_urgencia.cmp(&a.nivel_urgencia));

        Ok(RespostaReposicao {
            total: em_reposicao.len(),
            itens: em_reposicao,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parametros() -> ParametrosEstoque {
        ParametrosEstoque::default()
    }

    // Valores-semente com min=300/max=1000: a ordem de avaliação
    // (crítico antes de baixo antes de alto) é parte do contrato.
    #[rstest]
    #[case(100, StatusEstoque::Critico)]
    #[case(149, StatusEstoque::Critico)]
    #[case(150, StatusEstoque::Baixo)]
    #[case(250, StatusEstoque::Baixo)]
    #[case(300, StatusEstoque::Ok)]
    #[case(500, StatusEstoque::Ok)]
    #[case(1000, StatusEstoque::Ok)]
    #[case(1001, StatusEstoque::Alto)]
    #[case(1500, StatusEstoque::Alto)]
    fn classificacao_por_faixa(#[case] quantidade: i32, #[case] esperado: StatusEstoque) {
        let c = classificar(quantidade, 300, 1000, &parametros());
        assert_eq!(c.status, esperado);
        assert_eq!(c.requer_acao, esperado != StatusEstoque::Ok);
    }

    #[rstest]
    #[case(100, 900)]
    #[case(250, 750)]
    #[case(500, 0)]
    #[case(1500, 0)]
    fn sugestao_de_reposicao(#[case] quantidade: i32, #[case] esperado: i32) {
        let c = classificar(quantidade, 300, 1000, &parametros());
        assert_eq!(c.quantidade_reposicao_sugerida, esperado);
    }

    #[test]
    fn item_zerado_e_critico_mesmo_com_maximo_minusculo() {
        // A precedência protege contra um máximo patológico menor que o
        // mínimo: nunca sai ALTO para um item zerado.
        let c = classificar(0, 300, 10, &parametros());
        assert_eq!(c.status, StatusEstoque::Critico);
    }

    #[test]
    fn limites_zerados_usam_os_padroes() {
        let c = classificar(200, 0, 0, &parametros());
        assert_eq!(c.estoque_minimo, 300);
        assert_eq!(c.estoque_maximo, 1000);
        assert_eq!(c.status, StatusEstoque::Baixo);
    }

    #[test]
    fn percentual_com_minimo_zero_nao_divide() {
        let p = ParametrosEstoque {
            estoque_minimo_padrao: 0,
            estoque_maximo_padrao: 1000,
            fracao_critica: 0.5,
        };
        let c = classificar(10, 0, 1000, &p);
        assert_eq!(c.percentual, 0.0);
    }

    #[test]
    fn percentual_em_relacao_ao_minimo() {
        let c = classificar(150, 300, 1000, &parametros());
        assert_eq!(c.percentual, 50.0);
        let c = classificar(100, 300, 1000, &parametros());
        assert_eq!(c.percentual, 33.33);
    }

    #[test]
    fn classificar_e_idempotente() {
        let a = classificar(123, 300, 1000, &parametros());
        let b = classificar(123, 300, 1000, &parametros());
        assert_eq!(a, b);
    }

    #[test]
    fn urgencia_ordena_critico_baixo_alto_ok() {
        let mut niveis: Vec<(StatusEstoque, u8)> = [0, 250, 1500, 500]
            .into_iter()
            .map(|q| {
                let c = classificar(q, 300, 1000, &parametros());
                (c.status, c.nivel_urgencia)
            })
            .collect();
        niveis.sort_by(|a, b| b.1.cmp(&a.1));

        let ordem: Vec<StatusEstoque> = niveis.into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            ordem,
            vec![
                StatusEstoque::Critico,
                StatusEstoque::Baixo,
                StatusEstoque::Alto,
                StatusEstoque::Ok,
            ]
        );
    }

    #[test]
    fn mensagens_seguem_o_formato_da_ui() {
        let c = classificar(100, 300, 1000, &parametros());
        assert_eq!(c.mensagem, "CRÍTICO: Estoque abaixo de 50% do mínimo (100/300)");
        let c = classificar(250, 300, 1000, &parametros());
        assert_eq!(c.mensagem, "BAIXO: Estoque abaixo do mínimo (250/300)");
        let c = classificar(1500, 300, 1000, &parametros());
        assert_eq!(c.mensagem, "ALTO: Estoque acima do máximo (1500/1000)");
        let c = classificar(500, 300, 1000, &parametros());
        assert_eq!(c.mensagem, "OK: Estoque dentro dos limites (500)");
    }
}
