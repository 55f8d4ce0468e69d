pub mod alerta_service;
pub mod estoque_service;
pub mod relatorio_service;
pub mod solicitacao_service;

pub use alerta_service::AlertaService;
pub use estoque_service::EstoqueService;
pub use relatorio_service::RelatorioService;
pub use solicitacao_service::SolicitacaoService;
