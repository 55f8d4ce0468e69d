pub mod alertas;
pub mod fornecedores;
pub mod itens;
pub mod movimentacoes;
pub mod relatorios;
pub mod solicitacoes;
