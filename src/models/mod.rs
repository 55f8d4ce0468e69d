pub mod alerta;
pub mod auth;
pub mod estoque;
pub mod relatorio;
pub mod solicitacao;
