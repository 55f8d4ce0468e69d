pub mod fornecedor_repo;
pub mod item_repo;
pub mod movimentacao_repo;
pub mod solicitacao_repo;

pub use fornecedor_repo::FornecedorRepository;
pub use item_repo::ItemRepository;
pub use movimentacao_repo::MovimentacaoRepository;
pub use solicitacao_repo::SolicitacaoRepository;
