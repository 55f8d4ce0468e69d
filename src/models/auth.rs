// src/models/auth.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Estrutura de dados ("claims") dentro do JWT emitido pelo serviço de
// identidade. Este backend só valida e lê; nunca emite tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // ID do usuário autenticado
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

// Identidade verificada, disponível nos handlers via extrator.
#[derive(Debug, Clone)]
pub struct UsuarioAutenticado {
    pub id: Uuid,
}
