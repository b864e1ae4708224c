//! Tipos de resposta.

use serde::{Deserialize, Serialize};

use crate::catalog::ContentItem;

/// Corpo de `GET /feed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedResponse {
    /// Id do usuário para quem o feed foi ranqueado, devolvido como veio.
    pub user_id: String,

    /// Itens do catálogo na ordem do ranking.
    pub posts: Vec<ContentItem>,
}

impl FeedResponse {
    /// Ids dos posts, na ordem da resposta.
    pub fn post_ids(&self) -> Vec<crate::catalog::ItemId> {
        self.posts.iter().map(|p| p.id).collect()
    }
}

/// Corpo de `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Corpo retornado em requests com falha.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
