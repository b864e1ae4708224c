//! Tipos de request.

use serde::{Deserialize, Serialize};

/// Id de usuário usado quando o request não informa um.
pub const GUEST_USER_ID: &str = "guest";

/// Query string de `GET /feed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedQuery {
    /// Identificador do usuário, usado sem alteração como chave do cache.
    pub user_id: Option<String>,
}

impl FeedQuery {
    /// Cria uma query para o usuário.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// Retorna o id do usuário, ou [`GUEST_USER_ID`] quando ausente.
    ///
    /// String vazia é um valor presente e é retornada como está.
    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or(GUEST_USER_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_user_defaults_to_guest() {
        assert_eq!(FeedQuery::default().user_id(), "guest");
    }

    #[test]
    fn test_user_id_is_not_normalized() {
        assert_eq!(FeedQuery::for_user("Test").user_id(), "Test");
        assert_eq!(FeedQuery::for_user(" test ").user_id(), " test ");
        assert_eq!(FeedQuery::for_user("").user_id(), "");
    }
}
