//! Tipos de erro do feedrank.

use thiserror::Error;

use crate::catalog::ItemId;

/// Tipo de resultado padrão do feedrank.
pub type FeedResult<T> = Result<T, FeedError>;

/// Erros possíveis no pipeline de ranking e na sua infraestrutura.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catálogo inválido: {0}")]
    InvalidCatalog(String),

    #[error("Item {0} duplicado no catálogo")]
    DuplicateItem(ItemId),

    #[error("Falha no cálculo do ranking: {0}")]
    ComputeFailure(String),

    #[error("Ranking referencia o item {0}, que não está no catálogo")]
    CatalogInconsistency(ItemId),

    #[error("Erro no servidor HTTP: {0}")]
    Server(String),
}

impl FeedError {
    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Cria uma falha de cálculo.
    pub fn compute<S: Into<String>>(msg: S) -> Self {
        Self::ComputeFailure(msg.into())
    }

    /// Cria um erro de validação do catálogo.
    pub fn invalid_catalog<S: Into<String>>(msg: S) -> Self {
        Self::InvalidCatalog(msg.into())
    }
}
