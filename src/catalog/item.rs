//! Itens do catálogo.

use serde::{Deserialize, Serialize};

use crate::{FeedError, FeedResult};

/// Identificador de um item de conteúdo.
pub type ItemId = u64;

/// Item ranqueável do catálogo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Id único dentro do catálogo.
    pub id: ItemId,

    /// Quão recente é o item, em `[0, 1]`.
    pub freshness: f64,

    /// Afinidade do público com o item, em `[0, 1]`.
    pub affinity: f64,

    /// Engajamento observado, em `[0, 1]`.
    pub engagement: f64,

    /// Texto exibido.
    pub text: String,
}

impl ContentItem {
    /// Cria um novo item.
    pub fn new(
        id: ItemId,
        freshness: f64,
        affinity: f64,
        engagement: f64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            freshness,
            affinity,
            engagement,
            text: text.into(),
        }
    }

    /// Verifica se cada atributo é um número finito em `[0, 1]`.
    pub fn validate(&self) -> FeedResult<()> {
        let features = [
            ("freshness", self.freshness),
            ("affinity", self.affinity),
            ("engagement", self.engagement),
        ];

        for (name, value) in features {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(FeedError::invalid_catalog(format!(
                    "item {}: {} must be within [0, 1] (got {})",
                    self.id, name, value
                )));
            }
        }

        Ok(())
    }
}
