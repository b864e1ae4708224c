//! Funções de score.

use crate::catalog::ContentItem;
use crate::types::config::ScoringWeights;
use crate::{FeedError, FeedResult};

/// Calcula o score de um item de conteúdo.
///
/// Implementações devem ser determinísticas e sem efeitos colaterais: o
/// cache guarda o resultado até a entrada ser removida.
pub trait Scorer: Send + Sync {
    /// Nome do scorer, usado nos logs.
    fn name(&self) -> &str;

    /// Retorna o score de `item`. Maior vem primeiro.
    fn score(&self, item: &ContentItem) -> FeedResult<f64>;
}

/// Soma ponderada de freshness, affinity e engagement.
#[derive(Debug, Clone, Default)]
pub struct LinearScorer {
    weights: ScoringWeights,
}

impl LinearScorer {
    /// Cria o scorer depois de validar os pesos.
    pub fn new(weights: ScoringWeights) -> FeedResult<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }
}

impl Scorer for LinearScorer {
    fn name(&self) -> &str {
        "linear"
    }

    fn score(&self, item: &ContentItem) -> FeedResult<f64> {
        let w = &self.weights;
        let score =
            w.freshness * item.freshness + w.affinity * item.affinity + w.engagement * item.engagement;

        if !score.is_finite() {
            return Err(FeedError::compute(format!(
                "item {} produced a non-finite score",
                item.id
            )));
        }

        Ok(score)
    }
}
