//! Cálculo do ranking sobre o catálogo.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::catalog::{Catalog, ItemId};
use crate::FeedResult;

use super::scorer::Scorer;

/// Ids ordenados produzidos por um cálculo de ranking.
///
/// Clone barato; a sequência de ids nunca é alterada.
#[derive(Clone, PartialEq, Eq)]
pub struct RankedResult(Arc<[ItemId]>);

impl RankedResult {
    pub fn ids(&self) -> &[ItemId] {
        &self.0
    }

    /// Verdadeiro se os dois valores compartilham a mesma alocação.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Vec<ItemId>> for RankedResult {
    fn from(ids: Vec<ItemId>) -> Self {
        Self(ids.into())
    }
}

impl Deref for RankedResult {
    type Target = [ItemId];

    fn deref(&self) -> &[ItemId] {
        &self.0
    }
}

impl fmt::Debug for RankedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Pontua um catálogo e ordena por score decrescente.
#[derive(Clone)]
pub struct Ranker {
    scorer: Arc<dyn Scorer>,
}

impl Ranker {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Ranqueia todos os itens de `catalog`.
    ///
    /// Scores iguais mantêm a ordem do catálogo. Qualquer erro de score
    /// interrompe o cálculo e é retornado sem alteração.
    pub fn rank(&self, catalog: &Catalog) -> FeedResult<RankedResult> {
        let mut scored: Vec<(f64, ItemId)> = catalog
            .items()
            .iter()
            .map(|item| self.scorer.score(item).map(|score| (score, item.id)))
            .collect::<FeedResult<_>>()?;

        // sort_by é estável
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        tracing::trace!(
            scorer = self.scorer.name(),
            items = scored.len(),
            "Ranking pass complete"
        );

        Ok(scored.into_iter().map(|(_, id)| id).collect::<Vec<_>>().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContentItem;
    use crate::scoring::LinearScorer;
    use crate::{FeedError, FeedResult};

    fn ranker() -> Ranker {
        Ranker::new(Arc::new(LinearScorer::default()))
    }

    struct FailingScorer;

    impl Scorer for FailingScorer {
        fn name(&self) -> &str {
            "failing"
        }

        fn score(&self, item: &ContentItem) -> FeedResult<f64> {
            Err(FeedError::compute(format!("cannot score {}", item.id)))
        }
    }

    #[test]
    fn test_demo_catalog_order() {
        let ranked = ranker().rank(&Catalog::demo().unwrap()).unwrap();
        assert_eq!(ranked.ids(), &[1, 3, 2]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let catalog = Catalog::demo().unwrap();
        let first = ranker().rank(&catalog).unwrap();

        for _ in 0..10 {
            assert_eq!(ranker().rank(&catalog).unwrap(), first);
        }
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            ContentItem::new(7, 0.2, 0.2, 0.2, "low"),
            ContentItem::new(4, 0.5, 0.5, 0.5, "tie-a"),
            ContentItem::new(9, 0.9, 0.9, 0.9, "high"),
            ContentItem::new(2, 0.5, 0.5, 0.5, "tie-b"),
            ContentItem::new(5, 0.5, 0.5, 0.5, "tie-c"),
        ])
        .unwrap();

        let ranked = ranker().rank(&catalog).unwrap();
        assert_eq!(ranked.ids(), &[9, 4, 2, 5, 7]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        let ranked = ranker().rank(&catalog).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_scoring_failure_propagates() {
        let ranker = Ranker::new(Arc::new(FailingScorer));
        let err = ranker.rank(&Catalog::demo().unwrap()).unwrap_err();
        assert!(matches!(err, FeedError::ComputeFailure(_)));
    }

    #[test]
    fn test_ranked_result_clone_shares_allocation() {
        let ranked = RankedResult::from(vec![1, 2, 3]);
        let clone = ranked.clone();

        assert!(ranked.ptr_eq(&clone));
        assert_eq!(format!("{:?}", ranked), "[1, 2, 3]");
    }
}
