//! Montagem do feed: consulta ao cache, ranking no miss, resolução dos ids.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStats, RankingCache};
use crate::catalog::Catalog;
use crate::scoring::{LinearScorer, RankedResult, Ranker, Scorer};
use crate::types::config::Config;
use crate::types::responses::FeedResponse;
use crate::{FeedError, FeedResult};

/// Serviço de feed ranqueado por usuário.
///
/// Dono do catálogo, do ranker e do cache de rankings. Uma instância é
/// criada na inicialização e compartilhada por todos os handlers.
pub struct FeedService {
    catalog: Arc<Catalog>,
    ranker: Ranker,
    cache: Arc<RankingCache>,
    miss_latency: Duration,
}

impl FeedService {
    pub fn new(
        catalog: Arc<Catalog>,
        scorer: Arc<dyn Scorer>,
        cache: RankingCache,
        miss_latency: Duration,
    ) -> Self {
        Self {
            catalog,
            ranker: Ranker::new(scorer),
            cache: Arc::new(cache),
            miss_latency,
        }
    }

    /// Cria o serviço a partir da configuração, carregando o catálogo indicado.
    pub fn from_config(config: &Config) -> FeedResult<Self> {
        config.validate()?;

        let catalog = Arc::new(Catalog::load(&config.catalog)?);
        let scorer = Arc::new(LinearScorer::new(config.scoring)?);
        let cache = RankingCache::from_config(&config.cache)?;
        let service = Self::new(catalog, scorer, cache, config.cache.miss_latency());

        tracing::info!(
            items = service.catalog.len(),
            scorer = service.ranker.scorer_name(),
            cache_capacity = config.cache.capacity,
            miss_latency_ms = config.cache.miss_latency_ms,
            "Feed service ready"
        );

        Ok(service)
    }

    /// Ids ranqueados para `user_id`, vindos do cache quando presentes.
    ///
    /// A consulta roda numa task própria: se o chamador desistir (cliente
    /// desconectado, timeout), o cálculo termina e o resultado fica no cache.
    pub async fn ranked_ids(&self, user_id: &str) -> FeedResult<RankedResult> {
        let cache = Arc::clone(&self.cache);
        let catalog = Arc::clone(&self.catalog);
        let ranker = self.ranker.clone();
        let miss_latency = self.miss_latency;
        let key = user_id.to_string();

        tokio::spawn(async move {
            cache
                .get_or_compute(&key, || compute_ranking(&ranker, &catalog, miss_latency))
                .await
        })
        .await
        .map_err(|e| FeedError::compute(format!("ranking task failed: {}", e)))?
    }

    /// Resposta completa do feed para `user_id`.
    pub async fn feed(&self, user_id: &str) -> FeedResult<FeedResponse> {
        let ranked = self.ranked_ids(user_id).await?;
        let posts = self.catalog.resolve(&ranked)?;

        Ok(FeedResponse {
            user_id: user_id.to_string(),
            posts,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cache(&self) -> &RankingCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

async fn compute_ranking(
    ranker: &Ranker,
    catalog: &Catalog,
    miss_latency: Duration,
) -> FeedResult<RankedResult> {
    if !miss_latency.is_zero() {
        tokio::time::sleep(miss_latency).await;
    }
    ranker.rank(catalog)
}
