//! Cache LRU de rankings, indexado por id de usuário.

use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use lru::LruCache;
use tokio::sync::OnceCell;

use crate::scoring::RankedResult;
use crate::types::config::{default_cache_capacity, CacheConfig};
use crate::{FeedError, FeedResult};

use super::lock::mutex_lock;

const SOURCE: &str = "cache::lru";

/// Ranking armazenado no cache.
#[derive(Debug, Clone)]
pub struct CachedRanking {
    /// Ids ordenados.
    pub result: RankedResult,

    /// Momento em que o ranking foi calculado.
    pub cached_at: DateTime<Utc>,
}

impl CachedRanking {
    pub fn new(result: RankedResult) -> Self {
        Self {
            result,
            cached_at: Utc::now(),
        }
    }
}

/// Estatísticas do cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Número atual de entradas.
    pub size: usize,

    /// Capacidade máxima.
    pub capacity: usize,

    /// Consultas respondidas pelo cache (cache hits).
    pub hits: u64,

    /// Consultas sem entrada (cache misses).
    pub misses: u64,

    /// Rankings efetivamente calculados (misses menos os que aguardaram outro cálculo).
    pub computations: u64,

    /// Entradas removidas para abrir espaço.
    pub evictions: u64,
}

impl CacheStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

type Flight = Arc<OnceCell<RankedResult>>;

/// Remove o cálculo em andamento da tabela ao sair, inclusive se o futuro
/// for descartado antes de terminar.
struct FlightGuard<'a> {
    cache: &'a RankingCache,
    key: &'a str,
    flight: Flight,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.cache.leave_flight(self.key, &self.flight);
    }
}

/// Cache LRU limitado de chave de usuário para [`RankedResult`].
///
/// O mapa LRU fica atrás de um mutex segurado apenas por uma operação de
/// cada vez, nunca durante um `.await` ou um cálculo de ranking. Misses na
/// mesma chave compartilham um único cálculo em andamento: o primeiro
/// chamador executa, os demais aguardam o resultado.
pub struct RankingCache {
    entries: Mutex<LruCache<String, CachedRanking>>,
    in_flight: Mutex<HashMap<String, Flight>>,
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
    evictions: AtomicU64,
}

impl RankingCache {
    /// Cria um cache vazio com no máximo `capacity` rankings.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            in_flight: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            computations: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Cria o cache a partir da seção `[cache]` da configuração.
    pub fn from_config(config: &CacheConfig) -> FeedResult<Self> {
        Ok(Self::new(config.capacity_non_zero()?))
    }

    /// Retorna o ranking de `key`, calculando e armazenando em caso de miss.
    ///
    /// Num hit o ranking armazenado é retornado sem alteração e passa a ser
    /// o mais recente; `compute` não é chamado. Num miss `compute` roda (no
    /// máximo uma vez entre chamadores concorrentes da mesma chave) e o
    /// resultado é inserido, removendo a entrada menos usada se o cache
    /// estiver cheio. Falhas não são armazenadas e o erro é retornado.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> FeedResult<RankedResult>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FeedResult<RankedResult>>,
    {
        if let Some(result) = self.lookup(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(user_id = key, "Ranking cache hit");
            return Ok(result);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(user_id = key, "Ranking cache miss");

        let guard = FlightGuard {
            cache: self,
            key,
            flight: self.join_flight(key),
        };
        let outcome = guard
            .flight
            .get_or_try_init(move || async move {
                // O cálculo anterior desta chave pode ter terminado depois da nossa consulta.
                if let Some(result) = self.lookup(key) {
                    return Ok(result);
                }

                self.computations.fetch_add(1, Ordering::Relaxed);
                let result = compute().await?;
                self.insert(key, result.clone());
                Ok::<_, FeedError>(result)
            })
            .await
            .cloned();

        drop(guard);

        if let Err(e) = &outcome {
            tracing::warn!(user_id = key, error = %e, "Ranking computation failed, nothing cached");
        }

        outcome
    }

    /// Lê uma entrada sem alterar a ordem LRU nem as estatísticas.
    pub fn peek(&self, key: &str) -> Option<CachedRanking> {
        mutex_lock(&self.entries, SOURCE, "peek").peek(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        mutex_lock(&self.entries, SOURCE, "contains").contains(key)
    }

    /// Chaves da mais recente para a menos recente.
    pub fn keys(&self) -> Vec<String> {
        mutex_lock(&self.entries, SOURCE, "keys")
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        mutex_lock(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        mutex_lock(&self.entries, SOURCE, "capacity").cap().get()
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        let (size, capacity) = {
            let entries = mutex_lock(&self.entries, SOURCE, "stats");
            (entries.len(), entries.cap().get())
        };

        CacheStats {
            size,
            capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            computations: self.computations.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Busca `key`, promovendo-a a mais recente.
    fn lookup(&self, key: &str) -> Option<RankedResult> {
        mutex_lock(&self.entries, SOURCE, "lookup")
            .get(key)
            .map(|cached| cached.result.clone())
    }

    fn insert(&self, key: &str, result: RankedResult) {
        let displaced = mutex_lock(&self.entries, SOURCE, "insert")
            .push(key.to_string(), CachedRanking::new(result));

        // push também devolve o valor antigo quando a chave já existia
        if let Some((evicted, _)) = displaced {
            if evicted != key {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(evicted = %evicted, inserted = key, "Ranking cache eviction");
            }
        }
    }

    fn join_flight(&self, key: &str) -> Flight {
        mutex_lock(&self.in_flight, SOURCE, "join_flight")
            .entry(key.to_string())
            .or_default()
            .clone()
    }

    fn leave_flight(&self, key: &str, flight: &Flight) {
        let mut in_flight = mutex_lock(&self.in_flight, SOURCE, "leave_flight");
        if in_flight
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, flight))
        {
            in_flight.remove(key);
        }
    }
}

impl Default for RankingCache {
    fn default() -> Self {
        let capacity = NonZeroUsize::new(default_cache_capacity()).unwrap_or(NonZeroUsize::MIN);
        Self::new(capacity)
    }
}
