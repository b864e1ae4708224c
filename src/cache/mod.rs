//! Cache de rankings por usuário.
//!
//! Memoriza a sequência de ids ranqueada de cada usuário num mapa LRU
//! limitado. Entradas nunca são atualizadas nem invalidadas: depois que uma
//! chave é ranqueada, os requests seguintes recebem a mesma sequência até a
//! entrada ser removida. Misses concorrentes na mesma chave são coalescidos
//! e o ranking roda uma vez.

mod lock;
mod lru;

pub use lru::{CacheStats, CachedRanking, RankingCache};
