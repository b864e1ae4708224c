//! Integration tests for the ranking cache.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use feedrank::cache::RankingCache;
use feedrank::catalog::{Catalog, ContentItem};
use feedrank::scoring::{LinearScorer, RankedResult, Ranker};
use feedrank::FeedResult;

fn cache(capacity: usize) -> RankingCache {
    RankingCache::new(NonZeroUsize::new(capacity).unwrap())
}

fn ranker() -> Ranker {
    Ranker::new(Arc::new(LinearScorer::default()))
}

async fn fixed(ids: Vec<u64>) -> FeedResult<RankedResult> {
    Ok(RankedResult::from(ids))
}

mod memoization_tests {
    use super::*;

    #[tokio::test]
    async fn test_hit_survives_catalog_change() {
        let cache = cache(8);
        let ranker = ranker();
        let original = Catalog::demo().unwrap();
        let changed = Catalog::new(vec![
            ContentItem::new(1, 0.0, 0.0, 0.0, "stale now"),
            ContentItem::new(2, 1.0, 1.0, 1.0, "boosted"),
            ContentItem::new(3, 0.5, 0.5, 0.5, "unchanged"),
        ])
        .unwrap();

        let first = cache
            .get_or_compute("guest", || async { ranker.rank(&original) })
            .await
            .unwrap();
        let later = cache
            .get_or_compute("guest", || async { ranker.rank(&changed) })
            .await
            .unwrap();

        assert_eq!(first.ids(), &[1, 3, 2]);
        assert_eq!(later, first);

        // A new key does see the changed catalog.
        let fresh = cache
            .get_or_compute("newcomer", || async { ranker.rank(&changed) })
            .await
            .unwrap();
        assert_eq!(fresh.ids(), &[2, 3, 1]);
    }

    #[tokio::test]
    async fn test_every_call_after_first_is_identical() {
        let cache = cache(8);
        let ranker = ranker();
        let catalog = Catalog::demo().unwrap();

        let first = cache
            .get_or_compute("u", || async { ranker.rank(&catalog) })
            .await
            .unwrap();

        for _ in 0..20 {
            let again = cache
                .get_or_compute("u", || async { ranker.rank(&catalog) })
                .await
                .unwrap();
            assert!(again.ptr_eq(&first));
        }
        assert_eq!(cache.stats().computations, 1);
    }
}

mod eviction_tests {
    use super::*;

    #[tokio::test]
    async fn test_n_plus_one_keys_evict_exactly_one() {
        let n = 5;
        let cache = cache(n);

        for i in 0..n {
            cache
                .get_or_compute(&format!("user-{}", i), || fixed(vec![1]))
                .await
                .unwrap();
        }
        assert_eq!(cache.len(), n);
        assert_eq!(cache.stats().evictions, 0);

        cache.get_or_compute("user-new", || fixed(vec![1])).await.unwrap();

        assert_eq!(cache.len(), n);
        assert_eq!(cache.stats().evictions, 1);
        assert!(!cache.contains("user-0"));
        for i in 1..n {
            assert!(cache.contains(&format!("user-{}", i)));
        }
    }

    #[tokio::test]
    async fn test_read_protects_from_eviction() {
        let cache = cache(2);

        cache.get_or_compute("A", || fixed(vec![1])).await.unwrap();
        cache.get_or_compute("B", || fixed(vec![2])).await.unwrap();
        cache.get_or_compute("A", || fixed(vec![0])).await.unwrap();
        cache.get_or_compute("C", || fixed(vec![3])).await.unwrap();

        assert!(cache.contains("A"));
        assert!(!cache.contains("B"));
        assert!(cache.contains("C"));
    }

    #[tokio::test]
    async fn test_evicted_key_is_recomputed() {
        let cache = cache(1);
        let calls = AtomicUsize::new(0);
        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            fixed(vec![7])
        };

        cache.get_or_compute("A", compute).await.unwrap();
        cache.get_or_compute("B", compute).await.unwrap();
        cache.get_or_compute("A", compute).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.keys(), vec!["A".to_string()]);
    }
}

mod concurrency_tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_keys_never_exceed_capacity() {
        let capacity = 8;
        let cache = Arc::new(cache(capacity));
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..200)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    let key = format!("user-{}", i % 20);
                    cache
                        .get_or_compute(&key, || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::task::yield_now().await;
                            Ok(RankedResult::from(vec![1, 3, 2]))
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap().ids(), &[1, 3, 2]);
        }

        let stats = cache.stats();
        assert!(stats.size <= capacity);
        assert_eq!(stats.size, cache.keys().len());
        assert_eq!(stats.hits + stats.misses, 200);
        assert_eq!(stats.computations as usize, calls.load(Ordering::SeqCst));
        assert_eq!(
            stats.evictions as usize,
            calls.load(Ordering::SeqCst) - stats.size
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_slow_key_does_not_block_other_keys() {
        let cache = Arc::new(cache(8));

        let slow = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache
                    .get_or_compute("slow", || async {
                        tokio::time::sleep(Duration::from_millis(300)).await;
                        Ok(RankedResult::from(vec![1]))
                    })
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        let fast = tokio::time::timeout(
            Duration::from_millis(200),
            cache.get_or_compute("fast", || fixed(vec![2])),
        )
        .await
        .expect("fast key must not wait for slow key")
        .unwrap();

        assert_eq!(fast.ids(), &[2]);
        assert_eq!(slow.await.unwrap().unwrap().ids(), &[1]);
    }
}
