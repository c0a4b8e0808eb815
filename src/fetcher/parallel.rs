use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::fetcher::resolver::{ItemResolver, Resolution, SkipReason};

pub const DEFAULT_WORKERS: usize = 10;

/// Resolves batches of ranked identifiers concurrently, at most `workers`
/// requests in flight at a time.
pub struct ParallelResolver {
    resolver: ItemResolver,
    semaphore: Arc<Semaphore>,
}

impl ParallelResolver {
    pub fn new(resolver: ItemResolver) -> Self {
        Self::with_workers(resolver, DEFAULT_WORKERS)
    }

    pub fn with_workers(resolver: ItemResolver, workers: usize) -> Self {
        Self {
            resolver,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Resolve every `(rank, id)` pair and wait for the whole batch.
    ///
    /// Results are returned tagged with their rank, in completion-independent
    /// input order.
    pub async fn resolve_batch(&self, batch: Vec<(usize, u64)>) -> Vec<(usize, Resolution)> {
        let mut handles = Vec::with_capacity(batch.len());

        for (rank, id) in batch {
            let resolver = self.resolver.clone();
            let semaphore = self.semaphore.clone();

            let handle = tokio::spawn(async move {
                let resolution = match semaphore.acquire_owned().await {
                    Ok(_permit) => resolver.resolve(id).await,
                    Err(_) => Resolution::Skipped(SkipReason::Unavailable(
                        "resolver pool closed".into(),
                    )),
                };
                (rank, resolution)
            });

            handles.push((rank, handle));
        }

        let (ranks, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();

        join_all(handles)
            .await
            .into_iter()
            .zip(ranks)
            .map(|(joined, rank)| match joined {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Task join error: {}", e);
                    (rank, Resolution::Skipped(SkipReason::Unavailable(e.to_string())))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::fetcher::resolver::tests::{StubFetcher, BASE};

    #[tokio::test]
    async fn test_batch_keeps_rank_tags() {
        let stub = StubFetcher::default()
            .link(10, "https://a.example")
            .link(20, "https://b.example")
            .link(30, "https://c.example")
            .delay(10, Duration::from_millis(30))
            .delay(20, Duration::from_millis(10));
        let parallel = ParallelResolver::with_workers(ItemResolver::new(Arc::new(stub), BASE), 3);

        let results = parallel
            .resolve_batch(vec![(0, 10), (1, 20), (2, 30)])
            .await;

        let ranks: Vec<usize> = results.iter().map(|(rank, _)| *rank).collect();
        assert_eq!(ranks, vec![0, 1, 2]);

        let ids: Vec<u64> = results
            .into_iter()
            .filter_map(|(_, r)| r.into_story())
            .map(|s| s.id())
            .collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn test_batch_runs_concurrently() {
        let mut stub = StubFetcher::default();
        for id in 1..=5 {
            stub = stub
                .link(id, "https://example.com")
                .delay(id, Duration::from_millis(200));
        }
        let parallel = ParallelResolver::with_workers(ItemResolver::new(Arc::new(stub), BASE), 5);

        let start = tokio::time::Instant::now();
        let results = parallel
            .resolve_batch((1..=5).enumerate().collect())
            .await;

        assert_eq!(results.len(), 5);
        // Serial resolution would take a full second.
        assert!(start.elapsed() < Duration::from_millis(800));
    }

    #[tokio::test]
    async fn test_zero_workers_still_makes_progress() {
        let stub = StubFetcher::default().link(1, "https://example.com");
        let parallel = ParallelResolver::with_workers(ItemResolver::new(Arc::new(stub), BASE), 0);

        let results = parallel.resolve_batch(vec![(0, 1)]).await;
        assert!(matches!(results[0].1, Resolution::Accepted(_)));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let parallel = ParallelResolver::new(ItemResolver::new(Arc::new(StubFetcher::default()), BASE));
        assert!(parallel.resolve_batch(Vec::new()).await.is_empty());
    }
}
