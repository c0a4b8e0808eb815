//! One refresh cycle: ranked list in, ordered snapshot out.

use std::sync::Arc;
use std::time::Instant;

use crate::app::Result;
use crate::cache::SnapshotCache;
use crate::domain::{Snapshot, Story};
use crate::fetcher::parallel::ParallelResolver;
use crate::fetcher::resolver::{ItemResolver, Resolution};
use crate::fetcher::{fetch_json, Fetcher};

pub const DEFAULT_DISPLAY_LIMIT: usize = 30;

pub struct RefreshPipeline {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    parallel: ParallelResolver,
    base_url: String,
    display_limit: usize,
    workers: usize,
}

impl RefreshPipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        base_url: impl Into<String>,
        display_limit: usize,
        workers: usize,
    ) -> Self {
        let base_url = base_url.into();
        let resolver = ItemResolver::new(fetcher.clone(), base_url.clone());

        Self {
            fetcher,
            parallel: ParallelResolver::with_workers(resolver, workers),
            base_url,
            display_limit,
            workers: workers.max(1),
        }
    }

    fn top_stories_url(&self) -> String {
        format!("{}topstories.json", self.base_url)
    }

    /// Build a fresh snapshot.
    ///
    /// Fails only when the ranked list itself cannot be fetched; individual
    /// items that fail are skipped.
    pub async fn run(&self) -> Result<Snapshot> {
        let ranked: Vec<u64> = fetch_json(self.fetcher.as_ref(), &self.top_stories_url()).await?;
        tracing::debug!("Fetched {} ranked ids", ranked.len());

        let mut accepted: Vec<(usize, Story)> = Vec::with_capacity(self.display_limit);
        let mut scanned = 0;

        while accepted.len() < self.display_limit && scanned < ranked.len() {
            // Keep every worker busy; the rank sort and truncate below drop any overshoot.
            let wanted = (self.display_limit - accepted.len()).max(self.workers);
            let end = (scanned + wanted).min(ranked.len());
            let batch: Vec<(usize, u64)> = (scanned..end).map(|rank| (rank, ranked[rank])).collect();
            scanned = end;

            for (rank, resolution) in self.parallel.resolve_batch(batch).await {
                if let Resolution::Accepted(story) = resolution {
                    accepted.push((rank, story));
                }
            }
        }

        accepted.sort_by_key(|(rank, _)| *rank);
        accepted.truncate(self.display_limit);

        let stories = accepted.into_iter().map(|(_, story)| story).collect();
        Ok(Snapshot::new(stories, scanned))
    }

    /// Run one cycle and publish the result.
    ///
    /// On failure the cache keeps serving the previous snapshot.
    pub async fn refresh(&self, cache: &SnapshotCache) -> Result<usize> {
        let start = Instant::now();

        match self.run().await {
            Ok(snapshot) => {
                let count = snapshot.len();
                tracing::info!(
                    stories = count,
                    scanned = snapshot.scanned(),
                    "Refresh complete ({:.1}s)",
                    start.elapsed().as_secs_f64()
                );
                cache.replace(snapshot);
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Refresh failed, keeping previous stories: {}", e);
                Err(e)
            }
        }
    }
}
