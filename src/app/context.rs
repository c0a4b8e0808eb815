use std::sync::Arc;

use crate::app::error::Result;
use crate::cache::SnapshotCache;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::pipeline::RefreshPipeline;
use crate::scheduler::Scheduler;

pub struct AppContext {
    pub config: Config,
    pub cache: Arc<SnapshotCache>,
    pub pipeline: Arc<RefreshPipeline>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::with_timeout(config.request_timeout())?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let pipeline = Arc::new(RefreshPipeline::new(
            fetcher,
            config.api_base_url.clone(),
            config.display_limit,
            config.workers,
        ));

        Self {
            config,
            cache: Arc::new(SnapshotCache::new()),
            pipeline,
        }
    }

    /// A scheduler that refreshes this context's cache.
    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new(
            self.pipeline.clone(),
            self.cache.clone(),
            self.config.schedule(),
        )
    }
}
