//! # quiethn
//!
//! A quiet Hacker News front page: only links, no scores, no comments.
//!
//! ## Architecture
//!
//! quiethn follows a one-way refresh pipeline:
//!
//! ```text
//! Scheduler → RefreshPipeline → SnapshotCache ← web handlers
//! ```
//!
//! Once an hour the pipeline fetches the ranked top-story ids, resolves
//! them concurrently into stories, drops discussion posts and posts
//! without a link, and swaps the finished snapshot into the cache. Web
//! requests only ever read the cache, so a slow or failing upstream never
//! blocks a page load; at worst the list is stale.
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the current front page once
//! quiethn refresh
//!
//! # Serve it on port 8080 without the HTTPS redirect
//! quiethn serve --port 8080 --env dev
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// refresh pipeline and snapshot cache.
pub mod app;

/// Holder for the snapshot currently being served.
pub mod cache;

/// Command-line interface using clap.
///
/// - `serve` - Serve the story list over HTTP
/// - `refresh` - Run one refresh and print the result
pub mod cli;

/// Layered configuration: defaults, TOML file, then flags and environment.
pub mod config;

/// Core domain models.
///
/// - [`Story`](domain::Story): A resolved link post
/// - [`Snapshot`](domain::Snapshot): The ordered list of stories served at one time
pub mod domain;

/// Upstream API access.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for a single GET
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`ItemResolver`](fetcher::resolver::ItemResolver): One id to one story or a skip
/// - [`ParallelResolver`](fetcher::parallel::ParallelResolver): Concurrent resolving with semaphore
pub mod fetcher;

/// Display host extraction for story links.
pub mod normalizer;

/// One refresh cycle from ranked ids to a finished snapshot.
pub mod pipeline;

/// Periodic background refresh with clean shutdown.
pub mod scheduler;

/// HTTP server, HTML rendering and the HTTPS redirect.
pub mod web;
