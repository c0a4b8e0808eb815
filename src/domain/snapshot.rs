use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Story;

/// The complete, ordered list of stories served at one point in time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    refreshed_at: Option<DateTime<Utc>>,
    scanned: usize,
    stories: Vec<Story>,
}

impl Snapshot {
    /// Stories must already be in rank order.
    pub fn new(stories: Vec<Story>, scanned: usize) -> Self {
        Self {
            refreshed_at: Some(Utc::now()),
            scanned,
            stories,
        }
    }

    /// Placeholder served before the first refresh completes.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// When the snapshot was built; `None` for the startup placeholder.
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// How many ranked identifiers were resolved to build this snapshot.
    pub fn scanned(&self) -> usize {
        self.scanned
    }
}
