use std::fmt;
use std::sync::Arc;

use crate::domain::{PostKind, RawItem, Story};
use crate::fetcher::{fetch_json, Fetcher};

/// Why an identifier was left out of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The item could not be fetched or decoded, or no longer exists.
    Unavailable(String),
    /// Ask-style post without a link.
    NoUrl,
    /// Discussion post carrying its own text.
    SelfText,
    /// The link has no usable host to display.
    NoHost,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unavailable(reason) => write!(f, "unavailable: {}", reason),
            SkipReason::NoUrl => write!(f, "no url"),
            SkipReason::SelfText => write!(f, "self-text post"),
            SkipReason::NoHost => write!(f, "url has no host"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Accepted(Story),
    Skipped(SkipReason),
}

impl Resolution {
    pub fn into_story(self) -> Option<Story> {
        match self {
            Resolution::Accepted(story) => Some(story),
            Resolution::Skipped(_) => None,
        }
    }
}

/// Turns one ranked identifier into a story, or a reason to skip it.
#[derive(Clone)]
pub struct ItemResolver {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    base_url: String,
}

impl ItemResolver {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn item_url(&self, id: u64) -> String {
        format!("{}item/{}.json", self.base_url, id)
    }

    pub async fn resolve(&self, id: u64) -> Resolution {
        let url = self.item_url(id);

        // Deleted items come back as a literal `null`.
        let raw = match fetch_json::<Option<RawItem>, _>(self.fetcher.as_ref(), &url).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(id, "Item no longer exists");
                return Resolution::Skipped(SkipReason::Unavailable("deleted".into()));
            }
            Err(e) => {
                tracing::warn!(id, "Failed to fetch item: {}", e);
                return Resolution::Skipped(SkipReason::Unavailable(e.to_string()));
            }
        };

        let story = Story::from_raw(id, raw);

        let reason = match story.kind() {
            PostKind::Link if story.host().is_empty() => SkipReason::NoHost,
            PostKind::Link => return Resolution::Accepted(story),
            PostKind::SelfText => SkipReason::SelfText,
            PostKind::Ask => SkipReason::NoUrl,
        };

        tracing::debug!(id, "Skipping item: {}", reason);
        Resolution::Skipped(reason)
    }
}
