use serde::{Deserialize, Serialize};

use crate::normalizer::display_host;

/// Item payload as returned by `item/{id}.json`.
///
/// Only the fields the pipeline looks at are decoded; everything else the
/// upstream sends is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// What kind of post an item is, inferred from which fields are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    /// Points at an external article.
    Link,
    /// Carries its own body text (discussion post).
    SelfText,
    /// Neither a link nor any text.
    Ask,
}

impl PostKind {
    pub fn classify(url: &str, text: &str) -> Self {
        if !text.is_empty() {
            PostKind::SelfText
        } else if url.is_empty() {
            PostKind::Ask
        } else {
            PostKind::Link
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Story {
    id: u64,
    title: String,
    #[serde(skip)]
    text: String,
    url: String,
    host: String,
}

impl Story {
    /// Build a story from a decoded item, deriving its display host.
    ///
    /// `id` is the identifier the item was requested under; it wins over
    /// whatever the payload claims.
    pub fn from_raw(id: u64, raw: RawItem) -> Self {
        let url = raw.url.unwrap_or_default();
        let host = display_host(&url);

        Self {
            id,
            title: raw.title.unwrap_or_default(),
            text: raw.text.unwrap_or_default(),
            url,
            host,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn kind(&self) -> PostKind {
        PostKind::classify(&self.url, &self.text)
    }
}
