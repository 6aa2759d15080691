//! Capabilities for the external rich-text composer widget.
//!
//! The widget itself (mention/channel autocomplete editor) is an external
//! collaborator; the flows only assemble the async capabilities it needs:
//! URL metadata fetch, channel search, and mention search. Suggestion lists
//! are capped at [`MAX_SUGGESTIONS`] results, and channel search ignores
//! queries shorter than [`MIN_CHANNEL_QUERY`] characters.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Maximum entries any suggestion list may contain.
pub const MAX_SUGGESTIONS: usize = 10;

/// Channel search only fires for queries at least this long.
pub const MIN_CHANNEL_QUERY: usize = 3;

/// Async capability: query string → ordered matches.
pub type SearchFn<T> = Arc<dyn Fn(String) -> BoxFuture<'static, Vec<T>> + Send + Sync>;

/// Metadata for a URL embedded in a draft post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMetadata {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A channel suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSuggestion {
    pub id: String,
    pub name: String,
}

/// A mention suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionSuggestion {
    pub fid: u64,
    pub username: String,
}

/// The capability bundle handed to the composer widget.
#[derive(Clone)]
pub struct ComposerCapabilities {
    pub fetch_url_metadata: SearchFn<UrlMetadata>,
    pub search_channels: SearchFn<ChannelSuggestion>,
    pub search_mentions: SearchFn<MentionSuggestion>,
}

impl ComposerCapabilities {
    /// Wrap raw capabilities with the result cap and query-length gates.
    pub fn new(
        fetch_url_metadata: SearchFn<UrlMetadata>,
        search_channels: SearchFn<ChannelSuggestion>,
        search_mentions: SearchFn<MentionSuggestion>,
    ) -> Self {
        Self {
            fetch_url_metadata,
            search_channels: gated(search_channels, MIN_CHANNEL_QUERY),
            search_mentions: capped(search_mentions),
        }
    }
}

/// Cap a search capability at [`MAX_SUGGESTIONS`] results.
pub fn capped<T: Send + 'static>(inner: SearchFn<T>) -> SearchFn<T> {
    Arc::new(move |query| {
        let inner = Arc::clone(&inner);
        Box::pin(async move {
            let mut results = inner(query).await;
            results.truncate(MAX_SUGGESTIONS);
            results
        })
    })
}

/// Cap results and short-circuit queries below `min_len` to an empty list.
pub fn gated<T: Send + 'static>(inner: SearchFn<T>, min_len: usize) -> SearchFn<T> {
    let inner = capped(inner);
    Arc::new(move |query| {
        let inner = Arc::clone(&inner);
        Box::pin(async move {
            if query.chars().count() < min_len {
                return Vec::new();
            }
            inner(query).await
        })
    })
}
