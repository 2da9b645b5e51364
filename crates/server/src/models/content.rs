//! Content item domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bizgenie_core::{BusinessId, ContentItemId, ContentStatus, ContentType, UserId};

/// A generated marketing content item (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct ContentItem {
    /// Unique content item ID.
    pub id: ContentItemId,
    /// Tenant the item belongs to.
    pub business_id: BusinessId,
    /// User who created the item.
    pub creator_id: UserId,
    /// Display title.
    pub title: String,
    /// Media type of the payload.
    pub content_type: ContentType,
    /// Review state.
    pub status: ContentStatus,
    /// Payload: inline text, a data URI, or a signed media URL.
    pub data: String,
    /// Whether the item is visible to the whole team.
    pub shared: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

/// Fields for saving a new content item. Items always start as drafts.
#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub title: String,
    pub content_type: ContentType,
    pub data: String,
    pub shared: bool,
}
