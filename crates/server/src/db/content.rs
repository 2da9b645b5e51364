//! Database operations for content items.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bizgenie_core::{BusinessId, ContentItemId, ContentStatus, ContentType, UserId};

use super::RepositoryError;
use crate::models::content::{ContentItem, NewContentItem};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` content queries.
#[derive(Debug, sqlx::FromRow)]
struct ContentRow {
    id: i32,
    business_id: i32,
    creator_id: i32,
    title: String,
    content_type: String,
    status: String,
    data: String,
    shared: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContentRow> for ContentItem {
    type Error = RepositoryError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let content_type: ContentType = row.content_type.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid content type in database: {e}"))
        })?;
        let status: ContentStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid content status in database: {e}"))
        })?;

        Ok(Self {
            id: ContentItemId::new(row.id),
            business_id: BusinessId::new(row.business_id),
            creator_id: UserId::new(row.creator_id),
            title: row.title,
            content_type,
            status,
            data: row.data,
            shared: row.shared,
            created_at: row.created_at,
        })
    }
}

const CONTENT_COLUMNS: &str =
    "id, business_id, creator_id, title, content_type, status, data, shared, created_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for content database operations.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every content item of a business, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_for_business(
        &self,
        business_id: BusinessId,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM app.content_item \
             WHERE business_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(business_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List the items an agent may see: their own plus team-shared items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_own_or_shared(
        &self,
        business_id: BusinessId,
        viewer: UserId,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM app.content_item \
             WHERE business_id = $1 AND (creator_id = $2 OR shared) \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(business_id.as_i32())
        .bind(viewer.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Save a new content item as a draft.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert(
        &self,
        business_id: BusinessId,
        creator: UserId,
        item: &NewContentItem,
    ) -> Result<ContentItem, RepositoryError> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "INSERT INTO app.content_item (business_id, creator_id, title, content_type, data, shared) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {CONTENT_COLUMNS}"
        ))
        .bind(business_id.as_i32())
        .bind(creator.as_i32())
        .bind(&item.title)
        .bind(item.content_type.to_string())
        .bind(&item.data)
        .bind(item.shared)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Update an item's review status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item matches within the business.
    pub async fn update_status(
        &self,
        business_id: BusinessId,
        id: ContentItemId,
        status: ContentStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE app.content_item SET status = $1 WHERE id = $2 AND business_id = $3",
        )
        .bind(status.to_string())
        .bind(id.as_i32())
        .bind(business_id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Toggle whether an item is shared with the whole team.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item matches within the business.
    pub async fn set_shared(
        &self,
        business_id: BusinessId,
        id: ContentItemId,
        shared: bool,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE app.content_item SET shared = $1 WHERE id = $2 AND business_id = $3",
        )
        .bind(shared)
        .bind(id.as_i32())
        .bind(business_id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
