//! Database operations for leads.
//!
//! All reads are tenant-scoped: every query filters by `business_id`, and
//! agent-visible reads additionally filter by `assigned_to`. Result sets
//! are insertion-ordered (serial id).

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bizgenie_core::{BusinessId, LeadId, LeadScore, LeadSource, LeadStatus, UserId};

use super::RepositoryError;
use crate::models::lead::{Lead, NewLead};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` lead queries.
#[derive(Debug, sqlx::FromRow)]
struct LeadRow {
    id: i32,
    business_id: i32,
    name: String,
    email: String,
    phone: String,
    source: String,
    status: String,
    score: i16,
    requirements: Option<String>,
    assigned_to: Option<i32>,
    last_interaction: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<LeadRow> for Lead {
    type Error = RepositoryError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        let source: LeadSource = row.source.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid lead source in database: {e}"))
        })?;
        let status: LeadStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid lead status in database: {e}"))
        })?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let score = LeadScore::new(row.score.clamp(0, 100) as u8);

        Ok(Self {
            id: LeadId::new(row.id),
            business_id: BusinessId::new(row.business_id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            source,
            status,
            score,
            requirements: row.requirements,
            assigned_to: row.assigned_to.map(UserId::new),
            last_interaction: row.last_interaction,
            created_at: row.created_at,
        })
    }
}

const LEAD_COLUMNS: &str = "id, business_id, name, email, phone, source, status, score, \
                            requirements, assigned_to, last_interaction, created_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for lead database operations.
pub struct LeadRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeadRepository<'a> {
    /// Create a new lead repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every lead of a business, insertion-ordered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_for_business(
        &self,
        business_id: BusinessId,
    ) -> Result<Vec<Lead>, RepositoryError> {
        let rows = sqlx::query_as::<_, LeadRow>(&format!(
            "SELECT {LEAD_COLUMNS} FROM app.lead WHERE business_id = $1 ORDER BY id"
        ))
        .bind(business_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List the leads of a business assigned to one agent, insertion-ordered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_assigned(
        &self,
        business_id: BusinessId,
        agent: UserId,
    ) -> Result<Vec<Lead>, RepositoryError> {
        let rows = sqlx::query_as::<_, LeadRow>(&format!(
            "SELECT {LEAD_COLUMNS} FROM app.lead \
             WHERE business_id = $1 AND assigned_to = $2 ORDER BY id"
        ))
        .bind(business_id.as_i32())
        .bind(agent.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Insert a new lead.
    ///
    /// Status starts as `NEW` and the score at the default; both come from
    /// column defaults rather than the caller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert(
        &self,
        business_id: BusinessId,
        lead: &NewLead,
    ) -> Result<Lead, RepositoryError> {
        let row = sqlx::query_as::<_, LeadRow>(&format!(
            "INSERT INTO app.lead (business_id, name, email, phone, source, requirements, assigned_to) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {LEAD_COLUMNS}"
        ))
        .bind(business_id.as_i32())
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(lead.source.to_string())
        .bind(lead.requirements.as_deref())
        .bind(lead.assigned_to.map(|id| id.as_i32()))
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Update a lead's pipeline status, stamping the interaction time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no lead matches within the business.
    pub async fn update_status(
        &self,
        business_id: BusinessId,
        id: LeadId,
        status: LeadStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE app.lead SET status = $1, last_interaction = now() \
             WHERE id = $2 AND business_id = $3",
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

    /// Assign (or unassign) a lead to an agent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no lead matches within the business.
    pub async fn assign(
        &self,
        business_id: BusinessId,
        id: LeadId,
        agent: Option<UserId>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE app.lead SET assigned_to = $1 WHERE id = $2 AND business_id = $3",
        )
        .bind(agent.map(|id| id.as_i32()))
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
