//! Database operations for businesses (tenants).

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bizgenie_core::{BusinessId, BusinessStatus, SubscriptionPlan, UserId};

use super::RepositoryError;
use crate::models::business::{BusinessProfile, BusinessSummary, ProfileFields};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` business queries.
#[derive(Debug, sqlx::FromRow)]
struct BusinessRow {
    id: i32,
    name: String,
    industry: String,
    description: String,
    uploaded_files: Vec<String>,
    plan: String,
    status: String,
    onboarded: bool,
    owner_id: Option<i32>,
    created_at: DateTime<Utc>,
}

impl TryFrom<BusinessRow> for BusinessProfile {
    type Error = RepositoryError;

    fn try_from(row: BusinessRow) -> Result<Self, Self::Error> {
        let plan: SubscriptionPlan = row.plan.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid plan in database: {e}"))
        })?;
        let status: BusinessStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid business status in database: {e}"))
        })?;

        Ok(Self {
            id: BusinessId::new(row.id),
            name: row.name,
            industry: row.industry,
            description: row.description,
            uploaded_files: row.uploaded_files,
            plan,
            status,
            onboarded: row.onboarded,
            owner_id: row.owner_id.map(UserId::new),
            created_at: row.created_at,
        })
    }
}

/// Internal row type for the cross-tenant summary aggregate.
#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: i32,
    name: String,
    industry: String,
    owner_name: Option<String>,
    owner_email: Option<String>,
    agent_count: i64,
    plan: String,
    status: String,
    total_leads: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<SummaryRow> for BusinessSummary {
    type Error = RepositoryError;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        let plan: SubscriptionPlan = row.plan.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid plan in database: {e}"))
        })?;
        let status: BusinessStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid business status in database: {e}"))
        })?;

        Ok(Self {
            id: BusinessId::new(row.id),
            name: row.name,
            industry: row.industry,
            owner_name: row.owner_name,
            owner_email: row.owner_email,
            agent_count: row.agent_count,
            plan,
            status,
            total_leads: row.total_leads,
            joined_at: row.created_at,
        })
    }
}

const BUSINESS_COLUMNS: &str = "id, name, industry, description, uploaded_files, plan, status, \
                                onboarded, owner_id, created_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for business database operations.
pub struct BusinessRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BusinessRepository<'a> {
    /// Create a new business repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an empty tenant row.
    ///
    /// Called at registration time so the owner account has a tenant to
    /// bind to; the profile fields are filled in by onboarding.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self) -> Result<BusinessProfile, RepositoryError> {
        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            "INSERT INTO app.business DEFAULT VALUES RETURNING {BUSINESS_COLUMNS}"
        ))
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Record the owning business admin of a tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the business doesn't exist.
    pub async fn set_owner(
        &self,
        id: BusinessId,
        owner: UserId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE app.business SET owner_id = $1 WHERE id = $2")
            .bind(owner.as_i32())
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Get a business by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BusinessId) -> Result<Option<BusinessProfile>, RepositoryError> {
        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM app.business WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(r.try_into()?)),
            None => Ok(None),
        }
    }

    /// Complete onboarding: fill in the profile and activate the tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the business doesn't exist.
    pub async fn complete_onboarding(
        &self,
        id: BusinessId,
        profile: &ProfileFields,
    ) -> Result<BusinessProfile, RepositoryError> {
        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            "UPDATE app.business \
             SET name = $1, industry = $2, description = $3, onboarded = TRUE, status = 'Active' \
             WHERE id = $4 \
             RETURNING {BUSINESS_COLUMNS}"
        ))
        .bind(&profile.name)
        .bind(&profile.industry)
        .bind(&profile.description)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), TryInto::try_into)
    }

    /// Update the profile fields of an onboarded tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the business doesn't exist.
    pub async fn update_profile(
        &self,
        id: BusinessId,
        profile: &ProfileFields,
    ) -> Result<BusinessProfile, RepositoryError> {
        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            "UPDATE app.business SET name = $1, industry = $2, description = $3 \
             WHERE id = $4 \
             RETURNING {BUSINESS_COLUMNS}"
        ))
        .bind(&profile.name)
        .bind(&profile.industry)
        .bind(&profile.description)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), TryInto::try_into)
    }

    /// Append an uploaded-file reference to the tenant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the business doesn't exist.
    pub async fn add_uploaded_file(
        &self,
        id: BusinessId,
        file_name: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE app.business SET uploaded_files = array_append(uploaded_files, $1) \
             WHERE id = $2",
        )
        .bind(file_name)
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Cross-tenant summaries for the platform admin view.
    ///
    /// A single aggregate query; exposes counts and plan/status only,
    /// never tenant record detail.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn summaries(&self) -> Result<Vec<BusinessSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            "SELECT b.id, b.name, b.industry, \
                    o.name AS owner_name, o.email AS owner_email, \
                    (SELECT count(*) FROM app.user u \
                      WHERE u.business_id = b.id AND u.role = 'agent') AS agent_count, \
                    b.plan, b.status, \
                    (SELECT count(*) FROM app.lead l WHERE l.business_id = b.id) AS total_leads, \
                    b.created_at \
             FROM app.business b \
             LEFT JOIN app.user o ON o.id = b.owner_id \
             ORDER BY b.id",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
