//! Lead domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bizgenie_core::{BusinessId, LeadId, LeadScore, LeadSource, LeadStatus, UserId};

/// A CRM lead (domain type).
///
/// Every lead belongs to exactly one business; `assigned_to` optionally
/// binds it to one agent within that business.
#[derive(Debug, Clone, Serialize)]
pub struct Lead {
    /// Unique lead ID.
    pub id: LeadId,
    /// Tenant the lead belongs to.
    pub business_id: BusinessId,
    /// Lead's full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Acquisition channel.
    pub source: LeadSource,
    /// Pipeline status.
    pub status: LeadStatus,
    /// Likelihood-to-convert score.
    pub score: LeadScore,
    /// Free-text requirements captured from the lead.
    pub requirements: Option<String>,
    /// Agent this lead is assigned to, if any.
    pub assigned_to: Option<UserId>,
    /// Timestamp of the last interaction with the lead.
    pub last_interaction: DateTime<Utc>,
    /// When the lead was captured.
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a new lead.
///
/// Status is always `New` and score always starts at the default; neither
/// is caller-controlled.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: LeadSource,
    pub requirements: Option<String>,
    pub assigned_to: Option<UserId>,
}
