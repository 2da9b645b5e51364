//! Dashboard route handler.
//!
//! Aggregates the viewer's visible leads and content into the headline
//! metrics the dashboard renders. Everything is computed over the
//! role-scoped sets, so an agent's numbers only cover their own leads.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use bizgenie_core::{ContentStatus, LeadStatus};

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::{ContentItem, Lead};
use crate::services::{ContentScope, LeadScope};
use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// Headline metrics for the dashboard.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct DashboardMetrics {
    pub total_leads: usize,
    pub new_leads: usize,
    pub contacted: usize,
    pub qualified: usize,
    pub closed: usize,
    pub lost: usize,
    /// Mean score over the visible leads, zero when there are none.
    pub average_score: u8,
    pub content_items: usize,
    pub published_content: usize,
}

/// Dashboard page handler.
///
/// GET /dashboard
async fn dashboard(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardMetrics>, AppError> {
    let lead_scope = LeadScope::for_viewer(&user);
    let content_scope = ContentScope::for_viewer(&user);

    let (leads, content) = tokio::join!(
        lead_scope.load(state.pool()),
        content_scope.load(state.pool())
    );
    let leads = leads?;
    let content = content?;

    Ok(Json(compute_metrics(&leads, &content)))
}

/// Fold the visible sets into headline metrics.
fn compute_metrics(leads: &[Lead], content: &[ContentItem]) -> DashboardMetrics {
    let count_status =
        |status: LeadStatus| leads.iter().filter(|l| l.status == status).count();

    let average_score = if leads.is_empty() {
        0
    } else {
        let total: u32 = leads.iter().map(|l| u32::from(l.score.value())).sum();
        #[allow(clippy::cast_possible_truncation)]
        {
            (total / leads.len() as u32) as u8
        }
    };

    DashboardMetrics {
        total_leads: leads.len(),
        new_leads: count_status(LeadStatus::New),
        contacted: count_status(LeadStatus::Contacted),
        qualified: count_status(LeadStatus::Qualified),
        closed: count_status(LeadStatus::Closed),
        lost: count_status(LeadStatus::Lost),
        average_score,
        content_items: content.len(),
        published_content: content
            .iter()
            .filter(|c| c.status == ContentStatus::Published)
            .count(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bizgenie_core::{
        BusinessId, ContentItemId, ContentType, LeadId, LeadScore, LeadSource, UserId,
    };
    use chrono::Utc;

    fn lead(id: i32, status: LeadStatus, score: u8) -> Lead {
        Lead {
            id: LeadId::new(id),
            business_id: BusinessId::new(1),
            name: format!("Lead {id}"),
            email: format!("lead{id}@example.com"),
            phone: "+91 91234 56789".to_string(),
            source: LeadSource::Referral,
            status,
            score: LeadScore::new(score),
            requirements: None,
            assigned_to: None,
            last_interaction: Utc::now(),
            created_at: Utc::now(),
        }
    }

    fn item(id: i32, status: ContentStatus) -> ContentItem {
        ContentItem {
            id: ContentItemId::new(id),
            business_id: BusinessId::new(1),
            creator_id: UserId::new(1),
            title: format!("Item {id}"),
            content_type: ContentType::Text,
            status,
            data: String::new(),
            shared: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_metrics_over_empty_sets_are_zero() {
        assert_eq!(compute_metrics(&[], &[]), DashboardMetrics::default());
    }

    #[test]
    fn test_metrics_count_by_status_and_average() {
        let leads = vec![
            lead(1, LeadStatus::New, 85),
            lead(2, LeadStatus::Contacted, 60),
            lead(3, LeadStatus::Qualified, 92),
            lead(4, LeadStatus::New, 50),
        ];
        let content = vec![
            item(1, ContentStatus::Published),
            item(2, ContentStatus::Draft),
        ];

        let metrics = compute_metrics(&leads, &content);
        assert_eq!(metrics.total_leads, 4);
        assert_eq!(metrics.new_leads, 2);
        assert_eq!(metrics.contacted, 1);
        assert_eq!(metrics.qualified, 1);
        assert_eq!(metrics.closed, 0);
        assert_eq!(metrics.average_score, ((85 + 60 + 92 + 50) / 4) as u8);
        assert_eq!(metrics.content_items, 2);
        assert_eq!(metrics.published_content, 1);
    }
}
