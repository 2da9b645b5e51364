//! Demo data seeding command.
//!
//! Creates one onboarded tenant ("Skyline Premium Estates") with an owner,
//! an agent, a handful of leads across the pipeline, and two content
//! items. Useful for local development and demos.

use bizgenie_core::{LeadSource, LeadStatus, Role};
use bizgenie_server::db::{BusinessRepository, ContentRepository, LeadRepository};
use bizgenie_server::models::business::ProfileFields;
use bizgenie_server::models::content::NewContentItem;
use bizgenie_server::models::lead::NewLead;
use bizgenie_server::services::AuthService;

use super::{CommandError, connect};

const OWNER_EMAIL: &str = "owner@skyline.example";
const AGENT_EMAIL: &str = "anjali@skyline.example";
const SEED_PASSWORD: &str = "demo-password-1";

/// Seed the database with a demo tenant.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or any insert
/// fails (e.g., the seed accounts already exist).
#[allow(clippy::too_many_lines)]
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;
    let auth = AuthService::new(&pool);

    // Tenant + owner, onboarded
    let (owner, business) = auth
        .register_business_admin("Vikram Malhotra", OWNER_EMAIL, SEED_PASSWORD)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;

    let businesses = BusinessRepository::new(&pool);
    businesses
        .complete_onboarding(
            business.id,
            &ProfileFields {
                name: "Skyline Premium Estates".to_string(),
                industry: "Real Estate".to_string(),
                description: "Luxury residential and commercial properties in Tier-1 cities."
                    .to_string(),
            },
        )
        .await?;

    // One agent on the team
    let agent = auth
        .create_account(
            "Anjali Rao",
            AGENT_EMAIL,
            SEED_PASSWORD,
            Role::Agent,
            Some(business.id),
        )
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;

    // Leads across the pipeline; two assigned to the agent
    let leads = LeadRepository::new(&pool);
    let seeded = [
        NewLead {
            name: "Rahul Sharma".to_string(),
            email: "rahul.s@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            source: LeadSource::Instagram,
            requirements: Some("Looking for 3BHK in South Delhi, Budget 2.5 Cr".to_string()),
            assigned_to: Some(agent.id),
        },
        NewLead {
            name: "Priya Verma".to_string(),
            email: "priya.v@example.com".to_string(),
            phone: "+91 99887 76655".to_string(),
            source: LeadSource::Facebook,
            requirements: Some("Commercial space for boutique in Gurgaon".to_string()),
            assigned_to: Some(agent.id),
        },
        NewLead {
            name: "Amit Patel".to_string(),
            email: "amit.p@example.com".to_string(),
            phone: "+91 91234 56789".to_string(),
            source: LeadSource::Website,
            requirements: Some("Villa in Bangalore, immediate possession".to_string()),
            assigned_to: None,
        },
    ];

    let mut inserted = Vec::new();
    for lead in &seeded {
        inserted.push(leads.insert(business.id, lead).await?);
    }

    if let Some(contacted) = inserted.get(1) {
        leads
            .update_status(business.id, contacted.id, LeadStatus::Contacted)
            .await?;
    }
    if let Some(qualified) = inserted.get(2) {
        leads
            .update_status(business.id, qualified.id, LeadStatus::Qualified)
            .await?;
    }

    // Two content items, one shared with the team
    let content = ContentRepository::new(&pool);
    content
        .insert(
            business.id,
            owner.id,
            &NewContentItem {
                title: "Diwali Offer Announcement".to_string(),
                content_type: bizgenie_core::ContentType::Image,
                data: "https://picsum.photos/400/300".to_string(),
                shared: true,
            },
        )
        .await?;
    content
        .insert(
            business.id,
            owner.id,
            &NewContentItem {
                title: "Why Invest in Real Estate?".to_string(),
                content_type: bizgenie_core::ContentType::Text,
                data: "Are you considering securing your future? Real estate remains the safest bet..."
                    .to_string(),
                shared: false,
            },
        )
        .await?;

    tracing::info!(
        business = %business.id,
        owner = %owner.id,
        agent = %agent.id,
        "demo tenant seeded"
    );
    Ok(())
}
