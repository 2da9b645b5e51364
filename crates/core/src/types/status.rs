//! Status and classification enums for leads, content, and businesses.
//!
//! All of these are stored as text in Postgres and converted through
//! `Display`/`FromStr`, so the database never constrains the closed sets
//! defined here.

use serde::{Deserialize, Serialize};

/// Pipeline status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Closed,
    Lost,
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::Contacted => write!(f, "CONTACTED"),
            Self::Qualified => write!(f, "QUALIFIED"),
            Self::Closed => write!(f, "CLOSED"),
            Self::Lost => write!(f, "LOST"),
        }
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(Self::New),
            "CONTACTED" => Ok(Self::Contacted),
            "QUALIFIED" => Ok(Self::Qualified),
            "CLOSED" => Ok(Self::Closed),
            "LOST" => Ok(Self::Lost),
            _ => Err(format!("invalid lead status: {s}")),
        }
    }
}

/// Acquisition channel a lead came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadSource {
    Instagram,
    Facebook,
    Website,
    Referral,
}

impl std::fmt::Display for LeadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instagram => write!(f, "Instagram"),
            Self::Facebook => write!(f, "Facebook"),
            Self::Website => write!(f, "Website"),
            Self::Referral => write!(f, "Referral"),
        }
    }
}

impl std::str::FromStr for LeadSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Instagram" => Ok(Self::Instagram),
            "Facebook" => Ok(Self::Facebook),
            "Website" => Ok(Self::Website),
            "Referral" => Ok(Self::Referral),
            _ => Err(format!("invalid lead source: {s}")),
        }
    }
}

/// Media type of a generated content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Text,
    Image,
    Video,
    Audio,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "TEXT"),
            Self::Image => write!(f, "IMAGE"),
            Self::Video => write!(f, "VIDEO"),
            Self::Audio => write!(f, "AUDIO"),
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEXT" => Ok(Self::Text),
            "IMAGE" => Ok(Self::Image),
            "VIDEO" => Ok(Self::Video),
            "AUDIO" => Ok(Self::Audio),
            _ => Err(format!("invalid content type: {s}")),
        }
    }
}

/// Review state of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ContentStatus {
    #[default]
    Draft,
    Approved,
    Published,
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "Draft"),
            Self::Approved => write!(f, "Approved"),
            Self::Published => write!(f, "Published"),
        }
    }
}

impl std::str::FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(Self::Draft),
            "Approved" => Ok(Self::Approved),
            "Published" => Ok(Self::Published),
            _ => Err(format!("invalid content status: {s}")),
        }
    }
}

/// Subscription plan of a business (tenant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SubscriptionPlan {
    #[default]
    Free,
    Pro,
    Enterprise,
}

impl std::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "Free"),
            Self::Pro => write!(f, "Pro"),
            Self::Enterprise => write!(f, "Enterprise"),
        }
    }
}

impl std::str::FromStr for SubscriptionPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Free" => Ok(Self::Free),
            "Pro" => Ok(Self::Pro),
            "Enterprise" => Ok(Self::Enterprise),
            _ => Err(format!("invalid subscription plan: {s}")),
        }
    }
}

/// Operational status of a business (tenant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessStatus {
    Active,
    #[default]
    Pending,
    Suspended,
}

impl std::fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Pending => write!(f, "Pending"),
            Self::Suspended => write!(f, "Suspended"),
        }
    }
}

impl std::str::FromStr for BusinessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Pending" => Ok(Self::Pending),
            "Suspended" => Ok(Self::Suspended),
            _ => Err(format!("invalid business status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_lead_status_roundtrip() {
        for status in [
            LeadStatus::New,
            LeadStatus::Contacted,
            LeadStatus::Qualified,
            LeadStatus::Closed,
            LeadStatus::Lost,
        ] {
            assert_eq!(LeadStatus::from_str(&status.to_string()).unwrap(), status);
        }
    }

    #[test]
    fn test_lead_status_serde_screaming() {
        assert_eq!(
            serde_json::to_string(&LeadStatus::Qualified).unwrap(),
            "\"QUALIFIED\""
        );
    }

    #[test]
    fn test_lead_source_roundtrip() {
        for source in [
            LeadSource::Instagram,
            LeadSource::Facebook,
            LeadSource::Website,
            LeadSource::Referral,
        ] {
            assert_eq!(LeadSource::from_str(&source.to_string()).unwrap(), source);
        }
    }

    #[test]
    fn test_content_type_rejects_unknown() {
        assert!(ContentType::from_str("GIF").is_err());
    }

    #[test]
    fn test_content_status_roundtrip() {
        for status in [
            ContentStatus::Draft,
            ContentStatus::Approved,
            ContentStatus::Published,
        ] {
            assert_eq!(
                ContentStatus::from_str(&status.to_string()).unwrap(),
                status
            );
        }
    }

    #[test]
    fn test_business_defaults() {
        assert_eq!(SubscriptionPlan::default(), SubscriptionPlan::Free);
        assert_eq!(BusinessStatus::default(), BusinessStatus::Pending);
    }
}
