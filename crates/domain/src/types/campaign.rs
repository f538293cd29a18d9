//! Campaign records and payloads

use serde::{Deserialize, Serialize};

/// A campaign as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub title: String,
    pub brief: String,
    pub platforms: Vec<String>,
    pub audience: String,
    pub budget: String,
    #[serde(default)]
    pub enhanced_brief: Option<String>,
    pub created_at: String,
}

/// Body for POST /campaigns; the backend assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCampaign {
    pub title: String,
    pub brief: String,
    pub platforms: Vec<String>,
    pub audience: String,
    pub budget: String,
}

/// Envelope returned by GET /campaigns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignList {
    pub campaigns: Vec<Campaign>,
}

/// Response of POST /campaigns/{id}/enhance-brief
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedBrief {
    pub enhanced_brief: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_round_trips_with_naive_timestamp() {
        let json = r#"{
            "id": "c-1",
            "title": "Summer",
            "brief": "Launch push",
            "platforms": ["Instagram", "YouTube"],
            "audience": "18-24",
            "budget": "₹50,000",
            "enhanced_brief": null,
            "created_at": "2024-06-01T10:30:00.123456"
        }"#;

        let campaign: Campaign = serde_json::from_str(json).expect("campaign should parse");
        assert_eq!(campaign.id, "c-1");
        assert_eq!(campaign.platforms.len(), 2);
        assert!(campaign.enhanced_brief.is_none());
        assert_eq!(campaign.created_at, "2024-06-01T10:30:00.123456");
    }

    #[test]
    fn missing_enhanced_brief_defaults_to_none() {
        let json = r#"{
            "id": "c-2",
            "title": "Fall",
            "brief": "b",
            "platforms": [],
            "audience": "a",
            "budget": "0",
            "created_at": "2024-01-01T00:00:00"
        }"#;

        let campaign: Campaign = serde_json::from_str(json).expect("campaign should parse");
        assert!(campaign.enhanced_brief.is_none());
    }

    #[test]
    fn new_campaign_serializes_all_fields() {
        let body = NewCampaign {
            title: "Summer".into(),
            brief: "...".into(),
            platforms: vec!["Instagram".into()],
            audience: "...".into(),
            budget: "₹50,000".into(),
        };

        let value = serde_json::to_value(&body).expect("serialize");
        assert_eq!(value["title"], "Summer");
        assert_eq!(value["platforms"][0], "Instagram");
        assert!(value.get("id").is_none());
    }
}
