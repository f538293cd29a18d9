//! Creator records, filters, and AI search payloads

use serde::{Deserialize, Serialize};

/// A creator profile
///
/// POST /creators takes the full record; an empty `id` is replaced by the
/// backend with a generated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub handle: String,
    pub platform: String,
    pub followers: String,
    pub engagement: String,
    pub category: String,
    pub location: String,
    pub description: String,
}

/// Optional filters for GET /creators
///
/// Absent filters are omitted from the query string entirely, never sent as
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatorFilter {
    pub category: Option<String>,
    pub platform: Option<String>,
}

impl CreatorFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.platform.is_none()
    }

    /// Query pairs in a stable order, present filters only
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(platform) = &self.platform {
            pairs.push(("platform", platform.clone()));
        }
        pairs
    }
}

/// Envelope returned by GET /creators/count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorCount {
    pub count: u64,
}

/// Body for POST /creators/search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorSearchRequest {
    pub query: String,
    pub campaign_id: String,
}

/// One AI-ranked search result: a creator plus its match score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCreator {
    #[serde(flatten)]
    pub creator: Creator,
    pub match_score: u32,
    /// Free-form analyst notes; shape varies with the model output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<serde_json::Value>,
}

/// Response of POST /creators/search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatorSearchResponse {
    pub results: Vec<ScoredCreator>,
    pub query_processed: String,
    pub semantic_matches: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator_json() -> &'static str {
        r#"{
            "id": "cr-1",
            "name": "Asha",
            "handle": "@asha",
            "platform": "instagram",
            "followers": "120k",
            "engagement": "4.2%",
            "category": "tech",
            "location": "Mumbai",
            "description": "Gadget reviews"
        }"#
    }

    #[test]
    fn creator_parses() {
        let creator: Creator = serde_json::from_str(creator_json()).expect("creator");
        assert_eq!(creator.handle, "@asha");
        assert_eq!(creator.platform, "instagram");
    }

    #[test]
    fn filter_query_pairs_skip_absent_fields() {
        let filter = CreatorFilter { category: None, platform: Some("instagram".into()) };
        assert_eq!(filter.query_pairs(), vec![("platform", "instagram".to_string())]);
        assert!(!filter.is_empty());
        assert!(CreatorFilter::default().is_empty());
    }

    #[test]
    fn scored_creator_flattens_record_fields() {
        let json = r#"{
            "id": "cr-1",
            "name": "Asha",
            "handle": "@asha",
            "platform": "instagram",
            "followers": "120k",
            "engagement": "4.2%",
            "category": "tech",
            "location": "Mumbai",
            "description": "Gadget reviews",
            "match_score": 85,
            "ai_insights": {"strengths": ["audience fit"]}
        }"#;

        let scored: ScoredCreator = serde_json::from_str(json).expect("scored creator");
        assert_eq!(scored.creator.id, "cr-1");
        assert_eq!(scored.match_score, 85);
        assert!(scored.ai_insights.is_some());
    }
}
