use serde::{ Deserialize, Serialize };

use crate::models::common::ClaimCategory;

/// A discrete, independently verifiable factual assertion found in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    #[serde(rename = "claim")]
    pub text: String,
    #[serde(default)]
    pub category: ClaimCategory,
    pub search_query: String,
}

impl ClaimRecord {
    /// Build a claim, trimming its fields. Returns `None` when the claim text
    /// or the search query is empty.
    pub fn new(text: &str, category: ClaimCategory, search_query: &str) -> Option<Self> {
        let text = text.trim();
        let search_query = search_query.trim();
        if text.is_empty() || search_query.is_empty() {
            return None;
        }

        Some(Self {
            text: text.to_string(),
            category,
            search_query: search_query.to_string(),
        })
    }

    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty() && !self.search_query.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        assert!(ClaimRecord::new("  ", ClaimCategory::Date, "q").is_none());
        assert!(ClaimRecord::new("claim", ClaimCategory::Date, "\n").is_none());
    }

    #[test]
    fn serializes_with_model_field_names() {
        let claim = ClaimRecord::new(
            " Bitcoin trades at $42,500 ",
            ClaimCategory::Financial,
            "Bitcoin price"
        ).unwrap();
        let json = serde_json::to_value(&claim).unwrap();
        assert_eq!(json["claim"], "Bitcoin trades at $42,500");
        assert_eq!(json["category"], "financial");
        assert_eq!(json["search_query"], "Bitcoin price");
    }
}
