use serde::{ Deserialize, Serialize };

use crate::models::common::truncate_chars;

/// Search depth hint passed to the web-search engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

/// A single web search issued for one claim
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: usize,
    pub depth: SearchDepth,
    pub include_answer: bool,
}

/// One result returned by the search engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Evidence gathered for a claim. Only lives for the duration of one verification.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchEvidence {
    pub results: Vec<SearchHit>,
    pub answer: Option<String>,
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() { "N/A" } else { value }
}

impl SearchEvidence {
    /// Render the top `max_results` hits as a prompt-sized digest
    pub fn digest(&self, max_results: usize, snippet_chars: usize, title_chars: usize) -> String {
        let mut context = String::new();
        for (idx, hit) in self.results.iter().take(max_results).enumerate() {
            context.push_str(&format!("\n--- Source {} ---\n", idx + 1));
            context.push_str(&format!("Title: {}\n", truncate_chars(or_na(&hit.title), title_chars)));
            context.push_str(&format!("URL: {}\n", or_na(&hit.url)));
            context.push_str(&format!("Content: {}\n", truncate_chars(or_na(&hit.content), snippet_chars)));
        }
        context
    }

    pub fn answer_or_default(&self) -> &str {
        match self.answer.as_deref() {
            Some(answer) if !answer.trim().is_empty() => answer,
            _ => "No summary available",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, url: &str, content: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            url: url.to_string(),
            content: content.to_string(),
            score: None,
        }
    }

    #[test]
    fn digest_keeps_top_results_and_truncates_content() {
        let evidence = SearchEvidence {
            results: vec![
                hit("First", "https://a.example", &"x".repeat(1000)),
                hit("Second", "https://b.example", "short"),
                hit("", "https://c.example", ""),
                hit("Fourth", "https://d.example", "never shown"),
            ],
            answer: None,
        };

        let digest = evidence.digest(3, 400, 200);
        assert!(digest.contains("--- Source 1 ---"));
        assert!(digest.contains("--- Source 3 ---"));
        assert!(!digest.contains("Fourth"));
        assert!(digest.contains(&format!("Content: {}\n", "x".repeat(400))));
        assert!(!digest.contains(&"x".repeat(401)));
        assert!(digest.contains("Title: N/A"));
    }

    #[test]
    fn missing_answer_uses_placeholder() {
        let mut evidence = SearchEvidence::default();
        assert_eq!(evidence.answer_or_default(), "No summary available");
        evidence.answer = Some("Bitcoin traded near $95k.".to_string());
        assert_eq!(evidence.answer_or_default(), "Bitcoin traded near $95k.");
    }
}
