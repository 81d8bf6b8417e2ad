use std::collections::HashMap;

use crate::models::common::ClaimCategory;

pub const EXTRACTION_TEMPLATE_NAME: &str = "extraction";
pub const VERIFICATION_TEMPLATE_NAME: &str = "verification";

const EXTRACTION_TEMPLATE_HEAD: &str = r#"You are a fact-checking assistant. Extract ALL specific, verifiable factual claims from this document.

Focus on claims that can be verified with web search:
- Specific numbers: prices, percentages, statistics
- Dates and timeframes
- Financial data: stock prices, GDP, revenue, market caps
- Technical specifications and product details
- Company announcements and activities
- Economic indicators

For EACH claim you find, create a JSON object with:
- "claim": the exact text of the claim from the document
- "category": one of [{{categories}}]
- "search_query": an optimized web search query to verify this claim
"#;

const EXTRACTION_TEMPLATE_TAIL: &str = r#"
Return your response as a valid JSON array. Example:
[
  {
    "claim": "Bitcoin is trading at $42,500 in January 2026",
    "category": "financial",
    "search_query": "Bitcoin price January 2026"
  }
]

Document text:
{{document}}

Return ONLY the JSON array, no explanations, no markdown."#;

/// Extraction prompt with the category list filled in
pub fn default_extraction_template() -> String {
    let categories = ClaimCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}{}", EXTRACTION_TEMPLATE_HEAD.replace("{{categories}}", &categories), EXTRACTION_TEMPLATE_TAIL)
}

pub const DEFAULT_VERIFICATION_TEMPLATE: &str = r#"You are a professional fact-checker. Verify if this claim is accurate based on current {{as_of}} web data.

CLAIM TO VERIFY:
"{{claim}}"

CURRENT WEB SEARCH RESULTS ({{as_of}}):
{{search_context}}

SEARCH ENGINE SUMMARY:
{{answer}}

Return a JSON object with:
{
  "status": "VERIFIED" or "INACCURATE" or "FALSE",
  "correct_info": "What is the actual current information",
  "sources": ["url1", "url2"],
  "explanation": "Brief explanation why, in 1-3 sentences"
}

Status definitions:
- VERIFIED: Claim is corroborated by current {{as_of}} data
- INACCURATE: Claim is directionally right but has wrong numbers, outdated data, or factual errors
- FALSE: No evidence supports the claim, or the evidence contradicts it

Return ONLY the JSON object."#;

/// Substitute `{{name}}` placeholders in a template
pub fn render_template(template: &str, params: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

/// Month and year used to anchor "current" evidence in the verification prompt
pub fn as_of_label() -> String {
    chrono::Local::now().format("%B %Y").to_string()
}
