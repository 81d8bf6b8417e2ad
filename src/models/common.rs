use std::fmt;

use serde::{ Deserialize, Deserializer, Serialize };

/// Kinds of factual claims the extractor is asked to find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimCategory {
    Financial,
    Statistic,
    Date,
    Technical,
    Economic,
    Announcement,
    Other,
}

impl ClaimCategory {
    pub const ALL: [ClaimCategory; 7] = [
        ClaimCategory::Financial,
        ClaimCategory::Statistic,
        ClaimCategory::Date,
        ClaimCategory::Technical,
        ClaimCategory::Economic,
        ClaimCategory::Announcement,
        ClaimCategory::Other,
    ];

    /// Map a model-supplied category token; anything unrecognised is `Other`
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "financial" | "finance" => ClaimCategory::Financial,
            "statistic" | "statistics" | "statistical" => ClaimCategory::Statistic,
            "date" | "dates" | "timeframe" => ClaimCategory::Date,
            "technical" | "technology" => ClaimCategory::Technical,
            "economic" | "economy" => ClaimCategory::Economic,
            "announcement" | "announcements" => ClaimCategory::Announcement,
            _ => ClaimCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimCategory::Financial => "financial",
            ClaimCategory::Statistic => "statistic",
            ClaimCategory::Date => "date",
            ClaimCategory::Technical => "technical",
            ClaimCategory::Economic => "economic",
            ClaimCategory::Announcement => "announcement",
            ClaimCategory::Other => "other",
        }
    }
}

impl Default for ClaimCategory {
    fn default() -> Self {
        ClaimCategory::Other
    }
}

impl<'de> Deserialize<'de> for ClaimCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(ClaimCategory::from_token(&token))
    }
}

impl fmt::Display for ClaimCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of checking one claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictStatus {
    Verified, // Corroborated by current evidence
    Inaccurate, // Directionally right, wrong or outdated figures
    False, // No supporting evidence, or contradicted
    Error, // Could not be checked
}

impl VerdictStatus {
    /// Parse a status token returned by the model. Only the four known
    /// statuses are accepted; callers treat `None` as a failed verification.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "VERIFIED" => Some(VerdictStatus::Verified),
            "INACCURATE" => Some(VerdictStatus::Inaccurate),
            "FALSE" => Some(VerdictStatus::False),
            "ERROR" => Some(VerdictStatus::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Verified => "VERIFIED",
            VerdictStatus::Inaccurate => "INACCURATE",
            VerdictStatus::False => "FALSE",
            VerdictStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Qualitative reading of a document's accuracy, for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyBand {
    SignificantInaccuracies,
    NeedsCorrection,
    MostlyAccurate,
}

impl AccuracyBand {
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy < 50.0 {
            AccuracyBand::SignificantInaccuracies
        } else if accuracy < 80.0 {
            AccuracyBand::NeedsCorrection
        } else {
            AccuracyBand::MostlyAccurate
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            AccuracyBand::SignificantInaccuracies => "Document has significant inaccuracies.",
            AccuracyBand::NeedsCorrection => "Some claims need correction.",
            AccuracyBand::MostlyAccurate => "Document is mostly accurate.",
        }
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tokens_are_strict_but_case_insensitive() {
        assert_eq!(VerdictStatus::from_token(" verified "), Some(VerdictStatus::Verified));
        assert_eq!(VerdictStatus::from_token("FALSE"), Some(VerdictStatus::False));
        assert_eq!(VerdictStatus::from_token("PARTIALLY TRUE"), None);
        assert_eq!(VerdictStatus::from_token(""), None);
    }

    #[test]
    fn unknown_categories_fall_back_to_other() {
        assert_eq!(ClaimCategory::from_token("Financial"), ClaimCategory::Financial);
        assert_eq!(ClaimCategory::from_token("geography"), ClaimCategory::Other);
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(AccuracyBand::from_accuracy(49.9), AccuracyBand::SignificantInaccuracies);
        assert_eq!(AccuracyBand::from_accuracy(50.0), AccuracyBand::NeedsCorrection);
        assert_eq!(AccuracyBand::from_accuracy(80.0), AccuracyBand::MostlyAccurate);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
