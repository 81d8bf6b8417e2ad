use std::path::Path;

use chrono::{ DateTime, Utc };
use serde::Serialize;

use crate::errors::{ FactCheckError, FactCheckResult };
use crate::models::claim::ClaimRecord;
use crate::models::common::{ AccuracyBand, VerdictStatus };
use crate::models::verdict::VerdictRecord;

/// Number of verdicts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub verified: usize,
    pub inaccurate: usize,
    #[serde(rename = "false")]
    pub false_claims: usize,
    pub errors: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: VerdictStatus) {
        match status {
            VerdictStatus::Verified => self.verified += 1,
            VerdictStatus::Inaccurate => self.inaccurate += 1,
            VerdictStatus::False => self.false_claims += 1,
            VerdictStatus::Error => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.verified + self.inaccurate + self.false_claims + self.errors
    }

    /// verified / (total - errors) * 100, or 0 when nothing could be checked
    pub fn accuracy(&self) -> f64 {
        let checked = self.total() - self.errors;
        if checked == 0 {
            return 0.0;
        }
        (self.verified as f64 / checked as f64) * 100.0
    }
}

/// A claim paired with its verdict
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimResult {
    pub claim: ClaimRecord,
    pub verdict: VerdictRecord,
}

/// Aggregate outcome of one fact-checking run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub document: String,
    pub timestamp: DateTime<Utc>,
    pub counts: StatusCounts,
    pub results: Vec<ClaimResult>,
}

impl ReportSummary {
    pub fn from_results(document: &str, results: Vec<ClaimResult>) -> Self {
        let mut counts = StatusCounts::default();
        for result in &results {
            counts.record(result.verdict.status);
        }

        Self {
            document: document.to_string(),
            timestamp: Utc::now(),
            counts,
            results,
        }
    }

    pub fn total_claims(&self) -> usize {
        self.results.len()
    }

    pub fn accuracy(&self) -> f64 {
        self.counts.accuracy()
    }

    /// Display band, or `None` when no claim could be checked
    pub fn band(&self) -> Option<AccuracyBand> {
        if self.counts.total() == self.counts.errors {
            return None;
        }
        Some(AccuracyBand::from_accuracy(self.accuracy()))
    }

    pub fn default_file_name(&self) -> String {
        format!("fact_check_{}.json", self.timestamp.format("%Y%m%d_%H%M%S"))
    }

    pub fn to_export(&self, include_results: bool) -> ExportedReport<'_> {
        ExportedReport {
            document: &self.document,
            timestamp: self.timestamp.to_rfc3339(),
            summary: ExportedSummary {
                total_claims: self.total_claims(),
                counts: self.counts,
                accuracy_percentage: (self.accuracy() * 100.0).round() / 100.0,
            },
            results: include_results.then(|| {
                self.results
                    .iter()
                    .map(|r| ExportedResult { claim: &r.claim, verdict: &r.verdict })
                    .collect()
            }),
        }
    }

    pub fn to_json(&self, include_results: bool) -> FactCheckResult<String> {
        serde_json
            ::to_string_pretty(&self.to_export(include_results))
            .map_err(|e| FactCheckError::ExportError(format!("Failed to serialize report: {}", e)))
    }

    /// Write the report as pretty-printed JSON
    pub fn export(&self, path: &Path, include_results: bool) -> FactCheckResult<()> {
        let json = self.to_json(include_results)?;
        std::fs
            ::write(path, json)
            .map_err(|e|
                FactCheckError::ExportError(format!("Failed to write {}: {}", path.display(), e))
            )
    }
}

/// Serialized shape of an exported report
#[derive(Debug, Serialize)]
pub struct ExportedReport<'a> {
    pub document: &'a str,
    pub timestamp: String,
    pub summary: ExportedSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ExportedResult<'a>>>,
}

#[derive(Debug, Serialize)]
pub struct ExportedSummary {
    pub total_claims: usize,
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub accuracy_percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct ExportedResult<'a> {
    #[serde(flatten)]
    pub claim: &'a ClaimRecord,
    #[serde(flatten)]
    pub verdict: &'a VerdictRecord,
}
