// 🩺 Health Record - One health issue of one animal
//
// Equality is (issue, date_reported, severity_level); the treatment plan
// can change without making it a different record.
// A record is critical when its severity is high or critical.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ZooError, ZooResult};
use crate::validation::require_text;

// ============================================================================
// SEVERITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// High and critical issues block moving the animal
    pub fn is_critical(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }

    fn vocabulary() -> String {
        Severity::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Severity {
    type Err = ZooError;

    /// Case-insensitive: "High", "HIGH" and "high" are the same level
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Severity::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == lower)
            .ok_or_else(|| {
                ZooError::value_violation(format!(
                    "Severity level must be one of: {}",
                    Severity::vocabulary()
                ))
            })
    }
}

// ============================================================================
// HEALTH RECORD
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthRecord {
    issue: String,
    date_reported: String,

    /// Severity exactly as it was written ("High", "critical", ...)
    severity_level: String,

    /// Parsed form of `severity_level`, always kept in step with it
    #[serde(skip)]
    severity: Severity,

    treatment_plan: String,
}

impl HealthRecord {
    pub fn new(
        issue: impl Into<String>,
        date_reported: impl Into<String>,
        severity_level: impl Into<String>,
        treatment_plan: impl Into<String>,
    ) -> ZooResult<Self> {
        let issue = require_text(issue, "Issue")?;
        let date_reported = require_text(date_reported, "Date")?;
        let severity_level = require_text(severity_level, "Severity level")?;
        let severity = Severity::from_str(&severity_level)?;

        Ok(HealthRecord {
            issue,
            date_reported,
            severity_level,
            severity,
            treatment_plan: require_text(treatment_plan, "Treatment plan")?,
        })
    }

    pub fn issue(&self) -> &str {
        &self.issue
    }

    pub fn date_reported(&self) -> &str {
        &self.date_reported
    }

    pub fn severity_level(&self) -> &str {
        &self.severity_level
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn treatment_plan(&self) -> &str {
        &self.treatment_plan
    }

    pub fn set_issue(&mut self, issue: impl Into<String>) -> ZooResult<()> {
        self.issue = require_text(issue, "Issue")?;
        Ok(())
    }

    pub fn set_date_reported(&mut self, date_reported: impl Into<String>) -> ZooResult<()> {
        self.date_reported = require_text(date_reported, "Date")?;
        Ok(())
    }

    pub fn set_severity_level(&mut self, severity_level: impl Into<String>) -> ZooResult<()> {
        let severity_level = require_text(severity_level, "Severity level")?;
        self.severity = Severity::from_str(&severity_level)?;
        self.severity_level = severity_level;
        Ok(())
    }

    pub fn set_treatment_plan(&mut self, treatment_plan: impl Into<String>) -> ZooResult<()> {
        self.treatment_plan = require_text(treatment_plan, "Treatment plan")?;
        Ok(())
    }

    /// Replace the treatment plan and confirm
    pub fn update_treatment(&mut self, new_plan: impl Into<String>) -> ZooResult<String> {
        self.set_treatment_plan(new_plan)?;
        Ok(format!("Treatment plan updated: {}", self.treatment_plan))
    }

    /// Replace the severity level and confirm
    pub fn update_severity(&mut self, new_level: impl Into<String>) -> ZooResult<String> {
        self.set_severity_level(new_level)?;
        Ok(format!("Severity level updated: {}", self.severity_level))
    }

    /// One line: "{issue} ({severity}) reported on {date}"
    pub fn summary(&self) -> String {
        format!(
            "{} ({}) reported on {}",
            self.issue, self.severity_level, self.date_reported
        )
    }

    pub fn is_critical(&self) -> bool {
        self.severity.is_critical()
    }

    /// Calendar date of the report, when `date_reported` is YYYY-MM-DD or MM/DD/YYYY
    ///
    /// The field itself is free-form text, so this is None for "last Tuesday".
    pub fn reported_on(&self) -> Option<NaiveDate> {
        let date = self.date_reported.trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(date, "%m/%d/%Y"))
            .ok()
    }
}

impl PartialEq for HealthRecord {
    fn eq(&self, other: &Self) -> bool {
        self.issue == other.issue
            && self.date_reported == other.date_reported
            && self.severity_level == other.severity_level
    }
}

impl fmt::Display for HealthRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Health Issue: {}", self.issue)?;
        writeln!(f, "Severity: {}", self.severity_level)?;
        writeln!(f, "Date: {}", self.date_reported)?;
        writeln!(f, "Treatment: {}", self.treatment_plan)
    }
}

// ============================================================================
// TESTS
// ============================================================================
