//! User profile draft assembled across the onboarding steps.

use serde::{Deserialize, Serialize};

/// In-progress user profile collected by the wizard.
///
/// The draft is updated by replacement only: each step merges its fields
/// into a fresh copy of the previous draft, so observers never see a
/// half-merged record. Risk tolerance and report complexity are picked
/// from lists the UI defines; this core stores whatever it is handed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfileDraft {
    pub name: String,
    pub age: i32,
    pub risk_tolerance: String,
    pub report_complexity: String,
    /// Interest tags, in the order the user picked them.
    pub interests: Vec<String>,
    /// Weekdays the user wants reports delivered on.
    pub report_days: Vec<i32>,
}

impl Default for UserProfileDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 0,
            risk_tolerance: String::new(),
            report_complexity: String::new(),
            interests: Vec::new(),
            report_days: Vec::new(),
        }
    }
}

impl UserProfileDraft {
    /// Merge the basic-info fields, leaving interests and report days as-is.
    pub fn with_basic_info(
        self,
        name: impl Into<String>,
        age: i32,
        risk_tolerance: impl Into<String>,
        report_complexity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            risk_tolerance: risk_tolerance.into(),
            report_complexity: report_complexity.into(),
            ..self
        }
    }

    /// Merge the interest tags and report days, leaving basic info as-is.
    pub fn with_interests_and_days(self, interests: Vec<String>, report_days: Vec<i32>) -> Self {
        Self {
            interests,
            report_days,
            ..self
        }
    }

    /// Whether every basic-info field has been filled in meaningfully.
    pub fn has_basic_info(&self) -> bool {
        !self.name.trim().is_empty()
            && self.age > 0
            && !self.risk_tolerance.trim().is_empty()
            && !self.report_complexity.trim().is_empty()
    }

    /// Whether both interests and report days have at least one entry.
    pub fn has_interests_and_days(&self) -> bool {
        !self.interests.is_empty() && !self.report_days.is_empty()
    }
}
