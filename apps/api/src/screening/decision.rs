use serde::{Deserialize, Serialize};

use crate::screening::quality::QualityLabel;
use crate::screening::thresholds::ScreeningThresholds;

/// ATS verdict for a single application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtsStatus {
    Shortlisted,
    Rejected,
}

impl AtsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AtsStatus::Shortlisted => "shortlisted",
            AtsStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "shortlisted" => Some(AtsStatus::Shortlisted),
            "rejected" => Some(AtsStatus::Rejected),
            _ => None,
        }
    }
}

/// Shortlisted iff the score reaches the cutoff and the resume is not Low quality.
pub fn decide(score: f64, quality: QualityLabel, thresholds: &ScreeningThresholds) -> AtsStatus {
    if score >= thresholds.shortlist_min_score && quality != QualityLabel::Low {
        AtsStatus::Shortlisted
    } else {
        AtsStatus::Rejected
    }
}
