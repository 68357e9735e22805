//! Tunable cutoffs for the screening engine.
//!
//! The defaults reproduce the classic ATS rule: a 50% relevance cutoff,
//! three of four canonical sections for a High quality label, and a five
//! keyword preview. `Config` may override any of them at startup.

use serde::{Deserialize, Serialize};

/// Minimum relevance score (percent) for a Shortlisted verdict.
pub const SHORTLIST_MIN_SCORE: f64 = 50.0;

/// Sections that must be present for a High quality label.
pub const HIGH_QUALITY_MIN_SECTIONS: usize = 3;

/// Sections that must be present for a Medium quality label.
pub const MEDIUM_QUALITY_MIN_SECTIONS: usize = 1;

/// Maximum number of missing keywords surfaced per applicant.
pub const MISSING_KEYWORD_LIMIT: usize = 5;

/// Canonical resume section markers, matched case-insensitively as substrings.
pub const SECTION_MARKERS: &[&str] = &["education", "experience", "skills", "projects"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningThresholds {
    pub shortlist_min_score: f64,
    pub high_quality_min_sections: usize,
    pub medium_quality_min_sections: usize,
    pub missing_keyword_limit: usize,
}

impl Default for ScreeningThresholds {
    fn default() -> Self {
        Self {
            shortlist_min_score: SHORTLIST_MIN_SCORE,
            high_quality_min_sections: HIGH_QUALITY_MIN_SECTIONS,
            medium_quality_min_sections: MEDIUM_QUALITY_MIN_SECTIONS,
            missing_keyword_limit: MISSING_KEYWORD_LIMIT,
        }
    }
}

impl ScreeningThresholds {
    /// Checks that the thresholds describe a coherent rule set.
    ///
    /// Medium must need at least one section (zero sections is always Low)
    /// and may not need more sections than High.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.shortlist_min_score) {
            return Err(format!(
                "shortlist_min_score must be within 0..=100, got {}",
                self.shortlist_min_score
            ));
        }
        if self.medium_quality_min_sections == 0 {
            return Err("medium_quality_min_sections must be at least 1".to_string());
        }
        if self.medium_quality_min_sections > self.high_quality_min_sections {
            return Err(format!(
                "medium_quality_min_sections ({}) exceeds high_quality_min_sections ({})",
                self.medium_quality_min_sections, self.high_quality_min_sections
            ));
        }
        if self.high_quality_min_sections > SECTION_MARKERS.len() {
            return Err(format!(
                "high_quality_min_sections ({}) exceeds the {} known section markers",
                self.high_quality_min_sections,
                SECTION_MARKERS.len()
            ));
        }
        Ok(())
    }
}
