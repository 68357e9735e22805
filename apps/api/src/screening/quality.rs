//! Resume structure heuristic.
//!
//! Counts which canonical section markers appear anywhere in the text. This is
//! a substring check, not section parsing: "experienced" counts as the
//! experience marker and synonyms such as "work history" earn nothing.

use serde::{Deserialize, Serialize};

use crate::screening::thresholds::{ScreeningThresholds, SECTION_MARKERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLabel {
    High,
    Medium,
    Low,
}

impl QualityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLabel::High => "high",
            QualityLabel::Medium => "medium",
            QualityLabel::Low => "low",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QualityLabel::High => "High Quality (Standard Format)",
            QualityLabel::Medium => "Medium Quality (Missing Sections)",
            QualityLabel::Low => "Low Quality / Invalid Format",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(QualityLabel::High),
            "medium" => Some(QualityLabel::Medium),
            "low" => Some(QualityLabel::Low),
            _ => None,
        }
    }
}

/// Section markers found in `resume_text`, in marker order.
pub fn detect_sections(resume_text: &str) -> Vec<&'static str> {
    let lower = resume_text.to_lowercase();
    SECTION_MARKERS
        .iter()
        .copied()
        .filter(|marker| lower.contains(marker))
        .collect()
}

/// Maps a count of detected sections to a label.
pub fn label_for_section_count(found: usize, thresholds: &ScreeningThresholds) -> QualityLabel {
    if found >= thresholds.high_quality_min_sections {
        QualityLabel::High
    } else if found >= thresholds.medium_quality_min_sections {
        QualityLabel::Medium
    } else {
        QualityLabel::Low
    }
}

pub fn assess_quality(resume_text: &str, thresholds: &ScreeningThresholds) -> QualityLabel {
    label_for_section_count(detect_sections(resume_text).len(), thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(text: &str) -> QualityLabel {
        assess_quality(text, &ScreeningThresholds::default())
    }

    #[test]
    fn test_no_markers_is_low() {
        assert_eq!(assess("Jane Doe, software person"), QualityLabel::Low);
        assert_eq!(assess(""), QualityLabel::Low);
    }

    #[test]
    fn test_one_marker_is_medium() {
        assert_eq!(assess("Skills: Rust, SQL"), QualityLabel::Medium);
    }

    #[test]
    fn test_two_markers_is_medium() {
        assert_eq!(assess("EDUCATION\nBSc\nSKILLS\nRust"), QualityLabel::Medium);
    }

    #[test]
    fn test_three_markers_is_high() {
        assert_eq!(
            assess("Education ... Experience ... Skills ..."),
            QualityLabel::High
        );
    }

    #[test]
    fn test_four_markers_is_high() {
        assert_eq!(
            assess("Education Experience Skills Projects"),
            QualityLabel::High
        );
    }

    #[test]
    fn test_substring_match_counts_inflections() {
        assert_eq!(detect_sections("Experienced engineer"), vec!["experience"]);
    }

    #[test]
    fn test_detect_sections_keeps_marker_order() {
        assert_eq!(
            detect_sections("projects then skills then education"),
            vec!["education", "skills", "projects"]
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = ScreeningThresholds {
            high_quality_min_sections: 4,
            medium_quality_min_sections: 2,
            ..Default::default()
        };
        assert_eq!(label_for_section_count(3, &strict), QualityLabel::Medium);
        assert_eq!(label_for_section_count(1, &strict), QualityLabel::Low);
        assert_eq!(label_for_section_count(4, &strict), QualityLabel::High);
    }

    #[test]
    fn test_label_string_round_trip() {
        for label in [QualityLabel::High, QualityLabel::Medium, QualityLabel::Low] {
            assert_eq!(QualityLabel::parse(label.as_str()), Some(label));
        }
        assert_eq!(QualityLabel::parse("excellent"), None);
    }
}
