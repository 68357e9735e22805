//! Similarity Scoring — pluggable, trait-based relevance scorer for job description vs resume.
//!
//! Default: `TfIdfCosineScorer`. Each call builds its own two-document vector
//! space, so a single scorer instance can be shared across threads.

use std::collections::BTreeMap;

use crate::screening::vocabulary::term_frequencies;

/// Relevance scorer between a job description and a resume.
///
/// Carried by `ScreeningEngine` as `Arc<dyn SimilarityScorer>`.
pub trait SimilarityScorer: Send + Sync {
    /// Returns a percentage in `[0, 100]`, rounded to two decimals.
    fn score(&self, job_text: &str, resume_text: &str) -> f64;

    /// Backend label, surfaced in logs.
    fn backend(&self) -> &'static str;
}

/// TF–IDF weighted cosine similarity over the corpus `{job, resume}`.
///
/// Algorithm:
/// 1. Term counts per document (stop words removed).
/// 2. idf(t) = ln((1 + n) / (1 + df(t))) + 1 with n = 2.
/// 3. weight = count × idf; cosine of the two weight vectors.
/// 4. × 100, clamped to [0, 100], rounded to 2 decimals.
pub struct TfIdfCosineScorer;

impl SimilarityScorer for TfIdfCosineScorer {
    fn score(&self, job_text: &str, resume_text: &str) -> f64 {
        if resume_text.trim().is_empty() {
            return 0.0;
        }
        let similarity = tfidf_cosine(&term_frequencies(job_text), &term_frequencies(resume_text));
        to_percentage(similarity)
    }

    fn backend(&self) -> &'static str {
        "tfidf-cosine"
    }
}

const CORPUS_SIZE: f64 = 2.0;

fn smoothed_idf(document_frequency: f64) -> f64 {
    ((1.0 + CORPUS_SIZE) / (1.0 + document_frequency)).ln() + 1.0
}

/// Cosine similarity of the TF–IDF vectors of two documents. Returns 0.0 when
/// either vector is empty or has zero norm.
fn tfidf_cosine(job: &BTreeMap<String, u32>, resume: &BTreeMap<String, u32>) -> f64 {
    if job.is_empty() || resume.is_empty() {
        return 0.0;
    }

    let weight = |term: &str, count: u32, other: &BTreeMap<String, u32>| -> f64 {
        let df = if other.contains_key(term) { 2.0 } else { 1.0 };
        count as f64 * smoothed_idf(df)
    };

    let mut dot = 0.0_f64;
    let mut job_norm_sq = 0.0_f64;
    for (term, &count) in job {
        let w = weight(term, count, resume);
        job_norm_sq += w * w;
        if let Some(&resume_count) = resume.get(term) {
            dot += w * weight(term, resume_count, job);
        }
    }

    let resume_norm_sq: f64 = resume
        .iter()
        .map(|(term, &count)| {
            let w = weight(term, count, job);
            w * w
        })
        .sum();

    let denominator = job_norm_sq.sqrt() * resume_norm_sq.sqrt();
    if denominator <= f64::EPSILON {
        return 0.0;
    }
    dot / denominator
}

fn to_percentage(similarity: f64) -> f64 {
    if !similarity.is_finite() {
        return 0.0;
    }
    round2((similarity * 100.0).clamp(0.0, 100.0))
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = "Looking for a Python developer with experience in Django and SQL";

    fn score(job: &str, resume: &str) -> f64 {
        TfIdfCosineScorer.score(job, resume)
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        assert_eq!(score(JOB, ""), 0.0);
        assert_eq!(score(JOB, "   \n\t"), 0.0);
    }

    #[test]
    fn test_identical_text_scores_hundred() {
        let s = score(JOB, JOB);
        assert!(s >= 99.0, "Expected ≈100, got {s}");
        assert!(s <= 100.0);
    }

    #[test]
    fn test_disjoint_vocabularies_score_zero() {
        assert_eq!(score(JOB, "Accountant certified bookkeeping"), 0.0);
    }

    #[test]
    fn test_stop_word_only_sides_score_zero() {
        assert_eq!(score("the and of", "the and of"), 0.0);
        assert_eq!(score(JOB, "and the of with"), 0.0);
        assert_eq!(score("the and of", "Python developer"), 0.0);
    }

    #[test]
    fn test_partial_overlap_between_bounds() {
        let s = score(JOB, "Python developer building REST services in Flask");
        assert!(s > 0.0 && s < 100.0, "Score was {s}");
    }

    #[test]
    fn test_more_overlap_scores_higher() {
        let low = score(JOB, "Python hobbyist who enjoys gardening and cooking");
        let high = score(JOB, "Python developer with Django and SQL experience");
        assert!(high > low, "high={high} low={low}");
    }

    #[test]
    fn test_score_rounded_to_two_decimals() {
        let s = score(JOB, "Python developer building REST services in Flask");
        assert!(((s * 100.0).round() - s * 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_known_value_single_shared_term() {
        // job {python, rust}, resume {python}: shared idf = 1, unique idf = ln(1.5) + 1.
        let unique = 1.5_f64.ln() + 1.0;
        let expected = round2(100.0 / (1.0 + unique * unique).sqrt());
        assert_eq!(score("python rust", "python"), expected);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_backend_label() {
        assert_eq!(TfIdfCosineScorer.backend(), "tfidf-cosine");
    }
}
