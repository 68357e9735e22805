//! Screening Engine — fuses similarity, keyword gap, quality and decision into one result.
//!
//! Flow: extract_text → {analyze_keyword_gap, scorer.score, assess_quality} → decide.
//!
//! The engine holds only immutable thresholds and a stateless scorer, so it is
//! cheap to clone into `spawn_blocking` closures. Scoring is CPU-bound; async
//! callers go through `screen_text_blocking` / `screen_batch`.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::screening::decision::{decide, AtsStatus};
use crate::screening::extractor::extract_text;
use crate::screening::keywords::analyze_keyword_gap;
use crate::screening::quality::{detect_sections, label_for_section_count, QualityLabel};
use crate::screening::similarity::{SimilarityScorer, TfIdfCosineScorer};
use crate::screening::thresholds::ScreeningThresholds;

// ────────────────────────────────────────────────────────────────────────────
// Output value object
// ────────────────────────────────────────────────────────────────────────────

/// The engine's sole output. Fields are private so `status` can only ever be
/// derived from `score` and `quality` by `ScoringResult::new`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResult {
    score: f64,
    missing_keywords: Vec<String>,
    quality: QualityLabel,
    status: AtsStatus,
    sections_found: Vec<String>,
}

impl ScoringResult {
    pub fn new(
        score: f64,
        missing_keywords: Vec<String>,
        quality: QualityLabel,
        sections_found: Vec<String>,
        thresholds: &ScreeningThresholds,
    ) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let mut missing_keywords = missing_keywords;
        missing_keywords.truncate(thresholds.missing_keyword_limit);
        Self {
            score,
            missing_keywords,
            quality,
            status: decide(score, quality, thresholds),
            sections_found,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn missing_keywords(&self) -> &[String] {
        &self.missing_keywords
    }

    pub fn quality(&self) -> QualityLabel {
        self.quality
    }

    pub fn status(&self) -> AtsStatus {
        self.status
    }

    pub fn sections_found(&self) -> &[String] {
        &self.sections_found
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ScreeningEngine {
    scorer: Arc<dyn SimilarityScorer>,
    thresholds: ScreeningThresholds,
}

impl ScreeningEngine {
    /// Engine with the default TF–IDF cosine scorer.
    pub fn new(thresholds: ScreeningThresholds) -> Self {
        Self::with_scorer(Arc::new(TfIdfCosineScorer), thresholds)
    }

    pub fn with_scorer(scorer: Arc<dyn SimilarityScorer>, thresholds: ScreeningThresholds) -> Self {
        Self { scorer, thresholds }
    }

    /// Label of the active similarity scorer.
    pub fn scorer_backend(&self) -> &'static str {
        self.scorer.backend()
    }

    pub fn thresholds(&self) -> &ScreeningThresholds {
        &self.thresholds
    }

    /// Screens already-extracted resume text against a job description.
    pub fn screen_text(&self, job_text: &str, resume_text: &str) -> ScoringResult {
        let score = self.scorer.score(job_text, resume_text);
        let missing = analyze_keyword_gap(job_text, resume_text, self.thresholds.missing_keyword_limit)
            .into_keywords();
        let sections = detect_sections(resume_text);
        let quality = label_for_section_count(sections.len(), &self.thresholds);

        let result = ScoringResult::new(
            score,
            missing,
            quality,
            sections.into_iter().map(str::to_string).collect(),
            &self.thresholds,
        );
        info!(
            backend = self.scorer.backend(),
            score = result.score(),
            quality = result.quality().as_str(),
            status = result.status().as_str(),
            "Screened resume"
        );
        result
    }

    /// Extracts text from a raw document and screens it. Never fails.
    pub fn screen_document(&self, job_text: &str, document: &[u8], filename: &str) -> ScoringResult {
        let resume_text = extract_text(document, filename);
        self.screen_text(job_text, &resume_text)
    }

    /// Runs `screen_document` on the blocking pool.
    pub async fn screen_document_blocking(
        &self,
        job_text: String,
        document: Bytes,
        filename: String,
    ) -> Result<ScoringResult, AppError> {
        let engine = self.clone();
        tokio::task::spawn_blocking(move || engine.screen_document(&job_text, &document, &filename))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in screening: {e}")))
    }

    /// Runs `screen_text` on the blocking pool.
    pub async fn screen_text_blocking(
        &self,
        job_text: String,
        resume_text: String,
    ) -> Result<ScoringResult, AppError> {
        let engine = self.clone();
        tokio::task::spawn_blocking(move || engine.screen_text(&job_text, &resume_text))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in screening: {e}")))
    }

    /// Screens many documents for one job in parallel, one blocking task each.
    ///
    /// Results come back in completion order, tagged with the caller's key.
    /// A task that dies is logged and skipped; the rest still complete.
    pub async fn screen_batch<K>(
        &self,
        job_text: Arc<str>,
        documents: Vec<BatchDocument<K>>,
    ) -> Vec<(K, ScoringResult)>
    where
        K: Send + 'static,
    {
        let mut tasks = JoinSet::new();
        for doc in documents {
            let engine = self.clone();
            let job_text = Arc::clone(&job_text);
            tasks.spawn_blocking(move || {
                let result = engine.screen_document(&job_text, &doc.bytes, &doc.filename);
                (doc.key, result)
            });
        }

        let mut results = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(pair) => results.push(pair),
                Err(e) => warn!("Batch screening task failed: {e}"),
            }
        }
        results
    }
}

/// One document queued for batch screening.
pub struct BatchDocument<K> {
    pub key: K,
    pub filename: String,
    pub bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
