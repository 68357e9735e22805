//! Missing-keyword analysis: job vocabulary minus resume vocabulary.

use tracing::debug;

use crate::screening::vocabulary::{build_vocabulary, Vocabulary};

/// Outcome of comparing the keyword spaces of a job description and a resume.
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordGap {
    /// Job terms absent from the resume, lexicographic, capped at the preview limit.
    Missing(Vec<String>),
    /// One of the two texts has no usable vocabulary.
    Unavailable,
}

impl KeywordGap {
    /// Collapses the gap into the preview list; `Unavailable` becomes empty.
    pub fn into_keywords(self) -> Vec<String> {
        match self {
            KeywordGap::Missing(keywords) => keywords,
            KeywordGap::Unavailable => Vec::new(),
        }
    }
}

/// Returns up to `limit` terms of `job` not present in `resume`, in lexicographic order.
pub fn missing_keywords(job: &Vocabulary, resume: &Vocabulary, limit: usize) -> Vec<String> {
    job.difference(resume)
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Builds both vocabularies and computes the bounded keyword gap.
pub fn analyze_keyword_gap(job_text: &str, resume_text: &str, limit: usize) -> KeywordGap {
    let job = build_vocabulary(job_text);
    let resume = build_vocabulary(resume_text);

    if job.is_empty() || resume.is_empty() {
        debug!(
            job_terms = job.len(),
            resume_terms = resume.len(),
            "Keyword gap unavailable: empty vocabulary"
        );
        return KeywordGap::Unavailable;
    }

    KeywordGap::Missing(missing_keywords(&job, &resume, limit))
}
