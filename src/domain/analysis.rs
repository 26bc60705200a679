use std::fmt;

/// Why an LLM analysis produced no usable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisFailureKind {
    /// The transcript was empty; no provider call was made.
    EmptyTranscript,
    /// Every retry attempt hit a rate limit.
    RateLimitExhausted,
    /// The provider returned a non-retryable error.
    Provider,
}

/// A structured analysis failure. Downstream branching is on `kind`,
/// never on the generated text itself, so model output that happens to
/// look like an error message cannot be misread as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisFailure {
    pub kind: AnalysisFailureKind,
    pub detail: String,
}

impl AnalysisFailure {
    pub fn new(kind: AnalysisFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for AnalysisFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AnalysisFailureKind::EmptyTranscript => write!(f, "empty transcript"),
            AnalysisFailureKind::RateLimitExhausted => {
                write!(f, "rate limit exhausted: {}", self.detail)
            }
            AnalysisFailureKind::Provider => write!(f, "provider error: {}", self.detail),
        }
    }
}

/// Outcome of one LLM analysis call chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Generated(String),
    Failed(AnalysisFailure),
}

impl AnalysisOutcome {
    pub fn failed(kind: AnalysisFailureKind, detail: impl Into<String>) -> Self {
        Self::Failed(AnalysisFailure::new(kind, detail))
    }

    pub fn as_generated(&self) -> Option<&str> {
        match self {
            Self::Generated(text) => Some(text),
            Self::Failed(_) => None,
        }
    }
}

/// Feedback and sentiment for one transcribed call. Either half can fail
/// independently; a failed half is reported, never posted to the CRM.
#[derive(Debug, Clone)]
pub struct CallAnalysis {
    pub feedback: AnalysisOutcome,
    pub sentiment: AnalysisOutcome,
}
