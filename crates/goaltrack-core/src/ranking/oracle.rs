use crate::error::OracleError;

/// A text-generation service that ranks candidate slots.
///
/// The ranker hands over a fully rendered prompt and parses whatever text
/// comes back, so implementations are free to be a hosted model, a local
/// heuristic or a canned stub in tests.
pub trait RankingOracle {
    /// Short identifier used in logs (e.g. "cohere", "heuristic").
    fn name(&self) -> &str;

    /// Answer `prompt`. Failures are recovered by the ranker's fallback.
    fn rank(&self, prompt: &str) -> Result<String, OracleError>;
}

impl<T: RankingOracle + ?Sized> RankingOracle for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn rank(&self, prompt: &str) -> Result<String, OracleError> {
        (**self).rank(prompt)
    }
}

impl<T: RankingOracle + ?Sized> RankingOracle for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn rank(&self, prompt: &str) -> Result<String, OracleError> {
        (**self).rank(prompt)
    }
}

/// Oracle that is never available; every ranking uses the fallback rule.
#[derive(Debug, Clone, Default)]
pub struct DisabledOracle {
    reason: String,
}

impl DisabledOracle {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl RankingOracle for DisabledOracle {
    fn name(&self) -> &str {
        "none"
    }

    fn rank(&self, _prompt: &str) -> Result<String, OracleError> {
        let reason = if self.reason.is_empty() {
            "ranking disabled".to_string()
        } else {
            self.reason.clone()
        };
        Err(OracleError::NotConfigured(reason))
    }
}
