//! Best-match selection across an enrolled template set.

use async_trait::async_trait;

use crate::common::error::ScanError;
use crate::common::types::{EnrolledTemplate, FingerIndex, MatchResult};

/// Pairwise template comparison, abstracted so the multi-matcher (and the
/// workflow above it) can run against scripted fakes in tests.
#[async_trait]
pub trait TemplateMatcher: Send + Sync {
    async fn match_templates(&self, probe: &str, candidate: &str, threshold: u8) -> MatchResult;
}

/// Outcome of matching a probe against many enrolled templates.
#[derive(Debug, Clone)]
pub struct MultiMatchOutcome {
    pub matched: bool,
    /// Which enrolled finger won, when `matched`
    pub finger_index: Option<FingerIndex>,
    /// Winning score, when `matched`
    pub score: Option<u8>,
    pub error: Option<String>,
}

impl MultiMatchOutcome {
    fn no_match() -> Self {
        Self {
            matched: false,
            finger_index: None,
            score: None,
            error: Some(ScanError::MatchFailed.to_string()),
        }
    }
}

/// Runs the pairwise matcher once per enrolled template, in input order,
/// and keeps the best passing match.
///
/// Calls are strictly sequential: the physical matcher service sits in
/// front of exclusive hardware and must never see two claims race. For a
/// fixed enrolled set and fixed backend responses the selection is
/// deterministic; ties keep the first maximal entry encountered.
pub struct MultiTemplateMatcher<'a, M: TemplateMatcher> {
    matcher: &'a M,
}

impl<'a, M: TemplateMatcher> MultiTemplateMatcher<'a, M> {
    pub fn new(matcher: &'a M) -> Self {
        Self { matcher }
    }

    /// Match `probe` against every enrolled template.
    ///
    /// # Returns
    /// The best entry whose comparison passed `threshold`, or a no-match
    /// outcome with a fixed error string. An empty enrolled set returns
    /// no-match without issuing a single comparison.
    pub async fn match_against_many(
        &self,
        probe: &str,
        enrolled: &[EnrolledTemplate],
        threshold: u8,
    ) -> MultiMatchOutcome {
        let mut best: Option<(FingerIndex, u8)> = None;

        for stored in enrolled {
            let result = self
                .matcher
                .match_templates(probe, &stored.template_data, threshold)
                .await;

            if !result.matched {
                continue;
            }

            let score = result.score.unwrap_or(0);
            // Strict > keeps the first of tied maxima (input-order
            // preference).
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((stored.finger_index, score));
            }
        }

        match best {
            Some((finger_index, score)) => MultiMatchOutcome {
                matched: true,
                finger_index: Some(finger_index),
                score: Some(score),
                error: None,
            },
            None => MultiMatchOutcome::no_match(),
        }
    }
}
