//! Critique batching and winner resolution.
//!
//! Drafts are judged in fixed-size, non-overlapping batches that follow the
//! original selection order. Each batch resolves exactly one winner, and
//! that winner is always a member of the batch.

use crate::council::value_objects::GenerationResult;

/// Maximum number of drafts submitted to one judging call.
pub const CRITIQUE_BATCH_SIZE: usize = 3;

/// An ordered slice of generation results judged together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CritiqueBatch<'a> {
    /// 1-based batch number
    number: usize,
    members: &'a [GenerationResult],
}

impl<'a> CritiqueBatch<'a> {
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn members(&self) -> &'a [GenerationResult] {
        self.members
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.members.iter().map(|m| m.agent.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Pick the batch member named by a judge's raw winner string.
    ///
    /// The first member (in batch order) whose persona id occurs as a
    /// substring of `raw_winner` wins, so decorated answers such as
    /// `"The Academic wins"` still resolve. With no match the first member
    /// wins. Returns `None` only for an empty batch.
    pub fn resolve_winner(&self, raw_winner: &str) -> Option<&'a GenerationResult> {
        self.members
            .iter()
            .find(|m| raw_winner.contains(m.agent.as_str()))
            .or_else(|| self.members.first())
    }

    /// Render the batch as the judge sees it.
    pub fn format_for_judge(&self) -> String {
        let mut text = String::new();
        for member in self.members {
            text.push_str(&format!(
                "--- RESPONSE ID: {} ---\n{}\n\n",
                member.agent, member.text
            ));
        }
        text
    }
}

/// Split results into batches of at most [`CRITIQUE_BATCH_SIZE`], in order.
pub fn partition(results: &[GenerationResult]) -> Vec<CritiqueBatch<'_>> {
    results
        .chunks(CRITIQUE_BATCH_SIZE)
        .enumerate()
        .map(|(i, members)| CritiqueBatch {
            number: i + 1,
            members,
        })
        .collect()
}

/// Number of batches `n` drafts produce.
pub fn batch_count(n: usize) -> usize {
    n.div_ceil(CRITIQUE_BATCH_SIZE)
}
