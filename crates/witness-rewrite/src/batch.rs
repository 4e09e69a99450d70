//! Batch driver
//!
//! Runs a rewriter over many witnesses. Each witness is independent: a
//! failure drops that witness and processing continues with the next.

use witness_ir::{ApiType, Witness};

use crate::rewriter::WitnessRewriter;

/// Outcome counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Witnesses rewritten and kept
    pub transformed: usize,
    /// Non-REST witnesses kept unchanged
    pub skipped_protocol: usize,
    /// Witnesses dropped as foreign or corrupt
    pub discarded: usize,
    /// Witnesses dropped on engine invariant violations
    pub internal_errors: usize,
}

impl BatchReport {
    /// Number of witnesses kept
    #[inline]
    #[must_use]
    pub fn kept(&self) -> usize {
        self.transformed + self.skipped_protocol
    }

    /// Number of witnesses dropped
    #[inline]
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.discarded + self.internal_errors
    }
}

/// Kept witnesses and the batch report
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub witnesses: Vec<Witness>,
    pub report: BatchReport,
}

/// Rewrite every witness, keeping only those that succeed
pub fn rewrite_batch<R, I>(rewriter: &R, witnesses: I) -> BatchOutcome
where
    R: WitnessRewriter + ?Sized,
    I: IntoIterator<Item = Witness>,
{
    let mut outcome = BatchOutcome::default();

    for mut witness in witnesses {
        let in_scope = witness.api_type() == ApiType::HttpRest;

        match rewriter.transform(&mut witness) {
            Ok(()) => {
                if in_scope {
                    outcome.report.transformed += 1;
                } else {
                    outcome.report.skipped_protocol += 1;
                }
                outcome.witnesses.push(witness);
            }
            Err(e) if e.is_internal() => {
                tracing::error!(rewriter = rewriter.name(), method = %witness.id.name, error = %e, "dropping witness");
                outcome.report.internal_errors += 1;
            }
            Err(e) => {
                tracing::warn!(rewriter = rewriter.name(), method = %witness.id.name, error = %e, "discarding witness");
                outcome.report.discarded += 1;
            }
        }
    }

    outcome
}
