//! This module contains all custom errors used in this library.

use crate::sample::SampleId;
use thiserror::Error;

/// Errors raised while reading the relatedness or phenotype input.
///
/// Any of these aborts the run: a partially read input could silently yield a
/// removal set that is incomplete or not minimal.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import: IoError: {0}")]
    Io(#[from] std::io::Error),
    #[error("Import: Integer is malformed: {0}")]
    BadInt(#[from] std::num::ParseIntError),
    #[error("Import: Record holds only {0} fields.")]
    Truncated(usize),
    #[error("Import: Unknown pair category `{0}`.")]
    UnknownCategory(i64),
    #[error("Import: Sample `{0}` is flagged as related to itself.")]
    SelfPair(SampleId),
    #[error("Import: Record `{0}` - `{1}` carries no pair category.")]
    MissingCategory(SampleId, SampleId),
}

/// Errors raised while computing the removal set.
#[derive(Debug, Error)]
pub enum PruneError {
    /// Case-priority removal was requested without a phenotype table.
    #[error("Case-priority removal needs a phenotype table to tell cases from controls.")]
    MissingPhenotypes,
    /// A mixed-pair endpoint has no phenotype entry.
    #[error("No phenotype entry for sample `{0}`.")]
    UnknownSample(SampleId),
    /// A pair flagged as mixed does not resolve to one case and one control.
    #[error("Pair `{0}` - `{1}` does not span one case and one control.")]
    NotMixedPair(SampleId, SampleId),
    /// A connected component exceeds the configured node ceiling.
    #[error("Component holds {found} nodes, the configured limit is {limit}.")]
    ComponentTooLarge { found: usize, limit: usize },
    #[error(transparent)]
    Import(#[from] ImportError),
}
