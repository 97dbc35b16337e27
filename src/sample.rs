//! Sample identities, phenotype classification and the typed records the
//! graph structures are built from.

use crate::cust_error::{ImportError, PruneError};
use fxhash::FxHashMap;
use std::fmt;

/// Identity of a single sample, the (family id, individual id) pair PLINK
/// files key samples by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleId {
    pub fid: String,
    pub iid: String,
}

impl SampleId {
    pub fn new(fid: impl Into<String>, iid: impl Into<String>) -> Self {
        SampleId {
            fid: fid.into(),
            iid: iid.into(),
        }
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.fid, self.iid)
    }
}

/// Case/control classification of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phenotype {
    Case,
    Control,
    Unknown,
}

impl Phenotype {
    /// Maps a .fam status code to a phenotype. "2" is a case, "1" a control,
    /// everything else (missing codes like "0" or "-9") is unknown.
    pub fn from_status(code: &str) -> Self {
        match code {
            "2" => Phenotype::Case,
            "1" => Phenotype::Control,
            _ => Phenotype::Unknown,
        }
    }
}

/// Per-sample phenotype lookup, built from a .fam file.
#[derive(Debug, Clone, Default)]
pub struct PhenotypeTable {
    entries: FxHashMap<SampleId, Phenotype>,
}

impl PhenotypeTable {
    pub fn insert(&mut self, id: SampleId, phenotype: Phenotype) {
        self.entries.insert(id, phenotype);
    }

    pub fn status(&self, id: &SampleId) -> Option<Phenotype> {
        self.entries.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Category of a flagged pair, taken from the discriminant column of the
/// relatedness file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairCategory {
    BothCases,
    Mixed,
    BothControls,
}

impl PairCategory {
    /// Decodes the discriminant: 1 is case-case, 0 mixed, -1 control-control.
    pub fn from_code(code: i64) -> Result<Self, ImportError> {
        match code {
            1 => Ok(PairCategory::BothCases),
            0 => Ok(PairCategory::Mixed),
            -1 => Ok(PairCategory::BothControls),
            other => Err(ImportError::UnknownCategory(other)),
        }
    }
}

/// One flagged too-related pair. The category is only present if the input
/// carried the discriminant column; case-priority removal requires it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatednessRecord {
    pub a: SampleId,
    pub b: SampleId,
    pub category: Option<PairCategory>,
}

/// A flagged pair spanning one case and one control, still in record order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedPair {
    pub a: SampleId,
    pub b: SampleId,
}

impl MixedPair {
    /// Resolves the pair against the phenotype table into (case, control).
    ///
    /// Fails if either endpoint has no entry, or if the endpoints do not
    /// resolve to exactly one case and one control.
    pub fn resolve(&self, table: &PhenotypeTable) -> Result<(SampleId, SampleId), PruneError> {
        let a = table
            .status(&self.a)
            .ok_or_else(|| PruneError::UnknownSample(self.a.clone()))?;
        let b = table
            .status(&self.b)
            .ok_or_else(|| PruneError::UnknownSample(self.b.clone()))?;
        match (a, b) {
            (Phenotype::Case, Phenotype::Control) => Ok((self.a.clone(), self.b.clone())),
            (Phenotype::Control, Phenotype::Case) => Ok((self.b.clone(), self.a.clone())),
            _ => Err(PruneError::NotMixedPair(self.a.clone(), self.b.clone())),
        }
    }
}
