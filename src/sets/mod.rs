//! Gene set comparison across two experiments

use std::collections::BTreeSet;

use crate::classify::{classify, Regulation, Thresholds};
use crate::data::DeTable;

/// Intersection and differences of two gene collections
///
/// BTreeSets keep iteration deterministic for labels and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneOverlap {
    pub common: BTreeSet<String>,
    pub a_unique: BTreeSet<String>,
    pub b_unique: BTreeSet<String>,
}

impl GeneOverlap {
    /// Sizes as (|A ∩ B|, |A − B|, |B − A|)
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.common.len(), self.a_unique.len(), self.b_unique.len())
    }
}

/// Compare two gene collections with set semantics.
///
/// Duplicates collapse; input order is irrelevant. The identities
/// |common| + |a_unique| = |A| and |common| + |b_unique| = |B| hold by
/// construction.
pub fn compare<I, J>(a: I, b: J) -> GeneOverlap
where
    I: IntoIterator<Item = String>,
    J: IntoIterator<Item = String>,
{
    let a: BTreeSet<String> = a.into_iter().collect();
    let b: BTreeSet<String> = b.into_iter().collect();

    GeneOverlap {
        common: a.intersection(&b).cloned().collect(),
        a_unique: a.difference(&b).cloned().collect(),
        b_unique: b.difference(&a).cloned().collect(),
    }
}

/// Upregulated gene names of a DE table, as a set
pub fn upregulated_genes(table: &DeTable, thresholds: &Thresholds) -> BTreeSet<String> {
    table
        .records()
        .iter()
        .filter(|r| classify(r.log2_fc, r.padj, thresholds) == Regulation::Upregulated)
        .map(|r| r.gene.clone())
        .collect()
}
