//! Differential expression records and tables

use crate::error::{Result, VizError};

/// Number of raw count columns per experiment (2 replicates x 2 conditions)
pub const N_SAMPLES: usize = 4;

/// One gene's differential expression result
///
/// `padj` is NaN when the input field was empty; classification surfaces
/// that as a distinct unclassifiable state rather than coercing it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeRecord {
    /// Gene symbol, truncated at the first '|' of the annotation field
    pub gene: String,
    /// Log2 fold-change; 0.0 when the input field was empty
    pub log2_fc: f64,
    /// Adjusted p-value in [0, 1], or NaN when missing
    pub padj: f64,
    /// Raw counts for the 4 samples, in schema order
    pub counts: [f64; N_SAMPLES],
}

impl DeRecord {
    /// Strip the annotation suffix from a gene field of the form "<gene>|<extra>"
    pub fn clean_gene_name(raw: &str) -> String {
        match raw.split_once('|') {
            Some((gene, _)) => gene.trim().to_string(),
            None => raw.trim().to_string(),
        }
    }
}

/// A full differential expression table for one experiment
///
/// Duplicate gene names are allowed and simply co-exist; nothing in the
/// pipeline assumes uniqueness.
#[derive(Debug, Clone)]
pub struct DeTable {
    records: Vec<DeRecord>,
    sample_names: [String; N_SAMPLES],
}

impl DeTable {
    pub fn new(records: Vec<DeRecord>, sample_names: [String; N_SAMPLES]) -> Result<Self> {
        if records.is_empty() {
            return Err(VizError::EmptyData {
                reason: "No gene records in table".to_string(),
            });
        }
        for r in &records {
            if !r.padj.is_nan() && !(0.0..=1.0).contains(&r.padj) {
                return Err(VizError::InvalidTable {
                    reason: format!("Adjusted p-value {} for gene '{}' outside [0, 1]", r.padj, r.gene),
                });
            }
        }
        Ok(Self {
            records,
            sample_names,
        })
    }

    pub fn records(&self) -> &[DeRecord] {
        &self.records
    }

    pub fn sample_names(&self) -> &[String; N_SAMPLES] {
        &self.sample_names
    }

    pub fn n_genes(&self) -> usize {
        self.records.len()
    }
}
