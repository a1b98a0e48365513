//! Three-way regulation labeling from fixed thresholds

use std::fmt;

use crate::data::DeTable;

/// Regulation label for one gene
///
/// `Unclassifiable` is the surfaced state for a missing adjusted p-value;
/// it is never folded into `NotSignificant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regulation {
    Upregulated,
    Downregulated,
    NotSignificant,
    Unclassifiable,
}

impl fmt::Display for Regulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Regulation::Upregulated => "Upregulated",
            Regulation::Downregulated => "Downregulated",
            Regulation::NotSignificant => "Not significant",
            Regulation::Unclassifiable => "Unclassifiable",
        };
        write!(f, "{}", s)
    }
}

/// Significance thresholds; both comparisons are inclusive
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Minimum |log2 fold-change| (0.585 ~ 1.5-fold)
    pub log2_fc: f64,
    /// Maximum adjusted p-value
    pub padj: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            log2_fc: 0.585,
            padj: 0.05,
        }
    }
}

/// Classify one gene. Pure function of (log2_fc, padj) and the thresholds.
pub fn classify(log2_fc: f64, padj: f64, thresholds: &Thresholds) -> Regulation {
    if padj.is_nan() {
        return Regulation::Unclassifiable;
    }
    if log2_fc >= thresholds.log2_fc && padj <= thresholds.padj {
        Regulation::Upregulated
    } else if log2_fc <= -thresholds.log2_fc && padj <= thresholds.padj {
        Regulation::Downregulated
    } else {
        Regulation::NotSignificant
    }
}

/// Classify every record of a table, in record order
pub fn classify_table(table: &DeTable, thresholds: &Thresholds) -> Vec<Regulation> {
    table
        .records()
        .iter()
        .map(|r| classify(r.log2_fc, r.padj, thresholds))
        .collect()
}

/// Counts per label, for the run log
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegulationSummary {
    pub up: usize,
    pub down: usize,
    pub not_significant: usize,
    pub unclassifiable: usize,
}

impl RegulationSummary {
    pub fn from_labels(labels: &[Regulation]) -> Self {
        let mut summary = Self::default();
        for label in labels {
            match label {
                Regulation::Upregulated => summary.up += 1,
                Regulation::Downregulated => summary.down += 1,
                Regulation::NotSignificant => summary.not_significant += 1,
                Regulation::Unclassifiable => summary.unclassifiable += 1,
            }
        }
        summary
    }
}

impl fmt::Display for RegulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} up, {} down, {} not significant, {} unclassifiable",
            self.up, self.down, self.not_significant, self.unclassifiable
        )
    }
}
