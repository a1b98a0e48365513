//! Column schemas for differential expression input files
//!
//! Column identity differs between experiments, so every input file carries
//! an explicit name-based rename mapping. Columns are always resolved by
//! header name, never by position.

use crate::data::N_SAMPLES;

/// Mapping from a file's header names to the canonical record fields
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Header of the gene annotation column (value format "<gene>|<extra>")
    pub gene: String,
    /// Header of the log2 fold-change column
    pub log2_fc: String,
    /// Header of the adjusted p-value column
    pub padj: String,
    /// Headers of the 4 raw count columns, in display order
    pub counts: [String; N_SAMPLES],
}

impl TableSchema {
    pub fn new(gene: &str, log2_fc: &str, padj: &str, counts: [&str; N_SAMPLES]) -> Self {
        Self {
            gene: gene.to_string(),
            log2_fc: log2_fc.to_string(),
            padj: padj.to_string(),
            counts: counts.map(|s| s.to_string()),
        }
    }

    /// All headers this schema requires, for mismatch reporting
    pub fn required_columns(&self) -> Vec<&str> {
        let mut cols = vec![self.gene.as_str(), self.log2_fc.as_str(), self.padj.as_str()];
        cols.extend(self.counts.iter().map(|s| s.as_str()));
        cols
    }
}

impl Default for TableSchema {
    /// HOMER/DESeq2-style export headers
    fn default() -> Self {
        Self::new(
            "Annotation/Divergence",
            "Log2 Fold Change",
            "p-value (Benjamini)",
            ["control rep1", "control rep2", "treated rep1", "treated rep2"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_columns() {
        let schema = TableSchema::new("gene", "lfc", "padj", ["a", "b", "c", "d"]);
        assert_eq!(schema.required_columns(), vec!["gene", "lfc", "padj", "a", "b", "c", "d"]);
    }
}
