//! GMT gene set collections and pre-computed enrichment tables

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::ReaderBuilder;

use crate::enrich::{EnrichmentRow, GeneSet};
use crate::error::{Result, VizError};

/// Read a GMT gene set collection.
///
/// One set per line: name, description, then tab-separated member symbols.
pub fn read_gene_sets<P: AsRef<Path>>(path: P) -> Result<Vec<GeneSet>> {
    let path_str = path.as_ref().display().to_string();
    let file = File::open(&path).map_err(|source| VizError::MissingInputFile {
        path: path_str.clone(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut sets = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let name = fields.next().unwrap_or("").trim().to_string();
        let description = fields.next().unwrap_or("").trim().to_string();
        let genes: Vec<String> = fields
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();

        if name.is_empty() || genes.is_empty() {
            return Err(VizError::InvalidGeneSets {
                reason: format!("Line {} of '{}' has no name or no genes", line_no + 1, path_str),
            });
        }

        sets.push(GeneSet {
            name,
            description,
            genes,
        });
    }

    if sets.is_empty() {
        return Err(VizError::EmptyData {
            reason: format!("No gene sets found in '{}'", path_str),
        });
    }

    log::info!("Read {} gene sets from {}", sets.len(), path_str);
    Ok(sets)
}

/// Read a pre-computed enrichment result table (external GSEA run).
///
/// Tab-delimited with a header row; required columns: pathway, NES, padj,
/// count, size.
pub fn read_enrichment_table<P: AsRef<Path>>(path: P) -> Result<Vec<EnrichmentRow>> {
    let path_str = path.as_ref().display().to_string();
    let file = File::open(&path).map_err(|source| VizError::MissingInputFile {
        path: path_str.clone(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(file);

    // Check the header up front so a missing column names itself instead
    // of surfacing as a per-row deserialization failure
    let headers = reader.headers()?.clone();
    for name in ["pathway", "NES", "padj", "count", "size"] {
        if !headers.iter().any(|h| h.trim() == name) {
            return Err(VizError::SchemaMismatch {
                column: name.to_string(),
                path: path_str.clone(),
            });
        }
    }

    let mut rows = Vec::new();
    for row in reader.deserialize::<EnrichmentRow>() {
        let row = row.map_err(|e| VizError::InvalidTable {
            reason: format!("Invalid enrichment row in '{}': {}", path_str, e),
        })?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(VizError::EmptyData {
            reason: format!("No enrichment rows found in '{}'", path_str),
        });
    }

    log::info!("Read {} enrichment rows from {}", rows.len(), path_str);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_gmt() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "HALLMARK_APOPTOSIS\tsource\tTP53\tBAX\tCASP3").unwrap();
        writeln!(file, "HALLMARK_MYC_TARGETS\t\tMYC\tMAX").unwrap();

        let sets = read_gene_sets(file.path()).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "HALLMARK_APOPTOSIS");
        assert_eq!(sets[0].genes, vec!["TP53", "BAX", "CASP3"]);
        assert_eq!(sets[1].genes.len(), 2);
    }

    #[test]
    fn test_gmt_without_genes_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "EMPTY_SET\tdescription").unwrap();
        assert!(read_gene_sets(file.path()).is_err());
    }

    #[test]
    fn test_read_enrichment_table() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "pathway\tNES\tpadj\tcount\tsize").unwrap();
        writeln!(file, "HALLMARK_E2F_TARGETS\t2.1\t0.001\t45\t200").unwrap();
        writeln!(file, "HALLMARK_HYPOXIA\t-1.8\t0.02\t30\t150").unwrap();

        let rows = read_enrichment_table(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pathway, "HALLMARK_E2F_TARGETS");
        assert!((rows[1].gene_ratio() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_enrichment_table_bad_value_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "pathway\tNES\tpadj\tcount\tsize").unwrap();
        writeln!(file, "X\tnot_a_number\t0.1\t5\t50").unwrap();

        let err = read_enrichment_table(file.path()).unwrap_err();
        assert!(matches!(err, VizError::InvalidTable { .. }));
    }

    #[test]
    fn test_enrichment_table_missing_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "pathway\tNES\tpadj\tcount").unwrap();
        writeln!(file, "X\t1.0\t0.1\t5").unwrap();

        let err = read_enrichment_table(file.path()).unwrap_err();
        match err {
            VizError::SchemaMismatch { column, .. } => assert_eq!(column, "size"),
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }
}
