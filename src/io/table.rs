//! Tab-delimited differential expression table reader
//!
//! Expected format: header row present, one row per gene. The gene column
//! holds "<gene>|<extra>" annotations; the extra part is discarded. An empty
//! fold-change field becomes 0.0; an empty adjusted p-value becomes NaN and
//! later surfaces as an unclassifiable gene.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use crate::data::{DeRecord, DeTable, TableSchema, N_SAMPLES};
use crate::error::{Result, VizError};

/// Read one experiment's DE table using an explicit column schema
pub fn read_de_table<P: AsRef<Path>>(path: P, schema: &TableSchema) -> Result<DeTable> {
    let path_str = path.as_ref().display().to_string();
    let file = File::open(&path).map_err(|source| VizError::MissingInputFile {
        path: path_str.clone(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let column_index = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| VizError::SchemaMismatch {
                column: name.to_string(),
                path: path_str.clone(),
            })
    };

    let gene_idx = column_index(&schema.gene)?;
    let lfc_idx = column_index(&schema.log2_fc)?;
    let padj_idx = column_index(&schema.padj)?;
    let mut count_idx = [0usize; N_SAMPLES];
    for (i, name) in schema.counts.iter().enumerate() {
        count_idx[i] = column_index(name)?;
    }

    let mut records = Vec::new();
    for (row_no, row) in reader.records().enumerate() {
        let row = row?;

        let raw_gene = row.get(gene_idx).unwrap_or("").trim();
        if raw_gene.is_empty() {
            log::debug!("Skipping row {} with empty gene field", row_no + 2);
            continue;
        }

        let log2_fc = parse_numeric_field(row.get(lfc_idx), 0.0, "log2 fold-change", raw_gene)?;
        let padj = parse_numeric_field(row.get(padj_idx), f64::NAN, "adjusted p-value", raw_gene)?;

        let mut counts = [0.0f64; N_SAMPLES];
        for (i, &idx) in count_idx.iter().enumerate() {
            counts[i] = match row.get(idx).map(str::trim) {
                Some("") | None => {
                    return Err(VizError::InvalidTable {
                        reason: format!(
                            "Missing count value for gene '{}' in column '{}'",
                            raw_gene, schema.counts[i]
                        ),
                    })
                }
                Some(v) => v.parse::<f64>().map_err(|_| VizError::InvalidTable {
                    reason: format!("Invalid count value '{}' for gene '{}'", v, raw_gene),
                })?,
            };
        }

        records.push(DeRecord {
            gene: DeRecord::clean_gene_name(raw_gene),
            log2_fc,
            padj,
            counts,
        });
    }

    let table = DeTable::new(records, schema.counts.clone())?;
    log::info!("Read {} genes from {}", table.n_genes(), path_str);
    Ok(table)
}

/// Parse a float field, substituting `missing` for an empty field.
///
/// A present but malformed value is still an error naming the gene.
fn parse_numeric_field(
    field: Option<&str>,
    missing: f64,
    what: &str,
    gene: &str,
) -> Result<f64> {
    match field.map(str::trim) {
        Some("") | Some("NA") | None => Ok(missing),
        Some(v) => v.parse::<f64>().map_err(|_| VizError::InvalidTable {
            reason: format!("Invalid {} '{}' for gene '{}'", what, v, gene),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn test_schema() -> TableSchema {
        TableSchema::new("gene", "lfc", "padj", ["c1", "c2", "t1", "t2"])
    }

    #[test]
    fn test_read_basic_table() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "gene\tlfc\tpadj\tc1\tc2\tt1\tt2").unwrap();
        writeln!(file, "ARID1A|chr1:26693236\t1.5\t0.001\t10\t12\t40\t44").unwrap();
        writeln!(file, "TP53|chr17\t-0.9\t0.02\t30\t28\t15\t14").unwrap();

        let table = read_de_table(file.path(), &test_schema()).unwrap();
        assert_eq!(table.n_genes(), 2);
        assert_eq!(table.records()[0].gene, "ARID1A");
        assert_eq!(table.records()[1].counts, [30.0, 28.0, 15.0, 14.0]);
    }

    #[test]
    fn test_missing_lfc_defaults_to_zero() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "gene\tlfc\tpadj\tc1\tc2\tt1\tt2").unwrap();
        writeln!(file, "A|x\t\t0.001\t1\t2\t3\t4").unwrap();

        let table = read_de_table(file.path(), &test_schema()).unwrap();
        assert_eq!(table.records()[0].log2_fc, 0.0);
    }

    #[test]
    fn test_missing_padj_becomes_nan() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "gene\tlfc\tpadj\tc1\tc2\tt1\tt2").unwrap();
        writeln!(file, "A|x\t1.0\tNA\t1\t2\t3\t4").unwrap();

        let table = read_de_table(file.path(), &test_schema()).unwrap();
        assert!(table.records()[0].padj.is_nan());
    }

    #[test]
    fn test_schema_mismatch_names_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "gene\tfold\tpadj\tc1\tc2\tt1\tt2").unwrap();
        writeln!(file, "A|x\t1.0\t0.01\t1\t2\t3\t4").unwrap();

        let err = read_de_table(file.path(), &test_schema()).unwrap_err();
        match err {
            VizError::SchemaMismatch { column, .. } => assert_eq!(column, "lfc"),
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = read_de_table("/nonexistent/de_table.tsv", &test_schema()).unwrap_err();
        assert!(matches!(err, VizError::MissingInputFile { .. }));
    }
}
