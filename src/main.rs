//! deviz command-line interface

use clap::Parser;
use log::LevelFilter;

use deviz::cli::{Cli, Commands, SchemaBOpts, SchemaOpts, ThresholdOpts};
use deviz::prelude::*;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Volcano {
            input,
            output,
            label,
            title,
            schema,
            thresholds,
        } => run_volcano(&input, &output, &label, &title, &schema, &thresholds),
        Commands::Heatmap {
            input,
            output,
            label,
            title,
            schema,
            thresholds,
        } => run_heatmap(&input, &output, &label, &title, &schema, &thresholds),
        Commands::Dotplot {
            input,
            gmt,
            enrichment,
            output,
            top,
            permutations,
            seed,
            title,
            schema,
        } => run_dotplot(
            input.as_deref(),
            gmt.as_deref(),
            enrichment.as_deref(),
            &output,
            top,
            permutations,
            seed,
            &title,
            &schema,
        ),
        Commands::Venn {
            input_a,
            input_b,
            output,
            label_a,
            label_b,
            title,
            schema,
            schema_b,
            thresholds,
        } => run_venn(
            &input_a, &input_b, &output, &label_a, &label_b, &title, &schema, &schema_b,
            &thresholds,
        ),
        Commands::Report {
            input_a,
            input_b,
            output,
            gmt,
            label,
            label_a,
            label_b,
            permutations,
            seed,
            schema,
            schema_b,
            thresholds,
        } => run_report(
            &input_a,
            &input_b,
            &output,
            gmt.as_deref(),
            label,
            label_a,
            label_b,
            permutations,
            seed,
            &schema,
            &schema_b,
            &thresholds,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_schema(opts: &SchemaOpts) -> Result<TableSchema> {
    let counts: [String; 4] =
        opts.count_cols
            .clone()
            .try_into()
            .map_err(|got: Vec<String>| VizError::InvalidInput {
                reason: format!("Expected 4 count columns, got {}", got.len()),
            })?;
    Ok(TableSchema {
        gene: opts.gene_col.clone(),
        log2_fc: opts.lfc_col.clone(),
        padj: opts.padj_col.clone(),
        counts,
    })
}

/// Second-table schema: explicit -b flags override, otherwise the first
/// table's schema is reused.
fn build_schema_b(base: &SchemaOpts, opts: &SchemaBOpts) -> Result<TableSchema> {
    let mut schema = build_schema(base)?;
    if let Some(gene) = &opts.gene_col_b {
        schema.gene = gene.clone();
    }
    if let Some(lfc) = &opts.lfc_col_b {
        schema.log2_fc = lfc.clone();
    }
    if let Some(padj) = &opts.padj_col_b {
        schema.padj = padj.clone();
    }
    if let Some(counts) = &opts.count_cols_b {
        schema.counts =
            counts
                .clone()
                .try_into()
                .map_err(|got: Vec<String>| VizError::InvalidInput {
                    reason: format!("Expected 4 count columns for table B, got {}", got.len()),
                })?;
    }
    Ok(schema)
}

fn build_thresholds(opts: &ThresholdOpts) -> Result<Thresholds> {
    if opts.lfc_threshold < 0.0 {
        return Err(VizError::InvalidInput {
            reason: format!("--lfc-threshold must be non-negative, got {}", opts.lfc_threshold),
        });
    }
    if !(0.0..=1.0).contains(&opts.padj_threshold) {
        return Err(VizError::InvalidInput {
            reason: format!("--padj-threshold must be in [0, 1], got {}", opts.padj_threshold),
        });
    }
    Ok(Thresholds {
        log2_fc: opts.lfc_threshold,
        padj: opts.padj_threshold,
    })
}

fn run_volcano(
    input: &str,
    output: &str,
    labels: &[String],
    title: &str,
    schema: &SchemaOpts,
    thresholds: &ThresholdOpts,
) -> Result<()> {
    let schema = build_schema(schema)?;
    let thresholds = build_thresholds(thresholds)?;
    let table = read_de_table(input, &schema)?;

    let summary = RegulationSummary::from_labels(&classify_table(&table, &thresholds));
    log::info!("{}: {}", input, summary);

    render_volcano(&table, &thresholds, labels, title, output)
}

fn run_heatmap(
    input: &str,
    output: &str,
    labels: &[String],
    title: &str,
    schema: &SchemaOpts,
    thresholds: &ThresholdOpts,
) -> Result<()> {
    let schema = build_schema(schema)?;
    let thresholds = build_thresholds(thresholds)?;
    let table = read_de_table(input, &schema)?;
    let matrix = significant_matrix(&table, &thresholds)?;
    render_heatmap(&matrix, labels, title, output)
}

#[allow(clippy::too_many_arguments)]
fn run_dotplot(
    input: Option<&str>,
    gmt: Option<&str>,
    enrichment: Option<&str>,
    output: &str,
    top: usize,
    permutations: usize,
    seed: u64,
    title: &str,
    schema: &SchemaOpts,
) -> Result<()> {
    let rows = match (input, gmt, enrichment) {
        (Some(input), Some(gmt), None) => {
            let schema = build_schema(schema)?;
            let table = read_de_table(input, &schema)?;
            let gene_sets = read_gene_sets(gmt)?;
            let ranked = ranked_list(&table);
            let params = GseaParams {
                n_permutations: permutations,
                seed,
                ..Default::default()
            };
            preranked_gsea(&ranked, &gene_sets, &params)?
        }
        (None, None, Some(enrichment)) => read_enrichment_table(enrichment)?,
        _ => {
            return Err(VizError::InvalidInput {
                reason: "Provide either --input with --gmt, or --enrichment".to_string(),
            })
        }
    };

    let shaped = shape_for_display(rows, top);
    render_dotplot(&shaped, title, output)
}

#[allow(clippy::too_many_arguments)]
fn run_venn(
    input_a: &str,
    input_b: &str,
    output: &str,
    label_a: &str,
    label_b: &str,
    title: &str,
    schema: &SchemaOpts,
    schema_b: &SchemaBOpts,
    thresholds: &ThresholdOpts,
) -> Result<()> {
    let thresholds = build_thresholds(thresholds)?;
    let table_a = read_de_table(input_a, &build_schema(schema)?)?;
    let table_b = read_de_table(input_b, &build_schema_b(schema, schema_b)?)?;

    let overlap = compare(
        upregulated_genes(&table_a, &thresholds),
        upregulated_genes(&table_b, &thresholds),
    );
    let (common, a_unique, b_unique) = overlap.sizes();
    log::info!(
        "Upregulated overlap: {} common, {} only in {}, {} only in {}",
        common,
        a_unique,
        label_a,
        b_unique,
        label_b
    );

    render_venn(&overlap, label_a, label_b, title, output)
}

#[allow(clippy::too_many_arguments)]
fn run_report(
    input_a: &str,
    input_b: &str,
    output: &str,
    gmt: Option<&str>,
    labels: Vec<String>,
    label_a: String,
    label_b: String,
    permutations: usize,
    seed: u64,
    schema: &SchemaOpts,
    schema_b: &SchemaBOpts,
    thresholds: &ThresholdOpts,
) -> Result<()> {
    let table_a = read_de_table(input_a, &build_schema(schema)?)?;
    let table_b = read_de_table(input_b, &build_schema_b(schema, schema_b)?)?;

    let gene_sets = gmt.map(read_gene_sets).transpose()?;

    let config = ReportConfig {
        labels,
        label_a,
        label_b,
        thresholds: build_thresholds(thresholds)?,
        gene_sets,
        gsea: GseaParams {
            n_permutations: permutations,
            seed,
            ..Default::default()
        },
        top_pathways: 5,
    };

    let written = render_report(&table_a, &table_b, &config, output)?;
    log::info!("Wrote {} figures to {}", written.len(), output);
    Ok(())
}
