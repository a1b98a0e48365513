//! Command-line interface for deviz

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "deviz")]
#[command(author = "SunJu Kim")]
#[command(version)]
#[command(about = "Visualization of RNA-seq differential expression results")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Column schema flags for a DE table
///
/// Column identity differs between experiments, so files are always read
/// through an explicit name mapping. Defaults match HOMER/DESeq2-style
/// exports.
#[derive(Args, Debug, Clone)]
pub struct SchemaOpts {
    /// Header of the gene annotation column ("<gene>|<extra>")
    #[arg(long, default_value = "Annotation/Divergence", value_name = "COL")]
    pub gene_col: String,

    /// Header of the log2 fold-change column
    #[arg(long, default_value = "Log2 Fold Change", value_name = "COL")]
    pub lfc_col: String,

    /// Header of the adjusted p-value column
    #[arg(long, default_value = "p-value (Benjamini)", value_name = "COL")]
    pub padj_col: String,

    /// Headers of the 4 raw count columns, in display order
    #[arg(
        long,
        num_args = 4,
        value_name = "COL",
        default_values_t = [
            "control rep1".to_string(),
            "control rep2".to_string(),
            "treated rep1".to_string(),
            "treated rep2".to_string(),
        ]
    )]
    pub count_cols: Vec<String>,
}

/// Classification threshold flags
#[derive(Args, Debug, Clone)]
pub struct ThresholdOpts {
    /// Minimum |log2 fold-change| for significance [default: 0.585 ~ 1.5-fold]
    #[arg(long, default_value = "0.585")]
    pub lfc_threshold: f64,

    /// Maximum adjusted p-value for significance
    #[arg(long, default_value = "0.05")]
    pub padj_threshold: f64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Volcano plot of one DE table
    #[command(
        long_about = "Volcano plot of one DE table.\n\n\
            Scatter of log2 fold-change against -log10 adjusted p-value with\n\
            genes colored by regulation status and dashed threshold guides.",
        after_long_help = "\
Examples:
  deviz volcano -i arid1a_ko.tsv -o volcano.svg --label ARID1A --label MLH1
  deviz volcano -i de.tsv --gene-col gene --lfc-col log2FC --padj-col padj \\
    --count-cols c1 c2 t1 t2 -o volcano.svg"
    )]
    Volcano {
        /// Path to the tab-delimited DE table
        #[arg(short, long)]
        input: String,

        /// Output SVG path
        #[arg(short, long, default_value = "volcano.svg")]
        output: String,

        /// Curated gene to label (repeatable); absentees are skipped
        #[arg(long, value_name = "GENE")]
        label: Vec<String>,

        /// Plot title
        #[arg(long, default_value = "Differential expression")]
        title: String,

        #[command(flatten)]
        schema: SchemaOpts,

        #[command(flatten)]
        thresholds: ThresholdOpts,
    },

    /// Clustered heatmap of significant genes
    #[command(
        long_about = "Clustered heatmap of significant genes.\n\n\
            Filters the table to |log2FC| >= threshold and padj <= threshold,\n\
            z-scores each gene row across the 4 samples, reorders rows by\n\
            average-linkage hierarchical clustering, and draws a blue-white-red\n\
            matrix with a colorbar. Zero-variance genes stay visible as grey rows.",
        after_long_help = "\
Examples:
  deviz heatmap -i arid1a_ko.tsv -o heatmap.svg --label ARID1A"
    )]
    Heatmap {
        /// Path to the tab-delimited DE table
        #[arg(short, long)]
        input: String,

        /// Output SVG path
        #[arg(short, long, default_value = "heatmap.svg")]
        output: String,

        /// Curated gene to label when the matrix is large (repeatable)
        #[arg(long, value_name = "GENE")]
        label: Vec<String>,

        /// Plot title
        #[arg(long, default_value = "Significant genes")]
        title: String,

        #[command(flatten)]
        schema: SchemaOpts,

        #[command(flatten)]
        thresholds: ThresholdOpts,
    },

    /// GSEA dot plot (built-in preranked GSEA or a pre-computed table)
    #[command(
        long_about = "GSEA dot plot.\n\n\
            Either runs preranked GSEA from a DE table and a GMT gene set\n\
            collection (genes ranked by -log10(padj) * sign(log2FC)), or\n\
            draws a pre-computed enrichment table directly. The display keeps\n\
            the top and bottom --top pathways by NES.",
        after_long_help = "\
Examples:
  deviz dotplot -i arid1a_ko.tsv --gmt hallmark.gmt -o gsea.svg
  deviz dotplot --enrichment fgsea_results.tsv -o gsea.svg --top 5"
    )]
    Dotplot {
        /// Path to the DE table (with --gmt)
        #[arg(short, long, conflicts_with = "enrichment", requires = "gmt")]
        input: Option<String>,

        /// Path to a GMT gene set collection
        #[arg(long)]
        gmt: Option<String>,

        /// Path to a pre-computed enrichment table (pathway, NES, padj, count, size)
        #[arg(long, conflicts_with = "gmt")]
        enrichment: Option<String>,

        /// Output SVG path
        #[arg(short, long, default_value = "dotplot.svg")]
        output: String,

        /// Pathways kept on each end of the NES scale
        #[arg(long, default_value = "5")]
        top: usize,

        /// Label permutations per gene set
        #[arg(long, default_value = "1000")]
        permutations: usize,

        /// RNG seed for the permutation null
        #[arg(long, default_value = "2024")]
        seed: u64,

        /// Plot title
        #[arg(long, default_value = "Gene set enrichment")]
        title: String,

        #[command(flatten)]
        schema: SchemaOpts,
    },

    /// Proportional Venn diagram of upregulated genes across two experiments
    #[command(
        long_about = "Proportional Venn diagram.\n\n\
            Takes the upregulated gene sets of two experiments and draws two\n\
            circles with areas proportional to the set sizes and an overlap\n\
            proportional to the intersection. Schema flags with the -b suffix\n\
            apply to the second table.",
        after_long_help = "\
Examples:
  deviz venn -a arid1a_ko.tsv -b arid1b_ko.tsv \\
    --label-a ARID1A-KO --label-b ARID1B-KO -o venn.svg"
    )]
    Venn {
        /// Path to the first DE table
        #[arg(short = 'a', long)]
        input_a: String,

        /// Path to the second DE table
        #[arg(short = 'b', long)]
        input_b: String,

        /// Output SVG path
        #[arg(short, long, default_value = "venn.svg")]
        output: String,

        /// Display name of the first experiment
        #[arg(long, default_value = "experiment A")]
        label_a: String,

        /// Display name of the second experiment
        #[arg(long, default_value = "experiment B")]
        label_b: String,

        /// Plot title
        #[arg(long, default_value = "Shared upregulated genes")]
        title: String,

        #[command(flatten)]
        schema: SchemaOpts,

        #[command(flatten)]
        schema_b: SchemaBOpts,

        #[command(flatten)]
        thresholds: ThresholdOpts,
    },

    /// Full figure sequence: volcano, heatmaps, dot plot, Venn
    #[command(
        long_about = "Full figure sequence for a two-experiment comparison.\n\n\
            Renders volcano.svg, heatmap_a.svg, heatmap_b.svg, venn.svg and,\n\
            when --gmt is given, gsea_dotplot.svg into the output directory.",
        after_long_help = "\
Examples:
  deviz report -a arid1a_ko.tsv -b arid1b_ko.tsv --gmt hallmark.gmt -o figures/
  deviz report -a exp1.tsv -b exp2.tsv -o figures/ --label ARID1A --label TP53"
    )]
    Report {
        /// Path to the first DE table
        #[arg(short = 'a', long)]
        input_a: String,

        /// Path to the second DE table
        #[arg(short = 'b', long)]
        input_b: String,

        /// Output directory for the SVG files
        #[arg(short, long, default_value = "figures")]
        output: String,

        /// Optional GMT gene set collection for the dot plot
        #[arg(long)]
        gmt: Option<String>,

        /// Curated gene to label in the volcano and heatmaps (repeatable)
        #[arg(long, value_name = "GENE")]
        label: Vec<String>,

        /// Display name of the first experiment
        #[arg(long, default_value = "experiment A")]
        label_a: String,

        /// Display name of the second experiment
        #[arg(long, default_value = "experiment B")]
        label_b: String,

        /// Label permutations per gene set
        #[arg(long, default_value = "1000")]
        permutations: usize,

        /// RNG seed for the permutation null
        #[arg(long, default_value = "2024")]
        seed: u64,

        #[command(flatten)]
        schema: SchemaOpts,

        #[command(flatten)]
        schema_b: SchemaBOpts,

        #[command(flatten)]
        thresholds: ThresholdOpts,
    },
}

/// Schema flags for the second table of two-table commands
#[derive(Args, Debug, Clone)]
pub struct SchemaBOpts {
    /// Gene annotation column of the second table [default: same as --gene-col]
    #[arg(long, value_name = "COL")]
    pub gene_col_b: Option<String>,

    /// Log2 fold-change column of the second table [default: same as --lfc-col]
    #[arg(long, value_name = "COL")]
    pub lfc_col_b: Option<String>,

    /// Adjusted p-value column of the second table [default: same as --padj-col]
    #[arg(long, value_name = "COL")]
    pub padj_col_b: Option<String>,

    /// Count columns of the second table [default: same as --count-cols]
    #[arg(long, num_args = 4, value_name = "COL")]
    pub count_cols_b: Option<Vec<String>>,
}
