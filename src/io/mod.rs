//! Input parsing: DE tables, GMT gene sets, pre-computed enrichment tables

mod gene_sets;
mod table;

pub use gene_sets::{read_enrichment_table, read_gene_sets};
pub use table::read_de_table;
