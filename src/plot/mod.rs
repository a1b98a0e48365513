//! Presenters: volcano, clustered heatmap, GSEA dot plot, proportional Venn
//!
//! Every presenter is a pure rendering function from shaped data plus
//! module-level style constants to one SVG file. Nothing here mutates its
//! input.

mod dotplot;
mod heatmap;
mod style;
mod venn;
mod volcano;

pub use dotplot::render_dotplot;
pub use heatmap::render_heatmap;
pub use venn::render_venn;
pub use volcano::render_volcano;
