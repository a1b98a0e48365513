//! Data structures for differential expression tables

mod record;
mod schema;

pub use record::{DeRecord, DeTable, N_SAMPLES};
pub use schema::TableSchema;
