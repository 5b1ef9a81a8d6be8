//! Fixed-width `.hab` deposit file generator.
//!
//! Converts a tabular batch of deposit instructions into the fixed-width
//! `.hab` layout consumed by the downstream settlement process. The whole
//! operation is a single deterministic pass over the batch:
//!
//! ingest -> filter -> resolve (+ CUIL prefix rule) -> assemble -> serialize
//!
//! Re-running with the same batch and date produces byte-identical output.

pub mod batch;
pub mod encode;
pub mod error;
pub mod ingest;
pub mod schema;
