use thiserror::Error;

/// Errors that can stop the analyzer before it starts searching.
///
/// These are all fatal at startup: a missing or malformed prerequisite
/// table means the operator must run table generation first.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table file {path} not found; run table generation first")]
    Missing { path: String },

    #[error("table file {path} has size {actual} bytes, expected {expected} for {count} elements of {elem_size} bytes")]
    SizeMismatch {
        path: String,
        actual: u64,
        expected: u64,
        count: u64,
        elem_size: u64,
    },

    #[error("io error reading/writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("allocation failed while generating table {name}: {detail}")]
    OutOfMemory { name: String, detail: String },
}
