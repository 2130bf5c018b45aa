// Fri Feb 13 2026 - Alex

use thiserror::Error;

/// The single accessor error kind. Every backend failure — an
/// out-of-range element, a value that does not convert, a foreign host
/// failure, or metadata requested from a backend that has none —
/// surfaces here.
#[derive(Error, Debug)]
pub enum AccessorError {
    #[error("out of range: byte {offset} (length {length}) beyond store of {store_length} bytes")]
    OutOfRange {
        offset: usize,
        length: usize,
        store_length: usize,
    },
    #[error("value {value} does not fit {target}")]
    BadValue { value: String, target: String },
    #[error("{0} accessor error")]
    Backend(String),
    #[error("{location}: accessor has no {attribute}")]
    NoMetadata {
        location: String,
        attribute: &'static str,
    },
}
