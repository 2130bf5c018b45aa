// Mon Feb 09 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("invalid symbol name: {0}")]
    InvalidSymbolName(String),
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),
    #[error("module not found: {0}")]
    ModuleNotFound(String),
    #[error("no module contains symbol: {0}")]
    SymbolNotInAnyModule(String),
    #[error("{name}: symbol has no {attribute}")]
    NoAttribute { name: String, attribute: &'static str },
    #[error("{parent}: child index {index} out of range")]
    ChildIndexOutOfRange { parent: String, index: usize },
}
