// Tue Feb 17 2026 - Alex

use crate::accessor::AccessorError;
use crate::symbol::SymbolError;
use crate::types::TypeError;
use thiserror::Error;

/// Any failure a typed-variable operation can surface. Exactly three
/// kinds exist; callers discriminate by kind, never by message text.
#[derive(Error, Debug)]
pub enum VarError {
    #[error(transparent)]
    Symbol(#[from] SymbolError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Accessor(#[from] AccessorError),
}

pub type VarResult<T> = Result<T, VarError>;
