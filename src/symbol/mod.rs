// Mon Feb 09 2026 - Alex

pub mod error;
pub mod module;
pub mod provider;
pub mod synthetic;
pub mod tag;

pub use error::SymbolError;
pub use module::{
    resolve_symbol_reference, split_symbol_name, ModuleProvider, ModuleSet, ModuleStore,
};
pub use provider::{Symbol, SymbolRef};
pub use synthetic::{SyntheticModule, SyntheticSymbol};
pub use tag::{BasicKind, DataKind, LocationKind, Machine, SymTag};
