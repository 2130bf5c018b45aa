// Mon Feb 09 2026 - Alex

#![allow(unused_variables)]
#![allow(dead_code)]
#![allow(unreachable_patterns)]

pub mod accessor;
pub mod config;
pub mod symbol;
pub mod types;
pub mod utils;
pub mod value;
pub mod var;

pub use accessor::{
    AccessorError, BufferAccessor, DataAccessor, DebuggeeMemory, ForeignSequence,
    ForeignSequenceAccessor, HostContext, MemoryAccessor, NullContext, VarStorage,
};
pub use config::Config;
pub use symbol::{
    BasicKind, DataKind, LocationKind, Machine, ModuleProvider, ModuleSet, ModuleStore, SymTag,
    Symbol, SymbolError, SymbolRef, SyntheticModule, SyntheticSymbol,
};
pub use types::{
    load_type, parse_type_name, BaseType, EnumInfo, TypeError, TypeFactory, TypeInfo, TypeKind,
    UdtBuilder, UdtField, UdtInfo, VirtualDisplacement,
};
pub use value::TypedValue;
pub use var::{
    load_typed_var, load_typed_var_array, load_typed_var_from_buffer, load_typed_var_from_dump,
    load_typed_var_from_foreign, load_typed_var_with_type, TypeBinder, TypedVar, VarError,
};
