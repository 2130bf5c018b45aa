// Symbol tag set and provider-side classifications (DESIGN.md §3).

/// DIA-style symbol tag. Fully enumerated tag set consumed by the type
/// factory; every other tag is treated as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymTag {
    Data,
    BaseType,
    Udt,
    BaseClass,
    ArrayType,
    PointerType,
    VTable,
    VTableShape,
    Enum,
    Typedef,
    FunctionType,
    Function,
    Null,
}

/// Storage location classification for a data symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    Regular,
    BitField,
    Static,
}

/// Data-symbol kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Member,
    StaticMember,
    Constant,
    Local,
    Global,
}

/// Provider-side base-type classification, mapped to crate `BaseType`
/// names by width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicKind {
    Void,
    Char,
    WChar,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Bool,
}

/// Target machine; determines pointer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Machine {
    X86,
    Amd64,
}

impl Machine {
    /// Pointer size in bytes for this machine.
    pub fn pointer_size(self) -> usize {
        match self {
            Machine::X86 => 4,
            Machine::Amd64 => 8,
        }
    }
}
