// Tue Feb 10 2026 - Alex

use crate::symbol::SymbolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypeError {
    #[error("{name}: symbol tag {tag} is not supported")]
    UnsupportedSymbolTag { name: String, tag: String },
    #[error("{type_name}: field not found: {field}")]
    FieldNotFound { type_name: String, field: String },
    #[error("{type_name}: element index {index} out of range")]
    ElementIndexOutOfRange { type_name: String, index: usize },
    #[error("{0}: type has no elements")]
    NoElements(String),
    #[error("{0}: field is a constant and has no storage")]
    ConstantField(String),
    #[error("{0}: field is a static member and has no instance offset")]
    StaticMemberOffset(String),
    #[error("{0}: field is not a virtual member")]
    NotVirtualMember(String),
    #[error("{0}: this type is not a constant and has not a value")]
    NotConstant(String),
    #[error("{0}: this type is not a pointer")]
    NotPointer(String),
    #[error("{0}: this type is not a scalar")]
    NotScalar(String),
    #[error("{0}: pointer type can not be dereferenced")]
    UnresolvedPointee(String),
    #[error("invalid type expression: {0}")]
    InvalidTypeExpression(String),
    #[error("{type_name}: method not found: {method}")]
    MethodNotFound { type_name: String, method: String },
    #[error("symbol name can not be an expression: {0}")]
    DataSymbolInExpression(String),
    #[error(transparent)]
    Symbol(#[from] SymbolError),
}
