// Tue Feb 10 2026 - Alex

pub mod base;
pub mod builder;
pub mod enums;
pub mod error;
pub mod factory;
pub mod info;
pub mod parser;
pub mod serializer;
pub mod udt;

pub use base::BaseType;
pub use builder::UdtBuilder;
pub use enums::EnumInfo;
pub use error::TypeError;
pub use factory::{load_type, TypeFactory};
pub use info::{ArrayInfo, BitFieldInfo, FunctionInfo, PointerInfo, TypeInfo, TypeKind};
pub use parser::parse_type_name;
pub use serializer::{describe, to_json, to_json_pretty, TypeDescription};
pub use udt::{FieldStorage, UdtField, UdtInfo, VirtualBaseInfo, VirtualDisplacement};
