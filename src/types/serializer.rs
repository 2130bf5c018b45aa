// Fri Feb 13 2026 - Alex

use crate::types::udt::FieldStorage;
use crate::types::{TypeInfo, TypeKind};
use serde::{Deserialize, Serialize};

/// Serializable snapshot of a type tree, for exporting resolved
/// layouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescription {
    Base {
        name: String,
        size: usize,
    },
    BitField {
        name: String,
        size: usize,
        bit_width: u32,
        bit_position: u32,
    },
    Pointer {
        name: String,
        size: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        pointee: Option<Box<TypeDescription>>,
    },
    Array {
        name: String,
        size: usize,
        count: usize,
        element: Box<TypeDescription>,
    },
    Udt {
        name: String,
        size: usize,
        fields: Vec<FieldDescription>,
    },
    Enum {
        name: String,
        size: usize,
        entries: Vec<EnumEntryDescription>,
    },
    Function {
        name: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescription {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_base: Option<String>,
    pub type_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumEntryDescription {
    pub name: String,
    pub value: u64,
}

pub fn describe(type_info: &TypeInfo) -> TypeDescription {
    let name = type_info.name();
    let size = type_info.size();

    match type_info.kind() {
        TypeKind::Base(_) => TypeDescription::Base { name, size },
        TypeKind::BitField(bf) => TypeDescription::BitField {
            name,
            size,
            bit_width: bf.width(),
            bit_position: bf.position(),
        },
        TypeKind::Pointer(ptr) => TypeDescription::Pointer {
            name,
            size,
            pointee: ptr.pointee().map(|p| Box::new(describe(p))),
        },
        TypeKind::Array(arr) => TypeDescription::Array {
            name,
            size,
            count: arr.count(),
            element: Box::new(describe(arr.element())),
        },
        TypeKind::Udt(udt) => TypeDescription::Udt {
            name,
            size,
            fields: udt
                .fields()
                .iter()
                .map(|field| FieldDescription {
                    name: field.name().to_string(),
                    offset: match field.storage() {
                        FieldStorage::Instance(offset) => Some(*offset),
                        _ => None,
                    },
                    address: match field.storage() {
                        FieldStorage::Static(address) => Some(*address),
                        _ => None,
                    },
                    constant: field.constant_value().map(|v| v.to_string()),
                    virtual_base: field.virtual_base_name().map(str::to_string),
                    type_name: field.type_info().name(),
                })
                .collect(),
        },
        TypeKind::Enum(en) => TypeDescription::Enum {
            name,
            size,
            entries: en
                .entries()
                .iter()
                .map(|(name, value)| EnumEntryDescription {
                    name: name.clone(),
                    value: value.as_u64(),
                })
                .collect(),
        },
        TypeKind::Function(_) => TypeDescription::Function { name },
    }
}

pub fn to_json(type_info: &TypeInfo) -> Result<String, serde_json::Error> {
    serde_json::to_string(&describe(type_info))
}

pub fn to_json_pretty(type_info: &TypeInfo) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&describe(type_info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Machine;
    use crate::types::{BaseType, UdtBuilder};

    #[test]
    fn test_describe_struct() {
        let int4 = TypeInfo::base(BaseType::Int4B, Machine::Amd64);
        let mut builder = UdtBuilder::define_struct("Point");
        builder.append_field("x", &int4);
        builder.append_field("y", &int4);
        let ti = builder.build();

        let json = to_json(&ti).unwrap();
        assert!(json.contains("\"kind\":\"udt\""));
        assert!(json.contains("\"name\":\"Point\""));
        assert!(json.contains("\"type_name\":\"Int4B\""));

        let parsed: TypeDescription = serde_json::from_str(&json).unwrap();
        match parsed {
            TypeDescription::Udt { fields, size, .. } => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[1].offset, Some(4));
                assert_eq!(size, 8);
            }
            other => panic!("unexpected description: {:?}", other),
        }
    }

    #[test]
    fn test_describe_pointer_chain() {
        let ti = TypeInfo::base(BaseType::Int4B, Machine::Amd64)
            .array_of(4)
            .ptr_to();
        match describe(&ti) {
            TypeDescription::Pointer { name, pointee, .. } => {
                assert_eq!(name, "Int4B(*)[4]");
                assert!(matches!(
                    pointee.as_deref(),
                    Some(TypeDescription::Array { count: 4, .. })
                ));
            }
            other => panic!("unexpected description: {:?}", other),
        }
    }
}
