// Thu Feb 12 2026 - Alex

use crate::symbol::Machine;
use crate::types::udt::{FieldStorage, UdtField, UdtInfo};
use crate::types::TypeInfo;
use std::sync::Arc;

fn align_up(value: usize, alignment: usize) -> usize {
    (value + alignment - 1) / alignment * alignment
}

/// Incremental builder for ad hoc struct and union types. This is the
/// only mutation path in the type layer; a builder in progress must not
/// be shared between callers.
pub struct UdtBuilder {
    info: UdtInfo,
    is_union: bool,
    align: Option<usize>,
    max_align: usize,
    machine: Machine,
}

impl UdtBuilder {
    pub fn define_struct(name: &str) -> Self {
        Self {
            info: UdtInfo::empty(name.to_string(), 0),
            is_union: false,
            align: None,
            max_align: 1,
            machine: Machine::Amd64,
        }
    }

    pub fn define_union(name: &str) -> Self {
        let mut builder = Self::define_struct(name);
        builder.is_union = true;
        builder
    }

    /// Caps field alignment; 0 keeps every type's natural alignment.
    pub fn with_align(mut self, align: usize) -> Self {
        self.align = (align > 0).then_some(align);
        self
    }

    pub fn with_machine(mut self, machine: Machine) -> Self {
        self.machine = machine;
        self
    }

    pub fn append_field(&mut self, name: &str, type_info: &Arc<TypeInfo>) -> &mut Self {
        let natural = type_info.alignment().max(1);
        let alignment = match self.align {
            Some(cap) => natural.min(cap),
            None => natural,
        };
        self.max_align = self.max_align.max(alignment);

        let offset = if self.is_union {
            0
        } else {
            align_up(self.info.size(), alignment)
        };

        self.info.push_field(UdtField::new(
            name.to_string(),
            FieldStorage::Instance(offset as u32),
            type_info.clone(),
            None,
        ));

        let end = offset + type_info.size();
        self.info.set_size(self.info.size().max(end));
        self
    }

    pub fn field_count(&self) -> usize {
        self.info.field_count()
    }

    pub fn build(mut self) -> Arc<TypeInfo> {
        let padded = align_up(self.info.size().max(1), self.max_align);
        self.info.set_size(padded);
        TypeInfo::udt(self.info, self.machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BaseType;

    fn int4() -> Arc<TypeInfo> {
        TypeInfo::base(BaseType::Int4B, Machine::Amd64)
    }

    fn uint8() -> Arc<TypeInfo> {
        TypeInfo::base(BaseType::UInt8B, Machine::Amd64)
    }

    #[test]
    fn test_struct_layout() {
        let mut builder = UdtBuilder::define_struct("Header");
        builder.append_field("magic", &int4());
        builder.append_field("length", &uint8());
        builder.append_field("flags", &int4());
        let ti = builder.build();

        assert_eq!(ti.name(), "Header");
        assert_eq!(ti.element_offset("magic").unwrap(), 0);
        assert_eq!(ti.element_offset("length").unwrap(), 8);
        assert_eq!(ti.element_offset("flags").unwrap(), 16);
        assert_eq!(ti.size(), 24);
    }

    #[test]
    fn test_struct_packed_alignment() {
        let mut builder = UdtBuilder::define_struct("Packed").with_align(1);
        builder.append_field("a", &int4());
        builder.append_field("b", &uint8());
        let ti = builder.build();

        assert_eq!(ti.element_offset("b").unwrap(), 4);
        assert_eq!(ti.size(), 12);
    }

    #[test]
    fn test_union_layout() {
        let mut builder = UdtBuilder::define_union("Value");
        builder.append_field("as_int", &int4());
        builder.append_field("as_qword", &uint8());
        let ti = builder.build();

        assert_eq!(ti.element_offset("as_int").unwrap(), 0);
        assert_eq!(ti.element_offset("as_qword").unwrap(), 0);
        assert_eq!(ti.size(), 8);
    }

    #[test]
    fn test_appended_fields_navigable() {
        let mut builder = UdtBuilder::define_struct("Pair");
        builder.append_field("first", &int4());
        builder.append_field("second", &int4());
        let ti = builder.build();

        assert_eq!(ti.element_count().unwrap(), 2);
        assert_eq!(ti.element_name(1).unwrap(), "second");
        assert_eq!(ti.element("second").unwrap().name(), "Int4B");
    }
}
