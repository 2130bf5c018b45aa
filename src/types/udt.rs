// Wed Feb 11 2026 - Alex

use crate::symbol::{DataKind, SymTag, SymbolRef};
use crate::types::factory::TypeFactory;
use crate::types::{TypeError, TypeInfo};
use crate::value::TypedValue;
use std::fmt;
use std::sync::Arc;

/// Parameters needed to resolve a virtually-inherited base's runtime
/// offset against a live vtable. Recorded here, resolved elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualDisplacement {
    pub base_ptr_offset: i32,
    pub disp_index: u32,
    pub disp_entry_size: u32,
}

#[derive(Debug, Clone)]
pub struct VirtualBaseInfo {
    pub class_name: String,
    pub displacement: VirtualDisplacement,
}

/// Where a field's bytes live. The three cases are mutually exclusive:
/// instance members have a relative offset, static members an absolute
/// address, constants a literal and no storage at all.
#[derive(Debug, Clone)]
pub enum FieldStorage {
    Instance(u32),
    Static(u64),
    Constant(TypedValue),
}

#[derive(Debug, Clone)]
pub struct UdtField {
    name: String,
    storage: FieldStorage,
    type_info: Arc<TypeInfo>,
    virtual_base: Option<VirtualBaseInfo>,
}

impl UdtField {
    pub(crate) fn new(
        name: String,
        storage: FieldStorage,
        type_info: Arc<TypeInfo>,
        virtual_base: Option<VirtualBaseInfo>,
    ) -> Self {
        Self {
            name,
            storage,
            type_info,
            virtual_base,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_info(&self) -> &Arc<TypeInfo> {
        &self.type_info
    }

    pub fn storage(&self) -> &FieldStorage {
        &self.storage
    }

    pub fn offset(&self) -> Result<u32, TypeError> {
        match self.storage {
            FieldStorage::Instance(offset) => Ok(offset),
            FieldStorage::Static(_) => Err(TypeError::StaticMemberOffset(self.name.clone())),
            FieldStorage::Constant(_) => Err(TypeError::ConstantField(self.name.clone())),
        }
    }

    pub fn static_address(&self) -> Result<u64, TypeError> {
        match self.storage {
            FieldStorage::Static(address) => Ok(address),
            _ => Err(TypeError::StaticMemberOffset(self.name.clone())),
        }
    }

    pub fn constant_value(&self) -> Option<TypedValue> {
        match self.storage {
            FieldStorage::Constant(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_static_member(&self) -> bool {
        matches!(self.storage, FieldStorage::Static(_))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.storage, FieldStorage::Constant(_))
    }

    pub fn is_virtual_member(&self) -> bool {
        self.virtual_base.is_some()
    }

    pub fn virtual_base_name(&self) -> Option<&str> {
        self.virtual_base.as_ref().map(|vb| vb.class_name.as_str())
    }

    pub fn virtual_displacement(&self) -> Result<VirtualDisplacement, TypeError> {
        self.virtual_base
            .as_ref()
            .map(|vb| vb.displacement)
            .ok_or_else(|| TypeError::NotVirtualMember(self.name.clone()))
    }
}

/// Flattened description of a struct/class/union: every reachable field
/// with its absolute offset, plus the member functions seen on the
/// defining symbol.
#[derive(Debug, Clone)]
pub struct UdtInfo {
    name: String,
    size: usize,
    fields: Vec<UdtField>,
    methods: Vec<(String, Arc<TypeInfo>)>,
}

impl UdtInfo {
    pub(crate) fn empty(name: String, size: usize) -> Self {
        Self {
            name,
            size,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Builds the flattened field list from a UDT symbol: a primary
    /// pass over members and non-virtual bases, then a second pass that
    /// walks only virtual bases and marks everything they produce with
    /// the deferred displacement parameters.
    pub(crate) fn from_symbol(sym: &SymbolRef) -> Result<Self, TypeError> {
        let mut info = Self::empty(sym.name(), sym.size());
        info.collect_fields(sym, 0, None)?;
        info.collect_virtual_fields(sym)?;
        info.collect_methods(sym);
        log::debug!(
            "flattened udt {}: {} fields, {} methods",
            info.name,
            info.fields.len(),
            info.methods.len()
        );
        Ok(info)
    }

    fn collect_fields(
        &mut self,
        root: &SymbolRef,
        start_offset: u32,
        virtual_base: Option<&VirtualBaseInfo>,
    ) -> Result<(), TypeError> {
        for i in 0..root.child_count() {
            let child = root.child_by_index(i)?;
            match child.sym_tag() {
                SymTag::BaseClass => {
                    if !child.is_virtual_base() {
                        let embedded = start_offset + child.offset()?;
                        self.collect_fields(&child, embedded, virtual_base)?;
                    }
                }
                SymTag::Data => {
                    let storage = match child.data_kind() {
                        DataKind::StaticMember => FieldStorage::Static(child.virtual_address()?),
                        DataKind::Constant => FieldStorage::Constant(child.value()?),
                        _ => FieldStorage::Instance(start_offset + child.offset()?),
                    };
                    let type_info = TypeFactory::from_symbol(&child)?;
                    self.fields.push(UdtField::new(
                        child.name(),
                        storage,
                        type_info,
                        virtual_base.cloned(),
                    ));
                }
                SymTag::VTable => {
                    let type_info = TypeFactory::from_symbol(&child)?;
                    self.fields.push(UdtField::new(
                        "__VFN_table".to_string(),
                        FieldStorage::Instance(start_offset + child.offset()?),
                        type_info,
                        virtual_base.cloned(),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn collect_virtual_fields(&mut self, root: &SymbolRef) -> Result<(), TypeError> {
        for child in root.find_children(SymTag::BaseClass) {
            if !child.is_virtual_base() {
                continue;
            }
            let virtual_base = VirtualBaseInfo {
                class_name: child.name(),
                displacement: VirtualDisplacement {
                    base_ptr_offset: child.virtual_base_ptr_offset()?,
                    disp_index: child.virtual_base_disp_index()?,
                    disp_entry_size: child.virtual_base_disp_size()?,
                },
            };
            self.collect_fields(&child, 0, Some(&virtual_base))?;
        }
        Ok(())
    }

    fn collect_methods(&mut self, root: &SymbolRef) {
        for child in root.find_children(SymTag::Function) {
            let name = child.name();
            let type_info = TypeInfo::function(name.clone(), root.machine());
            self.methods.push((name, type_info));
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[UdtField] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Result<&UdtField, TypeError> {
        self.fields
            .get(index)
            .ok_or_else(|| TypeError::ElementIndexOutOfRange {
                type_name: self.name.clone(),
                index,
            })
    }

    pub fn field_by_name(&self, name: &str) -> Result<&UdtField, TypeError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| TypeError::FieldNotFound {
                type_name: self.name.clone(),
                field: name.to_string(),
            })
    }

    pub fn method_by_name(&self, name: &str) -> Result<&Arc<TypeInfo>, TypeError> {
        self.methods
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ti)| ti)
            .ok_or_else(|| TypeError::MethodNotFound {
                type_name: self.name.clone(),
                method: name.to_string(),
            })
    }

    pub(crate) fn push_field(&mut self, field: UdtField) {
        self.fields.push(field);
    }

    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}

impl fmt::Display for UdtInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "class/struct: {} Size: 0x{:x} ({})",
            self.name, self.size, self.size
        )?;
        for field in &self.fields {
            match &field.storage {
                FieldStorage::Static(address) => {
                    writeln!(
                        f,
                        "   ={:010x} {:<18}: {}",
                        address,
                        field.name,
                        field.type_info.name()
                    )?;
                }
                FieldStorage::Constant(value) => {
                    writeln!(
                        f,
                        "   const {:<20}: {} = {}",
                        field.name,
                        field.type_info.name(),
                        value
                    )?;
                }
                FieldStorage::Instance(offset) => {
                    if let Some(base_name) = field.virtual_base_name() {
                        writeln!(
                            f,
                            "   virtual base {} +{:04x} {}: {}",
                            base_name,
                            offset,
                            field.name,
                            field.type_info.name()
                        )?;
                    } else {
                        writeln!(
                            f,
                            "   +{:04x} {:<24}: {}",
                            offset,
                            field.name,
                            field.type_info.name()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}
