// Tue Feb 10 2026 - Alex

use crate::symbol::{
    BasicKind, DataKind, LocationKind, Machine, ModuleStore, SymTag, Symbol, SymbolError,
    SymbolRef,
};
use crate::value::TypedValue;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory symbol node. Stands in for a debug-info provider when
/// types are defined ad hoc or constructed in tests.
pub struct SyntheticSymbol {
    tag: SymTag,
    name: String,
    size: usize,
    machine: Machine,
    children: RwLock<Vec<SymbolRef>>,
    type_sym: Option<SymbolRef>,
    basic: Option<BasicKind>,
    offset: Option<u32>,
    va: Option<u64>,
    location: LocationKind,
    data_kind: DataKind,
    bit_position: Option<u32>,
    count: Option<usize>,
    virtual_base: bool,
    vbase_params: Option<(i32, u32, u32)>,
    value: Option<TypedValue>,
}

impl SyntheticSymbol {
    fn blank(tag: SymTag, name: &str) -> Self {
        Self {
            tag,
            name: name.to_string(),
            size: 0,
            machine: Machine::Amd64,
            children: RwLock::new(Vec::new()),
            type_sym: None,
            basic: None,
            offset: None,
            va: None,
            location: LocationKind::Regular,
            data_kind: DataKind::Member,
            bit_position: None,
            count: None,
            virtual_base: false,
            vbase_params: None,
            value: None,
        }
    }

    /// Root scope symbol; its children are the top-level types.
    pub fn scope(machine: Machine) -> Self {
        Self::blank(SymTag::Null, "").with_machine(machine)
    }

    pub fn base_type(kind: BasicKind, size: usize) -> Self {
        let mut sym = Self::blank(SymTag::BaseType, "");
        sym.basic = Some(kind);
        sym.size = size;
        sym
    }

    pub fn udt(name: &str, size: usize) -> Self {
        let mut sym = Self::blank(SymTag::Udt, name);
        sym.size = size;
        sym
    }

    pub fn enumeration(name: &str, size: usize, base: SymbolRef) -> Self {
        let mut sym = Self::blank(SymTag::Enum, name);
        sym.size = size;
        sym.type_sym = Some(base);
        sym
    }

    pub fn array(element: SymbolRef, count: usize) -> Self {
        let mut sym = Self::blank(SymTag::ArrayType, "");
        sym.size = element.size() * count;
        sym.count = Some(count);
        sym.type_sym = Some(element);
        sym
    }

    pub fn pointer(pointee: SymbolRef, machine: Machine) -> Self {
        let mut sym = Self::blank(SymTag::PointerType, "");
        sym.size = machine.pointer_size();
        sym.machine = machine;
        sym.type_sym = Some(pointee);
        sym
    }

    pub fn vtable_shape() -> Self {
        Self::blank(SymTag::VTableShape, "")
    }

    pub fn function_type() -> Self {
        Self::blank(SymTag::FunctionType, "")
    }

    pub fn function(name: &str) -> Self {
        Self::blank(SymTag::Function, name)
    }

    pub fn typedef(name: &str, aliased: SymbolRef) -> Self {
        let mut sym = Self::blank(SymTag::Typedef, name);
        sym.size = aliased.size();
        sym.type_sym = Some(aliased);
        sym
    }

    pub fn member(name: &str, type_sym: SymbolRef, offset: u32) -> Self {
        let mut sym = Self::blank(SymTag::Data, name);
        sym.size = type_sym.size();
        sym.type_sym = Some(type_sym);
        sym.offset = Some(offset);
        sym
    }

    pub fn static_member(name: &str, type_sym: SymbolRef, address: u64) -> Self {
        let mut sym = Self::blank(SymTag::Data, name);
        sym.size = type_sym.size();
        sym.type_sym = Some(type_sym);
        sym.va = Some(address);
        sym.location = LocationKind::Static;
        sym.data_kind = DataKind::StaticMember;
        sym
    }

    pub fn constant_member(name: &str, type_sym: SymbolRef, value: TypedValue) -> Self {
        let mut sym = Self::blank(SymTag::Data, name);
        sym.size = type_sym.size();
        sym.type_sym = Some(type_sym);
        sym.data_kind = DataKind::Constant;
        sym.value = Some(value);
        sym
    }

    /// Enumerator of an enum symbol.
    pub fn enumerator(name: &str, value: TypedValue) -> Self {
        let mut sym = Self::blank(SymTag::Data, name);
        sym.data_kind = DataKind::Constant;
        sym.value = Some(value);
        sym
    }

    /// Bit-field data member. The provider convention reports the bit
    /// width through `size`.
    pub fn bit_field_member(
        name: &str,
        base: SymbolRef,
        offset: u32,
        bit_position: u32,
        bit_width: usize,
    ) -> Self {
        let mut sym = Self::blank(SymTag::Data, name);
        sym.size = bit_width;
        sym.type_sym = Some(base);
        sym.offset = Some(offset);
        sym.location = LocationKind::BitField;
        sym.bit_position = Some(bit_position);
        sym
    }

    /// Non-virtual base class embedded at `offset` in the derived type.
    pub fn base_class(base: &SymbolRef, offset: u32) -> Self {
        let mut sym = Self::blank(SymTag::BaseClass, &base.name());
        sym.size = base.size();
        sym.offset = Some(offset);
        sym.type_sym = Some(base.clone());
        for i in 0..base.child_count() {
            if let Ok(child) = base.child_by_index(i) {
                sym.children.get_mut().push(child);
            }
        }
        sym
    }

    /// Virtual base class carrying its displacement parameters.
    pub fn virtual_base_class(
        base: &SymbolRef,
        base_ptr_offset: i32,
        disp_index: u32,
        disp_size: u32,
    ) -> Self {
        let mut sym = Self::base_class(base, 0);
        sym.virtual_base = true;
        sym.vbase_params = Some((base_ptr_offset, disp_index, disp_size));
        sym
    }

    /// VTable pointer slot of a class.
    pub fn vtable(offset: u32, shape: SymbolRef) -> Self {
        let mut sym = Self::blank(SymTag::VTable, "");
        sym.offset = Some(offset);
        sym.type_sym = Some(shape);
        sym
    }

    pub fn with_machine(mut self, machine: Machine) -> Self {
        self.machine = machine;
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_child(self, child: SymbolRef) -> Self {
        self.children.write().push(child);
        self
    }

    /// Adds a child to an already shared symbol; used when growing a
    /// module scope incrementally.
    pub fn add_child(&self, child: SymbolRef) {
        self.children.write().push(child);
    }

    pub fn build(self) -> SymbolRef {
        Arc::new(self)
    }

    fn no_attribute(&self, attribute: &'static str) -> SymbolError {
        SymbolError::NoAttribute {
            name: self.name.clone(),
            attribute,
        }
    }
}

impl Symbol for SyntheticSymbol {
    fn sym_tag(&self) -> SymTag {
        self.tag
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> usize {
        self.size
    }

    fn machine(&self) -> Machine {
        self.machine
    }

    fn child_count(&self) -> usize {
        self.children.read().len()
    }

    fn child_by_index(&self, index: usize) -> Result<SymbolRef, SymbolError> {
        self.children.read().get(index).cloned().ok_or_else(|| {
            SymbolError::ChildIndexOutOfRange {
                parent: self.name.clone(),
                index,
            }
        })
    }

    fn child_by_name(&self, name: &str) -> Result<SymbolRef, SymbolError> {
        self.children
            .read()
            .iter()
            .find(|c| c.name() == name)
            .cloned()
            .ok_or_else(|| SymbolError::SymbolNotFound(name.to_string()))
    }

    fn type_symbol(&self) -> Result<SymbolRef, SymbolError> {
        self.type_sym
            .clone()
            .ok_or_else(|| self.no_attribute("type"))
    }

    fn basic_kind(&self) -> Result<BasicKind, SymbolError> {
        self.basic.ok_or_else(|| self.no_attribute("basic kind"))
    }

    fn offset(&self) -> Result<u32, SymbolError> {
        self.offset.ok_or_else(|| self.no_attribute("offset"))
    }

    fn virtual_address(&self) -> Result<u64, SymbolError> {
        self.va
            .ok_or_else(|| self.no_attribute("virtual address"))
    }

    fn location_kind(&self) -> LocationKind {
        self.location
    }

    fn data_kind(&self) -> DataKind {
        self.data_kind
    }

    fn bit_position(&self) -> Result<u32, SymbolError> {
        self.bit_position
            .ok_or_else(|| self.no_attribute("bit position"))
    }

    fn element_count(&self) -> Result<usize, SymbolError> {
        self.count
            .ok_or_else(|| self.no_attribute("element count"))
    }

    fn is_virtual_base(&self) -> bool {
        self.virtual_base
    }

    fn virtual_base_ptr_offset(&self) -> Result<i32, SymbolError> {
        self.vbase_params
            .map(|(p, _, _)| p)
            .ok_or_else(|| self.no_attribute("virtual base pointer offset"))
    }

    fn virtual_base_disp_index(&self) -> Result<u32, SymbolError> {
        self.vbase_params
            .map(|(_, i, _)| i)
            .ok_or_else(|| self.no_attribute("virtual base displacement index"))
    }

    fn virtual_base_disp_size(&self) -> Result<u32, SymbolError> {
        self.vbase_params
            .map(|(_, _, s)| s)
            .ok_or_else(|| self.no_attribute("virtual base displacement size"))
    }

    fn value(&self) -> Result<TypedValue, SymbolError> {
        self.value.ok_or_else(|| self.no_attribute("value"))
    }
}

/// A named module backed by a synthetic scope.
pub struct SyntheticModule {
    name: String,
    scope: SymbolRef,
}

impl SyntheticModule {
    pub fn new(name: &str, scope: SymbolRef) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            scope,
        })
    }
}

impl ModuleStore for SyntheticModule {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn scope(&self) -> SymbolRef {
        self.scope.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int4(machine: Machine) -> SymbolRef {
        SyntheticSymbol::base_type(BasicKind::Int, 4)
            .with_machine(machine)
            .build()
    }

    #[test]
    fn test_member_lookup() {
        let int4 = int4(Machine::Amd64);
        let udt = SyntheticSymbol::udt("Point", 8)
            .with_child(SyntheticSymbol::member("x", int4.clone(), 0).build())
            .with_child(SyntheticSymbol::member("y", int4, 4).build())
            .build();

        assert_eq!(udt.child_count(), 2);
        assert_eq!(udt.child_by_name("y").unwrap().offset().unwrap(), 4);
        assert!(udt.child_by_name("z").is_err());
    }

    #[test]
    fn test_base_class_shares_children() {
        let int4 = int4(Machine::Amd64);
        let base = SyntheticSymbol::udt("Base", 4)
            .with_child(SyntheticSymbol::member("a", int4, 0).build())
            .build();
        let embedded = SyntheticSymbol::base_class(&base, 8).build();

        assert_eq!(embedded.sym_tag(), SymTag::BaseClass);
        assert_eq!(embedded.offset().unwrap(), 8);
        assert_eq!(embedded.child_by_name("a").unwrap().name(), "a");
    }

    #[test]
    fn test_missing_attribute() {
        let udt = SyntheticSymbol::udt("T", 4).build();
        assert!(matches!(
            udt.bit_position(),
            Err(SymbolError::NoAttribute { .. })
        ));
    }
}
