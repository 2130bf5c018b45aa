// Wed Feb 11 2026 - Alex

use crate::symbol::Machine;
use crate::types::{BaseType, EnumInfo, TypeError, UdtInfo, VirtualDisplacement};
use crate::value::TypedValue;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct BitFieldInfo {
    base: BaseType,
    width: u32,
    position: u32,
}

impl BitFieldInfo {
    pub fn base(&self) -> BaseType {
        self.base
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn position(&self) -> u32 {
        self.position
    }
}

#[derive(Debug, Clone)]
pub struct PointerInfo {
    pointee: Option<Arc<TypeInfo>>,
    /// Descriptive name substituted when the pointee could not be
    /// resolved (`<function>`, `Void`, `VTable`).
    fallback: Option<String>,
}

impl PointerInfo {
    pub fn pointee(&self) -> Option<&Arc<TypeInfo>> {
        self.pointee.as_ref()
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct ArrayInfo {
    element: Arc<TypeInfo>,
    count: usize,
}

impl ArrayInfo {
    pub fn element(&self) -> &Arc<TypeInfo> {
        &self.element
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

#[derive(Debug, Clone)]
pub struct FunctionInfo {
    name: String,
}

impl FunctionInfo {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Tagged variants of the type hierarchy. Every shape the factory can
/// produce is enumerated here; there is no downcasting anywhere.
#[derive(Debug, Clone)]
pub enum TypeKind {
    Base(BaseType),
    BitField(BitFieldInfo),
    Pointer(PointerInfo),
    Array(ArrayInfo),
    Udt(UdtInfo),
    Enum(EnumInfo),
    Function(FunctionInfo),
}

/// Immutable description of a native type's shape and size.
///
/// The pointer size is stamped from the symbol scope the type was built
/// from and is fixed for the whole tree.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    kind: TypeKind,
    ptr_size: usize,
    constant: Option<TypedValue>,
}

impl TypeInfo {
    pub(crate) fn base(base: BaseType, machine: Machine) -> Arc<Self> {
        Arc::new(Self {
            kind: TypeKind::Base(base),
            ptr_size: machine.pointer_size(),
            constant: None,
        })
    }

    pub(crate) fn bit_field(
        base: BaseType,
        width: u32,
        position: u32,
        machine: Machine,
    ) -> Arc<Self> {
        Arc::new(Self {
            kind: TypeKind::BitField(BitFieldInfo {
                base,
                width,
                position,
            }),
            ptr_size: machine.pointer_size(),
            constant: None,
        })
    }

    pub(crate) fn pointer(pointee: Arc<TypeInfo>, ptr_size: usize) -> Arc<Self> {
        Arc::new(Self {
            kind: TypeKind::Pointer(PointerInfo {
                pointee: Some(pointee),
                fallback: None,
            }),
            ptr_size,
            constant: None,
        })
    }

    pub(crate) fn pointer_fallback(fallback: Option<String>, machine: Machine) -> Arc<Self> {
        Arc::new(Self {
            kind: TypeKind::Pointer(PointerInfo {
                pointee: None,
                fallback,
            }),
            ptr_size: machine.pointer_size(),
            constant: None,
        })
    }

    pub(crate) fn array(element: Arc<TypeInfo>, count: usize) -> Arc<Self> {
        let ptr_size = element.ptr_size;
        Arc::new(Self {
            kind: TypeKind::Array(ArrayInfo { element, count }),
            ptr_size,
            constant: None,
        })
    }

    pub(crate) fn udt(info: UdtInfo, machine: Machine) -> Arc<Self> {
        Arc::new(Self {
            kind: TypeKind::Udt(info),
            ptr_size: machine.pointer_size(),
            constant: None,
        })
    }

    pub(crate) fn enumeration(info: EnumInfo, machine: Machine) -> Arc<Self> {
        Arc::new(Self {
            kind: TypeKind::Enum(info),
            ptr_size: machine.pointer_size(),
            constant: None,
        })
    }

    pub(crate) fn function(name: String, machine: Machine) -> Arc<Self> {
        Arc::new(Self {
            kind: TypeKind::Function(FunctionInfo { name }),
            ptr_size: machine.pointer_size(),
            constant: None,
        })
    }

    /// Same type with a compile-time constant literal attached.
    pub(crate) fn with_constant(&self, value: TypedValue) -> Arc<Self> {
        let mut info = self.clone();
        info.constant = Some(value);
        Arc::new(info)
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn ptr_size(&self) -> usize {
        self.ptr_size
    }

    pub fn name(&self) -> String {
        match &self.kind {
            TypeKind::Base(base) => base.name().to_string(),
            TypeKind::BitField(bf) => format!("{}:{}", bf.base.name(), bf.width),
            TypeKind::Pointer(_) | TypeKind::Array(_) => self.complex_name(),
            TypeKind::Udt(udt) => udt.name().to_string(),
            TypeKind::Enum(en) => en.name().to_string(),
            TypeKind::Function(func) => func.name.clone(),
        }
    }

    pub fn size(&self) -> usize {
        match &self.kind {
            TypeKind::Base(base) => base.size(),
            TypeKind::BitField(bf) => bf.base.size(),
            TypeKind::Pointer(_) => self.ptr_size,
            TypeKind::Array(arr) => arr.element.size() * arr.count,
            TypeKind::Udt(udt) => udt.size(),
            TypeKind::Enum(en) => en.size(),
            TypeKind::Function(_) => 0,
        }
    }

    /// Natural alignment, used when ad hoc struct layouts are
    /// synthesized.
    pub fn alignment(&self) -> usize {
        match &self.kind {
            TypeKind::Base(base) => base.size(),
            TypeKind::BitField(bf) => bf.base.size(),
            TypeKind::Pointer(_) => self.ptr_size,
            TypeKind::Array(arr) => arr.element.alignment(),
            TypeKind::Udt(udt) => udt
                .fields()
                .iter()
                .filter(|f| !f.is_static_member() && !f.is_constant())
                .map(|f| f.type_info().alignment())
                .max()
                .unwrap_or(1),
            TypeKind::Enum(en) => en.size(),
            TypeKind::Function(_) => 1,
        }
    }

    pub fn is_base(&self) -> bool {
        matches!(self.kind, TypeKind::Base(_))
    }

    pub fn is_bit_field(&self) -> bool {
        matches!(self.kind, TypeKind::BitField(_))
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, TypeKind::Pointer(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::Array(_))
    }

    pub fn is_user_defined(&self) -> bool {
        matches!(self.kind, TypeKind::Udt(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, TypeKind::Function(_))
    }

    pub fn is_constant(&self) -> bool {
        self.constant.is_some()
    }

    pub fn constant_value(&self) -> Result<TypedValue, TypeError> {
        self.constant
            .ok_or_else(|| TypeError::NotConstant(self.name()))
    }

    pub fn as_udt(&self) -> Result<&UdtInfo, TypeError> {
        match &self.kind {
            TypeKind::Udt(udt) => Ok(udt),
            _ => Err(TypeError::NoElements(self.name())),
        }
    }

    pub fn as_enum(&self) -> Result<&EnumInfo, TypeError> {
        match &self.kind {
            TypeKind::Enum(en) => Ok(en),
            _ => Err(TypeError::NoElements(self.name())),
        }
    }

    pub fn bit_width(&self) -> Result<u32, TypeError> {
        match &self.kind {
            TypeKind::BitField(bf) => Ok(bf.width),
            _ => Err(TypeError::NoElements(self.name())),
        }
    }

    pub fn bit_position(&self) -> Result<u32, TypeError> {
        match &self.kind {
            TypeKind::BitField(bf) => Ok(bf.position),
            _ => Err(TypeError::NoElements(self.name())),
        }
    }

    pub fn bit_base(&self) -> Result<BaseType, TypeError> {
        match &self.kind {
            TypeKind::BitField(bf) => Ok(bf.base),
            _ => Err(TypeError::NoElements(self.name())),
        }
    }

    pub fn element_count(&self) -> Result<usize, TypeError> {
        match &self.kind {
            TypeKind::Udt(udt) => Ok(udt.field_count()),
            TypeKind::Enum(en) => Ok(en.entry_count()),
            TypeKind::Array(arr) => Ok(arr.count),
            _ => Err(TypeError::NoElements(self.name())),
        }
    }

    pub fn element_name(&self, index: usize) -> Result<String, TypeError> {
        match &self.kind {
            TypeKind::Udt(udt) => Ok(udt.field(index)?.name().to_string()),
            TypeKind::Enum(en) => Ok(en.name_by_index(index)?.to_string()),
            _ => Err(TypeError::NoElements(self.name())),
        }
    }

    pub fn element_offset(&self, name: &str) -> Result<u32, TypeError> {
        self.as_udt()?.field_by_name(name)?.offset()
    }

    pub fn element_offset_by_index(&self, index: usize) -> Result<u32, TypeError> {
        match &self.kind {
            TypeKind::Udt(udt) => udt.field(index)?.offset(),
            TypeKind::Array(arr) => {
                if index >= arr.count {
                    return Err(TypeError::ElementIndexOutOfRange {
                        type_name: self.name(),
                        index,
                    });
                }
                Ok((index * arr.element.size()) as u32)
            }
            _ => Err(TypeError::NoElements(self.name())),
        }
    }

    pub fn element(&self, name: &str) -> Result<Arc<TypeInfo>, TypeError> {
        match &self.kind {
            TypeKind::Udt(udt) => Ok(udt.field_by_name(name)?.type_info().clone()),
            TypeKind::Enum(en) => {
                let value = en.value_by_name(name)?;
                Ok(TypeInfo::base_with_size(en.base(), self.ptr_size).with_constant(value))
            }
            _ => Err(TypeError::NoElements(self.name())),
        }
    }

    pub fn element_by_index(&self, index: usize) -> Result<Arc<TypeInfo>, TypeError> {
        match &self.kind {
            TypeKind::Udt(udt) => Ok(udt.field(index)?.type_info().clone()),
            TypeKind::Enum(en) => {
                let value = en.value_by_index(index)?;
                Ok(TypeInfo::base_with_size(en.base(), self.ptr_size).with_constant(value))
            }
            TypeKind::Array(arr) => {
                if index >= arr.count {
                    return Err(TypeError::ElementIndexOutOfRange {
                        type_name: self.name(),
                        index,
                    });
                }
                Ok(arr.element.clone())
            }
            _ => Err(TypeError::NoElements(self.name())),
        }
    }

    pub fn static_address(&self, name: &str) -> Result<u64, TypeError> {
        self.as_udt()?.field_by_name(name)?.static_address()
    }

    pub fn virtual_displacement(&self, name: &str) -> Result<VirtualDisplacement, TypeError> {
        self.as_udt()?.field_by_name(name)?.virtual_displacement()
    }

    pub fn virtual_displacement_by_index(
        &self,
        index: usize,
    ) -> Result<VirtualDisplacement, TypeError> {
        self.as_udt()?.field(index)?.virtual_displacement()
    }

    /// Pointer to this type, with the tree's pointer width.
    pub fn ptr_to(&self) -> Arc<TypeInfo> {
        TypeInfo::pointer(Arc::new(self.clone()), self.ptr_size)
    }

    /// Array of `count` elements of this type.
    pub fn array_of(&self, count: usize) -> Arc<TypeInfo> {
        TypeInfo::array(Arc::new(self.clone()), count)
    }

    pub fn deref(&self) -> Result<Arc<TypeInfo>, TypeError> {
        match &self.kind {
            TypeKind::Pointer(ptr) => ptr
                .pointee
                .clone()
                .ok_or_else(|| TypeError::UnresolvedPointee(self.name())),
            _ => Err(TypeError::NotPointer(self.name())),
        }
    }

    fn base_with_size(base: BaseType, ptr_size: usize) -> Arc<Self> {
        Arc::new(Self {
            kind: TypeKind::Base(base),
            ptr_size,
            constant: None,
        })
    }

    /// Textual name of a pointer/array chain, the inverse of the
    /// declarator grammar: consecutive array dimensions collect into
    /// bracket groups, the accumulated suffix is parenthesized before a
    /// pointer marker is prefixed, and the walk stops at a base name or
    /// a pointer's fallback name.
    fn complex_name(&self) -> String {
        let mut suffix = String::new();
        let mut current = self;

        let base_name = loop {
            match &current.kind {
                TypeKind::Array(_) => {
                    let mut dims = Vec::new();
                    let mut walker = current;
                    while let TypeKind::Array(arr) = &walker.kind {
                        dims.push(arr.count);
                        walker = &arr.element;
                    }
                    if !suffix.is_empty() {
                        suffix.insert(0, '(');
                        suffix.push(')');
                    }
                    for dim in dims {
                        suffix.push_str(&format!("[{}]", dim));
                    }
                    current = walker;
                }
                TypeKind::Pointer(ptr) => {
                    suffix.insert(0, '*');
                    match &ptr.pointee {
                        Some(pointee) => current = pointee,
                        None => break ptr.fallback.clone().unwrap_or_default(),
                    }
                }
                _ => break current.name(),
            }
        };

        format!("{}{}", base_name, suffix)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Udt(udt) => fmt::Display::fmt(udt, f),
            TypeKind::Enum(en) => fmt::Display::fmt(en, f),
            _ => write!(f, "{}", self.name()),
        }
    }
}
