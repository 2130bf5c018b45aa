// Tue Feb 17 2026 - Alex

use crate::accessor::{BufferAccessor, DataAccessor};
use crate::types::udt::{FieldStorage, UdtField};
use crate::types::{BaseType, TypeError, TypeInfo, TypeKind, VirtualDisplacement};
use crate::value::TypedValue;
use crate::var::convert::{bytes_to_value, value_to_bytes};
use crate::var::error::VarResult;
use std::fmt;
use std::sync::Arc;

/// The base type a scalar read/write goes through.
fn scalar_base(type_info: &TypeInfo) -> Result<BaseType, TypeError> {
    match type_info.kind() {
        TypeKind::Base(base) => Ok(*base),
        TypeKind::Enum(en) => Ok(en.base()),
        TypeKind::BitField(bf) => Ok(bf.base()),
        TypeKind::Pointer(_) => Ok(if type_info.ptr_size() == 8 {
            BaseType::UInt8B
        } else {
            BaseType::UInt4B
        }),
        _ => Err(TypeError::NotScalar(type_info.name())),
    }
}

fn read_scalar_via(
    accessor: &dyn DataAccessor,
    byte_offset: usize,
    type_info: &TypeInfo,
) -> VarResult<TypedValue> {
    if let TypeKind::BitField(bf) = type_info.kind() {
        let base = bf.base();
        let width = bf.width();
        let mut bytes = vec![0u8; base.size()];
        accessor.read_raw(byte_offset, &mut bytes)?;

        let mut padded = [0u8; 8];
        padded[..bytes.len()].copy_from_slice(&bytes);
        let mask = if width >= 64 {
            u64::MAX
        } else {
            (1u64 << width) - 1
        };
        let mut raw = (u64::from_le_bytes(padded) >> bf.position()) & mask;
        if base.is_signed() && width < 64 && (raw >> (width - 1)) & 1 == 1 {
            raw |= !mask;
        }
        return Ok(bytes_to_value(&raw.to_le_bytes()[..base.size()], base));
    }

    let base = scalar_base(type_info)?;
    let mut bytes = vec![0u8; base.size()];
    accessor.read_raw(byte_offset, &mut bytes)?;
    Ok(bytes_to_value(&bytes, base))
}

fn write_scalar_via(
    accessor: &dyn DataAccessor,
    byte_offset: usize,
    type_info: &TypeInfo,
    value: &TypedValue,
) -> VarResult<()> {
    if let TypeKind::BitField(bf) = type_info.kind() {
        let base = bf.base();
        let width = bf.width();
        let mut bytes = vec![0u8; base.size()];
        accessor.read_raw(byte_offset, &mut bytes)?;

        let mut padded = [0u8; 8];
        padded[..bytes.len()].copy_from_slice(&bytes);
        let unshifted = if width >= 64 {
            u64::MAX
        } else {
            (1u64 << width) - 1
        };
        let mask = unshifted << bf.position();
        let raw = (u64::from_le_bytes(padded) & !mask)
            | ((value.as_u64() << bf.position()) & mask);

        accessor.write_raw(byte_offset, &raw.to_le_bytes()[..base.size()])?;
        return Ok(());
    }

    let base = scalar_base(type_info)?;
    let bytes = value_to_bytes(value, base)?;
    accessor.write_raw(byte_offset, &bytes)?;
    Ok(())
}

/// A TypeInfo bound to a DataAccessor at an offset: a live, addressable
/// variable. Navigation hands out new variables over the same backing
/// store; the type tree itself is never mutated.
#[derive(Clone)]
pub struct TypedVar {
    type_info: Arc<TypeInfo>,
    accessor: Arc<dyn DataAccessor>,
    offset: usize,
}

impl TypedVar {
    pub fn new(type_info: Arc<TypeInfo>, accessor: Arc<dyn DataAccessor>) -> Self {
        Self {
            type_info,
            accessor,
            offset: 0,
        }
    }

    pub fn with_offset(
        type_info: Arc<TypeInfo>,
        accessor: Arc<dyn DataAccessor>,
        offset: usize,
    ) -> Self {
        Self {
            type_info,
            accessor,
            offset,
        }
    }

    pub fn type_info(&self) -> &Arc<TypeInfo> {
        &self.type_info
    }

    pub fn name(&self) -> String {
        self.type_info.name()
    }

    pub fn size(&self) -> usize {
        self.type_info.size()
    }

    /// Absolute address, when the backing store has one.
    pub fn address(&self) -> VarResult<u64> {
        Ok(self.accessor.address()? + self.offset as u64)
    }

    pub fn element_count(&self) -> VarResult<usize> {
        Ok(self.type_info.element_count()?)
    }

    pub fn element_name(&self, index: usize) -> VarResult<String> {
        Ok(self.type_info.element_name(index)?)
    }

    pub fn element_offset(&self, name: &str) -> VarResult<u32> {
        Ok(self.type_info.element_offset(name)?)
    }

    pub fn element(&self, name: &str) -> VarResult<TypedVar> {
        let field_var = {
            let udt = self.type_info.as_udt()?;
            self.field_var(udt.field_by_name(name)?)?
        };
        Ok(field_var)
    }

    pub fn element_by_index(&self, index: usize) -> VarResult<TypedVar> {
        match self.type_info.kind() {
            TypeKind::Udt(udt) => self.field_var(udt.field(index)?),
            TypeKind::Array(arr) => {
                if index >= arr.count() {
                    return Err(TypeError::ElementIndexOutOfRange {
                        type_name: self.type_info.name(),
                        index,
                    }
                    .into());
                }
                let element = arr.element().clone();
                let stride = element.size();
                Ok(TypedVar::new(
                    element,
                    self.accessor
                        .nested_copy(self.offset + index * stride, stride),
                ))
            }
            _ => Err(TypeError::NoElements(self.type_info.name()).into()),
        }
    }

    fn field_var(&self, field: &UdtField) -> VarResult<TypedVar> {
        let type_info = field.type_info().clone();
        match field.storage() {
            FieldStorage::Instance(offset) => {
                let size = type_info.size();
                Ok(TypedVar::new(
                    type_info,
                    self.accessor
                        .nested_copy(self.offset + *offset as usize, size),
                ))
            }
            FieldStorage::Static(address) => {
                let size = type_info.size();
                Ok(TypedVar::new(
                    type_info,
                    self.accessor.external_copy(*address, size),
                ))
            }
            FieldStorage::Constant(value) => {
                // constants carry no storage; materialize the literal
                let base = scalar_base(&type_info)?;
                let bytes = value_to_bytes(value, base)?;
                Ok(TypedVar::new(type_info, BufferAccessor::from_bytes(bytes)))
            }
        }
    }

    pub fn set_element(&self, name: &str, value: TypedValue) -> VarResult<()> {
        let field_write = {
            let udt = self.type_info.as_udt()?;
            let field = udt.field_by_name(name)?;
            self.set_field(field, &value)
        };
        field_write
    }

    pub fn set_element_by_index(&self, index: usize, value: TypedValue) -> VarResult<()> {
        match self.type_info.kind() {
            TypeKind::Udt(udt) => self.set_field(udt.field(index)?, &value),
            TypeKind::Array(arr) => {
                if index >= arr.count() {
                    return Err(TypeError::ElementIndexOutOfRange {
                        type_name: self.type_info.name(),
                        index,
                    }
                    .into());
                }
                let stride = arr.element().size();
                write_scalar_via(
                    self.accessor.as_ref(),
                    self.offset + index * stride,
                    arr.element(),
                    &value,
                )
            }
            _ => Err(TypeError::NoElements(self.type_info.name()).into()),
        }
    }

    fn set_field(&self, field: &UdtField, value: &TypedValue) -> VarResult<()> {
        if field.is_constant() || field.type_info().is_constant() {
            return Err(TypeError::ConstantField(field.name().to_string()).into());
        }
        match field.storage() {
            FieldStorage::Instance(offset) => write_scalar_via(
                self.accessor.as_ref(),
                self.offset + *offset as usize,
                field.type_info(),
                value,
            ),
            FieldStorage::Static(address) => {
                let accessor = self
                    .accessor
                    .external_copy(*address, field.type_info().size());
                write_scalar_via(accessor.as_ref(), 0, field.type_info(), value)
            }
            FieldStorage::Constant(_) => {
                Err(TypeError::ConstantField(field.name().to_string()).into())
            }
        }
    }

    /// Scalar value of the variable. A constant type reads its literal;
    /// everything else reads the backing store.
    pub fn value(&self) -> VarResult<TypedValue> {
        if self.type_info.is_constant() {
            return Ok(self.type_info.constant_value()?);
        }
        read_scalar_via(self.accessor.as_ref(), self.offset, &self.type_info)
    }

    pub fn set_value(&self, value: TypedValue) -> VarResult<()> {
        if self.type_info.is_constant() {
            return Err(TypeError::ConstantField(self.type_info.name()).into());
        }
        write_scalar_via(self.accessor.as_ref(), self.offset, &self.type_info, &value)
    }

    /// Member function type, resolved from the defining symbol. Fails
    /// when no such method exists.
    pub fn method(&self, name: &str) -> VarResult<Arc<TypeInfo>> {
        Ok(self.type_info.as_udt()?.method_by_name(name)?.clone())
    }

    pub fn virtual_displacement(&self, name: &str) -> VarResult<VirtualDisplacement> {
        Ok(self.type_info.virtual_displacement(name)?)
    }

    pub fn virtual_displacement_by_index(&self, index: usize) -> VarResult<VirtualDisplacement> {
        Ok(self.type_info.virtual_displacement_by_index(index)?)
    }

    /// Snapshots the variable into a portable byte sequence by writing
    /// it through a temporary buffer-backed accessor and reading the
    /// same bytes back. Works for any backend.
    pub fn raw_bytes(&self) -> VarResult<Vec<u8>> {
        let size = self.type_info.size();
        let cache = BufferAccessor::new(size);

        let bytes = self.accessor.read_bytes(size, self.offset)?;
        cache.write_bytes(&bytes, 0)?;
        Ok(cache.read_bytes(size, 0)?)
    }
}

impl fmt::Debug for TypedVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedVar")
            .field("type", &self.type_info.name())
            .field("size", &self.type_info.size())
            .field("location", &self.accessor.location())
            .field("offset", &self.offset)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::memory::tests::FakeDebuggee;
    use crate::accessor::MemoryAccessor;
    use crate::symbol::{BasicKind, Machine, SymbolRef, SyntheticSymbol};
    use crate::types::{TypeFactory, UdtBuilder};
    use crate::var::error::VarError;

    fn int4_sym() -> SymbolRef {
        SyntheticSymbol::base_type(BasicKind::Int, 4).build()
    }

    fn int4() -> Arc<TypeInfo> {
        TypeInfo::base(BaseType::Int4B, Machine::Amd64)
    }

    fn point() -> Arc<TypeInfo> {
        let mut builder = UdtBuilder::define_struct("Point");
        builder.append_field("x", &int4());
        builder.append_field("y", &int4());
        builder.build()
    }

    #[test]
    fn test_set_then_get_element() {
        let var = TypedVar::new(point(), BufferAccessor::new(8));

        var.set_element("x", TypedValue::I32(5)).unwrap();
        var.set_element("y", TypedValue::I32(-9)).unwrap();

        assert_eq!(var.element("x").unwrap().value().unwrap(), TypedValue::I32(5));
        assert_eq!(var.element("y").unwrap().value().unwrap(), TypedValue::I32(-9));
        assert_eq!(var.element_offset("y").unwrap(), 4);
        assert_eq!(var.element_count().unwrap(), 2);
    }

    #[test]
    fn test_absent_field() {
        let var = TypedVar::new(point(), BufferAccessor::new(8));
        assert!(matches!(
            var.element("z"),
            Err(VarError::Type(TypeError::FieldNotFound { .. }))
        ));
        assert!(matches!(
            var.set_element("z", TypedValue::I32(0)),
            Err(VarError::Type(TypeError::FieldNotFound { .. }))
        ));
    }

    #[test]
    fn test_constant_field_counted_but_not_writable() {
        let udt = SyntheticSymbol::udt("Limits", 8)
            .with_child(SyntheticSymbol::member("value", int4_sym(), 0).build())
            .with_child(
                SyntheticSymbol::constant_member("kMax", int4_sym(), TypedValue::I32(127))
                    .build(),
            )
            .build();
        let ti = TypeFactory::from_symbol(&udt).unwrap();
        let var = TypedVar::new(ti, BufferAccessor::new(8));

        assert_eq!(var.element_count().unwrap(), 2);
        assert!(matches!(
            var.set_element("kMax", TypedValue::I32(1)),
            Err(VarError::Type(TypeError::ConstantField(_)))
        ));
        // the literal is still readable
        assert_eq!(
            var.element("kMax").unwrap().value().unwrap(),
            TypedValue::I32(127)
        );

        var.set_element("value", TypedValue::I32(3)).unwrap();
        assert_eq!(
            var.element("value").unwrap().value().unwrap(),
            TypedValue::I32(3)
        );
    }

    #[test]
    fn test_static_member_rebinds_to_absolute_address() {
        let debuggee = FakeDebuggee::new(0x1000, 0x100);
        let udt = SyntheticSymbol::udt("Counter", 4)
            .with_child(SyntheticSymbol::member("value", int4_sym(), 0).build())
            .with_child(SyntheticSymbol::static_member("s_total", int4_sym(), 0x1080).build())
            .build();
        let ti = TypeFactory::from_symbol(&udt).unwrap();
        let var = TypedVar::new(ti, MemoryAccessor::new(debuggee, 0x1000, 4));

        let stat = var.element("s_total").unwrap();
        assert_eq!(stat.address().unwrap(), 0x1080);

        var.set_element("s_total", TypedValue::I32(42)).unwrap();
        assert_eq!(stat.value().unwrap(), TypedValue::I32(42));

        assert!(matches!(
            var.element_offset("s_total"),
            Err(VarError::Type(TypeError::StaticMemberOffset(_)))
        ));
    }

    #[test]
    fn test_array_navigation() {
        let arr = int4().array_of(4);
        let var = TypedVar::new(arr, BufferAccessor::new(16));

        var.set_element_by_index(2, TypedValue::I32(77)).unwrap();
        assert_eq!(
            var.element_by_index(2).unwrap().value().unwrap(),
            TypedValue::I32(77)
        );
        assert!(matches!(
            var.element_by_index(4),
            Err(VarError::Type(TypeError::ElementIndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_bit_field_read_modify_write() {
        let uint4 = SyntheticSymbol::base_type(BasicKind::UInt, 4).build();
        let udt = SyntheticSymbol::udt("Flags", 4)
            .with_child(SyntheticSymbol::bit_field_member("low", uint4.clone(), 0, 0, 4).build())
            .with_child(SyntheticSymbol::bit_field_member("mid", uint4, 0, 4, 4).build())
            .build();
        let ti = TypeFactory::from_symbol(&udt).unwrap();
        let accessor = BufferAccessor::new(4);
        let var = TypedVar::new(ti, accessor.clone());

        var.set_element("low", TypedValue::U8(0xF)).unwrap();
        var.set_element("mid", TypedValue::U8(0x3)).unwrap();
        assert_eq!(accessor.read_dword(0).unwrap(), 0x3F);

        var.set_element("low", TypedValue::U8(0x1)).unwrap();
        // neighbors survive the read-modify-write
        assert_eq!(accessor.read_dword(0).unwrap(), 0x31);
        assert_eq!(
            var.element("mid").unwrap().value().unwrap(),
            TypedValue::U32(3)
        );
    }

    #[test]
    fn test_signed_bit_field_extends() {
        let int4 = int4_sym();
        let udt = SyntheticSymbol::udt("S", 4)
            .with_child(SyntheticSymbol::bit_field_member("v", int4, 0, 0, 4).build())
            .build();
        let ti = TypeFactory::from_symbol(&udt).unwrap();
        let var = TypedVar::new(ti, BufferAccessor::new(4));

        var.set_element("v", TypedValue::I8(-1)).unwrap();
        assert_eq!(
            var.element("v").unwrap().value().unwrap(),
            TypedValue::I32(-1)
        );
    }

    #[test]
    fn test_pointer_value() {
        let ptr = int4().ptr_to();
        let var = TypedVar::new(ptr, BufferAccessor::new(8));
        var.set_value(TypedValue::U64(0xDEAD_BEEF_0000)).unwrap();
        assert_eq!(var.value().unwrap(), TypedValue::U64(0xDEAD_BEEF_0000));
    }

    #[test]
    fn test_raw_bytes_snapshot() {
        let var = TypedVar::new(point(), BufferAccessor::new(8));
        var.set_element("x", TypedValue::I32(0x0102_0304)).unwrap();
        var.set_element("y", TypedValue::I32(-1)).unwrap();

        let bytes = var.raw_bytes().unwrap();
        assert_eq!(
            bytes,
            vec![0x04, 0x03, 0x02, 0x01, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_raw_bytes_from_memory_backend() {
        let debuggee = FakeDebuggee::new(0x2000, 16);
        let var = TypedVar::new(point(), MemoryAccessor::new(debuggee, 0x2000, 8));
        var.set_element("x", TypedValue::I32(7)).unwrap();

        let snapshot = var.raw_bytes().unwrap();
        assert_eq!(snapshot.len(), 8);
        assert_eq!(&snapshot[..4], &[7, 0, 0, 0]);
    }

    #[test]
    fn test_method_lookup() {
        let udt = SyntheticSymbol::udt("Widget", 4)
            .with_child(SyntheticSymbol::member("id", int4_sym(), 0).build())
            .with_child(SyntheticSymbol::function("draw").build())
            .build();
        let ti = TypeFactory::from_symbol(&udt).unwrap();
        let var = TypedVar::new(ti, BufferAccessor::new(4));

        assert!(var.method("draw").unwrap().is_function());
        assert!(matches!(
            var.method("hide"),
            Err(VarError::Type(TypeError::MethodNotFound { .. }))
        ));
    }

    #[test]
    fn test_virtual_displacement_surfaced() {
        let vbase = SyntheticSymbol::udt("VBase", 4)
            .with_child(SyntheticSymbol::member("v", int4_sym(), 0).build())
            .build();
        let derived = SyntheticSymbol::udt("Derived", 16)
            .with_child(SyntheticSymbol::member("own", int4_sym(), 8).build())
            .with_child(SyntheticSymbol::virtual_base_class(&vbase, 4, 2, 4).build())
            .build();
        let ti = TypeFactory::from_symbol(&derived).unwrap();
        let var = TypedVar::new(ti, BufferAccessor::new(16));

        let disp = var.virtual_displacement("v").unwrap();
        assert_eq!(disp.base_ptr_offset, 4);
        assert_eq!(disp.disp_index, 2);
        assert!(matches!(
            var.virtual_displacement("own"),
            Err(VarError::Type(TypeError::NotVirtualMember(_)))
        ));
    }

    #[test]
    fn test_enum_var_value() {
        let uint4 = SyntheticSymbol::base_type(BasicKind::UInt, 4).build();
        let en = SyntheticSymbol::enumeration("Color", 4, uint4)
            .with_child(SyntheticSymbol::enumerator("A", TypedValue::U32(0)).build())
            .with_child(SyntheticSymbol::enumerator("B", TypedValue::U32(1)).build())
            .build();
        let ti = TypeFactory::from_symbol(&en).unwrap();
        let var = TypedVar::new(ti.clone(), BufferAccessor::new(4));

        var.set_value(TypedValue::U32(1)).unwrap();
        assert_eq!(var.value().unwrap(), TypedValue::U32(1));
        assert_eq!(
            ti.as_enum().unwrap().name_of_value(1),
            Some("B")
        );
    }
}
