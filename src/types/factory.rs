// Thu Feb 12 2026 - Alex

use crate::symbol::{
    split_symbol_name, BasicKind, DataKind, LocationKind, ModuleProvider, SymTag, SymbolRef,
};
use crate::types::parser::{apply_suffixes, parse_expression, parse_type_name};
use crate::types::{BaseType, EnumInfo, TypeError, TypeInfo, UdtInfo};
use std::sync::Arc;

/// Builds `TypeInfo` trees from provider symbols. The tag-to-variant
/// mapping is fully enumerated; every other tag is unsupported.
pub struct TypeFactory;

impl TypeFactory {
    pub fn from_symbol(sym: &SymbolRef) -> Result<Arc<TypeInfo>, TypeError> {
        let machine = sym.machine();

        match sym.sym_tag() {
            SymTag::Data => {
                if sym.location_kind() == LocationKind::BitField {
                    let base_sym = sym.type_symbol()?;
                    let base = Self::base_of(&base_sym)?;
                    return Ok(TypeInfo::bit_field(
                        base,
                        sym.size() as u32,
                        sym.bit_position()?,
                        machine,
                    ));
                }

                if sym.data_kind() == DataKind::Constant {
                    let value = sym.value()?;
                    let declared = Self::from_symbol(&sym.type_symbol()?)?;
                    return Ok(declared.with_constant(value));
                }

                Self::from_symbol(&sym.type_symbol()?)
            }

            SymTag::BaseType => Ok(TypeInfo::base(Self::base_of(sym)?, machine)),

            SymTag::Udt | SymTag::BaseClass => {
                Ok(TypeInfo::udt(UdtInfo::from_symbol(sym)?, machine))
            }

            SymTag::ArrayType => {
                let element = Self::from_symbol(&sym.type_symbol()?)?;
                Ok(TypeInfo::array(element, sym.element_count()?))
            }

            SymTag::PointerType => {
                let pointee = sym.type_symbol()?;
                Ok(Self::pointer_to_symbol(&pointee))
            }

            SymTag::VTable => {
                let shape = sym.type_symbol()?;
                Ok(Self::pointer_to_symbol(&shape))
            }

            SymTag::Enum => Ok(TypeInfo::enumeration(EnumInfo::from_symbol(sym)?, machine)),

            SymTag::Typedef => Self::from_symbol(&sym.type_symbol()?),

            other => Err(TypeError::UnsupportedSymbolTag {
                name: sym.name(),
                tag: format!("{:?}", other),
            }),
        }
    }

    /// Pointer to the type a symbol describes. Pointees the hierarchy
    /// cannot express are substituted with a descriptive fallback name
    /// instead of failing the pointer itself.
    fn pointer_to_symbol(pointee: &SymbolRef) -> Arc<TypeInfo> {
        let machine = pointee.machine();

        let fallback = match pointee.sym_tag() {
            SymTag::FunctionType => Some("<function>".to_string()),
            SymTag::VTableShape => Some("VTable".to_string()),
            SymTag::BaseType if matches!(pointee.basic_kind(), Ok(BasicKind::Void)) => {
                Some("Void".to_string())
            }
            _ => None,
        };

        if fallback.is_some() {
            return TypeInfo::pointer_fallback(fallback, machine);
        }

        match Self::from_symbol(pointee) {
            Ok(ti) => TypeInfo::pointer(ti, machine.pointer_size()),
            Err(TypeError::Symbol(err)) => {
                log::debug!("pointee resolution failed: {}", err);
                TypeInfo::pointer_fallback(None, machine)
            }
            Err(err) => {
                log::debug!("pointee not expressible: {}", err);
                TypeInfo::pointer_fallback(None, machine)
            }
        }
    }

    fn base_of(sym: &SymbolRef) -> Result<BaseType, TypeError> {
        BaseType::from_basic(sym.basic_kind()?, sym.size())
    }

    /// Resolves a type expression against a symbol scope.
    pub fn type_by_name(scope: &SymbolRef, expr: &str) -> Result<Arc<TypeInfo>, TypeError> {
        parse_type_name(scope, expr)
    }
}

/// Resolves a full `Module!TypeExpr` reference through the module
/// provider. Base-type expressions never touch a module; anything else
/// is parsed against the owning module's scope, searching every loaded
/// module when the reference carries no prefix.
pub fn load_type(
    provider: &dyn ModuleProvider,
    full_name: &str,
) -> Result<Arc<TypeInfo>, TypeError> {
    let (module_name, symbol_expr) = split_symbol_name(full_name.trim())?;
    let (base_name, tokens) = parse_expression(&symbol_expr)?;

    if module_name.is_none() {
        if let Some(base) = BaseType::parse(&base_name) {
            let lowest = TypeInfo::base(base, provider.machine());
            return apply_suffixes(lowest, &tokens, &symbol_expr);
        }
    }

    let module = match module_name {
        Some(name) => provider.module_by_name(&name)?,
        None => provider.find_module_for_symbol(&base_name)?,
    };
    log::debug!("resolved {} in module {}", symbol_expr, module.name());
    parse_type_name(&module.scope(), &symbol_expr)
}
