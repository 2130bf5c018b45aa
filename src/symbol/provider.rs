// Mon Feb 09 2026 - Alex

use crate::symbol::{BasicKind, DataKind, LocationKind, Machine, SymTag, SymbolError};
use crate::value::TypedValue;
use std::sync::Arc;

pub type SymbolRef = Arc<dyn Symbol>;

/// One node of the debug-info provider's symbol tree.
///
/// The provider is an external collaborator; this trait is the full
/// surface the type layer consumes. Attribute getters return
/// `SymbolError::NoAttribute` when the attribute does not apply to the
/// symbol's tag (e.g. `bit_position` on a plain member).
pub trait Symbol: Send + Sync {
    fn sym_tag(&self) -> SymTag;

    fn name(&self) -> String;

    /// Byte size of the symbol. For a bit-field data symbol this is the
    /// bit width, following the provider convention.
    fn size(&self) -> usize;

    /// Target architecture of the scope this symbol was loaded from.
    fn machine(&self) -> Machine;

    fn child_count(&self) -> usize;

    fn child_by_index(&self, index: usize) -> Result<SymbolRef, SymbolError>;

    fn child_by_name(&self, name: &str) -> Result<SymbolRef, SymbolError>;

    /// The symbol's declared type: pointee for pointers, element type
    /// for arrays, aliased type for typedefs, value type for data.
    fn type_symbol(&self) -> Result<SymbolRef, SymbolError>;

    fn basic_kind(&self) -> Result<BasicKind, SymbolError>;

    /// Relative byte offset within the enclosing type.
    fn offset(&self) -> Result<u32, SymbolError>;

    /// Absolute virtual address of a static data symbol.
    fn virtual_address(&self) -> Result<u64, SymbolError>;

    fn location_kind(&self) -> LocationKind {
        LocationKind::Regular
    }

    fn data_kind(&self) -> DataKind {
        DataKind::Member
    }

    fn bit_position(&self) -> Result<u32, SymbolError>;

    /// Element count of an array symbol.
    fn element_count(&self) -> Result<usize, SymbolError>;

    fn is_virtual_base(&self) -> bool {
        false
    }

    fn virtual_base_ptr_offset(&self) -> Result<i32, SymbolError>;

    fn virtual_base_disp_index(&self) -> Result<u32, SymbolError>;

    fn virtual_base_disp_size(&self) -> Result<u32, SymbolError>;

    /// Literal value of a constant data symbol or an enumerator.
    fn value(&self) -> Result<TypedValue, SymbolError>;

    /// All direct children carrying the given tag, in declaration order.
    fn find_children(&self, tag: SymTag) -> Vec<SymbolRef> {
        let mut out = Vec::new();
        for i in 0..self.child_count() {
            if let Ok(child) = self.child_by_index(i) {
                if child.sym_tag() == tag {
                    out.push(child);
                }
            }
        }
        out
    }
}
