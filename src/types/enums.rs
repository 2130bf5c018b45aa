// Wed Feb 11 2026 - Alex

use crate::symbol::{SymTag, SymbolRef};
use crate::types::{BaseType, TypeError};
use crate::value::TypedValue;
use indexmap::IndexMap;
use std::fmt;

/// Enumeration type: the underlying base type plus the ordered
/// (name, value) pairs in declaration order.
#[derive(Debug, Clone)]
pub struct EnumInfo {
    name: String,
    base: BaseType,
    entries: Vec<(String, TypedValue)>,
}

impl EnumInfo {
    pub(crate) fn new(name: String, base: BaseType, entries: Vec<(String, TypedValue)>) -> Self {
        Self {
            name,
            base,
            entries,
        }
    }

    pub(crate) fn from_symbol(sym: &SymbolRef) -> Result<Self, TypeError> {
        let base = match sym.type_symbol() {
            Ok(type_sym) => {
                BaseType::from_basic(type_sym.basic_kind()?, type_sym.size())?
            }
            Err(_) => BaseType::UInt4B,
        };

        let mut entries = Vec::new();
        for child in sym.find_children(SymTag::Data) {
            entries.push((child.name(), child.value()?));
        }

        Ok(Self::new(sym.name(), base, entries))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> BaseType {
        self.base
    }

    pub fn size(&self) -> usize {
        self.base.size()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(String, TypedValue)] {
        &self.entries
    }

    pub fn name_by_index(&self, index: usize) -> Result<&str, TypeError> {
        self.entries
            .get(index)
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| TypeError::ElementIndexOutOfRange {
                type_name: self.name.clone(),
                index,
            })
    }

    pub fn value_by_name(&self, name: &str) -> Result<TypedValue, TypeError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .ok_or_else(|| TypeError::FieldNotFound {
                type_name: self.name.clone(),
                field: name.to_string(),
            })
    }

    pub fn value_by_index(&self, index: usize) -> Result<TypedValue, TypeError> {
        self.entries
            .get(index)
            .map(|(_, v)| *v)
            .ok_or_else(|| TypeError::ElementIndexOutOfRange {
                type_name: self.name.clone(),
                index,
            })
    }

    /// Name of the enumerator holding `value`, if any.
    pub fn name_of_value(&self, value: u64) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| v.as_u64() == value)
            .map(|(name, _)| name.as_str())
    }

    /// Declaration-ordered mapping of widened values to enumerator
    /// names.
    pub fn as_map(&self) -> IndexMap<u64, String> {
        self.entries
            .iter()
            .map(|(name, value)| (value.as_u64(), name.clone()))
            .collect()
    }
}

impl fmt::Display for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "enum: {}", self.name)?;
        for (name, value) in &self.entries {
            writeln!(f, "   {} = 0x{:x} ({})", name, value.as_u64(), value)?;
        }
        Ok(())
    }
}
