// Mon Feb 09 2026 - Alex

use crate::symbol::{Machine, SymbolError, SymbolRef};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

static MODULE_SYM_MATCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:([^!]*)!)?([^!]+)$").unwrap());

/// Splits a `Module!symbol` reference into its module and symbol parts.
/// The module prefix is optional.
pub fn split_symbol_name(full_name: &str) -> Result<(Option<String>, String), SymbolError> {
    let captures = MODULE_SYM_MATCH
        .captures(full_name)
        .ok_or_else(|| SymbolError::InvalidSymbolName(full_name.to_string()))?;

    let symbol = captures[2].to_string();
    let module = captures.get(1).map(|m| m.as_str().to_string());

    Ok((module, symbol))
}

/// One loaded module's symbols.
pub trait ModuleStore: Send + Sync {
    fn name(&self) -> String;

    /// Root symbol whose children are the module's top-level types and
    /// symbols.
    fn scope(&self) -> SymbolRef;

    /// Symbol whose virtual address is `addr`.
    fn symbol_by_address(&self, addr: u64) -> Result<SymbolRef, SymbolError> {
        fn search(sym: &SymbolRef, addr: u64) -> Option<SymbolRef> {
            for i in 0..sym.child_count() {
                let child = match sym.child_by_index(i) {
                    Ok(child) => child,
                    Err(_) => continue,
                };
                if child.virtual_address().map(|va| va == addr).unwrap_or(false) {
                    return Some(child);
                }
                if let Some(found) = search(&child, addr) {
                    return Some(found);
                }
            }
            None
        }
        search(&self.scope(), addr)
            .ok_or_else(|| SymbolError::SymbolNotFound(format!("0x{:x}", addr)))
    }
}

/// Resolves module references and searches loaded modules for a symbol
/// when the reference carries no module prefix.
pub trait ModuleProvider: Send + Sync {
    fn module_by_name(&self, name: &str) -> Result<Arc<dyn ModuleStore>, SymbolError>;

    fn find_module_for_symbol(&self, symbol: &str) -> Result<Arc<dyn ModuleStore>, SymbolError>;

    /// Architecture assumed for type expressions that never touch a
    /// module scope (bare base-type names).
    fn machine(&self) -> Machine {
        Machine::Amd64
    }
}

/// Resolves a full `Module!symbol` reference to its module and the bare
/// symbol name, searching across loaded modules when no prefix is given.
pub fn resolve_symbol_reference(
    provider: &dyn ModuleProvider,
    full_name: &str,
) -> Result<(Arc<dyn ModuleStore>, String), SymbolError> {
    let (module_name, symbol_name) = split_symbol_name(full_name)?;

    let module = match module_name {
        Some(name) => provider.module_by_name(&name)?,
        None => provider.find_module_for_symbol(&symbol_name)?,
    };

    Ok((module, symbol_name))
}

/// In-process module registry.
pub struct ModuleSet {
    modules: HashMap<String, Arc<dyn ModuleStore>>,
    order: Vec<String>,
    machine: Machine,
}

impl ModuleSet {
    pub fn new(machine: Machine) -> Self {
        Self {
            modules: HashMap::new(),
            order: Vec::new(),
            machine,
        }
    }

    pub fn register(&mut self, module: Arc<dyn ModuleStore>) {
        let name = module.name();
        if !self.modules.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.modules.insert(name, module);
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// `module!symbol` reference of the symbol at `addr`, searching
    /// every loaded module.
    pub fn find_symbol(&self, addr: u64) -> Result<String, SymbolError> {
        for name in &self.order {
            let module = &self.modules[name];
            if let Ok(sym) = module.symbol_by_address(addr) {
                return Ok(format!("{}!{}", module.name(), sym.name()));
            }
        }
        Err(SymbolError::SymbolNotFound(format!("0x{:x}", addr)))
    }
}

impl ModuleProvider for ModuleSet {
    fn module_by_name(&self, name: &str) -> Result<Arc<dyn ModuleStore>, SymbolError> {
        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| SymbolError::ModuleNotFound(name.to_string()))
    }

    fn find_module_for_symbol(&self, symbol: &str) -> Result<Arc<dyn ModuleStore>, SymbolError> {
        for name in &self.order {
            let module = &self.modules[name];
            if module.scope().child_by_name(symbol).is_ok() {
                return Ok(module.clone());
            }
        }
        Err(SymbolError::SymbolNotInAnyModule(symbol.to_string()))
    }

    fn machine(&self) -> Machine {
        self.machine
    }
}
