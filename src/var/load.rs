// Tue Feb 17 2026 - Alex

use crate::accessor::{
    BufferAccessor, DataAccessor, DebuggeeMemory, ForeignSequence, ForeignSequenceAccessor,
    HostContext, MemoryAccessor,
};
use crate::config::Config;
use crate::symbol::ModuleProvider;
use crate::types::parser::{apply_suffixes, parse_expression};
use crate::types::{load_type, BaseType, TypeInfo, UdtBuilder};
use crate::var::error::VarResult;
use crate::var::typed_var::TypedVar;
use std::sync::Arc;

/// Binds a typed variable over live debuggee memory.
pub fn load_typed_var(
    provider: &dyn ModuleProvider,
    type_name: &str,
    addr: u64,
    memory: Arc<dyn DebuggeeMemory>,
) -> VarResult<TypedVar> {
    let type_info = load_type(provider, type_name)?;
    Ok(load_typed_var_with_type(&type_info, addr, memory))
}

pub fn load_typed_var_with_type(
    type_info: &Arc<TypeInfo>,
    addr: u64,
    memory: Arc<dyn DebuggeeMemory>,
) -> TypedVar {
    let accessor = MemoryAccessor::new(memory, addr, type_info.size());
    TypedVar::new(type_info.clone(), accessor)
}

/// `count` consecutive variables starting at `addr`, stepped by the
/// element size.
pub fn load_typed_var_array(
    type_info: &Arc<TypeInfo>,
    addr: u64,
    memory: Arc<dyn DebuggeeMemory>,
    count: usize,
) -> Vec<TypedVar> {
    let stride = type_info.size();
    let region = MemoryAccessor::new(memory, addr, stride * count);
    (0..count)
        .map(|i| {
            TypedVar::new(
                type_info.clone(),
                region.nested_copy(i * stride, stride),
            )
        })
        .collect()
}

/// Binds a typed variable over an owned byte buffer.
pub fn load_typed_var_from_buffer(type_info: &Arc<TypeInfo>, bytes: Vec<u8>) -> TypedVar {
    TypedVar::new(type_info.clone(), BufferAccessor::from_bytes(bytes))
}

/// Binds a typed variable over a captured dump, labeled with the dump's
/// nominal address.
pub fn load_typed_var_from_dump(
    type_info: &Arc<TypeInfo>,
    addr: u64,
    bytes: Vec<u8>,
) -> TypedVar {
    let location = format!("dump_{}_{:x}", type_info.name(), addr);
    log::debug!("binding {} over {}", type_info.name(), location);
    TypedVar::new(type_info.clone(), BufferAccessor::dump(bytes, location))
}

/// Binds a typed variable over a foreign host object, pinning the host
/// context around every access.
pub fn load_typed_var_from_foreign(
    type_info: &Arc<TypeInfo>,
    object: Arc<dyn ForeignSequence>,
    context: Arc<dyn HostContext>,
) -> TypedVar {
    TypedVar::new(
        type_info.clone(),
        ForeignSequenceAccessor::new(object, context),
    )
}

/// Front door tying a module provider and the engine configuration
/// together.
pub struct TypeBinder {
    provider: Arc<dyn ModuleProvider>,
    config: Config,
}

impl TypeBinder {
    pub fn new(provider: Arc<dyn ModuleProvider>) -> Self {
        Self {
            provider,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolves a type expression. Bare base-type expressions honor the
    /// configured default architecture instead of any module scope.
    pub fn load_type(&self, type_name: &str) -> VarResult<Arc<TypeInfo>> {
        if let Ok((base_name, tokens)) = parse_expression(type_name) {
            if let Some(base) = BaseType::parse(&base_name) {
                let lowest = TypeInfo::base(base, self.config.default_machine);
                return Ok(apply_suffixes(lowest, &tokens, type_name)?);
            }
        }
        Ok(load_type(self.provider.as_ref(), type_name)?)
    }

    pub fn load_var(
        &self,
        type_name: &str,
        addr: u64,
        memory: Arc<dyn DebuggeeMemory>,
    ) -> VarResult<TypedVar> {
        let type_info = self.load_type(type_name)?;
        Ok(load_typed_var_with_type(&type_info, addr, memory))
    }

    pub fn load_var_from_buffer(&self, type_name: &str, bytes: Vec<u8>) -> VarResult<TypedVar> {
        let type_info = self.load_type(type_name)?;
        Ok(load_typed_var_from_buffer(&type_info, bytes))
    }

    /// Ad hoc struct builder stamped with the configured architecture.
    pub fn define_struct(&self, name: &str) -> UdtBuilder {
        UdtBuilder::define_struct(name).with_machine(self.config.default_machine)
    }

    pub fn define_union(&self, name: &str) -> UdtBuilder {
        UdtBuilder::define_union(name).with_machine(self.config.default_machine)
    }
}
