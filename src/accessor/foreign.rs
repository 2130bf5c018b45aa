// Mon Feb 16 2026 - Alex

use crate::accessor::{AccessorError, DataAccessor};
use std::sync::Arc;

/// Minimal contract a foreign in-process object must expose: a length
/// and indexable byte get/set.
pub trait ForeignSequence: Send + Sync {
    fn len(&self) -> Result<usize, AccessorError>;

    fn get(&self, index: usize) -> Result<u8, AccessorError>;

    fn set(&self, index: usize, value: u8) -> Result<(), AccessorError>;
}

/// Execution context of the foreign host. The host may not be
/// re-entrant from an arbitrary calling context, so every accessor call
/// holds the context for its full duration.
pub trait HostContext: Send + Sync {
    fn enter(&self);

    fn leave(&self);
}

/// Scoped pin of the host context. `leave` runs on every exit path,
/// including failures.
pub struct ContextGuard<'a> {
    context: &'a dyn HostContext,
}

impl<'a> ContextGuard<'a> {
    pub fn pin(context: &'a dyn HostContext) -> Self {
        context.enter();
        Self { context }
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.context.leave();
    }
}

/// For hosts that need no pinning.
pub struct NullContext;

impl HostContext for NullContext {
    fn enter(&self) {}

    fn leave(&self) {}
}

/// Accessor over a foreign host object. Any extraction or range failure
/// is reported as the single generic accessor error; batched operations
/// abort on the first failing element.
pub struct ForeignSequenceAccessor {
    object: Arc<dyn ForeignSequence>,
    context: Arc<dyn HostContext>,
    start: usize,
}

impl ForeignSequenceAccessor {
    pub fn new(object: Arc<dyn ForeignSequence>, context: Arc<dyn HostContext>) -> Arc<Self> {
        Self::with_start(object, context, 0)
    }

    fn with_start(
        object: Arc<dyn ForeignSequence>,
        context: Arc<dyn HostContext>,
        start: usize,
    ) -> Arc<Self> {
        Arc::new(Self {
            object,
            context,
            start,
        })
    }

    fn generic_error(&self) -> AccessorError {
        AccessorError::Backend(self.location())
    }
}

impl DataAccessor for ForeignSequenceAccessor {
    fn length(&self) -> Result<usize, AccessorError> {
        let _pin = ContextGuard::pin(self.context.as_ref());
        self.object.len().map_err(|_| self.generic_error())
    }

    fn read_raw(&self, offset: usize, buf: &mut [u8]) -> Result<(), AccessorError> {
        let _pin = ContextGuard::pin(self.context.as_ref());
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self
                .object
                .get(self.start + offset + i)
                .map_err(|_| self.generic_error())?;
        }
        Ok(())
    }

    fn write_raw(&self, offset: usize, data: &[u8]) -> Result<(), AccessorError> {
        let _pin = ContextGuard::pin(self.context.as_ref());
        for (i, &byte) in data.iter().enumerate() {
            self.object
                .set(self.start + offset + i, byte)
                .map_err(|_| self.generic_error())?;
        }
        Ok(())
    }

    fn nested_copy(&self, start_offset: usize, _length: usize) -> Arc<dyn DataAccessor> {
        Self::with_start(
            self.object.clone(),
            self.context.clone(),
            self.start + start_offset,
        )
    }

    fn external_copy(&self, start_addr: u64, _length: usize) -> Arc<dyn DataAccessor> {
        Self::with_start(self.object.clone(), self.context.clone(), start_addr as usize)
    }

    fn check_range(&self, start_addr: u64, _length: usize) -> bool {
        start_addr >= self.start as u64
    }

    fn location(&self) -> String {
        "foreign byte sequence".to_string()
    }
}
