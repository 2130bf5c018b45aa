// Mon Feb 16 2026 - Alex

use crate::accessor::{AccessorError, DataAccessor, VarStorage};
use std::sync::Arc;

/// Live debuggee memory, supplied by the attached-target layer.
pub trait DebuggeeMemory: Send + Sync {
    fn read(&self, addr: u64, buf: &mut [u8]) -> Result<(), AccessorError>;

    fn write(&self, addr: u64, data: &[u8]) -> Result<(), AccessorError>;
}

/// Accessor bound to a region of live debuggee memory. The only backend
/// that carries an address and a storage type.
pub struct MemoryAccessor {
    memory: Arc<dyn DebuggeeMemory>,
    start: u64,
    length: usize,
}

impl MemoryAccessor {
    pub fn new(memory: Arc<dyn DebuggeeMemory>, start: u64, length: usize) -> Arc<Self> {
        Arc::new(Self {
            memory,
            start,
            length,
        })
    }

    fn check_window(&self, offset: usize, length: usize) -> Result<(), AccessorError> {
        if offset + length > self.length {
            return Err(AccessorError::OutOfRange {
                offset,
                length,
                store_length: self.length,
            });
        }
        Ok(())
    }
}

impl DataAccessor for MemoryAccessor {
    fn length(&self) -> Result<usize, AccessorError> {
        Ok(self.length)
    }

    fn read_raw(&self, offset: usize, buf: &mut [u8]) -> Result<(), AccessorError> {
        self.check_window(offset, buf.len())?;
        self.memory.read(self.start + offset as u64, buf)
    }

    fn write_raw(&self, offset: usize, data: &[u8]) -> Result<(), AccessorError> {
        self.check_window(offset, data.len())?;
        self.memory.write(self.start + offset as u64, data)
    }

    fn nested_copy(&self, start_offset: usize, length: usize) -> Arc<dyn DataAccessor> {
        let remaining = if length > 0 {
            length
        } else {
            self.length.saturating_sub(start_offset)
        };
        Self::new(
            self.memory.clone(),
            self.start + start_offset as u64,
            remaining,
        )
    }

    fn external_copy(&self, start_addr: u64, length: usize) -> Arc<dyn DataAccessor> {
        Self::new(self.memory.clone(), start_addr, length)
    }

    fn check_range(&self, start_addr: u64, _length: usize) -> bool {
        start_addr >= self.start
    }

    fn location(&self) -> String {
        format!("memory at 0x{:016x}", self.start)
    }

    fn address(&self) -> Result<u64, AccessorError> {
        Ok(self.start)
    }

    fn storage_type(&self) -> Result<VarStorage, AccessorError> {
        Ok(VarStorage::Memory)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::RwLock;

    /// Flat fake debuggee: one region mapped at a base address.
    pub(crate) struct FakeDebuggee {
        base: u64,
        bytes: RwLock<Vec<u8>>,
    }

    impl FakeDebuggee {
        pub(crate) fn new(base: u64, size: usize) -> Arc<Self> {
            Arc::new(Self {
                base,
                bytes: RwLock::new(vec![0u8; size]),
            })
        }

        fn window(&self, addr: u64, len: usize) -> Result<usize, AccessorError> {
            let offset = addr
                .checked_sub(self.base)
                .ok_or(AccessorError::OutOfRange {
                    offset: 0,
                    length: len,
                    store_length: self.bytes.read().len(),
                })? as usize;
            if offset + len > self.bytes.read().len() {
                return Err(AccessorError::OutOfRange {
                    offset,
                    length: len,
                    store_length: self.bytes.read().len(),
                });
            }
            Ok(offset)
        }
    }

    impl DebuggeeMemory for FakeDebuggee {
        fn read(&self, addr: u64, buf: &mut [u8]) -> Result<(), AccessorError> {
            let offset = self.window(addr, buf.len())?;
            buf.copy_from_slice(&self.bytes.read()[offset..offset + buf.len()]);
            Ok(())
        }

        fn write(&self, addr: u64, data: &[u8]) -> Result<(), AccessorError> {
            let offset = self.window(addr, data.len())?;
            self.bytes.write()[offset..offset + data.len()].copy_from_slice(data);
            Ok(())
        }
    }

    #[test]
    fn test_scalar_round_trips() {
        let debuggee = FakeDebuggee::new(0x1000, 64);
        let acc = MemoryAccessor::new(debuggee, 0x1000, 64);

        acc.write_byte(0xFF, 0).unwrap();
        assert_eq!(acc.read_byte(0).unwrap(), 0xFF);

        acc.write_sign_byte(i8::MIN, 1).unwrap();
        assert_eq!(acc.read_sign_byte(1).unwrap(), i8::MIN);

        acc.write_word(u16::MAX, 1).unwrap();
        assert_eq!(acc.read_word(1).unwrap(), u16::MAX);

        acc.write_sign_word(i16::MIN, 2).unwrap();
        assert_eq!(acc.read_sign_word(2).unwrap(), i16::MIN);

        acc.write_dword(0xCAFEBABE, 1).unwrap();
        assert_eq!(acc.read_dword(1).unwrap(), 0xCAFEBABE);

        acc.write_sign_dword(i32::MIN, 2).unwrap();
        assert_eq!(acc.read_sign_dword(2).unwrap(), i32::MIN);

        acc.write_qword(u64::MAX, 3).unwrap();
        assert_eq!(acc.read_qword(3).unwrap(), u64::MAX);

        acc.write_sign_qword(i64::MIN, 2).unwrap();
        assert_eq!(acc.read_sign_qword(2).unwrap(), i64::MIN);

        acc.write_float(-0.5, 0).unwrap();
        assert_eq!(acc.read_float(0).unwrap(), -0.5);

        acc.write_double(3.5, 4).unwrap();
        assert_eq!(acc.read_double(4).unwrap(), 3.5);
    }

    #[test]
    fn test_metadata_available() {
        let debuggee = FakeDebuggee::new(0x4000, 16);
        let acc = MemoryAccessor::new(debuggee, 0x4000, 16);
        assert_eq!(acc.address().unwrap(), 0x4000);
        assert_eq!(acc.storage_type().unwrap(), VarStorage::Memory);
        assert!(matches!(
            acc.register_name(),
            Err(AccessorError::NoMetadata { .. })
        ));
    }

    #[test]
    fn test_nested_copy_advances_address() {
        let debuggee = FakeDebuggee::new(0x1000, 64);
        let acc = MemoryAccessor::new(debuggee, 0x1000, 64);
        let nested = acc.nested_copy(0x10, 0);
        assert_eq!(nested.address().unwrap(), 0x1010);
        assert_eq!(nested.length().unwrap(), 0x30);

        nested.write_byte(0x42, 0).unwrap();
        assert_eq!(acc.read_byte(0x10).unwrap(), 0x42);
    }

    #[test]
    fn test_external_copy_rebinds() {
        let debuggee = FakeDebuggee::new(0x1000, 64);
        let acc = MemoryAccessor::new(debuggee, 0x1000, 16);
        let other = acc.external_copy(0x1020, 16);
        assert_eq!(other.address().unwrap(), 0x1020);

        other.write_word(0xBEEF, 0).unwrap();
        assert_eq!(acc.nested_copy(0x20, 2).read_word(0).unwrap(), 0xBEEF);
    }

    #[test]
    fn test_region_bound_respected() {
        let debuggee = FakeDebuggee::new(0x1000, 64);
        let acc = MemoryAccessor::new(debuggee, 0x1000, 4);
        assert!(matches!(
            acc.read_qword(0),
            Err(AccessorError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_check_range_boundary() {
        let debuggee = FakeDebuggee::new(0x1000, 64);
        let acc = MemoryAccessor::new(debuggee, 0x1008, 8);
        assert!(acc.check_range(0x1008, 1));
        assert!(!acc.check_range(0x1007, 1));
    }
}
