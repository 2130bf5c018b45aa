// Mon Feb 16 2026 - Alex

use crate::accessor::{AccessorError, DataAccessor};
use parking_lot::RwLock;
use std::sync::Arc;

/// Accessor over an in-process byte buffer. Nested and external copies
/// share the same store through the `Arc`, so a copy can outlive the
/// accessor it was made from.
pub struct BufferAccessor {
    store: Arc<RwLock<Vec<u8>>>,
    start: usize,
    location: String,
}

impl BufferAccessor {
    /// Zero-filled scratch buffer, used for snapshots.
    pub fn new(size: usize) -> Arc<Self> {
        Self::with_store(
            Arc::new(RwLock::new(vec![0u8; size])),
            0,
            "cache buffer".to_string(),
        )
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Arc<Self> {
        Self::with_store(Arc::new(RwLock::new(bytes)), 0, "byte buffer".to_string())
    }

    /// Buffer seeded from a captured dump, labeled with where the dump
    /// came from.
    pub fn dump(bytes: Vec<u8>, location: String) -> Arc<Self> {
        Self::with_store(Arc::new(RwLock::new(bytes)), 0, location)
    }

    fn with_store(store: Arc<RwLock<Vec<u8>>>, start: usize, location: String) -> Arc<Self> {
        Arc::new(Self {
            store,
            start,
            location,
        })
    }
}

impl DataAccessor for BufferAccessor {
    fn length(&self) -> Result<usize, AccessorError> {
        Ok(self.store.read().len().saturating_sub(self.start))
    }

    fn read_raw(&self, offset: usize, buf: &mut [u8]) -> Result<(), AccessorError> {
        let store = self.store.read();
        let begin = self.start + offset;
        let end = begin + buf.len();
        if end > store.len() {
            return Err(AccessorError::OutOfRange {
                offset: begin,
                length: buf.len(),
                store_length: store.len(),
            });
        }
        buf.copy_from_slice(&store[begin..end]);
        Ok(())
    }

    fn write_raw(&self, offset: usize, data: &[u8]) -> Result<(), AccessorError> {
        let mut store = self.store.write();
        let begin = self.start + offset;
        let end = begin + data.len();
        if end > store.len() {
            return Err(AccessorError::OutOfRange {
                offset: begin,
                length: data.len(),
                store_length: store.len(),
            });
        }
        store[begin..end].copy_from_slice(data);
        Ok(())
    }

    fn nested_copy(&self, start_offset: usize, _length: usize) -> Arc<dyn DataAccessor> {
        Self::with_store(
            self.store.clone(),
            self.start + start_offset,
            self.location.clone(),
        )
    }

    fn external_copy(&self, start_addr: u64, _length: usize) -> Arc<dyn DataAccessor> {
        Self::with_store(self.store.clone(), start_addr as usize, self.location.clone())
    }

    fn check_range(&self, start_addr: u64, _length: usize) -> bool {
        start_addr >= self.start as u64
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::VarStorage;

    #[test]
    fn test_scalar_round_trips() {
        let acc = BufferAccessor::new(64);

        acc.write_byte(0xAB, 3).unwrap();
        assert_eq!(acc.read_byte(3).unwrap(), 0xAB);

        acc.write_sign_byte(i8::MIN, 4).unwrap();
        assert_eq!(acc.read_sign_byte(4).unwrap(), i8::MIN);

        acc.write_word(u16::MAX, 4).unwrap();
        assert_eq!(acc.read_word(4).unwrap(), u16::MAX);

        acc.write_sign_word(i16::MIN, 5).unwrap();
        assert_eq!(acc.read_sign_word(5).unwrap(), i16::MIN);

        acc.write_dword(0xDEADBEEF, 4).unwrap();
        assert_eq!(acc.read_dword(4).unwrap(), 0xDEADBEEF);

        acc.write_sign_dword(i32::MIN, 5).unwrap();
        assert_eq!(acc.read_sign_dword(5).unwrap(), i32::MIN);

        acc.write_qword(u64::MAX, 3).unwrap();
        assert_eq!(acc.read_qword(3).unwrap(), u64::MAX);

        acc.write_sign_qword(i64::MIN, 4).unwrap();
        assert_eq!(acc.read_sign_qword(4).unwrap(), i64::MIN);

        acc.write_qword(0, 3).unwrap();
        assert_eq!(acc.read_qword(3).unwrap(), 0);

        acc.write_float(1.5, 0).unwrap();
        assert_eq!(acc.read_float(0).unwrap(), 1.5);

        acc.write_double(-2.25, 1).unwrap();
        assert_eq!(acc.read_double(1).unwrap(), -2.25);
    }

    #[test]
    fn test_little_endian_layout() {
        let acc = BufferAccessor::new(8);
        acc.write_dword(0x12345678, 0).unwrap();
        assert_eq!(acc.read_bytes(4, 0).unwrap(), vec![0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_pos_is_an_element_index() {
        let acc = BufferAccessor::new(16);
        acc.write_dword(7, 2).unwrap();
        // element 2 of width 4 lives at byte 8
        assert_eq!(acc.read_byte(8).unwrap(), 7);
    }

    #[test]
    fn test_vector_round_trips() {
        let acc = BufferAccessor::new(64);

        acc.write_dwords(&[1, 2, 3], 1).unwrap();
        assert_eq!(acc.read_dwords(3, 1).unwrap(), vec![1, 2, 3]);

        acc.write_sign_words(&[-1, 0, 1], 0).unwrap();
        assert_eq!(acc.read_sign_words(3, 0).unwrap(), vec![-1, 0, 1]);

        acc.write_doubles(&[0.5, -0.5], 2).unwrap();
        assert_eq!(acc.read_doubles(2, 2).unwrap(), vec![0.5, -0.5]);
    }

    #[test]
    fn test_out_of_range_read_is_all_or_nothing() {
        let acc = BufferAccessor::from_bytes(vec![1, 2, 3, 4]);
        assert!(matches!(
            acc.read_dwords(2, 0),
            Err(AccessorError::OutOfRange { .. })
        ));
        assert!(acc.read_dwords(1, 0).is_ok());
    }

    #[test]
    fn test_nested_copy_composition() {
        let acc = BufferAccessor::new(32);
        acc.write_byte(0x5A, 12).unwrap();

        let nested = acc.nested_copy(4, 0).nested_copy(8, 0);
        let direct = acc.nested_copy(12, 0);
        assert_eq!(nested.read_byte(0).unwrap(), 0x5A);
        assert_eq!(direct.read_byte(0).unwrap(), 0x5A);
    }

    #[test]
    fn test_nested_copy_shares_store() {
        let acc = BufferAccessor::new(8);
        let nested = acc.nested_copy(4, 4);
        nested.write_byte(0x7F, 0).unwrap();
        assert_eq!(acc.read_byte(4).unwrap(), 0x7F);
    }

    #[test]
    fn test_check_range_boundary() {
        let acc = BufferAccessor::new(16);
        let nested = acc.nested_copy(4, 0);
        assert!(nested.check_range(4, 1));
        assert!(!nested.check_range(3, 1));
        assert!(nested.check_range(100, 1));
    }

    #[test]
    fn test_length_counts_from_start() {
        let acc = BufferAccessor::new(16);
        assert_eq!(acc.length().unwrap(), 16);
        assert_eq!(acc.nested_copy(6, 0).length().unwrap(), 10);
    }

    #[test]
    fn test_no_debuggee_metadata() {
        let acc = BufferAccessor::new(4);
        assert!(matches!(
            acc.address(),
            Err(AccessorError::NoMetadata { .. })
        ));
        assert!(acc.storage_type().is_err());
        assert!(acc.register_name().is_err());
        let _: Result<VarStorage, _> = acc.storage_type();
    }
}
