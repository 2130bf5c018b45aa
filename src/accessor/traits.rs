// Fri Feb 13 2026 - Alex

use crate::accessor::AccessorError;
use std::sync::Arc;

/// Storage class of a live-debuggee binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarStorage {
    Memory,
    Register,
}

/// Assembles a little-endian scalar, combining bytes from the highest
/// index down into a shifting accumulator.
fn assemble(buf: &[u8]) -> u64 {
    let mut value = 0u64;
    for i in (0..buf.len()).rev() {
        value = (value << 8) | buf[i] as u64;
    }
    value
}

fn scatter(value: u64, buf: &mut [u8]) {
    for (i, byte) in buf.iter_mut().enumerate() {
        *byte = (value >> (8 * i)) as u8;
    }
}

fn read_vector<A, T>(
    accessor: &A,
    count: usize,
    pos: usize,
    width: usize,
    convert: impl Fn(u64) -> T,
) -> Result<Vec<T>, AccessorError>
where
    A: DataAccessor + ?Sized,
{
    let mut raw = vec![0u8; count * width];
    accessor.read_raw(pos * width, &mut raw)?;
    Ok(raw.chunks(width).map(|c| convert(assemble(c))).collect())
}

fn write_vector<A>(
    accessor: &A,
    count: usize,
    pos: usize,
    width: usize,
    element: impl Fn(usize) -> u64,
) -> Result<(), AccessorError>
where
    A: DataAccessor + ?Sized,
{
    let mut raw = vec![0u8; count * width];
    for i in 0..count {
        scatter(element(i), &mut raw[i * width..(i + 1) * width]);
    }
    accessor.write_raw(pos * width, &raw)
}

/// Uniform width-typed byte access over an arbitrary backing store.
///
/// `pos` arguments are element indices: the byte offset is
/// `pos * element width`. Backends supply the raw byte window and the
/// copy operations; the typed protocol is provided on top. Byte order
/// is little-endian, with no big-endian mode.
///
/// Batched reads and writes are all-or-nothing: the first failing
/// element aborts the batch with no partial result.
pub trait DataAccessor: Send + Sync {
    /// Element count of the backing store; the exact semantics are
    /// backend-defined (byte length for contiguous regions).
    fn length(&self) -> Result<usize, AccessorError>;

    fn read_raw(&self, offset: usize, buf: &mut [u8]) -> Result<(), AccessorError>;

    fn write_raw(&self, offset: usize, data: &[u8]) -> Result<(), AccessorError>;

    /// New accessor over the same backing store with its addressable
    /// origin advanced by `start_offset`. The copy shares the store and
    /// may outlive its creator.
    fn nested_copy(&self, start_offset: usize, length: usize) -> Arc<dyn DataAccessor>;

    /// New accessor of the same backend kind rebound to a different
    /// absolute location.
    fn external_copy(&self, start_addr: u64, length: usize) -> Arc<dyn DataAccessor>;

    /// True iff `start_addr` is at or after this accessor's own start
    /// offset (boundary inclusive). Never fails.
    fn check_range(&self, start_addr: u64, length: usize) -> bool;

    /// Human-readable description of the backing store.
    fn location(&self) -> String;

    fn address(&self) -> Result<u64, AccessorError> {
        Err(AccessorError::NoMetadata {
            location: self.location(),
            attribute: "address",
        })
    }

    fn storage_type(&self) -> Result<VarStorage, AccessorError> {
        Err(AccessorError::NoMetadata {
            location: self.location(),
            attribute: "storage type",
        })
    }

    fn register_name(&self) -> Result<String, AccessorError> {
        Err(AccessorError::NoMetadata {
            location: self.location(),
            attribute: "register name",
        })
    }

    fn read_scalar(&self, pos: usize, width: usize) -> Result<u64, AccessorError> {
        let mut buf = [0u8; 8];
        self.read_raw(pos * width, &mut buf[..width])?;
        Ok(assemble(&buf[..width]))
    }

    fn write_scalar(&self, value: u64, pos: usize, width: usize) -> Result<(), AccessorError> {
        let mut buf = [0u8; 8];
        scatter(value, &mut buf[..width]);
        self.write_raw(pos * width, &buf[..width])
    }

    fn read_byte(&self, pos: usize) -> Result<u8, AccessorError> {
        Ok(self.read_scalar(pos, 1)? as u8)
    }

    fn write_byte(&self, value: u8, pos: usize) -> Result<(), AccessorError> {
        self.write_scalar(value as u64, pos, 1)
    }

    fn read_sign_byte(&self, pos: usize) -> Result<i8, AccessorError> {
        Ok(self.read_scalar(pos, 1)? as i8)
    }

    fn write_sign_byte(&self, value: i8, pos: usize) -> Result<(), AccessorError> {
        self.write_scalar(value as u8 as u64, pos, 1)
    }

    fn read_word(&self, pos: usize) -> Result<u16, AccessorError> {
        Ok(self.read_scalar(pos, 2)? as u16)
    }

    fn write_word(&self, value: u16, pos: usize) -> Result<(), AccessorError> {
        self.write_scalar(value as u64, pos, 2)
    }

    fn read_sign_word(&self, pos: usize) -> Result<i16, AccessorError> {
        Ok(self.read_scalar(pos, 2)? as u16 as i16)
    }

    fn write_sign_word(&self, value: i16, pos: usize) -> Result<(), AccessorError> {
        self.write_scalar(value as u16 as u64, pos, 2)
    }

    fn read_dword(&self, pos: usize) -> Result<u32, AccessorError> {
        Ok(self.read_scalar(pos, 4)? as u32)
    }

    fn write_dword(&self, value: u32, pos: usize) -> Result<(), AccessorError> {
        self.write_scalar(value as u64, pos, 4)
    }

    fn read_sign_dword(&self, pos: usize) -> Result<i32, AccessorError> {
        Ok(self.read_scalar(pos, 4)? as u32 as i32)
    }

    fn write_sign_dword(&self, value: i32, pos: usize) -> Result<(), AccessorError> {
        self.write_scalar(value as u32 as u64, pos, 4)
    }

    fn read_qword(&self, pos: usize) -> Result<u64, AccessorError> {
        self.read_scalar(pos, 8)
    }

    fn write_qword(&self, value: u64, pos: usize) -> Result<(), AccessorError> {
        self.write_scalar(value, pos, 8)
    }

    fn read_sign_qword(&self, pos: usize) -> Result<i64, AccessorError> {
        Ok(self.read_scalar(pos, 8)? as i64)
    }

    fn write_sign_qword(&self, value: i64, pos: usize) -> Result<(), AccessorError> {
        self.write_scalar(value as u64, pos, 8)
    }

    fn read_float(&self, pos: usize) -> Result<f32, AccessorError> {
        Ok(f32::from_bits(self.read_scalar(pos, 4)? as u32))
    }

    fn write_float(&self, value: f32, pos: usize) -> Result<(), AccessorError> {
        self.write_scalar(value.to_bits() as u64, pos, 4)
    }

    fn read_double(&self, pos: usize) -> Result<f64, AccessorError> {
        Ok(f64::from_bits(self.read_scalar(pos, 8)?))
    }

    fn write_double(&self, value: f64, pos: usize) -> Result<(), AccessorError> {
        self.write_scalar(value.to_bits(), pos, 8)
    }

    fn read_bytes(&self, count: usize, pos: usize) -> Result<Vec<u8>, AccessorError> {
        let mut buf = vec![0u8; count];
        self.read_raw(pos, &mut buf)?;
        Ok(buf)
    }

    fn write_bytes(&self, data: &[u8], pos: usize) -> Result<(), AccessorError> {
        self.write_raw(pos, data)
    }

    fn read_sign_bytes(&self, count: usize, pos: usize) -> Result<Vec<i8>, AccessorError> {
        Ok(self
            .read_bytes(count, pos)?
            .into_iter()
            .map(|b| b as i8)
            .collect())
    }

    fn write_sign_bytes(&self, data: &[i8], pos: usize) -> Result<(), AccessorError> {
        let raw: Vec<u8> = data.iter().map(|&b| b as u8).collect();
        self.write_raw(pos, &raw)
    }

    fn read_words(&self, count: usize, pos: usize) -> Result<Vec<u16>, AccessorError> {
        read_vector(self, count, pos, 2, |v| v as u16)
    }

    fn write_words(&self, data: &[u16], pos: usize) -> Result<(), AccessorError> {
        write_vector(self, data.len(), pos, 2, |i| data[i] as u64)
    }

    fn read_sign_words(&self, count: usize, pos: usize) -> Result<Vec<i16>, AccessorError> {
        read_vector(self, count, pos, 2, |v| v as u16 as i16)
    }

    fn write_sign_words(&self, data: &[i16], pos: usize) -> Result<(), AccessorError> {
        write_vector(self, data.len(), pos, 2, |i| data[i] as u16 as u64)
    }

    fn read_dwords(&self, count: usize, pos: usize) -> Result<Vec<u32>, AccessorError> {
        read_vector(self, count, pos, 4, |v| v as u32)
    }

    fn write_dwords(&self, data: &[u32], pos: usize) -> Result<(), AccessorError> {
        write_vector(self, data.len(), pos, 4, |i| data[i] as u64)
    }

    fn read_sign_dwords(&self, count: usize, pos: usize) -> Result<Vec<i32>, AccessorError> {
        read_vector(self, count, pos, 4, |v| v as u32 as i32)
    }

    fn write_sign_dwords(&self, data: &[i32], pos: usize) -> Result<(), AccessorError> {
        write_vector(self, data.len(), pos, 4, |i| data[i] as u32 as u64)
    }

    fn read_qwords(&self, count: usize, pos: usize) -> Result<Vec<u64>, AccessorError> {
        read_vector(self, count, pos, 8, |v| v)
    }

    fn write_qwords(&self, data: &[u64], pos: usize) -> Result<(), AccessorError> {
        write_vector(self, data.len(), pos, 8, |i| data[i])
    }

    fn read_sign_qwords(&self, count: usize, pos: usize) -> Result<Vec<i64>, AccessorError> {
        read_vector(self, count, pos, 8, |v| v as i64)
    }

    fn write_sign_qwords(&self, data: &[i64], pos: usize) -> Result<(), AccessorError> {
        write_vector(self, data.len(), pos, 8, |i| data[i] as u64)
    }

    fn read_floats(&self, count: usize, pos: usize) -> Result<Vec<f32>, AccessorError> {
        read_vector(self, count, pos, 4, |v| f32::from_bits(v as u32))
    }

    fn write_floats(&self, data: &[f32], pos: usize) -> Result<(), AccessorError> {
        write_vector(self, data.len(), pos, 4, |i| data[i].to_bits() as u64)
    }

    fn read_doubles(&self, count: usize, pos: usize) -> Result<Vec<f64>, AccessorError> {
        read_vector(self, count, pos, 8, f64::from_bits)
    }

    fn write_doubles(&self, data: &[f64], pos: usize) -> Result<(), AccessorError> {
        write_vector(self, data.len(), pos, 8, |i| data[i].to_bits())
    }
}
