// Tue Feb 17 2026 - Alex

use crate::accessor::AccessorError;
use crate::types::BaseType;
use crate::value::TypedValue;

fn fits_width(value: &TypedValue, width: usize) -> bool {
    if width >= 8 {
        return true;
    }
    let bits = width as u32 * 8;
    if value.is_negative() {
        value.as_i64() >= -(1i64 << (bits - 1))
    } else {
        value.as_u64() < (1u64 << bits)
    }
}

/// Converts a generic scalar value into the native little-endian byte
/// pattern of a base type. An integer that cannot be represented in the
/// target width is rejected.
pub fn value_to_bytes(value: &TypedValue, base: BaseType) -> Result<Vec<u8>, AccessorError> {
    match base {
        BaseType::Float => return Ok((value.as_f64() as f32).to_le_bytes().to_vec()),
        BaseType::Double => return Ok(value.as_f64().to_le_bytes().to_vec()),
        _ => {}
    }

    let width = base.size();
    if !fits_width(value, width) {
        return Err(AccessorError::BadValue {
            value: value.to_string(),
            target: base.name().to_string(),
        });
    }
    Ok(value.as_u64().to_le_bytes()[..width].to_vec())
}

/// Reads a native little-endian byte pattern back into a width- and
/// signedness-preserving value.
pub fn bytes_to_value(bytes: &[u8], base: BaseType) -> TypedValue {
    let mut padded = [0u8; 8];
    padded[..bytes.len().min(8)].copy_from_slice(&bytes[..bytes.len().min(8)]);
    let raw = u64::from_le_bytes(padded);

    match base {
        BaseType::Char | BaseType::Int1B => TypedValue::I8(raw as u8 as i8),
        BaseType::UInt1B => TypedValue::U8(raw as u8),
        BaseType::Bool => TypedValue::Bool(raw as u8 != 0),
        BaseType::WChar | BaseType::UInt2B => TypedValue::U16(raw as u16),
        BaseType::Int2B => TypedValue::I16(raw as u16 as i16),
        BaseType::Int4B | BaseType::Long => TypedValue::I32(raw as u32 as i32),
        BaseType::UInt4B | BaseType::ULong => TypedValue::U32(raw as u32),
        BaseType::Int8B => TypedValue::I64(raw as i64),
        BaseType::UInt8B => TypedValue::U64(raw),
        BaseType::Float => TypedValue::F32(f32::from_bits(raw as u32)),
        BaseType::Double => TypedValue::F64(f64::from_bits(raw)),
    }
}
