// Tue Feb 17 2026 - Alex

pub mod convert;
pub mod error;
pub mod load;
pub mod typed_var;

pub use convert::{bytes_to_value, value_to_bytes};
pub use error::{VarError, VarResult};
pub use load::{
    load_typed_var, load_typed_var_array, load_typed_var_from_buffer, load_typed_var_from_dump,
    load_typed_var_from_foreign, load_typed_var_with_type, TypeBinder,
};
pub use typed_var::TypedVar;
