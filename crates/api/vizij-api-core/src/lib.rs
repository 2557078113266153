//! vizij-api-core: typed values and their vectorized form (core, engine-agnostic)
//!
//! Every interpolatable value is re-expressed as a [`ValueKind`] type tag plus a
//! fixed-length list of f64 components ([`VectorizedValue`]). Conversions are
//! supplied either by the [`Vectorize`] trait or at runtime through a
//! [`ConversionTable`].

pub mod color;
pub mod conversion;
pub mod error;
pub mod shape;
pub mod value;
pub mod vectorized;

pub use color::{Color, ColorModel};
pub use conversion::{Conversion, ConversionTable, DevectorizeFn, Vectorize, VectorizeFn};
pub use error::ConversionError;
pub use shape::ValueKind;
pub use value::Value;
pub use vectorized::VectorizedValue;
