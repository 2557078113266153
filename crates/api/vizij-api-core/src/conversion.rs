//! Conversion contract between typed values and [`VectorizedValue`]s.
//!
//! Two ways to supply a conversion:
//! - implement [`Vectorize`] for the type (built-ins: [`Value`], [`Color`], `f64`,
//!   `f32`, `[f64; 2]`, `[f64; 3]`, `[f64; 4]`);
//! - register a pair of functions in a [`ConversionTable`], keyed by the type's
//!   `TypeId`, and look the [`Conversion`] up at runtime.

use std::any::{type_name, Any, TypeId};
use std::fmt;

use hashbrown::HashMap;

use crate::{Color, ConversionError, Value, ValueKind, VectorizedValue};

/// Types with a built-in vectorized form.
pub trait Vectorize: Sized + 'static {
    fn vectorize(&self) -> Result<VectorizedValue, ConversionError>;

    fn devectorize(value: &VectorizedValue) -> Result<Self, ConversionError>;
}

impl Vectorize for Value {
    fn vectorize(&self) -> Result<VectorizedValue, ConversionError> {
        VectorizedValue::new(self.kind(), self.components())
    }

    fn devectorize(value: &VectorizedValue) -> Result<Self, ConversionError> {
        Value::from_components(value.kind(), value.components())
    }
}

impl Vectorize for Color {
    fn vectorize(&self) -> Result<VectorizedValue, ConversionError> {
        VectorizedValue::new(self.kind(), self.components())
    }

    fn devectorize(value: &VectorizedValue) -> Result<Self, ConversionError> {
        Color::from_components(value.kind(), value.components())
    }
}

fn expect_kind(
    value: &VectorizedValue,
    kind: ValueKind,
    target: &'static str,
) -> Result<(), ConversionError> {
    if *value.kind() == kind {
        Ok(())
    } else {
        Err(ConversionError::KindMismatch {
            target,
            actual: value.kind().clone(),
        })
    }
}

impl Vectorize for f64 {
    fn vectorize(&self) -> Result<VectorizedValue, ConversionError> {
        VectorizedValue::new(ValueKind::Float, vec![*self])
    }

    fn devectorize(value: &VectorizedValue) -> Result<Self, ConversionError> {
        expect_kind(value, ValueKind::Float, "f64")?;
        Ok(value.components()[0])
    }
}

impl Vectorize for f32 {
    fn vectorize(&self) -> Result<VectorizedValue, ConversionError> {
        VectorizedValue::new(ValueKind::Float, vec![f64::from(*self)])
    }

    fn devectorize(value: &VectorizedValue) -> Result<Self, ConversionError> {
        expect_kind(value, ValueKind::Float, "f32")?;
        Ok(value.components()[0] as f32)
    }
}

macro_rules! impl_vectorize_array {
    ($n:literal, $kind:expr) => {
        impl Vectorize for [f64; $n] {
            fn vectorize(&self) -> Result<VectorizedValue, ConversionError> {
                VectorizedValue::new($kind, self.to_vec())
            }

            fn devectorize(value: &VectorizedValue) -> Result<Self, ConversionError> {
                expect_kind(value, $kind, stringify!([f64; $n]))?;
                let mut out = [0.0f64; $n];
                out.copy_from_slice(value.components());
                Ok(out)
            }
        }
    };
}

impl_vectorize_array!(2, ValueKind::Vec2);
impl_vectorize_array!(3, ValueKind::Vec3);
impl_vectorize_array!(4, ValueKind::Vec4);

pub type VectorizeFn<T> = fn(&T) -> Result<VectorizedValue, ConversionError>;
pub type DevectorizeFn<T> = fn(&VectorizedValue) -> Result<T, ConversionError>;

/// A vectorize/devectorize pair for one type.
pub struct Conversion<T> {
    vectorize: VectorizeFn<T>,
    devectorize: DevectorizeFn<T>,
}

impl<T> Clone for Conversion<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Conversion<T> {}

impl<T> fmt::Debug for Conversion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversion")
            .field("type", &type_name::<T>())
            .finish()
    }
}

impl<T> Conversion<T> {
    pub fn new(vectorize: VectorizeFn<T>, devectorize: DevectorizeFn<T>) -> Self {
        Self {
            vectorize,
            devectorize,
        }
    }

    #[inline]
    pub fn vectorize(&self, value: &T) -> Result<VectorizedValue, ConversionError> {
        (self.vectorize)(value)
    }

    #[inline]
    pub fn devectorize(&self, value: &VectorizedValue) -> Result<T, ConversionError> {
        (self.devectorize)(value)
    }
}

impl<T: Vectorize> Conversion<T> {
    /// The conversion provided by the type's [`Vectorize`] impl.
    pub fn of() -> Self {
        Self::new(T::vectorize, T::devectorize)
    }
}

struct Entry {
    type_name: &'static str,
    conversion: Box<dyn Any + Send + Sync>,
}

/// Registry of conversions keyed by runtime type identity.
#[derive(Default)]
pub struct ConversionTable {
    entries: HashMap<TypeId, Entry>,
}

impl fmt::Debug for ConversionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionTable")
            .field("types", &self.type_names())
            .finish()
    }
}

impl ConversionTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-populated with every built-in [`Vectorize`] type.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        table.register_vectorize::<Value>();
        table.register_vectorize::<Color>();
        table.register_vectorize::<f64>();
        table.register_vectorize::<f32>();
        table.register_vectorize::<[f64; 2]>();
        table.register_vectorize::<[f64; 3]>();
        table.register_vectorize::<[f64; 4]>();
        table
    }

    /// Register (or replace) the conversion for `T`.
    pub fn register<T: 'static>(
        &mut self,
        vectorize: VectorizeFn<T>,
        devectorize: DevectorizeFn<T>,
    ) {
        self.entries.insert(
            TypeId::of::<T>(),
            Entry {
                type_name: type_name::<T>(),
                conversion: Box::new(Conversion::new(vectorize, devectorize)),
            },
        );
    }

    /// Register `T` using its [`Vectorize`] impl.
    pub fn register_vectorize<T: Vectorize>(&mut self) {
        self.register::<T>(T::vectorize, T::devectorize);
    }

    #[inline]
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the registered types.
    pub fn type_names(&self) -> Vec<&'static str> {
        self.entries.values().map(|e| e.type_name).collect()
    }

    /// Look up the conversion for `T`.
    pub fn conversion<T: 'static>(&self) -> Result<Conversion<T>, ConversionError> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.conversion.downcast_ref::<Conversion<T>>())
            .copied()
            .ok_or(ConversionError::UnsupportedType {
                type_name: type_name::<T>(),
            })
    }

    pub fn vectorize<T: 'static>(&self, value: &T) -> Result<VectorizedValue, ConversionError> {
        self.conversion::<T>()?.vectorize(value)
    }

    pub fn devectorize<T: 'static>(&self, value: &VectorizedValue) -> Result<T, ConversionError> {
        self.conversion::<T>()?.devectorize(value)
    }
}
