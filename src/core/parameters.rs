//! Typed trigger parameters.
//!
//! Parameter shapes are fixed at compile time as tuples implementing
//! [`ParameterList`]. Inside the engine the values travel type-erased as
//! [`Parameters`], and are checked against the declared [`ParameterType`]s
//! before any transition runs.

use std::any::{Any, TypeId};
use std::fmt::{self, Debug};
use std::sync::Arc;

/// A single value carried by a fired trigger.
///
/// Implemented for every `Any + Debug + Send + Sync` type.
pub trait Parameter: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn parameter_type(&self) -> ParameterType;
}

impl<V: Any + Debug + Send + Sync> Parameter for V {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn parameter_type(&self) -> ParameterType {
        ParameterType::of::<V>()
    }
}

/// Runtime identity of a parameter type.
#[derive(Clone, Copy, Debug)]
pub struct ParameterType {
    id: TypeId,
    name: &'static str,
}

impl ParameterType {
    pub fn of<V: Any>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: std::any::type_name::<V>(),
        }
    }

    /// Fully qualified Rust type name, e.g. `i32` or `alloc::string::String`.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ParameterType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ParameterType {}

/// Ordered, type-erased parameter values of a single fire.
///
/// # Example
///
/// ```rust
/// use switchboard::core::Parameters;
///
/// let parameters = Parameters::new()
///     .with(11_i32)
///     .with(String::from("12345"));
///
/// assert_eq!(parameters.len(), 2);
/// assert_eq!(parameters.get::<i32>(0), Some(&11));
/// assert_eq!(parameters.get::<String>(1).map(String::as_str), Some("12345"));
/// assert_eq!(parameters.get::<i64>(0), None);
/// ```
#[derive(Clone, Default)]
pub struct Parameters {
    values: Vec<Arc<dyn Parameter>>,
}

impl Parameters {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append a value, returning the extended list.
    pub fn with<V: Parameter>(mut self, value: V) -> Self {
        self.values.push(Arc::new(value));
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the value at `index` if it has type `V`.
    pub fn get<V: Any>(&self, index: usize) -> Option<&V> {
        let value: &dyn Parameter = &**self.values.get(index)?;
        value.as_any().downcast_ref::<V>()
    }

    /// Types of the carried values, in order.
    pub fn types(&self) -> Vec<ParameterType> {
        self.values
            .iter()
            .map(|value| {
                let value: &dyn Parameter = &**value;
                value.parameter_type()
            })
            .collect()
    }

    /// Check the carried values against a declared shape.
    pub fn matches(&self, expected: &[ParameterType]) -> bool {
        self.types() == expected
    }
}

impl Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.values.iter().map(|value| &**value))
            .finish()
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", &**value)?;
        }
        Ok(())
    }
}

/// A tuple of parameter values with a compile-time shape.
///
/// Implemented for `()` and tuples of up to four
/// `Clone + Debug + Send + Sync + 'static` values.
pub trait ParameterList: Sized + 'static {
    /// Declared shape of the tuple.
    fn types() -> Vec<ParameterType>;

    /// Erase the tuple into [`Parameters`].
    fn into_parameters(self) -> Parameters;

    /// Rebuild the tuple, or `None` if the shape does not match.
    fn from_parameters(parameters: &Parameters) -> Option<Self>;
}

macro_rules! impl_parameter_list {
    ($($name:ident : $idx:tt),*) => {
        impl<$($name),*> ParameterList for ($($name,)*)
        where
            $($name: Clone + Debug + Send + Sync + 'static,)*
        {
            fn types() -> Vec<ParameterType> {
                vec![$(ParameterType::of::<$name>()),*]
            }

            fn into_parameters(self) -> Parameters {
                Parameters::new()$(.with(self.$idx))*
            }

            fn from_parameters(parameters: &Parameters) -> Option<Self> {
                if !parameters.matches(&Self::types()) {
                    return None;
                }
                Some(($(parameters.get::<$name>($idx)?.clone(),)*))
            }
        }
    };
}

impl_parameter_list!();
impl_parameter_list!(A: 0);
impl_parameter_list!(A: 0, B: 1);
impl_parameter_list!(A: 0, B: 1, C: 2);
impl_parameter_list!(A: 0, B: 1, C: 2, D: 3);
