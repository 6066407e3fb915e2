//! Value coercion: turning a trimmed raw string into a field's type.

use core::fmt;

use crate::error::ValueError;
use crate::number::ParseNumber;

/// Semantic type of a bound field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    String,
    Bool,
    /// Signed integer with its bit width
    Int(u32),
    /// Unsigned integer with its bit width
    Uint(u32),
    /// Float with its precision in bits
    Float(u32),
    /// Repeated key; each line appends one element
    List(Box<Kind>),
    /// A kind no raw value can be assigned to
    Unsupported(String),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::String => f.write_str("string"),
            Kind::Bool => f.write_str("bool"),
            Kind::Int(bits) => write!(f, "int{}", bits),
            Kind::Uint(bits) => write!(f, "uint{}", bits),
            Kind::Float(bits) => write!(f, "float{}", bits),
            Kind::List(elem) => write!(f, "list<{}>", elem),
            Kind::Unsupported(name) => f.write_str(name),
        }
    }
}

/// A settable field in a target record.
///
/// Implemented for the scalar types, `Vec<T>` (each matching line appends)
/// and `Option<T>` (a matching line stores `Some`). Implement it for your own
/// types to accept custom value syntax.
pub trait Slot {
    fn kind(&self) -> Kind;
    fn set(&mut self, raw: &str) -> Result<(), ValueError>;
}

/// A single value parsed from one line.
pub trait Scalar: Sized {
    fn kind() -> Kind;
    fn coerce(raw: &str) -> Result<Self, ValueError>;
}

const TRUTHY: [&str; 5] = ["t", "true", "y", "yes", "1"];

/// Anything outside the truthy set reads as `false`.
pub fn parse_bool(raw: &str) -> bool {
    TRUTHY.iter().any(|t| raw.eq_ignore_ascii_case(t))
}

impl Scalar for String {
    fn kind() -> Kind {
        Kind::String
    }
    fn coerce(raw: &str) -> Result<Self, ValueError> {
        Ok(raw.to_string())
    }
}

impl Scalar for bool {
    fn kind() -> Kind {
        Kind::Bool
    }
    fn coerce(raw: &str) -> Result<Self, ValueError> {
        Ok(parse_bool(raw))
    }
}

macro_rules! impl_scalar_number {
    ($variant:ident, $err:ident: $($t:ty),*) => {$(
        impl Scalar for $t {
            fn kind() -> Kind {
                Kind::$variant(<$t>::BITS)
            }
            fn coerce(raw: &str) -> Result<Self, ValueError> {
                <$t>::parse_number(raw).ok_or(ValueError::$err)
            }
        }
    )*};
}

impl_scalar_number!(Int, Int: i8, i16, i32, i64, isize);
impl_scalar_number!(Uint, Uint: u8, u16, u32, u64, usize);

impl Scalar for f32 {
    fn kind() -> Kind {
        Kind::Float(32)
    }
    fn coerce(raw: &str) -> Result<Self, ValueError> {
        f32::parse_number(raw).ok_or(ValueError::Float)
    }
}

impl Scalar for f64 {
    fn kind() -> Kind {
        Kind::Float(64)
    }
    fn coerce(raw: &str) -> Result<Self, ValueError> {
        f64::parse_number(raw).ok_or(ValueError::Float)
    }
}

macro_rules! impl_slot_scalar {
    ($($t:ty),*) => {$(
        impl Slot for $t {
            fn kind(&self) -> Kind {
                <$t as Scalar>::kind()
            }
            fn set(&mut self, raw: &str) -> Result<(), ValueError> {
                *self = <$t as Scalar>::coerce(raw)?;
                Ok(())
            }
        }
    )*};
}

impl_slot_scalar!(
    String, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64
);

impl<T: Scalar> Slot for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::List(Box::new(T::kind()))
    }
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        self.push(T::coerce(raw)?);
        Ok(())
    }
}

impl<T: Scalar> Slot for Option<T> {
    fn kind(&self) -> Kind {
        T::kind()
    }
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        *self = Some(T::coerce(raw)?);
        Ok(())
    }
}
