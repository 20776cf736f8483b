//! Nullability classification of values.

use std::rc::Rc;
use std::sync::Arc;

/// How a value can represent "no value".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullabilityKind {
    /// The value itself is the no-value marker (`None`, `()`).
    Absent,
    /// Pointer-like handle to data living elsewhere.
    Reference,
    /// A present value wrapped in `Option`.
    Optional,
    /// Fixed-size, non-optional value.
    Value,
}

pub trait Nullability {
    fn nullability(&self) -> NullabilityKind;
}

/// True unless `value` is a plain, present, non-optional value.
pub fn is_nullable<T: Nullability + ?Sized>(value: &T) -> bool {
    value.nullability() != NullabilityKind::Value
}

impl<T> Nullability for Option<T> {
    fn nullability(&self) -> NullabilityKind {
        match self {
            None => NullabilityKind::Absent,
            Some(_) => NullabilityKind::Optional,
        }
    }
}

impl Nullability for () {
    fn nullability(&self) -> NullabilityKind {
        NullabilityKind::Absent
    }
}

macro_rules! classify {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Nullability for $ty {
                fn nullability(&self) -> NullabilityKind {
                    NullabilityKind::$kind
                }
            }
        )+
    };
}

classify!(Value =>
    bool, char,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
);

classify!(Reference => str, String);

macro_rules! classify_generic {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl<T: ?Sized> Nullability for $ty {
                fn nullability(&self) -> NullabilityKind {
                    NullabilityKind::$kind
                }
            }
        )+
    };
}

classify_generic!(Reference =>
    &T, &mut T, *const T, *mut T, Box<T>, Rc<T>, Arc<T>,
);

impl<T> Nullability for [T] {
    fn nullability(&self) -> NullabilityKind {
        NullabilityKind::Reference
    }
}

impl<T> Nullability for Vec<T> {
    fn nullability(&self) -> NullabilityKind {
        NullabilityKind::Reference
    }
}

impl<T, const N: usize> Nullability for [T; N] {
    fn nullability(&self) -> NullabilityKind {
        NullabilityKind::Value
    }
}

macro_rules! classify_tuple {
    ($($name:ident),+) => {
        impl<$($name),+> Nullability for ($($name,)+) {
            fn nullability(&self) -> NullabilityKind {
                NullabilityKind::Value
            }
        }
    };
}

classify_tuple!(A);
classify_tuple!(A, B);
classify_tuple!(A, B, C);
classify_tuple!(A, B, C, D);
