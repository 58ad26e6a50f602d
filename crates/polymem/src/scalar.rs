//! Element trait for bank contents.

use std::fmt::Debug;

/// Trait for element types a banked store can hold.
///
/// Banks are zero-initialized at construction and compared in tests, so an
/// element needs an additive identity and equality, nothing more. All
/// primitive numeric types implement it.
pub trait Element: Copy + Debug + Default + PartialEq + 'static {
    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;
}

macro_rules! impl_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                fn one() -> Self {
                    1 as $t
                }
            }
        )*
    };
}

impl_element!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);
