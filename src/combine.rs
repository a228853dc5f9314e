//! Pluggable combiners for range aggregation.
//!
//! A combiner is the binary operator a [`RangeTree`](crate::tree::RangeTree) uses
//! to fold a range of elements into a single value. The combiner is chosen
//! at construction and invoked uniformly by build, update, and query.
//!
//! Stock combiners:
//! - [`Sum`]: addition, the default
//! - [`Product`]: multiplication over the primitive numeric types
//! - [`Min`] / [`Max`]: over the primitive integer types
//! - [`CombineFn`]: any closure, with a caller-supplied identity

use std::ops::Add;

/// A binary operator for aggregating two subtree results into one.
///
/// Implementations must be associative:
/// `combine(&combine(&a, &b), &c) == combine(&a, &combine(&b, &c))`.
/// The tree pairs values by its shape, not by a flat left-to-right fold,
/// so a non-associative operator produces shape-dependent results.
/// Commutativity is not required; subtrees are always combined
/// left-before-right.
pub trait Combine<T> {
    /// Combine two values.
    fn combine(&self, a: &T, b: &T) -> T;

    /// The neutral element: `combine(&identity(), &x) == x` for all `x`.
    ///
    /// Returned for empty or invalid query ranges, and used to fill node
    /// slots that no element covers.
    fn identity(&self) -> T;
}

/// Addition. The default combiner.
///
/// The identity is `T::default()`, which is zero for the primitive
/// numeric types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sum;

impl<T> Combine<T> for Sum
where
    T: Clone + Default + Add<Output = T>,
{
    fn combine(&self, a: &T, b: &T) -> T {
        return a.clone() + b.clone();
    }

    fn identity(&self) -> T {
        return T::default();
    }
}

/// Multiplication over the primitive numeric types. Identity is `1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Product;

macro_rules! impl_product {
    ($($t:ty),*) => {$(
        impl Combine<$t> for Product {
            fn combine(&self, a: &$t, b: &$t) -> $t {
                return a * b;
            }

            fn identity(&self) -> $t {
                return 1 as $t;
            }
        }
    )*};
}

impl_product!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

/// Minimum over the primitive integer types. Identity is the type's `MAX`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Min;

/// Maximum over the primitive integer types. Identity is the type's `MIN`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Max;

macro_rules! impl_min_max {
    ($($t:ty),*) => {$(
        impl Combine<$t> for Min {
            fn combine(&self, a: &$t, b: &$t) -> $t {
                return *a.min(b);
            }

            fn identity(&self) -> $t {
                return <$t>::MAX;
            }
        }

        impl Combine<$t> for Max {
            fn combine(&self, a: &$t, b: &$t) -> $t {
                return *a.max(b);
            }

            fn identity(&self) -> $t {
                return <$t>::MIN;
            }
        }
    )*};
}

impl_min_max!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// A combiner built from a closure plus an explicit identity value.
///
/// Covers operators with no stock combiner. The identity must be the
/// neutral element of the closure, and the closure must be associative;
/// neither is checkable here, so both are caller contracts.
#[derive(Clone, Copy, Debug)]
pub struct CombineFn<F, T> {
    op: F,
    identity: T,
}

impl<F, T> CombineFn<F, T> {
    /// Create a combiner from a binary operator and its identity value.
    pub fn new(op: F, identity: T) -> CombineFn<F, T> {
        return CombineFn { op, identity };
    }
}

impl<F, T> Combine<T> for CombineFn<F, T>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    fn combine(&self, a: &T, b: &T) -> T {
        return (self.op)(a, b);
    }

    fn identity(&self) -> T {
        return self.identity.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_combine() {
        assert_eq!(Sum.combine(&5, &3), 8);
        let zero: i32 = Sum.identity();
        assert_eq!(zero, 0);
    }

    #[test]
    fn product_combine() {
        assert_eq!(Product.combine(&5, &3), 15);
        let one: i64 = Product.identity();
        assert_eq!(one, 1);
    }

    #[test]
    fn min_combine() {
        assert_eq!(Min.combine(&5, &3), 3);
        let id: u32 = Min.identity();
        assert_eq!(id, u32::MAX);
        assert_eq!(Min.combine(&id, &7), 7);
    }

    #[test]
    fn max_combine() {
        assert_eq!(Max.combine(&5, &3), 5);
        let id: i32 = Max.identity();
        assert_eq!(id, i32::MIN);
        assert_eq!(Max.combine(&id, &-7), -7);
    }

    #[test]
    fn closure_combine_keeps_order() {
        let concat = CombineFn::new(|a: &String, b: &String| format!("{a}{b}"), String::new());
        let ab = "ab".to_string();
        let cd = "cd".to_string();
        assert_eq!(concat.combine(&ab, &cd), "abcd");
        assert_eq!(concat.combine(&cd, &ab), "cdab");
        assert_eq!(concat.combine(&concat.identity(), &ab), "ab");
    }

    #[test]
    fn sum_identity_is_neutral() {
        let zero: i32 = Sum.identity();
        assert_eq!(Sum.combine(&zero, &42), 42);
        assert_eq!(Sum.combine(&42, &zero), 42);
    }
}
