//! Cost algebras: a zero, an associative addition and a total order.

use num_traits::Zero;

use std::cmp::Ordering;
use std::marker::PhantomData;
use std::ops::Add;

/// The operations a search needs on path costs.
///
/// Implementations must make `add` associative with `zero` as its identity,
/// and `compare` must be a total order. Costs handed to a search are expected
/// to be non-negative w.r.t. that order.
pub trait CostAlgebra<C> {
    fn zero(&self) -> C;
    fn add(&self, a: &C, b: &C) -> C;
    fn compare(&self, a: &C, b: &C) -> Ordering;
}

/// The natural arithmetic and order of a numeric type.
#[derive(Debug)]
pub struct NaturalCosts<T>(PhantomData<fn() -> T>);

impl<T> NaturalCosts<T> {
    pub fn new() -> NaturalCosts<T> {
        NaturalCosts(PhantomData)
    }
}

impl<T> Default for NaturalCosts<T> {
    fn default() -> NaturalCosts<T> {
        NaturalCosts::new()
    }
}

impl<T> Clone for NaturalCosts<T> {
    fn clone(&self) -> NaturalCosts<T> {
        NaturalCosts::new()
    }
}

impl<T> Copy for NaturalCosts<T> {}

/// Numeric types with a total natural order.
///
/// Floating point types order by `total_cmp`, so that a NaN cost
/// sorts after every finite cost instead of poisoning the queue.
pub trait NaturalOrder {
    fn natural_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! natural_order_ord {
    ($($t:ty),*) => {
        $(impl NaturalOrder for $t {
            fn natural_cmp(&self, other: &$t) -> Ordering {
                self.cmp(other)
            }
        })*
    }
}

natural_order_ord!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl NaturalOrder for f32 {
    fn natural_cmp(&self, other: &f32) -> Ordering {
        self.total_cmp(other)
    }
}

impl NaturalOrder for f64 {
    fn natural_cmp(&self, other: &f64) -> Ordering {
        self.total_cmp(other)
    }
}

impl<T> CostAlgebra<T> for NaturalCosts<T>
where
    T: Zero + Copy + Add<Output = T> + NaturalOrder,
{
    fn zero(&self) -> T {
        T::zero()
    }

    fn add(&self, a: &T, b: &T) -> T {
        *a + *b
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.natural_cmp(b)
    }
}

/// A cost algebra assembled from plain function values.
///
/// ```
/// use routekit::cost::{CostAlgebra, CostFns};
///
/// // Costs as (hops, distance) pairs, ordered lexicographically.
/// let costs = CostFns::new(
///     (0u32, 0u32),
///     |a: &(u32, u32), b: &(u32, u32)| (a.0 + b.0, a.1 + b.1),
///     |a: &(u32, u32), b: &(u32, u32)| a.cmp(b),
/// );
/// assert_eq!(costs.add(&(1, 5), &(1, 2)), (2, 7));
/// ```
#[derive(Clone, Debug)]
pub struct CostFns<C, A, O> {
    zero: C,
    add: A,
    compare: O,
}

impl<C, A, O> CostFns<C, A, O>
where
    C: Clone,
    A: Fn(&C, &C) -> C,
    O: Fn(&C, &C) -> Ordering,
{
    pub fn new(zero: C, add: A, compare: O) -> CostFns<C, A, O> {
        CostFns { zero, add, compare }
    }
}

impl<C, A, O> CostAlgebra<C> for CostFns<C, A, O>
where
    C: Clone,
    A: Fn(&C, &C) -> C,
    O: Fn(&C, &C) -> Ordering,
{
    fn zero(&self) -> C {
        self.zero.clone()
    }

    fn add(&self, a: &C, b: &C) -> C {
        (self.add)(a, b)
    }

    fn compare(&self, a: &C, b: &C) -> Ordering {
        (self.compare)(a, b)
    }
}
