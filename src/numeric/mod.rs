/*
 * This file is part of the factor-engine package.
 *
 * For the full copyright and license information, please view the LICENSE
 * file that was distributed with this source code.
 */

//! C1: uniform properties of the unsigned integer widths the engine runs over.
//!
//! The engine is parameterized over W ∈ {8, 16, 32, 64, 128}. Every width
//! needs the same handful of facts (bit count, max value, a widening
//! multiply) but Rust has no native 256-bit integer to serve as the "2W"
//! companion type once W = 128, so `UInt::widening_mul` always returns a
//! `(hi, lo)` pair in `Self` rather than a single wider type (the "multiply
//! to hi and lo halves" primitive called for in the design notes).

pub mod inverse;
pub mod mayer;

/// Binary (Stein's) GCD: needs only shifts, subtraction and comparison, so
/// it works uniformly across every width without requiring a division
/// primitive. Used by C5's opportunistic factor hint and C7's Brent-cycle
/// batched GCD.
pub fn gcd<T: UInt>(mut a: T, mut b: T) -> T {
    if a == T::ZERO {
        return b;
    }
    if b == T::ZERO {
        return a;
    }
    let shift = a.trailing_zeros().min(b.trailing_zeros());
    a = a >> a.trailing_zeros();
    loop {
        b = b >> b.trailing_zeros();
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }
        b = b.wrapping_sub(a);
        if b == T::ZERO {
            break;
        }
    }
    a << shift
}

use std::fmt::Debug;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

/// Uniform interface over the unsigned widths the factorization engine
/// supports. Implemented for `u8`, `u16`, `u32`, `u64` and `u128`.
pub trait UInt:
    Copy
    + Clone
    + Debug
    + Default
    + Eq
    + Ord
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    /// Number of bits in this width (W).
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    /// 2^W - 1.
    const MAX: Self;

    fn from_u64(v: u64) -> Self;
    fn to_u64(self) -> u64;
    fn to_u128(self) -> u128;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;
    fn overflowing_add(self, rhs: Self) -> (Self, bool);
    fn overflowing_sub(self, rhs: Self) -> (Self, bool);
    fn checked_sub(self, rhs: Self) -> Option<Self>;

    fn is_even(self) -> bool {
        self & Self::ONE == Self::ZERO
    }
    fn is_odd(self) -> bool {
        !self.is_even()
    }

    fn trailing_zeros(self) -> u32;
    fn leading_zeros(self) -> u32;

    /// `self * rhs`, returned as `(hi, lo)` such that the true product is
    /// `hi * 2^BITS + lo`. This is the width-agnostic replacement for a
    /// native "2W" integer type: every width, including 128, implements it
    /// directly rather than delegating to a double-width type that may not
    /// exist.
    fn widening_mul(self, rhs: Self) -> (Self, Self);

    /// `(lo + carry_in, carry_out)` of `self + rhs`, threading a 0/1 carry.
    fn carrying_add(self, rhs: Self, carry_in: bool) -> (Self, bool) {
        let (a, c1) = self.overflowing_add(rhs);
        let (b, c2) = a.overflowing_add(if carry_in { Self::ONE } else { Self::ZERO });
        (b, c1 || c2)
    }
}

macro_rules! impl_uint_native {
    ($t:ty, $bits:expr, $double:ty) => {
        impl UInt for $t {
            const BITS: u32 = $bits;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const TWO: Self = 2;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn from_u64(v: u64) -> Self {
                v as $t
            }
            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }
            #[inline]
            fn to_u128(self) -> u128 {
                self as u128
            }
            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }
            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }
            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }
            #[inline]
            fn wrapping_neg(self) -> Self {
                self.wrapping_neg()
            }
            #[inline]
            fn overflowing_add(self, rhs: Self) -> (Self, bool) {
                num_traits::ops::overflowing::OverflowingAdd::overflowing_add(&self, &rhs)
            }
            #[inline]
            fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
                num_traits::ops::overflowing::OverflowingSub::overflowing_sub(&self, &rhs)
            }
            #[inline]
            fn checked_sub(self, rhs: Self) -> Option<Self> {
                self.checked_sub(rhs)
            }
            #[inline]
            fn trailing_zeros(self) -> u32 {
                self.trailing_zeros()
            }
            #[inline]
            fn leading_zeros(self) -> u32 {
                self.leading_zeros()
            }
            #[inline]
            fn widening_mul(self, rhs: Self) -> (Self, Self) {
                let wide = (self as $double) * (rhs as $double);
                let lo = wide as $t;
                let hi = (wide >> $bits) as $t;
                (hi, lo)
            }
        }
    };
}

impl_uint_native!(u8, 8, u16);
impl_uint_native!(u16, 16, u32);
impl_uint_native!(u32, 32, u64);
impl_uint_native!(u64, 64, u128);

impl UInt for u128 {
    const BITS: u32 = 128;
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const TWO: Self = 2;
    const MAX: Self = u128::MAX;

    #[inline]
    fn from_u64(v: u64) -> Self {
        v as u128
    }
    #[inline]
    fn to_u64(self) -> u64 {
        self as u64
    }
    #[inline]
    fn to_u128(self) -> u128 {
        self
    }
    #[inline]
    fn wrapping_add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
    #[inline]
    fn wrapping_sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
    #[inline]
    fn wrapping_mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }
    #[inline]
    fn wrapping_neg(self) -> Self {
        self.wrapping_neg()
    }
    #[inline]
    fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        num_traits::ops::overflowing::OverflowingAdd::overflowing_add(&self, &rhs)
    }
    #[inline]
    fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        num_traits::ops::overflowing::OverflowingSub::overflowing_sub(&self, &rhs)
    }
    #[inline]
    fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.checked_sub(rhs)
    }
    #[inline]
    fn trailing_zeros(self) -> u32 {
        self.trailing_zeros()
    }
    #[inline]
    fn leading_zeros(self) -> u32 {
        self.leading_zeros()
    }

    /// No native 256-bit type exists, so this splits both operands into
    /// 64-bit limbs and performs schoolbook multiplication, matching the
    /// "multiply to hi and lo halves" primitive from the design notes.
    #[inline]
    fn widening_mul(self, rhs: Self) -> (Self, Self) {
        let a_lo = self as u64 as u128;
        let a_hi = (self >> 64) as u64 as u128;
        let b_lo = rhs as u64 as u128;
        let b_hi = (rhs >> 64) as u64 as u128;

        let lo_lo = a_lo * b_lo;
        let hi_lo = a_hi * b_lo;
        let lo_hi = a_lo * b_hi;
        let hi_hi = a_hi * b_hi;

        let mid = (lo_lo >> 64) + (hi_lo & 0xFFFF_FFFF_FFFF_FFFF) + (lo_hi & 0xFFFF_FFFF_FFFF_FFFF);
        let lo = (lo_lo & 0xFFFF_FFFF_FFFF_FFFF) | (mid << 64);
        let hi = hi_hi + (hi_lo >> 64) + (lo_hi >> 64) + (mid >> 64);
        (hi, lo)
    }
}

/// The "safely promote" mapping (§4.1): the smallest native integer type
/// that `T`'s arithmetic should be carried out in to avoid surprising
/// integer-promotion truncation, distinct from the widening-multiply
/// machinery above (which always stays within `T`). Mirrors
/// `safely_promote_unsigned` from the design's originating C++ source.
pub trait SafelyPromote: UInt {
    type Promoted: UInt + From<Self>;
}

impl SafelyPromote for u8 {
    type Promoted = u32;
}
impl SafelyPromote for u16 {
    type Promoted = u32;
}
impl SafelyPromote for u32 {
    type Promoted = u32;
}
impl SafelyPromote for u64 {
    type Promoted = u64;
}
impl SafelyPromote for u128 {
    type Promoted = u128;
}
