/*
 * This file is part of the factor-engine package.
 *
 * For the full copyright and license information, please view the LICENSE
 * file that was distributed with this source code.
 */

//! C8: the recursive factorizer tying together C6 (small-prime trial
//! division), C5 (primality gate with opportunistic hint), C7 (Pollard-Rho
//! Brent) and C9 (wheel fallback) into the engine's entry points.
//!
//! `Factors<T>` is grounded on the `Factors` type in the
//! `ricardoaiglesias-coreutils` fork's `factor.rs` (a `BTreeMap`-backed
//! prime-to-exponent multiset with `push`/`add`/`MulAssign` combination),
//! generalized from a fixed `u64` to any `UInt` width. The recursion
//! structure below is likewise grounded on that file's `_factor`/`factor`
//! pair, expanded with the §4.5.1 factor-hint shortcut and the §4.8 step-7
//! wheel fallback.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::MulAssign;

use crate::miller_rabin;
use crate::montgomery::{Flavor, Montgomery};
use crate::numeric::{mayer, UInt};
use crate::rho;
use crate::sink::FactorSink;
use crate::trial::{self, DEFAULT_TRIAL_SIZE};
use crate::wheel;

/// A multiset of prime factors, stored as prime -> exponent.
#[derive(Debug, Clone)]
pub struct Factors<T: UInt> {
    f: BTreeMap<T, u32>,
}

impl<T: UInt> Factors<T> {
    pub fn one() -> Self {
        Factors { f: BTreeMap::new() }
    }

    /// Builds a `Factors` holding a single prime with exponent 1.
    ///
    /// # Precondition
    /// `p` must actually be prime; debug-checked, not re-verified here.
    pub fn prime(p: T) -> Self {
        debug_assert!(miller_rabin::is_prime(p));
        let mut f = Self::one();
        f.push(p);
        f
    }

    pub fn add(&mut self, prime: T, exp: u32) {
        debug_assert!(exp > 0);
        let n = *self.f.get(&prime).unwrap_or(&0);
        self.f.insert(prime, exp + n);
    }

    pub fn push(&mut self, prime: T) {
        self.add(prime, 1)
    }

    pub fn is_empty(&self) -> bool {
        self.f.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &u32)> {
        self.f.iter()
    }

    /// Expands the multiset into an ordered (ascending prime) `Vec`, each
    /// prime repeated per its exponent.
    pub fn into_vec(self) -> Vec<T> {
        let mut out = Vec::new();
        for (p, exp) in self.f {
            for _ in 0..exp {
                out.push(p);
            }
        }
        out
    }

    #[cfg(test)]
    fn product_u128(&self) -> u128 {
        self.f
            .iter()
            .fold(1u128, |acc, (p, exp)| acc * p.to_u128().pow(*exp))
    }
}

impl<T: UInt> Default for Factors<T> {
    fn default() -> Self {
        Self::one()
    }
}

impl<T: UInt> MulAssign<Factors<T>> for Factors<T> {
    fn mul_assign(&mut self, other: Factors<T>) {
        for (prime, exp) in other.f {
            self.add(prime, exp);
        }
    }
}

impl<T: UInt> FactorSink<T> for Factors<T> {
    fn push(&mut self, prime: T) {
        Factors::push(self, prime)
    }
}

impl<T: UInt + fmt::Display> fmt::Display for Factors<T> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, exp) in self.f.iter() {
            for _ in 0..*exp {
                write!(out, " {p}")?
            }
        }
        Ok(())
    }
}

/// `c` must never land on 0 or `n - 2`; on retry it wraps back to 1
/// instead of continuing past `n - 2` (§4.7's wraparound rule).
fn next_c<T: UInt>(n: T, c: T) -> T {
    if c >= n.wrapping_sub(T::TWO) {
        T::ONE
    } else {
        c.wrapping_add(T::ONE)
    }
}

/// Divides `x` by its known factor `d`, which must divide it exactly (both
/// odd, since every cofactor reaching this point has already had 2 peeled
/// out by C6).
fn exact_divide<T: UInt>(x: T, d: T) -> T {
    mayer::divides(d, x).expect("factor hint must divide its modulus exactly")
}

/// Emits the prime factorization of `x >= 2` into `sink`, trying small
/// primes first (C6), then recursing through the primality gate (C5),
/// Pollard-Rho (C7) and, only on exhaustion, the guaranteed-terminating
/// wheel sweep (C9).
pub fn factorize_to_sequence<T: UInt, S: FactorSink<T>>(x: T, sink: &mut S) {
    assert!(x >= T::TWO, "precondition violated: factorize requires x >= 2");
    peel_small_primes(x, sink);
}

fn peel_small_primes<T: UInt, S: FactorSink<T>>(x: T, sink: &mut S) {
    let remainder = trial::trial_divide::<T, S, DEFAULT_TRIAL_SIZE>(x, sink);
    let q = remainder.cofactor;
    if q == T::ONE {
        return;
    }

    let bound = crate::numeric::inverse::get_constant_squared_u64(remainder.next_prime);
    if q.to_u128() < bound {
        sink.push(q);
        return;
    }

    factor_recurse(q, sink, 0);
}

/// Recurses on a value already known to have no factor below the
/// trial-division boundary: decides primality, then splits via C5's hint
/// or C7, recursing on both halves.
fn factor_recurse<T: UInt, S: FactorSink<T>>(x: T, sink: &mut S, depth: u64) {
    if x == T::ONE {
        return;
    }

    let flavor = Flavor::choose(x);
    let m = Montgomery::new(x, flavor);
    let bits = T::BITS - x.leading_zeros();

    match miller_rabin::test(x, &m, miller_rabin::witnesses_for_bits(bits)) {
        miller_rabin::Result::Prime => {
            sink.push(x);
        }
        miller_rabin::Result::Composite(hint) => {
            let cofactor = exact_divide(x, hint);
            factor_recurse(hint, sink, depth + 1);
            factor_recurse(cofactor, sink, depth + 1);
        }
        miller_rabin::Result::Pseudoprime => {
            run_rho_then_recurse(x, &m, sink, depth);
        }
    }
}

fn run_rho_then_recurse<T: UInt, S: FactorSink<T>>(
    x: T,
    m: &Montgomery<T>,
    sink: &mut S,
    depth: u64,
) {
    // c is seeded from recursion depth so the sequence of attempts is a
    // deterministic function of (depth, retry count), per §5's "no
    // randomness is consulted".
    let mut c = T::from_u64((depth % 0xFFFF).max(1));
    if c >= x.wrapping_sub(T::TWO) {
        c = T::ONE;
    }

    let attempt_budget = x.to_u128().min(1u128 << 32) as u64;
    let mut attempts: u64 = 0;
    loop {
        if let Some(f) = rho::attempt(m, x, c) {
            let cofactor = exact_divide(x, f);
            factor_recurse(f, sink, depth + 1);
            factor_recurse(cofactor, sink, depth + 1);
            return;
        }
        c = next_c(x, c);
        attempts += 1;
        if attempts >= attempt_budget {
            tracing::warn!(
                bits = T::BITS - x.leading_zeros(),
                depth,
                "FactorizationExhausted: rho exhausted its attempt budget, falling back to wheel factorization"
            );
            wheel::factorize(x, sink);
            return;
        }
    }
}

/// Convenience entry point returning the teacher-shaped `Factors` multiset
/// instead of writing into a caller-supplied sink.
pub fn factorize<T: UInt>(x: T) -> Factors<T> {
    let mut factors = Factors::one();
    factorize_to_sequence(x, &mut factors);
    factors
}

/// Writes the prime factorization of `x` into a fixed-capacity array,
/// returning the populated prefix's length. `N` should be at least
/// `T::BITS as usize` (the maximum possible factor count, all factors 2).
pub fn factorize_to_array<T: UInt, const N: usize>(x: T) -> ([T; N], usize) {
    let mut buf: smallvec::SmallVec<[T; 32]> = smallvec::SmallVec::new();
    factorize_to_sequence(x, &mut buf);
    let mut out = [T::ZERO; N];
    let count = buf.len().min(N);
    out[..count].copy_from_slice(&buf[..count]);
    (out, count)
}
