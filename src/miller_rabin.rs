/*
 * This file is part of the factor-engine package.
 *
 * For the full copyright and license information, please view the LICENSE
 * file that was distributed with this source code.
 */

//! C5: deterministic Miller-Rabin, dispatched over a witness set chosen
//! from the modulus's bit width.

use crate::montgomery::Montgomery;
use crate::numeric::UInt;

/// Outcome of testing `n` against a witness set.
///
/// Grounded on the `miller_rabin::Result` shape referenced by the
/// `ricardoaiglesias-coreutils` fork of `uu_factor`
/// (`use crate::{miller_rabin, rho, table};` /
/// `miller_rabin::Result::{Prime, Composite, Pseudoprime}`): `Composite`
/// carries an opportunistic factor hint (§4.5.1) so the recursive
/// factorizer can skip a Pollard-Rho trial entirely when one falls out of
/// the primality test for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Result<T> {
    /// Every witness passed: prime within the deterministic range of the
    /// witness set (or "probably prime" for the 128-bit probabilistic
    /// tier, §4.5).
    Prime,
    /// Definitely composite, with a non-trivial factor discovered as a
    /// byproduct of a witness's repeated-squaring loop.
    Composite(T),
    /// Definitely composite (a witness failed outright), but no factor
    /// hint fell out of the test. The caller should proceed to Pollard-Rho.
    Pseudoprime,
}

/// n < 2^32 (covers up to 4,759,123,141).
pub const WITNESSES_32: &[u64] = &[2, 7, 61];
/// n < 2^44 (covers up to 341,550,071,728,321).
pub const WITNESSES_44: &[u64] = &[2, 3, 5, 7, 11, 13, 17];
/// n < 2^64: the 7-base set discovered by Jim Sinclair
/// (http://miller-rabin.appspot.com), deterministic for every n < 2^64.
pub const WITNESSES_64: &[u64] = &[2, 325, 9375, 28178, 450775, 9780504, 1795265022];
/// n >= 2^64: not proven deterministic; used only as a strong probabilistic
/// filter ahead of Pollard-Rho, per §4.5's "general probabilistic variant".
pub const WITNESSES_128: &[u64] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
];

/// Selects the witness set's contract tier for a modulus of the given bit
/// width (§4.5: "witness-set selection by bit range").
pub fn witnesses_for_bits(bits: u32) -> &'static [u64] {
    if bits <= 32 {
        WITNESSES_32
    } else if bits <= 44 {
        WITNESSES_44
    } else if bits <= 64 {
        WITNESSES_64
    } else {
        WITNESSES_128
    }
}

/// Runs Miller-Rabin for odd `n > 1` over Montgomery context `m`, using the
/// given witness set.
///
/// Per-witness loop batches (`TRIAL_SIZE`, §4.5) are left to the optimizer;
/// the contract only requires that every base be tried, not in what
/// grouping.
pub fn test<T: UInt>(n: T, m: &Montgomery<T>, witnesses: &[u64]) -> Result<T> {
    debug_assert_eq!(m.modulus(), n);
    debug_assert!(n.is_odd() && n > T::ONE);

    if n == T::from_u64(2) || n == T::from_u64(3) {
        return Result::Prime;
    }

    // n - 1 = 2^s * d, d odd.
    let n_minus_1 = n.wrapping_sub(T::ONE);
    let s = n_minus_1.trailing_zeros();
    let d = n_minus_1 >> s;

    'witness: for &a in witnesses {
        let a = T::from_u64(a);
        if a >= n {
            continue;
        }
        if a == T::ZERO {
            continue;
        }

        let mut x = m.pow(m.convert_in(a), d);
        if m.equals_canonical(x, m.unity()) || m.equals_canonical(x, m.neg_one()) {
            continue 'witness;
        }

        for _ in 1..s {
            let prev = x;
            x = m.square(x);
            if m.equals_canonical(x, m.neg_one()) {
                continue 'witness;
            }
            if m.equals_canonical(x, m.unity()) {
                // x_prev^2 == 1 (mod n) but x_prev != +-1: a non-trivial
                // square root of unity exposes a factor via gcd(x_prev-1, n).
                let prev_canon = m.canonicalize(prev);
                let g = crate::numeric::gcd(
                    if prev_canon >= T::ONE {
                        prev_canon.wrapping_sub(T::ONE)
                    } else {
                        T::ZERO
                    },
                    n,
                );
                if g > T::ONE && g < n {
                    return Result::Composite(g);
                }
                return Result::Pseudoprime;
            }
        }
        // No square ever reached -1 (mod n): definitely composite, no hint.
        return Result::Pseudoprime;
    }

    Result::Prime
}

/// Convenience: tests primality of `n` by building a fresh Montgomery
/// context at the tightest flavor and the witness set appropriate to `n`'s
/// value.
pub fn is_prime<T: UInt>(n: T) -> bool {
    if n < T::from_u64(2) {
        return false;
    }
    if n.is_even() {
        return n == T::from_u64(2);
    }
    let flavor = crate::montgomery::Flavor::choose(n);
    let m = Montgomery::new(n, flavor);
    let bits = T::BITS - n.leading_zeros();
    matches!(test(n, &m, witnesses_for_bits(bits)), Result::Prime)
}
