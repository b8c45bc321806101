/*
 * This file is part of the factor-engine package.
 *
 * For the full copyright and license information, please view the LICENSE
 * file that was distributed with this source code.
 */

//! C9: the guaranteed-terminating fallback. Divides out the six primes
//! folded into the wheel's modulus (2, 3, 5, 7, 11, 13) explicitly, then
//! sweeps the 210-cycle of residues coprime to 2·3·5·7, trial-dividing each
//! candidate via the same Mayer-trick divisor used by C6. Unlike C7
//! (Pollard-Rho), this always finishes: it is the terminator the recursive
//! factorizer (C8) falls back to once a Rho attempt budget is exhausted.
//!
//! Grounded on `wheel_factorization210.h`'s structure (cycle of 210, sweep
//! until `maybe_factor^2 > remaining`, emit the survivor as prime at
//! termination), adapted to the Mayer divisor instead of a native
//! `trial_divide` and to only pre-dividing 2,3,5,7,11,13 rather than every
//! prime below 256.

use crate::numeric::mayer::MayerDivisor;
use crate::numeric::UInt;
use crate::sink::FactorSink;

/// Residues coprime to 2·3·5·7 within one 210-cycle, reordered to start
/// right after the explicitly-divided primes 11 and 13 (so the cycle opens
/// at 17) and wrapped at the far end to keep all 48 entries (φ(210) = 48).
const WHEEL_OFFSETS: [u16; 48] = [
    17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97, 101, 103, 107,
    109, 113, 121, 127, 131, 137, 139, 143, 149, 151, 157, 163, 167, 169, 173, 179, 181, 187, 191,
    193, 197, 199, 209, 211, 221, 223,
];

const CYCLE_LEN: u64 = 210;

/// Fully factors `x` by trial division alone, pushing every prime factor
/// into `sink`. Always terminates and is always correct, at the cost of
/// being prohibitively slow once `x`'s smallest prime factor approaches
/// `sqrt(x)` for wide `T`.
pub fn factorize<T: UInt, S: FactorSink<T>>(mut x: T, sink: &mut S) -> T {
    debug_assert!(x >= T::TWO);

    while x.is_even() {
        sink.push(T::TWO);
        x = x >> 1;
    }

    for &p in &[3u64, 5, 7, 11, 13] {
        if x == T::ONE {
            return x;
        }
        let p_t = T::from_u64(p);
        if p_t > x {
            return x;
        }
        let divisor = MayerDivisor::new(p_t);
        while let Some(q) = divisor.try_divide(x) {
            sink.push(p_t);
            x = q;
            if x == T::ONE {
                return x;
            }
        }
    }

    if x == T::ONE {
        return x;
    }

    let cycle_len = T::from_u64(CYCLE_LEN);
    let mut k = T::ZERO;
    'outer: loop {
        let start = k.wrapping_mul(cycle_len);
        for &offset in WHEEL_OFFSETS.iter() {
            let maybe_factor = start.wrapping_add(T::from_u64(offset as u64));
            let (hi, sq) = maybe_factor.widening_mul(maybe_factor);
            if hi != T::ZERO || sq > x {
                break 'outer;
            }
            let divisor = MayerDivisor::new(maybe_factor);
            while let Some(q) = divisor.try_divide(x) {
                sink.push(maybe_factor);
                x = q;
                if x == T::ONE {
                    return x;
                }
            }
        }
        k = k.wrapping_add(T::ONE);
    }

    // No candidate up to sqrt(x) divided evenly: whatever remains is prime.
    sink.push(x);
    T::ONE
}
