/*
 * This file is part of the factor-engine package.
 *
 * For the full copyright and license information, please view the LICENSE
 * file that was distributed with this source code.
 */

//! C7: one Pollard-Rho trial over a composite Montgomery modulus, using
//! Brent's cycle-shortened variant (batched GCD accumulation instead of a
//! GCD every step) with the polynomial `f(y) = y^2 + c`.
//!
//! Batching structure is grounded on the classic Brent implementation in
//! `TheAlgorithms-Rust`'s `pollard_rho.rs` (tortoise/hare replaced by a
//! leap-doubling schedule, periodic GCD over an accumulated product of
//! differences, with a backtracking recovery loop when the accumulated GCD
//! degenerates to `n` itself) generalized to run over Montgomery form
//! instead of a modulus-sized native integer, and driven by a
//! recursion-depth-derived `c` rather than a random seed (§5: no
//! randomness is consulted).

use crate::montgomery::Montgomery;
use crate::numeric::{gcd, UInt};

/// Default batch size between GCD checks; a pure performance tunable per
/// §4.7 ("expected_iterations hint").
const DEFAULT_BATCH: u32 = 128;

/// Runs one Brent-cycle trial for composite `n` under Montgomery context
/// `m`, with polynomial parameter `c` (a plain integer, `0 < c < n - 1`).
///
/// Returns `Some(factor)` with `1 < factor < n` on success, or `None` if
/// this attempt failed to separate a cycle (the caller should retry with
/// `c + 1`, per §4.7's wraparound rule).
///
/// # Precondition
/// `c` must not be `0` or `n - 2` (degenerate polynomials); the caller
/// (C8, §4.8) is responsible for the wraparound adjustment before calling.
pub fn attempt<T: UInt>(m: &Montgomery<T>, n: T, c: T) -> Option<T> {
    debug_assert!(c != T::ZERO && c != n.wrapping_sub(T::TWO));

    debug_assert!(c < n);
    let c_mont = m.convert_in(c);
    let f = |y: T| m.add(m.square(y), c_mont);

    let mut y = m.unity();
    let mut x;
    let mut x_start;
    let mut product = m.unity();
    let mut g = T::ONE;
    let mut max_iterations: u64 = 1;

    while g == T::ONE {
        x = y;
        for _ in 1..max_iterations {
            y = f(y);
        }

        let mut done_this_round: u64 = 0;
        while done_this_round < max_iterations && g == T::ONE {
            x_start = y;
            let batch = (DEFAULT_BATCH as u64).min(max_iterations - done_this_round);
            for _ in 0..batch {
                y = f(y);
                let diff = m.sub(x, y);
                let diff_canon = m.canonicalize(diff);
                product = m.mul(product, m.convert_in(diff_canon));
            }
            g = gcd(m.convert_out(product), n);
            done_this_round += batch;
            x = x_start;
        }
        max_iterations *= 2;
        if max_iterations > n.to_u128().min(1u128 << 40) as u64 {
            // Give up this attempt rather than looping forever on a
            // pathological (c, n) pair; the caller will retry with c+1.
            break;
        }
    }

    if g == T::ONE || g == n {
        // The batched product lost the exact cycle point; restart from the
        // tortoise checkpoint `x` and single-step the hare, as Brent's
        // method requires when the accumulated GCD degenerates.
        let mut y = x;
        loop {
            y = f(y);
            let diff = m.sub(x, y);
            let diff_canon = m.canonicalize(diff);
            if diff_canon == T::ZERO {
                return None;
            }
            let candidate = gcd(diff_canon, n);
            if candidate > T::ONE {
                return if candidate < n { Some(candidate) } else { None };
            }
        }
    }

    Some(g)
}
