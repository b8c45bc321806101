/*
 * This file is part of the factor-engine package.
 *
 * For the full copyright and license information, please view the LICENSE
 * file that was distributed with this source code.
 */

//! C6: small-prime trial division using Mayer's constant-divisor trick
//! (C3), peeling out factor 2 and the first `SIZE` odd primes.

use crate::numeric::inverse::first_odd_primes;
use crate::numeric::mayer::MayerDivisor;
use crate::numeric::UInt;
use crate::sink::FactorSink;

/// Number of odd primes tried by the default trial divider (the 135th odd
/// prime is 773; this is the teacher's own historical table size class,
/// chosen as a practical cutoff before Pollard-Rho starts paying off).
pub const DEFAULT_TRIAL_SIZE: usize = 135;

/// What's left after peeling small primes: either fully factored (`cofactor
/// == 1`), or a cofactor known to have no factor below `next_prime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remainder<T> {
    pub cofactor: T,
    pub next_prime: u64,
}

/// Peels factor 2, then the first `SIZE` odd primes, pushing every prime
/// factor found into `sink`. Returns the remaining cofactor and the first
/// untried prime boundary.
pub fn trial_divide<T: UInt, S: FactorSink<T>, const SIZE: usize>(
    mut x: T,
    sink: &mut S,
) -> Remainder<T> {
    debug_assert!(x >= T::from_u64(2));

    while x.is_even() {
        sink.push(T::from_u64(2));
        x = x >> 1;
    }

    let primes: [u64; SIZE] = first_odd_primes();
    for &p in primes.iter() {
        if x == T::ONE {
            return Remainder {
                cofactor: x,
                next_prime: p,
            };
        }
        let p_t = T::from_u64(p);
        if p_t > x {
            return Remainder {
                cofactor: x,
                next_prime: p,
            };
        }
        let divisor = MayerDivisor::new(p_t);
        while let Some(q) = divisor.try_divide(x) {
            sink.push(p_t);
            x = q;
        }
    }

    let next_prime = if SIZE == 0 {
        3
    } else {
        crate::numeric::inverse::get_next_prime(primes[SIZE - 1])
    };

    if x == T::ONE {
        return Remainder {
            cofactor: x,
            next_prime,
        };
    }

    // If the survivor is smaller than next_prime^2 it cannot have two
    // factors both >= next_prime, so it must itself be prime.
    let bound = crate::numeric::inverse::get_constant_squared_u64(next_prime);
    if x.to_u128() < bound {
        sink.push(x);
        return Remainder {
            cofactor: T::ONE,
            next_prime,
        };
    }

    Remainder {
        cofactor: x,
        next_prime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_factors_small_composites() {
        let mut out: Vec<u64> = Vec::new();
        let rem = trial_divide::<u64, _, 135>(2 * 3 * 5 * 13 * 17, &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![2, 3, 5, 13, 17]);
        assert_eq!(rem.cofactor, 1);
    }

    #[test]
    fn leaves_large_prime_cofactor_untouched() {
        let mut out: Vec<u64> = Vec::new();
        let big_prime = 4_294_967_291u64; // prime, > any of the first 135 primes squared
        let rem = trial_divide::<u64, _, 135>(big_prime, &mut out);
        assert!(out.is_empty());
        assert_eq!(rem.cofactor, big_prime);
    }

    #[test]
    fn emits_prime_survivor_below_next_prime_squared() {
        let mut out: Vec<u64> = Vec::new();
        // 773 is the 135th odd prime-ish boundary; pick any small prime
        // that trial division alone should catch as "obviously prime".
        let rem = trial_divide::<u64, _, 2>(97, &mut out);
        assert_eq!(out, vec![97]);
        assert_eq!(rem.cofactor, 1);
    }

    #[test]
    fn product_of_emitted_factors_divides_input() {
        for x in 2u64..5000 {
            let mut out: Vec<u64> = Vec::new();
            let rem = trial_divide::<u64, _, 50>(x, &mut out);
            let product: u64 = out.iter().product();
            assert_eq!(x % product, 0);
            assert_eq!(product.checked_mul(rem.cofactor), Some(x));
        }
    }
}
