/*
 * This file is part of the factor-engine package.
 *
 * For the full copyright and license information, please view the LICENSE
 * file that was distributed with this source code.
 */

//! A deterministic integer factorization engine for unsigned integers from
//! 8 up to 128 bits wide.
//!
//! The engine's three core subsystems are a Montgomery modular-arithmetic
//! substrate ([`montgomery`]), a deterministic Miller-Rabin primality test
//! ([`miller_rabin`]), and a factorization pipeline built from small-prime
//! trial division ([`trial`]), Pollard-Rho-Brent ([`rho`]) and a
//! guaranteed-terminating wheel sweep ([`wheel`]), tied together by the
//! recursive factorizer in [`factor`]. [`factor_table`] adds an optional
//! precomputed lookup table for 32-bit-and-narrower inputs.

pub mod config;
pub mod error;
pub mod factor;
pub mod factor_table;
pub mod miller_rabin;
pub mod montgomery;
pub mod numeric;
pub mod rho;
pub mod sieve;
pub mod sink;
pub mod trial;
pub mod wheel;

pub use config::Config;
pub use error::{Error, Result};
pub use factor::{factorize, factorize_to_array, factorize_to_sequence, Factors};
pub use miller_rabin::is_prime;
pub use numeric::UInt;
pub use sink::FactorSink;

/// Factors `2 <= x < 2^bits_limit` using a precomputed [`factor_table::FactorTable`]
/// instead of the general pipeline (§6's `factor_by_table`).
pub fn factor_by_table<S: FactorSink<u64>>(x: u64, table: &factor_table::FactorTable, sink: &mut S) {
    table.lookup(x, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_surface_agrees_across_entry_points() {
        let x = 2u64 * 3 * 5 * 13 * 17;

        let mut sequence: Vec<u64> = Vec::new();
        factorize_to_sequence(x, &mut sequence);
        sequence.sort_unstable();

        let factors = factorize(x);
        let mut via_factors = factors.into_vec();
        via_factors.sort_unstable();

        assert_eq!(sequence, via_factors);
        assert_eq!(sequence, vec![2, 3, 5, 13, 17]);
    }

    #[test]
    fn is_prime_matches_known_values() {
        assert!(is_prime(2u64));
        assert!(is_prime(104_729u64));
        assert!(!is_prime(104_730u64));
    }

    #[test]
    fn factor_by_table_matches_general_pipeline() {
        let table = factor_table::FactorTable::build(16, false);
        for x in 17u64..2000 {
            let mut via_table = Vec::new();
            factor_by_table(x, &table, &mut via_table);
            via_table.sort_unstable();

            let mut via_pipeline = Vec::new();
            factorize_to_sequence(x, &mut via_pipeline);
            via_pipeline.sort_unstable();

            assert_eq!(via_table, via_pipeline, "mismatch for {x}");
        }
    }
}
