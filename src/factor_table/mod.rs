/*
 * This file is part of the factor-engine package.
 *
 * For the full copyright and license information, please view the LICENSE
 * file that was distributed with this source code.
 */

//! C10: a precomputed 32-bit-input factor table. Bit-packed, keyed by a
//! wheel-30030 dense index, carrying one prime factor and a
//! cofactor-is-prime flag per entry. Builder, loader and serializer live
//! here; `reindex` and `format` hold the index arithmetic and the on-disk
//! layout respectively.

pub mod format;
pub mod reindex;

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::miller_rabin;
use crate::sieve::Sieve;
use crate::sink::FactorSink;
use reindex::Reindex;

/// A built or loaded factor table for inputs `2 <= x < 2^bits_limit`.
pub struct FactorTable {
    bits_limit: u32,
    small: bool,
    reindex: Reindex,
    payload: Vec<u8>,
    entry_count: u32,
    /// Dense list of primes below 2^16, needed to decode `small` entries
    /// (which store a prime's *index* in this list, not the prime itself).
    /// Unused (and empty) for `small = false` tables.
    primes_below_2_16: Vec<u32>,
}

impl FactorTable {
    /// Builds a table in memory for `2 <= x < 2^bits_limit` (`bits_limit
    /// <= 32`).
    pub fn build(bits_limit: u32, small: bool) -> Self {
        assert!(
            bits_limit >= 1 && bits_limit <= 32,
            "precondition violated: factor table bits_limit must be in 1..=32"
        );

        let reindex = Reindex::new();
        let limit: u64 = 1u64 << bits_limit;
        let entry_count = count_entries_below(&reindex, limit);
        let bits = format::entry_bit_width(small);
        let payload_bytes = format::payload_byte_len(entry_count, bits)
            .expect("table sized for bits_limit <= 32 always fits a u32 byte count");
        let mut payload = vec![0u8; payload_bytes as usize];

        let primes_below_2_16: Vec<u32> = Sieve::new()
            .take_while(|&p| p < 65536)
            .map(|p| p as u32)
            .collect();

        for idx in 0..entry_count as usize {
            let n = reindex.representative_of(idx);
            let entry = encode_entry(n, small, &primes_below_2_16);
            format::set_bits(&mut payload, idx, bits, entry);
        }

        FactorTable {
            bits_limit,
            small,
            reindex,
            payload,
            entry_count,
            primes_below_2_16,
        }
    }

    pub fn bits_limit(&self) -> u32 {
        self.bits_limit
    }

    pub fn small(&self) -> bool {
        self.small
    }

    /// Looks up the factorization of `2 <= x < 2^bits_limit` using this
    /// table, per §4.10.4.
    pub fn lookup<S: FactorSink<u64>>(&self, x: u64, sink: &mut S) {
        assert!(x >= 2, "precondition violated: factor_by_table requires x >= 2");
        assert!(
            x < (1u64 << self.bits_limit),
            "precondition violated: x does not fit this table's bit limit"
        );

        let mut q = x;
        for &p in &[2u64, 3, 5, 7, 11, 13] {
            while q % p == 0 {
                sink.push(p);
                q /= p;
            }
        }

        let bits = format::entry_bit_width(self.small);
        while q != 1 {
            let idx = self.reindex.index_of(q as u32);
            let encoded = format::get_bits(&self.payload, idx, bits);
            if encoded == 0 {
                sink.push(q);
                return;
            }
            let (p, cofactor_is_prime) = self.decode(encoded);
            sink.push(p);
            q /= p;
            if cofactor_is_prime {
                sink.push(q);
                return;
            }
        }
    }

    fn decode(&self, encoded: u32) -> (u64, bool) {
        let cofactor_is_prime = encoded & 1 != 0;
        let field = encoded >> 1;
        let p = if self.small {
            self.primes_below_2_16[field as usize] as u64
        } else {
            (field as u64) * 2 + 1
        };
        (p, cofactor_is_prime)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::FileOpenFailure {
            path: path.to_path_buf(),
            source,
        })?;
        let header = format::Header {
            format_id: format::format_id_for(self.small),
            entry_count: self.entry_count,
            payload_bytes: self.payload.len() as u32,
        };
        format::write_header(&mut file, &header).map_err(|source| Error::FileWriteFailure {
            path: path.to_path_buf(),
            source,
        })?;
        file.write_all(&self.payload)
            .map_err(|source| Error::FileWriteFailure {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(())
    }

    pub fn load(path: &Path, bits_limit: u32, small: bool) -> Result<Self> {
        let path_owned: PathBuf = path.to_path_buf();
        let mut file = File::open(path).map_err(|source| Error::FileOpenFailure {
            path: path_owned.clone(),
            source,
        })?;
        let header = format::read_header(&mut file).map_err(|source| Error::FileReadFailure {
            path: path_owned.clone(),
            source,
        })?;

        let reindex = Reindex::new();
        let limit: u64 = 1u64 << bits_limit;
        let entry_count = count_entries_below(&reindex, limit);
        let bits = format::entry_bit_width(small);
        let expected_payload_bytes = format::payload_byte_len(entry_count, bits)
            .expect("table sized for bits_limit <= 32 always fits a u32 byte count");
        let expected_format_id = format::format_id_for(small);

        if header.format_id != expected_format_id
            || header.entry_count != entry_count
            || header.payload_bytes != expected_payload_bytes
        {
            return Err(Error::FileFormatMismatch {
                path: path_owned,
                expected_format_id,
                expected_entry_count: entry_count,
                expected_payload_bytes,
                found_format_id: header.format_id,
                found_entry_count: header.entry_count,
                found_payload_bytes: header.payload_bytes,
            });
        }

        let mut payload = vec![0u8; header.payload_bytes as usize];
        file.read_exact(&mut payload)
            .map_err(|source| Error::FileReadFailure {
                path: path_owned,
                source,
            })?;

        let primes_below_2_16 = if small {
            Sieve::new().take_while(|&p| p < 65536).map(|p| p as u32).collect()
        } else {
            Vec::new()
        };

        Ok(FactorTable {
            bits_limit,
            small,
            reindex,
            payload,
            entry_count,
            primes_below_2_16,
        })
    }
}

fn count_entries_below(reindex: &Reindex, limit: u64) -> u32 {
    let residues = reindex.residues();
    let mut count: u64 = 0;
    let mut q: u64 = 0;
    'outer: loop {
        let base = q * reindex::WHEEL_MODULUS as u64;
        if base >= limit {
            break;
        }
        for &r in residues {
            let n = base + r as u64;
            if n >= limit {
                break 'outer;
            }
            count += 1;
        }
        q += 1;
    }
    count as u32
}

/// Computes the §4.10.3 entry for representative `n`: `0` if `n` is prime
/// (or, vacuously, `< 2`), otherwise the largest prime factor of `n` below
/// 2^16 packed with the cofactor-is-prime flag.
fn encode_entry(n: u64, small: bool, primes_below_2_16: &[u32]) -> u32 {
    if n < 2 || miller_rabin::is_prime(n) {
        return 0;
    }

    let mut largest: Option<u64> = None;
    let mut remaining = n;
    for &p in primes_below_2_16 {
        let p = p as u64;
        if remaining == 1 {
            break;
        }
        while remaining % p == 0 {
            largest = Some(p);
            remaining /= p;
        }
    }
    let p = largest.expect("composite n < 2^32 always has a prime factor below 2^16");

    let cofactor = n / p;
    let cofactor_is_prime = miller_rabin::is_prime(cofactor);
    let flag = cofactor_is_prime as u32;

    if small {
        let index = primes_below_2_16
            .binary_search(&(p as u32))
            .expect("p was drawn from primes_below_2_16") as u32;
        (index << 1) | flag
    } else {
        (((p / 2) as u32) << 1) | flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_table_recovers_known_factorizations() {
        let table = FactorTable::build(16, true);
        for x in [17u64, 19, 221, 10403, 65519] {
            if x >= (1u64 << table.bits_limit()) {
                continue;
            }
            let mut out = Vec::new();
            table.lookup(x, &mut out);
            let product: u64 = out.iter().product();
            assert_eq!(product, x, "bad lookup for {x}: {out:?}");
        }
    }

    #[test]
    fn wide_table_recovers_known_factorizations() {
        let table = FactorTable::build(16, false);
        for x in 17u64..60000 {
            let mut out = Vec::new();
            table.lookup(x, &mut out);
            let product: u64 = out.iter().product();
            assert_eq!(product, x, "bad lookup for {x}: {out:?}");
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let table = FactorTable::build(16, false);
        let dir = std::env::temp_dir();
        let path = dir.join(format!("factor_table_test_{}.bin", std::process::id()));
        table.save(&path).unwrap();
        let loaded = FactorTable::load(&path, 16, false).unwrap();
        for x in [17u64, 19, 221, 10403, 59999] {
            let mut expect = Vec::new();
            table.lookup(x, &mut expect);
            let mut got = Vec::new();
            loaded.lookup(x, &mut got);
            expect.sort_unstable();
            got.sort_unstable();
            assert_eq!(expect, got);
        }
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_rejects_mismatched_dimensions() {
        let table = FactorTable::build(16, false);
        let dir = std::env::temp_dir();
        let path = dir.join(format!("factor_table_test_mismatch_{}.bin", std::process::id()));
        table.save(&path).unwrap();
        let err = FactorTable::load(&path, 16, true).unwrap_err();
        assert!(matches!(err, Error::FileFormatMismatch { .. }));
        let _ = std::fs::remove_file(&path);
    }
}
