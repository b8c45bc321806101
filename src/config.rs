/*
 * This file is part of the factor-engine package.
 *
 * For the full copyright and license information, please view the LICENSE
 * file that was distributed with this source code.
 */

//! The handful of genuine runtime knobs the engine exposes (§2.1, §3.1),
//! collected into one struct with a `Default` impl, mirroring the options
//! structs uutils utilities build for their own CLI surfaces (`cksum`,
//! `sum`) even though this crate has no `clap` front end of its own —
//! `Config` here is constructed programmatically by whatever host embeds
//! the engine.

use std::path::PathBuf;

/// Runtime-constructible tunables. None of these change the engine's
/// output, only how hard it works to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of small odd primes C6 tries before handing off to C5/C7.
    /// The compile-time small-prime trial divider is monomorphized on a
    /// const generic, so this field documents the knob; callers who want a
    /// non-default trial size call `trial::trial_divide` directly with
    /// their own `SIZE`.
    pub trial_division_primes: usize,
    /// Directory C10 looks in for a persisted factor table, when the host
    /// wants to load one instead of building it in memory.
    pub table_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            trial_division_primes: crate::trial::DEFAULT_TRIAL_SIZE,
            table_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_trial_size() {
        let c = Config::default();
        assert_eq!(c.trial_division_primes, 135);
        assert_eq!(c.table_dir, None);
    }
}
