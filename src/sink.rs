/*
 * This file is part of the factor-engine package.
 *
 * For the full copyright and license information, please view the LICENSE
 * file that was distributed with this source code.
 */

//! The append-only sink abstraction behind `factorize_to_sequence` (§6):
//! any collection that can receive prime factors one at a time.

use smallvec::{Array, SmallVec};

pub trait FactorSink<T> {
    fn push(&mut self, prime: T);
}

impl<T> FactorSink<T> for Vec<T> {
    fn push(&mut self, prime: T) {
        Vec::push(self, prime)
    }
}

impl<A: Array<Item = T>, T> FactorSink<T> for SmallVec<A> {
    fn push(&mut self, prime: T) {
        SmallVec::push(self, prime)
    }
}
