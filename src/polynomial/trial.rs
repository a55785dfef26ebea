// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use super::Polynomial;
use crate::Wide;
use num_traits::Zero;

impl Polynomial {
    /// `x^n`, the first candidate of an exhaustive search
    pub fn initial_trial(degree: usize, modulus: Wide) -> Self {
        let mut coefficients = vec![0; degree + 1];
        coefficients[degree] = 1;
        Self {
            coefficients,
            modulus,
        }
    }
    /// steps to the next candidate by counting in base `p` through
    /// `a_0, ..., a_(n-1)`, least significant first.
    ///
    /// `a_(n-1)` never carries into the leading coefficient; callers stop
    /// after `p^n` candidates, before it would overflow.
    pub fn next_trial(&mut self) {
        let n = self.degree();
        let p = self.modulus;
        self.coefficients[0] += 1;
        for k in 0..n - 1 {
            if self.coefficients[k] == p {
                self.coefficients[k] = 0;
                self.coefficients[k + 1] += 1;
            }
        }
    }
}

/// every monic polynomial of a given degree modulo `p`, in the order of
/// [`Polynomial::next_trial`], stopping after `count` polynomials
#[derive(Clone, Debug)]
pub struct TrialPolynomials {
    current: Polynomial,
    started: bool,
    remaining: Wide,
}

impl TrialPolynomials {
    pub fn new(degree: usize, modulus: Wide, count: Wide) -> Self {
        Self {
            current: Polynomial::initial_trial(degree, modulus),
            started: false,
            remaining: count,
        }
    }
}

impl Iterator for TrialPolynomials {
    type Item = Polynomial;
    fn next(&mut self) -> Option<Polynomial> {
        if self.remaining.is_zero() {
            return None;
        }
        if self.started {
            self.current.next_trial();
        } else {
            self.started = true;
        }
        self.remaining -= 1;
        Some(self.current.clone())
    }
}
