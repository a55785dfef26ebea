// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Integer factorization by trial division, Euler's totient and
//! Miller-Rabin primality testing.

use crate::mod_int::{mul_mod, power_mod};
use crate::Wide;
use lazy_static::lazy_static;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{distributions::Distribution, distributions::Uniform, Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::collections::HashSet;
use std::fmt;

/// number of Miller-Rabin rounds used by [`is_almost_surely_prime`]
pub const PRIMALITY_TRIALS: u32 = 50;

lazy_static! {
    /// Mersenne primes `2^k - 1` that fit in [`Wide`]; trial division would
    /// need about `2^(k/2)` steps to prove them prime.
    static ref MERSENNE_PRIMES: HashSet<Wide> = [61u32, 89, 107, 127]
        .iter()
        .filter(|&&exponent| exponent < Wide::BITS)
        .map(|&exponent| (Wide::one() << exponent) - 1)
        .collect();
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct PrimeFactor {
    pub prime: Wide,
    pub count: u32,
}

/// distinct primes in increasing order together with their multiplicities
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Factorization {
    factors: Vec<PrimeFactor>,
}

impl Factorization {
    fn push(&mut self, prime: Wide, count: u32) {
        debug_assert!(self.factors.last().map_or(true, |last| last.prime < prime));
        self.factors.push(PrimeFactor { prime, count });
    }
    pub fn factors(&self) -> &[PrimeFactor] {
        &self.factors
    }
    pub fn primes(&self) -> impl Iterator<Item = Wide> + '_ {
        self.factors.iter().map(|factor| factor.prime)
    }
    /// number of distinct primes
    pub fn len(&self) -> usize {
        self.factors.len()
    }
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
    pub fn contains(&self, prime: Wide) -> bool {
        self.factors
            .binary_search_by(|factor| factor.prime.cmp(&prime))
            .is_ok()
    }
    /// the factored number, `None` on overflow
    pub fn product(&self) -> Option<Wide> {
        self.factors.iter().try_fold(Wide::one(), |product, factor| {
            product.checked_mul(crate::mod_int::power(factor.prime, factor.count)?)
        })
    }
    /// the factorization of the product of both factored numbers
    pub fn merge(&self, rhs: &Factorization) -> Factorization {
        let mut retval = Factorization::default();
        let mut lhs = self.factors.iter().peekable();
        let mut rhs = rhs.factors.iter().peekable();
        loop {
            let next = match (lhs.peek().copied(), rhs.peek().copied()) {
                (None, None) => break,
                (Some(_), None) => lhs.next(),
                (None, Some(_)) => rhs.next(),
                (Some(l), Some(r)) => {
                    if l.prime == r.prime {
                        let count = l.count + r.count;
                        let prime = l.prime;
                        lhs.next();
                        rhs.next();
                        retval.push(prime, count);
                        continue;
                    } else if l.prime < r.prime {
                        lhs.next()
                    } else {
                        rhs.next()
                    }
                }
            };
            if let Some(factor) = next {
                retval.push(factor.prime, factor.count);
            }
        }
        retval
    }
    /// Euler's totient of the factored number, `None` on overflow
    pub fn euler_phi(&self) -> Option<Wide> {
        self.factors.iter().try_fold(Wide::one(), |phi, factor| {
            let prime_power = crate::mod_int::power(factor.prime, factor.count - 1)?;
            phi.checked_mul(prime_power)?.checked_mul(factor.prime - 1)
        })
    }
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.factors.is_empty() {
            return write!(f, "1");
        }
        for (index, factor) in self.factors.iter().enumerate() {
            if index != 0 {
                write!(f, " * ")?;
            }
            match factor.count {
                1 => write!(f, "{}", factor.prime)?,
                count => write!(f, "{}^{}", factor.prime, count)?,
            }
        }
        Ok(())
    }
}

fn strip_factor(n: &mut Wide, divisor: Wide) -> u32 {
    let mut count = 0;
    loop {
        let (quotient, remainder) = n.div_rem(&divisor);
        if !remainder.is_zero() {
            return count;
        }
        *n = quotient;
        count += 1;
    }
}

/// factors `n` into primes by trial division.
///
/// After removing 2 and 3 the trial divisors are 5, 7, 11, 13, ... (stepping
/// by 2 and 4 alternately). Division stops as soon as the quotient drops below
/// the divisor while leaving a remainder: the residual then has no factor
/// below the divisor and is smaller than its square, so it is prime.
///
/// `factor(0)` and `factor(1)` are empty.
pub fn factor(mut n: Wide) -> Factorization {
    let mut retval = Factorization::default();
    if n <= 1 {
        return retval;
    }
    for &small_prime in &[2, 3] {
        let count = strip_factor(&mut n, small_prime);
        if count != 0 {
            retval.push(small_prime, count);
        }
    }
    if MERSENNE_PRIMES.contains(&n) {
        retval.push(n, 1);
        return retval;
    }
    let mut divisor: Wide = 5;
    let mut step = 2;
    while n > 1 {
        let (quotient, remainder) = n.div_rem(&divisor);
        if remainder.is_zero() {
            let count = strip_factor(&mut n, divisor);
            retval.push(divisor, count);
        } else if quotient < divisor {
            retval.push(n, 1);
            break;
        } else {
            divisor += step;
            step = 6 - step;
        }
    }
    retval
}

/// Euler's totient function; `euler_phi(0) == 0`
pub fn euler_phi(n: Wide) -> Wide {
    if n.is_zero() {
        return n;
    }
    factor(n)
        .euler_phi()
        .expect("totient is no larger than its argument")
}

/// one round of the Miller-Rabin test of `n` with witness `x`.
///
/// `false` means `n` is definitely composite. Witnesses outside `1 < x < n`
/// are rejected.
pub fn is_probably_prime(n: Wide, x: Wide) -> bool {
    match n {
        0 | 1 | 4 => return false,
        2 | 3 | 5 => return true,
        _ => {}
    }
    if x <= 1 || x >= n {
        return false;
    }
    let n_minus_1 = n - 1;
    let k = n_minus_1.trailing_zeros();
    let q = n_minus_1 >> k;
    let mut y = match power_mod(x, q, n) {
        Some(y) => y,
        None => return false,
    };
    for j in 0..k {
        if (j == 0 && y.is_one()) || y == n_minus_1 {
            return true;
        }
        if j > 0 && y.is_one() {
            return false;
        }
        y = mul_mod(y, y, n);
    }
    false
}

/// runs `trials` rounds of [`is_probably_prime`] with witnesses drawn from `rng`.
pub fn is_almost_surely_prime_with_rng<R: Rng + ?Sized>(n: Wide, trials: u32, rng: &mut R) -> bool {
    if n <= 5 {
        return is_probably_prime(n, 2);
    }
    let witnesses = Uniform::new(2, n - 1);
    (0..trials).all(|_| is_probably_prime(n, witnesses.sample(rng)))
}

/// `true` if `n` is prime with probability at least `1 - 4^-PRIMALITY_TRIALS`;
/// `false` is always correct.
pub fn is_almost_surely_prime(n: Wide) -> bool {
    let mut rng = Pcg64Mcg::seed_from_u64(0);
    is_almost_surely_prime_with_rng(n, PRIMALITY_TRIALS, &mut rng)
}
