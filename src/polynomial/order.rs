// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Tests on the multiplicative order of `x` modulo `(f(x), p)`.

use super::{Polynomial, PowerTable};
use crate::factor::Factorization;
use crate::mod_int::{is_primitive_root_with_factors, power};
use crate::Wide;
use num_traits::One;

/// true if `(-1)^n a_0` is a primitive root of `p`
pub fn constant_coefficient_is_primitive_root(f: &Polynomial, p_minus_1_factors: &Factorization) -> bool {
    is_primitive_root_with_factors(f.signed_constant_coefficient(), f.modulus(), p_minus_1_factors)
}

/// `Some(a)` if `x^r mod (f(x), p)` is the constant `a`
pub fn order_r(table: &PowerTable, r: Wide) -> Option<Wide> {
    let x_to_r = table.x_to_power(r);
    if x_to_r.is_constant() {
        Some(x_to_r.constant_term())
    } else {
        None
    }
}

/// true if the constant `a = x^r` agrees with `(-1)^n a_0 (mod p)`
pub fn constant_coefficient_matches(f: &Polynomial, a: Wide) -> bool {
    a == f.signed_constant_coefficient()
}

/// true if `x^(r/q)` is not a constant for every prime `q` dividing `r` but
/// not `p - 1`
///
/// Primes also dividing `p - 1` are skipped: the earlier tests already rule
/// out a smaller order through them.
pub fn order_m(table: &PowerTable, r: Wide, r_factors: &Factorization, p_minus_1_factors: &Factorization) -> bool {
    r_factors
        .primes()
        .filter(|&q| !p_minus_1_factors.contains(q))
        .all(|q| !table.x_to_power(r / q).is_constant())
}

/// true if `x` has order exactly `p^n - 1` modulo `(f(x), p)`, found by
/// stepping through every power of `x`.
///
/// Only practical for small `p^n`.
pub fn maximal_order(table: &PowerTable) -> bool {
    let max_order = match power(table.modulus(), table.degree() as u32) {
        Some(p_to_n) => p_to_n - 1,
        None => return false,
    };
    let mut t = table.x();
    let mut k = Wide::one();
    while k < max_order {
        if t.is_one() {
            return false;
        }
        table.times_x(&mut t);
        k += 1;
    }
    t.is_one()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::factor;

    fn poly(coefficients: &[Wide], modulus: Wide) -> Polynomial {
        Polynomial::new(coefficients.to_vec(), modulus).unwrap()
    }

    #[test]
    fn test_constant_coefficient_is_primitive_root() {
        let p_minus_1_factors = factor(4);
        // (-1)^2 * 3 = 3 is a primitive root of 5
        assert!(constant_coefficient_is_primitive_root(&poly(&[3, 0, 1], 5), &p_minus_1_factors));
        // (-1)^3 * 3 = 2 is a primitive root of 5
        assert!(constant_coefficient_is_primitive_root(&poly(&[3, 0, 0, 1], 5), &p_minus_1_factors));
        // 4 has order 2
        assert!(!constant_coefficient_is_primitive_root(&poly(&[4, 0, 1], 5), &p_minus_1_factors));
        assert!(!constant_coefficient_is_primitive_root(&poly(&[0, 1, 1], 5), &p_minus_1_factors));
    }

    #[test]
    fn test_order_r() {
        // x^4 + x + 1 mod 2: r = 15
        let table = PowerTable::new(&poly(&[1, 1, 0, 0, 1], 2));
        assert_eq!(order_r(&table, 15), Some(1));
        assert_eq!(order_r(&table, 5), None);
        // x^2 + x + 2 mod 3 is primitive: r = 4, x^4 = (-1)^2 * 2
        let f = poly(&[2, 1, 1], 3);
        let table = PowerTable::new(&f);
        assert_eq!(order_r(&table, 4), Some(2));
        assert!(constant_coefficient_matches(&f, 2));
        assert!(!constant_coefficient_matches(&f, 1));
    }

    #[test]
    fn test_order_m() {
        // x^4 + x + 1 mod 2 is primitive
        let table = PowerTable::new(&poly(&[1, 1, 0, 0, 1], 2));
        assert!(order_m(&table, 15, &factor(15), &factor(1)));
        // x^4 + x^3 + x^2 + x + 1 mod 2 has x^5 = 1
        let table = PowerTable::new(&poly(&[1, 1, 1, 1, 1], 2));
        assert!(!order_m(&table, 15, &factor(15), &factor(1)));
    }

    #[test]
    fn test_maximal_order() {
        let test_case = |coefficients: &[Wide], modulus: Wide, expected: bool| {
            let table = PowerTable::new(&poly(coefficients, modulus));
            let result = maximal_order(&table);
            println!("{:?} mod {} -> {}", coefficients, modulus, result);
            assert_eq!(result, expected);
        };
        test_case(&[1, 1, 0, 0, 1], 2, true);
        test_case(&[1, 0, 0, 1, 1], 2, true);
        test_case(&[1, 1, 1, 1, 1], 2, false);
        test_case(&[1, 0, 1, 0, 1], 2, false);
        test_case(&[2, 1, 1], 3, true);
        test_case(&[2, 0, 1], 3, false);
        test_case(&[3, 2, 1, 0, 1], 5, true);
    }
}
