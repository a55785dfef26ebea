// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Arithmetic on residues modulo `(f(x), p)` driven by a precomputed table of
//! the powers `x^n ..= x^(2n-2)` of `x` reduced modulo `f(x)`.

use super::{Polynomial, Residue};
use crate::array2d::Array2D;
use crate::mod_int::{add_mod, mul_mod, neg_mod};
use crate::Wide;
use num_traits::Zero;

/// column `i` holds the coefficients of `x^(n + i) mod (f(x), p)`
#[derive(Clone, Debug)]
pub struct PowerTable {
    degree: usize,
    modulus: Wide,
    table: Array2D<Wide>,
}

/// coefficient of `x^k` in `t(x)^2`
fn square_coefficient(t: &[Wide], k: usize, p: Wide) -> Wide {
    let n = t.len();
    let mut i = k.saturating_sub(n - 1);
    let mut j = k - i;
    let mut sum = Wide::zero();
    while i < j {
        sum = add_mod(sum, mul_mod(t[i], t[j], p), p);
        i += 1;
        j -= 1;
    }
    sum = add_mod(sum, sum, p);
    if i == j {
        sum = add_mod(sum, mul_mod(t[i], t[i], p), p);
    }
    sum
}

/// coefficient of `x^k` in `s(x) * t(x)`
fn product_coefficient(s: &[Wide], t: &[Wide], k: usize, p: Wide) -> Wide {
    let n = s.len();
    (k.saturating_sub(n - 1)..=k.min(n - 1)).fold(Wide::zero(), |sum, i| {
        add_mod(sum, mul_mod(s[i], t[k - i], p), p)
    })
}

impl PowerTable {
    pub fn new(f: &Polynomial) -> Self {
        let n = f.degree();
        let p = f.modulus();
        let mut table = Array2D::new_filled(n - 1, n, Wide::zero());
        // x^n = -(a_0 + a_1 x + ... + a_(n-1) x^(n-1))
        let x_to_n: Vec<Wide> = f.coefficients()[..n]
            .iter()
            .map(|&coefficient| neg_mod(coefficient, p))
            .collect();
        table.column_mut(0).copy_from_slice(&x_to_n);
        for i in 1..n - 1 {
            let (previous, row) = table.column_pair_mut(i - 1, i);
            let top = previous[n - 1];
            row[0] = mul_mod(top, x_to_n[0], p);
            for k in 1..n {
                row[k] = add_mod(previous[k - 1], mul_mod(top, x_to_n[k], p), p);
            }
        }
        Self {
            degree: n,
            modulus: p,
            table,
        }
    }
    pub fn degree(&self) -> usize {
        self.degree
    }
    pub fn modulus(&self) -> Wide {
        self.modulus
    }
    /// the coefficients of `x^(n + i) mod (f(x), p)`
    pub fn row(&self, i: usize) -> &[Wide] {
        self.table.column(i)
    }
    pub fn one(&self) -> Residue {
        Residue::constant(1, self.degree)
    }
    pub fn x(&self) -> Residue {
        Residue::x(self.degree)
    }
    /// folds a product of degree up to `2n - 2` back below degree `n`
    fn reduce(&self, low: &mut [Wide], high: &[Wide]) {
        let p = self.modulus;
        for (i, &coefficient) in high.iter().enumerate() {
            if coefficient.is_zero() {
                continue;
            }
            for (result, &power) in low.iter_mut().zip(self.row(i)) {
                *result = add_mod(*result, mul_mod(coefficient, power, p), p);
            }
        }
    }
    /// `t(x) = t(x)^2 mod (f(x), p)`
    pub fn square(&self, t: &mut Residue) {
        let n = self.degree;
        let p = self.modulus;
        let coefficients = &t.coefficients;
        let high: Vec<Wide> = (n..=2 * n - 2)
            .map(|k| square_coefficient(coefficients, k, p))
            .collect();
        let mut low: Vec<Wide> = (0..n)
            .map(|k| square_coefficient(coefficients, k, p))
            .collect();
        self.reduce(&mut low, &high);
        t.coefficients = low;
    }
    /// `s(x) = s(x) * t(x) mod (f(x), p)`
    pub fn product(&self, s: &mut Residue, t: &Residue) {
        let n = self.degree;
        let p = self.modulus;
        let (lhs, rhs) = (&s.coefficients, &t.coefficients);
        let high: Vec<Wide> = (n..=2 * n - 2)
            .map(|k| product_coefficient(lhs, rhs, k, p))
            .collect();
        let mut low: Vec<Wide> = (0..n)
            .map(|k| product_coefficient(lhs, rhs, k, p))
            .collect();
        self.reduce(&mut low, &high);
        s.coefficients = low;
    }
    /// `t(x) = x t(x) mod (f(x), p)`
    pub fn times_x(&self, t: &mut Residue) {
        let p = self.modulus;
        let coefficients = &mut t.coefficients;
        let top = coefficients[self.degree - 1];
        coefficients.rotate_right(1);
        coefficients[0] = Wide::zero();
        if !top.is_zero() {
            for (result, &power) in coefficients.iter_mut().zip(self.row(0)) {
                *result = add_mod(*result, mul_mod(top, power, p), p);
            }
        }
    }
    /// `x^m mod (f(x), p)` by repeated squaring
    pub fn x_to_power(&self, m: Wide) -> Residue {
        if m.is_zero() {
            return self.one();
        }
        let mut t = self.x();
        let top_bit = Wide::BITS - 1 - m.leading_zeros();
        for bit in (0..top_bit).rev() {
            self.square(&mut t);
            if (m >> bit) & 1 != 0 {
                self.times_x(&mut t);
            }
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(coefficients: &[Wide], modulus: Wide) -> PowerTable {
        PowerTable::new(&Polynomial::new(coefficients.to_vec(), modulus).unwrap())
    }

    /// `x^m mod (f(x), p)` by multiplying by `x` one step at a time
    fn x_to_power_slow(table: &PowerTable, m: Wide) -> Residue {
        let mut t = table.one();
        for _ in 0..m {
            table.times_x(&mut t);
        }
        t
    }

    #[test]
    fn test_new() {
        // f(x) = x^4 + x^2 + 2x + 3 (mod 5)
        let table = table(&[3, 2, 1, 0, 1], 5);
        // x^4 = -3 - 2x - x^2 = 2 + 3x + 4x^2
        assert_eq!(table.row(0), &[2, 3, 4, 0]);
        // x^5 = 2x + 3x^2 + 4x^3
        assert_eq!(table.row(1), &[0, 2, 3, 4]);
        // x^6 = 2x^2 + 3x^3 + 4x^4 = 8 + 12x + 18x^2 + 3x^3
        assert_eq!(table.row(2), &[3, 2, 3, 3]);
        assert_eq!(table.x_to_power(4).coefficients(), table.row(0));
    }

    #[test]
    fn test_times_x() {
        let table = table(&[1, 1, 0, 0, 1], 2);
        let mut t = Residue::from_coefficients(vec![0, 0, 0, 1]);
        table.times_x(&mut t);
        // x^4 = x + 1
        assert_eq!(t.coefficients(), &[1, 1, 0, 0]);
        table.times_x(&mut t);
        assert_eq!(t.coefficients(), &[0, 1, 1, 0]);
    }

    #[test]
    fn test_square_and_product() {
        let table = table(&[3, 2, 1, 0, 1], 5);
        let s = Residue::from_coefficients(vec![1, 4, 0, 3]);
        let t = Residue::from_coefficients(vec![2, 0, 1, 1]);
        let mut squared = s.clone();
        table.square(&mut squared);
        let mut product = s.clone();
        table.product(&mut product, &s);
        println!("s^2 = {}", squared);
        assert_eq!(squared, product);
        let mut st = s.clone();
        table.product(&mut st, &t);
        let mut ts = t.clone();
        table.product(&mut ts, &s);
        assert_eq!(st, ts);
        let mut times_one = t.clone();
        table.product(&mut times_one, &table.one());
        assert_eq!(times_one, t);
        let mut times_x = t.clone();
        table.product(&mut times_x, &table.x());
        let mut expected = t.clone();
        table.times_x(&mut expected);
        assert_eq!(times_x, expected);
    }

    #[test]
    fn test_x_to_power() {
        let test_case = |coefficients: &[Wide], modulus: Wide| {
            let table = table(coefficients, modulus);
            for m in 0..200 {
                let fast = table.x_to_power(m);
                let slow = x_to_power_slow(&table, m);
                assert_eq!(fast, slow, "m = {}, f = {:?} mod {}", m, coefficients, modulus);
            }
        };
        test_case(&[1, 1, 0, 0, 1], 2);
        test_case(&[3, 2, 1, 0, 1], 5);
        test_case(&[2, 1, 1], 5);
        test_case(&[1, 1, 0, 0, 0, 0, 1], 3);
        test_case(&[6, 5, 4, 3, 2, 1], 7);
    }

    #[test]
    fn test_order_of_x() {
        // x^4 + x + 1 is primitive mod 2, so x has order 15
        let table = table(&[1, 1, 0, 0, 1], 2);
        assert!(table.x_to_power(15).is_one());
        assert!((1..15).all(|m| !table.x_to_power(m).is_one()));
        // x^4 + x^3 + x^2 + x + 1 divides x^5 - 1
        let table = self::table(&[1, 1, 1, 1, 1], 2);
        assert!(table.x_to_power(5).is_one());
    }
}
