// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Scalar arithmetic in ℤ/pℤ.
//!
//! Every function here works on [`Wide`] values already reduced below the
//! modulus unless stated otherwise. Precondition violations are reported as
//! `None` to the immediate caller instead of panicking.

use crate::factor::{factor, Factorization};
use crate::Wide;
use num_integer::Integer;
use num_traits::{One, Zero};

pub trait ModularReduce: Copy {
    fn modular_reduce_assign(&mut self, modulus: Self);
    fn modular_reduce(mut self, modulus: Self) -> Self {
        self.modular_reduce_assign(modulus);
        self
    }
}

macro_rules! impl_modular_reduce {
    ($($t:ty),*) => {
        $(
            impl ModularReduce for $t {
                fn modular_reduce_assign(&mut self, modulus: Self) {
                    if !modulus.is_zero() {
                        *self = self.mod_floor(&modulus);
                    }
                }
            }
        )*
    };
}

impl_modular_reduce!(i8, u8, i16, u16, i32, u32, i64, u64, i128, u128, isize, usize);

/// returns `n mod p` in `[0, p)`, including for negative `n`
///
/// `p` must be positive; a zero modulus leaves `n` unchanged.
pub fn mod_p<T: ModularReduce>(n: T, p: T) -> T {
    n.modular_reduce(p)
}

/// exact `x^y`, `None` if the result doesn't fit in [`Wide`]
pub fn power(x: Wide, y: u32) -> Option<Wide> {
    num_traits::checked_pow(x, y as usize)
}

/// `(a + b) mod p` for `a, b < p` without overflowing
pub fn add_mod(a: Wide, b: Wide, p: Wide) -> Wide {
    if a >= p - b {
        a - (p - b)
    } else {
        a + b
    }
}

/// `(a - b) mod p` for `a, b < p`
pub fn sub_mod(a: Wide, b: Wide, p: Wide) -> Wide {
    if a >= b {
        a - b
    } else {
        p - (b - a)
    }
}

/// `-a mod p` for `a < p`
pub fn neg_mod(a: Wide, p: Wide) -> Wide {
    if a.is_zero() {
        a
    } else {
        p - a
    }
}

/// `a * b mod p`, falling back to double-and-add when the product overflows
pub fn mul_mod(a: Wide, b: Wide, p: Wide) -> Wide {
    let (a, b) = (a % p, b % p);
    if let Some(product) = a.checked_mul(b) {
        return product % p;
    }
    let mut retval = 0;
    let mut addend = a;
    let mut bits = b;
    while !bits.is_zero() {
        if bits.is_odd() {
            retval = add_mod(retval, addend, p);
        }
        addend = add_mod(addend, addend, p);
        bits >>= 1;
    }
    retval
}

/// `a^n mod p` by square and multiply, scanning `n` from its top set bit down.
///
/// Returns `None` for `p <= 1` and for the undefined `0^0`.
pub fn power_mod(a: Wide, n: Wide, p: Wide) -> Option<Wide> {
    if p <= 1 {
        return None;
    }
    if a.is_zero() {
        return if n.is_zero() { None } else { Some(0) };
    }
    if n.is_zero() {
        return Some(1);
    }
    let base = a % p;
    let mut retval = base;
    let top_bit = Wide::BITS - 1 - n.leading_zeros();
    for bit in (0..top_bit).rev() {
        retval = mul_mod(retval, retval, p);
        if ((n >> bit) & 1).is_one() {
            retval = mul_mod(retval, base, p);
        }
    }
    Some(retval)
}

/// true if `a` generates the multiplicative group of ℤ/pℤ.
///
/// `p` must be prime; that isn't checked.
pub fn is_primitive_root(a: Wide, p: Wide) -> bool {
    if p < 2 {
        return false;
    }
    let a = a % p;
    let known_roots: &[Wide] = match p {
        2 => &[1],
        3 => &[2],
        5 => &[2, 3],
        7 => &[3, 5],
        11 => &[2, 6, 7, 8],
        13 => &[2, 6, 7, 11],
        _ => return is_primitive_root_with_factors(a, p, &factor(p - 1)),
    };
    known_roots.contains(&a)
}

/// [`is_primitive_root`] with the factorization of `p - 1` supplied by the caller.
///
/// `a^(p-1) = 1` always holds for prime `p`, so only the proper divisors
/// `(p-1)/q` are checked.
pub fn is_primitive_root_with_factors(a: Wide, p: Wide, p_minus_1_factors: &Factorization) -> bool {
    let a = a % p;
    if a.is_zero() {
        return false;
    }
    p_minus_1_factors
        .primes()
        .all(|q| power_mod(a, (p - 1) / q, p) != Some(1))
}

/// multiplicative inverse of `u` modulo `p` by the extended Euclidean algorithm.
///
/// The result is checked against `u * inverse = 1 (mod p)`; `None` means `u`
/// has no inverse or the check failed.
pub fn inverse_mod_p(u: Wide, p: Wide) -> Option<Wide> {
    if p < 2 {
        return None;
    }
    let u = u % p;
    // invariant: t * u = r (mod p) for both (t0, r0) and (t1, r1)
    let (mut r0, mut r1) = (p, u);
    let (mut t0, mut t1): (Wide, Wide) = (0, 1);
    while !r1.is_zero() {
        let (quotient, remainder) = r0.div_rem(&r1);
        r0 = r1;
        r1 = remainder;
        let t = sub_mod(t0, mul_mod(quotient, t1, p), p);
        t0 = t1;
        t1 = t;
    }
    if !r0.is_one() {
        return None;
    }
    if mul_mod(u, t0, p) != 1 {
        tracing::error!(u = %u, p = %p, inverse = %t0, "modular inverse failed its self check");
        return None;
    }
    Some(t0)
}
