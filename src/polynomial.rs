// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use crate::error::{Error, Result};
use crate::mod_int::{add_mod, mod_p, mul_mod, neg_mod};
use crate::traits::PolynomialEval;
use crate::{Wide, MAX_DEGREE, MIN_DEGREE};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::convert::TryFrom;
use std::fmt;
use std::slice;

pub mod irreducible;
pub mod order;
pub mod power_table;
pub mod trial;

pub use power_table::PowerTable;
pub use trial::TrialPolynomials;

/// A monic polynomial with coefficients modulo a prime.
///
/// the term at index `k` is `self.coefficients()[k] * pow(x, k)`
///
/// # Invariants
///
/// * `self.degree() >= MIN_DEGREE`
/// * every coefficient is less than `self.modulus()`
/// * `self.coefficients().last() == Some(&1)`
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Polynomial {
    coefficients: Vec<Wide>,
    modulus: Wide,
}

/// `t(x) mod (f(x), p)`: a polynomial of degree less than `n`, stored as
/// exactly `n` coefficients.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Residue {
    coefficients: Vec<Wide>,
}

fn fmt_terms(f: &mut fmt::Formatter, coefficients: &[Wide]) -> fmt::Result {
    let mut first = true;
    for (power, &coefficient) in coefficients.iter().enumerate().rev() {
        if coefficient.is_zero() {
            continue;
        }
        if !first {
            write!(f, " + ")?;
        }
        first = false;
        match (power, coefficient.is_one()) {
            (0, _) => write!(f, "{}", coefficient)?,
            (1, true) => write!(f, "x")?,
            (1, false) => write!(f, "{}x", coefficient)?,
            (_, true) => write!(f, "x^{}", power)?,
            (_, false) => write!(f, "{}x^{}", coefficient, power)?,
        }
    }
    if first {
        write!(f, "0")?;
    }
    Ok(())
}

/// parses one term like `3x^2`, `2*x`, `x` or `5` into `(coefficient, power)`
fn parse_term(term: &str) -> Option<(i128, usize)> {
    match term.find('x') {
        None => Some((term.parse().ok()?, 0)),
        Some(x_index) => {
            let coefficient_text = term[..x_index].trim_end_matches('*');
            let coefficient = if coefficient_text.is_empty() {
                1
            } else {
                coefficient_text.parse().ok()?
            };
            let power_text = &term[x_index + 1..];
            let power = if power_text.is_empty() {
                1
            } else {
                power_text.strip_prefix('^')?.parse().ok()?
            };
            Some((coefficient, power))
        }
    }
}

impl Polynomial {
    pub fn new(coefficients: Vec<Wide>, modulus: Wide) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidPolynomial {
            text: format!("{:?}", coefficients),
            reason,
        };
        if modulus < 2 {
            return Err(invalid(format!("modulus {} is less than 2", modulus)));
        }
        if coefficients.len() <= MIN_DEGREE {
            return Err(invalid(format!("degree is less than {}", MIN_DEGREE)));
        }
        if let Some(coefficient) = coefficients.iter().find(|&&c| c >= modulus) {
            return Err(invalid(format!(
                "coefficient {} is not reduced modulo {}",
                coefficient, modulus
            )));
        }
        if !coefficients.last().map_or(false, |c| c.is_one()) {
            return Err(invalid("polynomial is not monic".into()));
        }
        Ok(Self {
            coefficients,
            modulus,
        })
    }
    /// parses text like `x^4 + x + 1` or `x ^ 20 - 3 x^2 + 2*x + 3, 5`.
    ///
    /// Coefficients are reduced modulo `modulus`; a trailing `, p` must match
    /// `modulus`.
    pub fn parse(text: &str, modulus: Wide) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPolynomial {
            text: text.into(),
            reason: reason.into(),
        };
        let compact: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let body = match compact.split_once(',') {
            None => &compact[..],
            Some((body, modulus_text)) => {
                let given: Wide = modulus_text
                    .parse()
                    .map_err(|_| invalid("modulus after ',' is not a number"))?;
                if given != modulus {
                    return Err(invalid("modulus after ',' doesn't match p"));
                }
                body
            }
        };
        let signed_modulus =
            i128::try_from(modulus).map_err(|_| invalid("modulus is too large to parse with"))?;
        let mut terms = Vec::new();
        let mut negative = false;
        let mut start = 0;
        for (index, c) in body.char_indices() {
            if c == '+' || c == '-' {
                if index != start {
                    terms.push((negative, &body[start..index]));
                }
                negative = c == '-';
                start = index + 1;
            }
        }
        if start < body.len() {
            terms.push((negative, &body[start..]));
        }
        if terms.is_empty() {
            return Err(invalid("no terms"));
        }
        let mut coefficients: Vec<Wide> = Vec::new();
        for (negative, term) in terms {
            let (coefficient, power) = parse_term(term).ok_or_else(|| invalid("malformed term"))?;
            if power > MAX_DEGREE {
                return Err(invalid("degree is too large"));
            }
            let coefficient = if negative { -coefficient } else { coefficient };
            let coefficient = mod_p(coefficient, signed_modulus) as Wide;
            if coefficients.len() <= power {
                coefficients.resize(power + 1, 0);
            }
            coefficients[power] = add_mod(coefficients[power], coefficient, modulus);
        }
        while coefficients.last().map_or(false, Zero::is_zero) {
            coefficients.pop();
        }
        Self::new(coefficients, modulus).map_err(|err| match err {
            Error::InvalidPolynomial { reason, .. } => Error::InvalidPolynomial {
                text: text.into(),
                reason,
            },
            err => err,
        })
    }
    pub fn coefficients(&self) -> &[Wide] {
        &self.coefficients
    }
    pub fn iter(&self) -> slice::Iter<Wide> {
        self.coefficients.iter()
    }
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }
    pub fn modulus(&self) -> Wide {
        self.modulus
    }
    pub fn constant_coefficient(&self) -> Wide {
        self.coefficients[0]
    }
    /// `(-1)^n * a_0 mod p`, the product of the roots of `f`
    pub fn signed_constant_coefficient(&self) -> Wide {
        if self.degree().is_odd() {
            neg_mod(self.constant_coefficient(), self.modulus)
        } else {
            self.constant_coefficient()
        }
    }
    /// true if `f(a) != 0 (mod p)` for every `a` in `[1, p)`.
    ///
    /// `a = 0` is not tested: candidates reaching this test have a nonzero
    /// constant coefficient.
    pub fn is_linear_factor_free(&self) -> bool {
        let mut a = Wide::one();
        while a < self.modulus {
            if self.eval(&a).is_zero() {
                return false;
            }
            a += 1;
        }
        true
    }
}

impl<'a> PolynomialEval<Wide> for &'a Polynomial {
    /// Horner's rule modulo `p`
    fn eval(self, x: &Wide) -> Wide {
        let p = self.modulus;
        let x = *x % p;
        self.iter()
            .rev()
            .fold(Wide::zero(), |acc, &coefficient| {
                add_mod(mul_mod(acc, x, p), coefficient, p)
            })
    }
}

impl<'a> IntoIterator for &'a Polynomial {
    type Item = &'a Wide;
    type IntoIter = slice::Iter<'a, Wide>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_terms(f, &self.coefficients)
    }
}

impl Residue {
    pub fn constant(value: Wide, degree: usize) -> Self {
        let mut coefficients = vec![0; degree];
        coefficients[0] = value;
        Self { coefficients }
    }
    /// the polynomial `x`; `degree` must be at least 2
    pub fn x(degree: usize) -> Self {
        let mut coefficients = vec![0; degree];
        coefficients[1] = 1;
        Self { coefficients }
    }
    pub fn from_coefficients(coefficients: Vec<Wide>) -> Self {
        assert!(!coefficients.is_empty());
        Self { coefficients }
    }
    pub fn coefficients(&self) -> &[Wide] {
        &self.coefficients
    }
    pub fn into_coefficients(self) -> Vec<Wide> {
        self.coefficients
    }
    /// true if every coefficient above degree 0 is zero
    pub fn is_constant(&self) -> bool {
        self.coefficients[1..].iter().all(Zero::is_zero)
    }
    pub fn constant_term(&self) -> Wide {
        self.coefficients[0]
    }
    pub fn is_one(&self) -> bool {
        self.is_constant() && self.constant_term().is_one()
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_terms(f, &self.coefficients)
    }
}
