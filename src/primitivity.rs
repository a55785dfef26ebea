// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! The primitivity test cascade and the exhaustive search built on it.

use crate::error::{Error, InternalError, Result};
use crate::factor::{factor, is_almost_surely_prime, Factorization};
use crate::mod_int::power;
use crate::polynomial::irreducible::has_multiple_irreducible_factors;
use crate::polynomial::order::{
    constant_coefficient_is_primitive_root, constant_coefficient_matches, maximal_order, order_m, order_r,
};
use crate::polynomial::{Polynomial, PowerTable, TrialPolynomials};
use crate::{Wide, MAX_DEGREE, MIN_DEGREE};
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;

/// one test of the cascade, in the order they run
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    ConstantCoefficientPrimitiveRoot,
    LinearFactorFree,
    SingleIrreducibleFactor,
    OrderR,
    ConstantCoefficientMatches,
    OrderM,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::ConstantCoefficientPrimitiveRoot,
        Stage::LinearFactorFree,
        Stage::SingleIrreducibleFactor,
        Stage::OrderR,
        Stage::ConstantCoefficientMatches,
        Stage::OrderM,
    ];
    fn index(self) -> usize {
        self as usize
    }
    /// what a polynomial passing this stage satisfies
    pub fn description(self) -> &'static str {
        match self {
            Stage::ConstantCoefficientPrimitiveRoot => "(-1)^n a0 is a primitive root of p",
            Stage::LinearFactorFree => "no linear factors",
            Stage::SingleIrreducibleFactor => "power of one irreducible factor",
            Stage::OrderR => "x^r is an integer a",
            Stage::ConstantCoefficientMatches => "a = (-1)^n a0 (mod p)",
            Stage::OrderM => "x^(r/q) is not an integer for all q | r",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Primitive,
    /// failed the given stage; later stages didn't run
    Rejected(Stage),
}

impl Verdict {
    pub fn is_primitive(self) -> bool {
        self == Verdict::Primitive
    }
}

/// checks `p` and `n` and returns `p^n`
pub fn validate(p: Wide, n: usize) -> Result<Wide> {
    if p < 2 || !is_almost_surely_prime(p) {
        return Err(Error::NotPrime(p));
    }
    if n < MIN_DEGREE || n > MAX_DEGREE {
        return Err(Error::DegreeOutOfRange {
            n,
            min: MIN_DEGREE,
            max: MAX_DEGREE,
        });
    }
    power(p, n as u32).ok_or_else(|| Error::Overflow {
        p,
        n,
        value: BigUint::from(p).pow(n as u32),
        max: Wide::MAX,
    })
}

/// everything about `p` and `n` the cascade needs, computed once
#[derive(Clone, Debug)]
pub struct PrimitivityTest {
    modulus: Wide,
    degree: usize,
    p_to_n: Wide,
    r: Wide,
    r_factors: Factorization,
    p_minus_1_factors: Factorization,
}

impl PrimitivityTest {
    pub fn new(p: Wide, n: usize) -> Result<Self> {
        let p_to_n = validate(p, n)?;
        let r = (p_to_n - 1) / (p - 1);
        let r_factors = factor(r);
        let p_minus_1_factors = factor(p - 1);
        tracing::debug!(p = %p, n, r = %r, "r = (p^n - 1) / (p - 1) = {}", r_factors);
        tracing::debug!(p = %p, "p - 1 = {}", p_minus_1_factors);
        Ok(Self {
            modulus: p,
            degree: n,
            p_to_n,
            r,
            r_factors,
            p_minus_1_factors,
        })
    }
    pub fn modulus(&self) -> Wide {
        self.modulus
    }
    pub fn degree(&self) -> usize {
        self.degree
    }
    /// `p^n`, the number of monic polynomials of degree `n`
    pub fn p_to_n(&self) -> Wide {
        self.p_to_n
    }
    pub fn r(&self) -> Wide {
        self.r
    }
    pub fn r_factors(&self) -> &Factorization {
        &self.r_factors
    }
    pub fn p_minus_1_factors(&self) -> &Factorization {
        &self.p_minus_1_factors
    }
    /// number of primitive polynomials of degree `n` modulo `p`,
    /// `phi(p^n - 1) / n`
    pub fn primitive_count(&self) -> Option<Wide> {
        let phi = self.r_factors.merge(&self.p_minus_1_factors).euler_phi()?;
        Some(phi / self.degree as Wide)
    }
    /// runs the cascade on `f`, which must have degree `n` modulo `p`
    pub fn check(&self, f: &Polynomial) -> Result<Verdict> {
        assert_eq!(f.degree(), self.degree);
        assert_eq!(f.modulus(), self.modulus);
        if !constant_coefficient_is_primitive_root(f, &self.p_minus_1_factors) {
            return Ok(Verdict::Rejected(Stage::ConstantCoefficientPrimitiveRoot));
        }
        if !f.is_linear_factor_free() {
            return Ok(Verdict::Rejected(Stage::LinearFactorFree));
        }
        let table = PowerTable::new(f);
        if has_multiple_irreducible_factors(&table)? {
            return Ok(Verdict::Rejected(Stage::SingleIrreducibleFactor));
        }
        let a = match order_r(&table, self.r) {
            Some(a) => a,
            None => return Ok(Verdict::Rejected(Stage::OrderR)),
        };
        if !constant_coefficient_matches(f, a) {
            return Ok(Verdict::Rejected(Stage::ConstantCoefficientMatches));
        }
        if !order_m(&table, self.r, &self.r_factors, &self.p_minus_1_factors) {
            return Ok(Verdict::Rejected(Stage::OrderM));
        }
        Ok(Verdict::Primitive)
    }
    /// true if `x` has order `p^n - 1`, checked by brute force
    pub fn confirm(&self, f: &Polynomial) -> bool {
        maximal_order(&PowerTable::new(f))
    }
    /// runs [`Self::confirm`] and fails if it disagrees with `verdict`
    pub fn confirm_verdict(&self, f: &Polynomial, verdict: Verdict) -> Result<()> {
        let confirmed = self.confirm(f);
        tracing::debug!(poly = %f, confirmed, "brute force order check");
        if confirmed != verdict.is_primitive() {
            return Err(InternalError::ConfirmationMismatch {
                poly: f.to_string(),
                cascade: verdict.is_primitive(),
                maximal_order: confirmed,
            }
            .into());
        }
        Ok(())
    }
    /// [`Self::check`] followed by [`Self::confirm`]; the two must agree
    pub fn check_and_confirm(&self, f: &Polynomial) -> Result<Verdict> {
        let verdict = self.check(f)?;
        self.confirm_verdict(f, verdict)?;
        Ok(verdict)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statistics {
    pub modulus: Wide,
    pub degree: usize,
    /// `p^n`
    pub max_num_poly: Wide,
    /// candidates tested
    pub num_poly: Wide,
    /// `passed[stage]` is how many candidates passed that stage
    passed: [Wide; 6],
    /// `phi(p^n - 1) / n`
    pub primitive_count: Option<Wide>,
    /// primitive polynomials double checked by brute force
    pub num_confirmed: Wide,
}

impl Statistics {
    pub fn new(test: &PrimitivityTest) -> Self {
        Self {
            modulus: test.modulus(),
            degree: test.degree(),
            max_num_poly: test.p_to_n(),
            num_poly: Wide::zero(),
            passed: [Wide::zero(); 6],
            primitive_count: test.primitive_count(),
            num_confirmed: Wide::zero(),
        }
    }
    pub fn record(&mut self, verdict: Verdict) {
        self.num_poly += 1;
        let passed_count = match verdict {
            Verdict::Primitive => Stage::ALL.len(),
            Verdict::Rejected(stage) => stage.index(),
        };
        for passed in &mut self.passed[..passed_count] {
            *passed += 1;
        }
    }
    pub fn passed(&self, stage: Stage) -> Wide {
        self.passed[stage.index()]
    }
    pub fn num_primitive(&self) -> Wide {
        self.passed(Stage::OrderM)
    }
    fn log(&self) {
        tracing::debug!(tested = %self.num_poly, "search finished");
        for &stage in &Stage::ALL {
            tracing::debug!(passed = %self.passed(stage), "{}", stage);
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Statistics for degree {} modulo {}", self.degree, self.modulus)?;
        let mut line = |label: &str, value: &dyn fmt::Display| writeln!(f, "  {:<45} {}", label, value);
        line("monic polynomials", &self.max_num_poly)?;
        line("polynomials tested", &self.num_poly)?;
        for &stage in &Stage::ALL {
            line(stage.description(), &self.passed(stage))?;
        }
        line("primitive polynomials found", &self.num_primitive())?;
        match self.primitive_count {
            Some(count) => {
                line("primitive polynomials in total", &count)?;
                let probability = count as f64 / self.max_num_poly as f64;
                line("probability a polynomial is primitive", &format_args!("{:.6e}", probability))
            }
            None => line("primitive polynomials in total", &"unknown"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub modulus: Wide,
    pub degree: usize,
    /// keep going after the first primitive polynomial
    pub list_all: bool,
    /// double check every primitive polynomial found by brute force
    pub confirm: bool,
}

impl SearchConfig {
    pub fn new(modulus: Wide, degree: usize) -> Self {
        Self {
            modulus,
            degree,
            list_all: false,
            confirm: false,
        }
    }
    /// checks `p` and `n` and precomputes what the cascade needs
    pub fn validate(&self) -> Result<PrimitivityTest> {
        PrimitivityTest::new(self.modulus, self.degree)
    }
}

/// tests candidates from [`TrialPolynomials`] in order
#[derive(Clone, Debug)]
pub struct Search {
    test: PrimitivityTest,
    list_all: bool,
    confirm: bool,
    statistics: Statistics,
}

impl Search {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let test = config.validate()?;
        let statistics = Statistics::new(&test);
        Ok(Self {
            test,
            list_all: config.list_all,
            confirm: config.confirm,
            statistics,
        })
    }
    pub fn test(&self) -> &PrimitivityTest {
        &self.test
    }
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }
    /// calls `on_found` for the first primitive polynomial, or for all of
    /// them when listing
    pub fn run<E, F>(&mut self, mut on_found: F) -> Result<(), E>
    where
        E: From<Error>,
        F: FnMut(&Polynomial) -> Result<(), E>,
    {
        let p = self.test.modulus();
        let n = self.test.degree();
        tracing::info!(p = %p, n, list_all = self.list_all, "searching for primitive polynomials");
        let trials = TrialPolynomials::new(n, p, self.test.p_to_n());
        for trial in trials {
            let verdict = self.test.check(&trial)?;
            self.statistics.record(verdict);
            match verdict {
                Verdict::Primitive => {
                    if self.confirm {
                        self.test.confirm_verdict(&trial, verdict)?;
                        self.statistics.num_confirmed += 1;
                    }
                    tracing::info!(poly = %trial, tested = %self.statistics.num_poly, "found primitive polynomial");
                    on_found(&trial)?;
                    if !self.list_all {
                        self.statistics.log();
                        return Ok(());
                    }
                }
                Verdict::Rejected(stage) => {
                    tracing::trace!(poly = %trial, %stage, "rejected");
                }
            }
        }
        self.statistics.log();
        if self.statistics.num_primitive().is_zero() {
            let err = InternalError::NoPrimitivePolynomial {
                p,
                n,
                tested: self.statistics.num_poly,
            };
            tracing::error!("{}", err);
            return Err(Error::from(err).into());
        }
        debug_assert!(!self.list_all || Some(self.statistics.num_primitive()) == self.test.primitive_count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(config: &SearchConfig) -> (Vec<String>, Statistics) {
        let mut search = Search::new(config).unwrap();
        let mut found = Vec::new();
        search
            .run(|poly| -> Result<()> {
                found.push(poly.to_string());
                Ok(())
            })
            .unwrap();
        (found, search.statistics().clone())
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate(2, 4), Ok(16));
        assert_eq!(validate(4, 4), Err(Error::NotPrime(4)));
        assert_eq!(validate(1, 4), Err(Error::NotPrime(1)));
        assert!(matches!(validate(2, 1), Err(Error::DegreeOutOfRange { n: 1, .. })));
        assert!(matches!(
            validate(2, MAX_DEGREE + 1),
            Err(Error::DegreeOutOfRange { .. })
        ));
        assert_eq!(validate(2, MAX_DEGREE), Ok(1 << MAX_DEGREE));
        match validate(3, MAX_DEGREE) {
            Err(Error::Overflow { value, .. }) => assert_eq!(value, BigUint::from(3u32).pow(MAX_DEGREE as u32)),
            result => panic!("unexpected {:?}", result),
        }
    }

    #[test]
    fn test_primitive_count() {
        let test_case = |p: Wide, n: usize, expected: Wide| {
            let test = PrimitivityTest::new(p, n).unwrap();
            println!("p = {}, n = {}, r = {} = {}", p, n, test.r(), test.r_factors());
            assert_eq!(test.primitive_count(), Some(expected));
        };
        test_case(2, 4, 2);
        test_case(2, 5, 6);
        test_case(3, 2, 2);
        test_case(5, 4, 48);
        test_case(7, 3, 36);
    }

    #[test]
    fn test_check() {
        let test_case = |p: Wide, n: usize, text: &str, expected: Verdict| {
            let test = PrimitivityTest::new(p, n).unwrap();
            let poly = Polynomial::parse(text, p).unwrap();
            let verdict = test.check(&poly).unwrap();
            println!("{} -> {:?}", poly, verdict);
            assert_eq!(verdict, expected);
        };
        test_case(2, 4, "x^4 + x + 1", Verdict::Primitive);
        test_case(2, 4, "x^4 + x^3 + 1", Verdict::Primitive);
        test_case(5, 20, "x^20 + x^2 + 2x + 3", Verdict::Primitive);
        test_case(2, 4, "x^4", Verdict::Rejected(Stage::ConstantCoefficientPrimitiveRoot));
        test_case(5, 2, "x^2 + 1", Verdict::Rejected(Stage::ConstantCoefficientPrimitiveRoot));
        test_case(2, 4, "x^4 + 1", Verdict::Rejected(Stage::LinearFactorFree));
        // (x^2 + x + 1)(x^3 + x + 1)
        test_case(2, 5, "x^5 + x^4 + 1", Verdict::Rejected(Stage::SingleIrreducibleFactor));
        // (x^2 + x + 1)^2
        test_case(2, 4, "x^4 + x^2 + 1", Verdict::Rejected(Stage::OrderR));
        // divides x^5 - 1
        test_case(2, 4, "x^4 + x^3 + x^2 + x + 1", Verdict::Rejected(Stage::OrderM));
    }

    #[test]
    fn test_check_agrees_with_maximal_order() {
        let test_case = |p: Wide, n: usize| {
            let test = PrimitivityTest::new(p, n).unwrap();
            let mut count = 0;
            for trial in TrialPolynomials::new(n, p, test.p_to_n()) {
                if test.check_and_confirm(&trial).unwrap().is_primitive() {
                    count += 1;
                }
            }
            println!("p = {}, n = {}: {} primitive", p, n, count);
            assert_eq!(Some(count), test.primitive_count());
        };
        test_case(2, 2);
        test_case(2, 5);
        test_case(2, 6);
        test_case(3, 3);
        test_case(5, 2);
        test_case(7, 2);
    }

    #[test]
    fn test_search_first() {
        let (found, statistics) = search(&SearchConfig::new(2, 4));
        assert_eq!(found, ["x^4 + x + 1"]);
        assert_eq!(statistics.num_poly, 4);
        let (found, statistics) = search(&SearchConfig::new(5, 20));
        assert_eq!(found, ["x^20 + x^2 + 2x + 3"]);
        assert_eq!(statistics.num_poly, 39);
        assert_eq!(statistics.max_num_poly, 95_367_431_640_625);
        assert_eq!(statistics.num_primitive(), 1);
    }

    #[test]
    fn test_search_all() {
        let config = SearchConfig {
            list_all: true,
            confirm: true,
            ..SearchConfig::new(2, 4)
        };
        let (found, statistics) = search(&config);
        assert_eq!(found, ["x^4 + x + 1", "x^4 + x^3 + 1"]);
        assert_eq!(statistics.num_poly, 16);
        // only odd constant coefficients are primitive roots of 2
        assert_eq!(statistics.passed(Stage::ConstantCoefficientPrimitiveRoot), 8);
        assert_eq!(statistics.num_primitive(), 2);
        assert_eq!(statistics.num_confirmed, 2);
        println!("{}", statistics);
    }

    #[test]
    fn test_search_confirms_only_found() {
        let test_case = |p: Wide, n: usize, list_all: bool, expected_tested: Wide, expected_confirmed: Wide| {
            let config = SearchConfig {
                list_all,
                confirm: true,
                ..SearchConfig::new(p, n)
            };
            let (found, statistics) = search(&config);
            println!("p = {}, n = {}: {:?}", p, n, found);
            assert_eq!(statistics.num_poly, expected_tested);
            assert_eq!(statistics.num_confirmed, expected_confirmed);
            assert_eq!(statistics.num_confirmed, statistics.num_primitive());
        };
        test_case(2, 4, false, 4, 1);
        test_case(2, 4, true, 16, 2);
        test_case(3, 3, true, 27, 4);
        let (_, statistics) = search(&SearchConfig::new(2, 4));
        assert_eq!(statistics.num_confirmed, 0);
    }

    #[test]
    fn test_search_invalid() {
        assert_eq!(Search::new(&SearchConfig::new(4, 4)).err(), Some(Error::NotPrime(4)));
        assert!(Search::new(&SearchConfig::new(2, 1)).is_err());
    }

    #[test]
    fn test_search_callback_error() {
        let mut search = Search::new(&SearchConfig::new(3, 3)).unwrap();
        let result = search.run(|_| Err(Error::HexRequiresBinary(3)));
        assert_eq!(result, Err(Error::HexRequiresBinary(3)));
    }

    #[test]
    fn test_statistics_display() {
        let (_, statistics) = search(&SearchConfig::new(5, 20));
        let text = statistics.to_string();
        println!("{}", text);
        assert!(text.contains("Statistics for degree 20 modulo 5"));
        assert!(text
            .lines()
            .any(|line| line.starts_with("  polynomials tested") && line.ends_with(" 39")));
    }
}
