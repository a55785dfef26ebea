// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use crate::Wide;
use num_bigint::BigUint;
use thiserror::Error;

/// failures that can only come from a defect in this crate
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InternalError {
    #[error("the inverse of {u} modulo {p} failed its self check")]
    ModularInverse { u: Wide, p: Wide },
    #[error("tested all {tested} monic polynomials of degree {n} modulo {p} without finding a primitive one")]
    NoPrimitivePolynomial { p: Wide, n: usize, tested: Wide },
    #[error("{poly}: the primitivity tests say primitive = {cascade} but the brute force order check says {maximal_order}")]
    ConfirmationMismatch {
        poly: String,
        cascade: bool,
        maximal_order: bool,
    },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("p = {0} must be a prime number >= 2")]
    NotPrime(Wide),
    #[error("degree n = {n} must be in the range [{min}, {max}]")]
    DegreeOutOfRange { n: usize, min: usize, max: usize },
    #[error("p^n = {p}^{n} = {value} is larger than the maximum supported value {max}")]
    Overflow {
        p: Wide,
        n: usize,
        value: BigUint,
        max: Wide,
    },
    #[error("invalid polynomial {text:?}: {reason}")]
    InvalidPolynomial { text: String, reason: String },
    #[error("hex output is only available for p = 2, not p = {0}")]
    HexRequiresBinary(Wide),
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
}

impl Error {
    /// true for defects, as opposed to bad input
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
