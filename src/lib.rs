// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Search for and test primitive polynomials of degree `n` modulo a prime `p`.
//!
//! A monic polynomial `f(x)` is primitive when `x` has order `p^n - 1` modulo
//! `(f(x), p)`. Instead of stepping through all those powers,
//! [`primitivity::PrimitivityTest`] runs a cascade of cheaper necessary
//! conditions whose conjunction is sufficient.
//!
//! ```
//! use primpoly::primitivity::{Search, SearchConfig};
//!
//! let config = SearchConfig::new(2, 4);
//! let mut search = Search::new(&config).unwrap();
//! let mut found = Vec::new();
//! search.run(|poly| -> Result<(), primpoly::Error> {
//!     found.push(poly.to_string());
//!     Ok(())
//! }).unwrap();
//! assert_eq!(found, ["x^4 + x + 1"]);
//! ```

pub mod array2d;
pub mod error;
pub mod factor;
pub mod mod_int;
pub mod output;
pub mod polynomial;
pub mod primitivity;
pub mod traits;

pub use error::{Error, InternalError};

/// the integer type bounding `p^n`
#[cfg(feature = "wide-128")]
pub type Wide = u128;

/// the integer type bounding `p^n`
#[cfg(not(feature = "wide-128"))]
pub type Wide = u64;

/// smallest supported polynomial degree
pub const MIN_DEGREE: usize = 2;

/// largest supported polynomial degree; `2^MAX_DEGREE` still fits in [`Wide`]
pub const MAX_DEGREE: usize = Wide::BITS as usize - 1;
