// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Berlekamp's test for a polynomial being a power of a single irreducible
//! factor.

use super::PowerTable;
use crate::array2d::Array2D;
use crate::error::InternalError;
use crate::mod_int::{add_mod, inverse_mod_p, mul_mod, neg_mod, sub_mod};
use crate::Wide;
use num_traits::Zero;

/// builds `Q - I` where row `k` of `Q` holds the coefficients of
/// `x^(k p) mod (f(x), p)`.
///
/// Element `Q[k][j]` is stored at `(j, k)`, so each row of `Q` is laid out
/// along a row of the returned array and the columns of `Q` are contiguous.
pub fn generate_q_matrix(table: &PowerTable) -> Array2D<Wide> {
    let n = table.degree();
    let p = table.modulus();
    let x_to_p = table.x_to_power(p);
    let mut q = Array2D::new_filled(n, n, Wide::zero());
    let mut row = table.one();
    for k in 0..n {
        if k != 0 {
            table.product(&mut row, &x_to_p);
        }
        for (j, &coefficient) in row.coefficients().iter().enumerate() {
            q[(j, k)] = coefficient;
        }
        q[(k, k)] = sub_mod(q[(k, k)], 1, p);
    }
    q
}

/// the dimension of the null space of `q`, computed by column elimination
/// (Knuth, TAOCP vol. 2, Algorithm 4.6.2N).
///
/// Stops counting at 2 since callers only care whether there is more than one
/// independent solution. `q` is destroyed.
pub fn find_nullity(q: &mut Array2D<Wide>, p: Wide) -> Result<usize, InternalError> {
    let n = q.x_size();
    let mut pivot_row_of_column: Vec<Option<usize>> = vec![None; n];
    let mut nullity = 0;
    for k in 0..n {
        let pivot_column = (0..n).find(|&j| pivot_row_of_column[j].is_none() && !q[(j, k)].is_zero());
        let j = match pivot_column {
            Some(j) => j,
            None => {
                nullity += 1;
                if nullity >= 2 {
                    return Ok(nullity);
                }
                continue;
            }
        };
        let pivot = q[(j, k)];
        let inverse = inverse_mod_p(pivot, p).ok_or(InternalError::ModularInverse { u: pivot, p })?;
        let scale = neg_mod(inverse, p);
        for element in q.column_mut(j) {
            *element = mul_mod(*element, scale, p);
        }
        // q[(j, k)] is now -1; clear the rest of row k
        for i in 0..n {
            let factor = q[(i, k)];
            if i == j || factor.is_zero() {
                continue;
            }
            let (source, target) = q.column_pair_mut(j, i);
            for (element, &pivot_element) in target.iter_mut().zip(source) {
                *element = add_mod(*element, mul_mod(factor, pivot_element, p), p);
            }
        }
        pivot_row_of_column[j] = Some(k);
    }
    Ok(nullity)
}

/// true if `f(x)` has two or more distinct irreducible factors, given the
/// power table of `f(x)`
pub fn has_multiple_irreducible_factors(table: &PowerTable) -> Result<bool, InternalError> {
    let mut q = generate_q_matrix(table);
    tracing::trace!("Q - I =\n{}", q);
    let nullity = find_nullity(&mut q, table.modulus())?;
    tracing::trace!(nullity, "after column elimination:\n{}", q);
    Ok(nullity >= 2)
}
