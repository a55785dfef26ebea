// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use crate::error::{Error, Result};
use crate::polynomial::Polynomial;
use crate::Wide;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// `x^4 + x + 1, 2`
    Text,
    /// the coefficients modulo 2 as a bit mask, `0x13` for `x^4 + x + 1`
    HexMask,
}

impl OutputFormat {
    /// fails if polynomials modulo `p` can't be written in this format
    pub fn check_modulus(self, p: Wide) -> Result<()> {
        match self {
            OutputFormat::HexMask if p != 2 => Err(Error::HexRequiresBinary(p)),
            _ => Ok(()),
        }
    }
}

/// bit `k` is the coefficient of `x^k`, zero padded to whole hex digits
fn hex_mask(poly: &Polynomial) -> String {
    let mask = poly
        .iter()
        .rev()
        .fold(0 as Wide, |mask, &coefficient| (mask << 1) | coefficient);
    let digits = (poly.degree() + 4) / 4;
    format!("0x{:0digits$x}", mask, digits = digits)
}

pub fn render(poly: &Polynomial, format: OutputFormat) -> Result<String> {
    format.check_modulus(poly.modulus())?;
    Ok(match format {
        OutputFormat::Text => format!("{}, {}", poly, poly.modulus()),
        OutputFormat::HexMask => hex_mask(poly),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let test_case = |text: &str, p: Wide, format: OutputFormat, expected: &str| {
            let poly = Polynomial::parse(text, p).unwrap();
            let output = render(&poly, format).unwrap();
            println!("{} -> {}", text, output);
            assert_eq!(output, expected);
        };
        test_case("x^4 + x + 1", 2, OutputFormat::Text, "x^4 + x + 1, 2");
        test_case("x^20 + x^2 + 2x + 3", 5, OutputFormat::Text, "x^20 + x^2 + 2x + 3, 5");
        test_case("x^4 + x + 1", 2, OutputFormat::HexMask, "0x13");
        test_case("x^3 + x + 1", 2, OutputFormat::HexMask, "0xb");
        test_case("x^8 + x^4 + x^3 + x^2 + 1", 2, OutputFormat::HexMask, "0x11d");
        test_case("x^7 + x + 1", 2, OutputFormat::HexMask, "0x83");
    }

    #[test]
    fn test_render_hex_requires_binary() {
        let poly = Polynomial::parse("x^2 + x + 2", 3).unwrap();
        assert_eq!(render(&poly, OutputFormat::HexMask), Err(Error::HexRequiresBinary(3)));
        assert_eq!(OutputFormat::HexMask.check_modulus(2), Ok(()));
        assert_eq!(OutputFormat::Text.check_modulus(3), Ok(()));
    }
}
