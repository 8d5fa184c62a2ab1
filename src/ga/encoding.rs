//! Bit-width calculation and the bit string → real codec.
//!
//! A variable in `[lo, hi]` encoded with `w` bits is decoded as
//! `lo + (hi - lo) / (2^w - 1) * r`, where `r` is the bits read as an unsigned
//! integer, most significant bit first.

// Bit widths are small and bounded by MAX_BITS_PER_VARIABLE
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

use crate::error::{GaError, GaResult};

/// Largest width whose integers an `f64` represents exactly.
pub const MAX_BITS_PER_VARIABLE: u32 = 53;

/// Smallest number of bits per variable whose decoding step over `[lo, hi]`
/// does not exceed `precision`.
///
/// # Errors
///
/// Returns [`GaError::InvalidDomain`] if `hi <= lo`, `precision <= 0`, any
/// input is not finite, or more than [`MAX_BITS_PER_VARIABLE`] bits would be
/// needed.
pub fn bits_per_variable(lo: f64, hi: f64, precision: f64) -> GaResult<u32> {
    let invalid = |reason| GaError::InvalidDomain {
        lo,
        hi,
        precision,
        reason,
    };

    if !(lo.is_finite() && hi.is_finite() && precision.is_finite()) {
        return Err(invalid("bounds and precision must be finite"));
    }
    if hi <= lo {
        return Err(invalid("upper bound must exceed lower bound"));
    }
    if precision <= 0.0 {
        return Err(invalid("precision must be positive"));
    }

    let range = hi - lo;
    let estimate = ((range / precision) + 1.0).log2().ceil().max(1.0);
    if estimate > f64::from(MAX_BITS_PER_VARIABLE) {
        return Err(invalid("precision is finer than 53 bits can resolve"));
    }

    // log2 can land a hair off an integer; settle on the true minimum.
    let mut bits = estimate as u32;
    while bits > 1 && step(range, bits - 1) <= precision {
        bits -= 1;
    }
    while step(range, bits) > precision {
        if bits == MAX_BITS_PER_VARIABLE {
            return Err(invalid("precision is finer than 53 bits can resolve"));
        }
        bits += 1;
    }

    Ok(bits)
}

/// Decoding step size for `bits` bits over a range.
fn step(range: f64, bits: u32) -> f64 {
    range / max_value(bits as usize)
}

/// `2^width - 1` as a float.
fn max_value(width: usize) -> f64 {
    2f64.powi(width as i32) - 1.0
}

/// Decode a bit string onto `[lo, hi]`.
///
/// The width is the length of `bits`. All zeros decode to exactly `lo`, all
/// ones to exactly `hi`. An empty slice decodes to `lo`.
#[must_use]
pub fn decode(bits: &[bool], lo: f64, hi: f64) -> f64 {
    if bits.is_empty() {
        return lo;
    }

    let r = bits
        .iter()
        .fold(0.0f64, |acc, &bit| acc * 2.0 + f64::from(u8::from(bit)));
    let t = r / max_value(bits.len());

    // Interpolating from both ends keeps the endpoints exact.
    (lo * (1.0 - t) + hi * t).clamp(lo, hi)
}

/// The search square `[lo, hi]²` together with its encoding width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    lo: f64,
    hi: f64,
    precision: f64,
    bits: u32,
}

impl Domain {
    /// Build a domain, deriving the bits per variable from the precision.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidDomain`] under the same conditions as
    /// [`bits_per_variable`].
    pub fn new(lo: f64, hi: f64, precision: f64) -> GaResult<Self> {
        let bits = bits_per_variable(lo, hi, precision)?;
        Ok(Self {
            lo,
            hi,
            precision,
            bits,
        })
    }

    /// Lower bound of both variables.
    #[must_use]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound of both variables.
    #[must_use]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Requested precision.
    #[must_use]
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Bits used to encode one variable.
    #[must_use]
    pub fn bits_per_variable(&self) -> usize {
        self.bits as usize
    }

    /// Length of a chromosome holding both variables.
    #[must_use]
    pub fn chromosome_length(&self) -> usize {
        self.bits_per_variable() * 2
    }

    /// Actual decoding step, never larger than the precision.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        step(self.hi - self.lo, self.bits)
    }

    /// Decode a two-variable bit string into `(x, y)`.
    ///
    /// The string is split at its midpoint; each half is decoded with the
    /// width of that half.
    #[must_use]
    pub fn decode_pair(&self, bits: &[bool]) -> (f64, f64) {
        let (x_bits, y_bits) = bits.split_at(bits.len() / 2);
        (
            decode(x_bits, self.lo, self.hi),
            decode(y_bits, self.lo, self.hi),
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_bits_for_default_domain() {
        let bits = bits_per_variable(-10.0, 10.0, 0.005).unwrap();
        assert_eq!(bits, 12);
        assert!(step(20.0, bits) <= 0.005);
        assert!(step(20.0, bits - 1) > 0.005);
    }

    #[test]
    fn test_bits_exact_power_of_two() {
        // range / precision + 1 == 2^4
        let bits = bits_per_variable(0.0, 15.0, 1.0).unwrap();
        assert_eq!(bits, 4);
    }

    #[test]
    fn test_bits_coarse_precision() {
        assert_eq!(bits_per_variable(0.0, 1.0, 10.0).unwrap(), 1);
    }

    #[test]
    fn test_invalid_domains() {
        assert!(matches!(
            bits_per_variable(1.0, 1.0, 0.1),
            Err(GaError::InvalidDomain { .. })
        ));
        assert!(matches!(
            bits_per_variable(2.0, 1.0, 0.1),
            Err(GaError::InvalidDomain { .. })
        ));
        assert!(matches!(
            bits_per_variable(0.0, 1.0, 0.0),
            Err(GaError::InvalidDomain { .. })
        ));
        assert!(matches!(
            bits_per_variable(0.0, 1.0, -0.5),
            Err(GaError::InvalidDomain { .. })
        ));
        assert!(matches!(
            bits_per_variable(0.0, f64::INFINITY, 0.5),
            Err(GaError::InvalidDomain { .. })
        ));
        assert!(matches!(
            bits_per_variable(0.0, 1.0, 1e-300),
            Err(GaError::InvalidDomain { .. })
        ));
    }

    #[test]
    fn test_decode_endpoints() {
        assert_eq!(decode(&[false; 12], -10.0, 10.0), -10.0);
        assert_eq!(decode(&[true; 12], -10.0, 10.0), 10.0);
        assert_eq!(decode(&[true; 7], 0.1, 0.3), 0.3);
    }

    #[test]
    fn test_decode_msb_first() {
        // 0b100 = 4 of 7 steps over [0, 7]
        let x = decode(&[true, false, false], 0.0, 7.0);
        assert!((x - 4.0).abs() < 1e-12);
        let x = decode(&[false, false, true], 0.0, 7.0);
        assert!((x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_domain_decode_pair() {
        let domain = Domain::new(-10.0, 10.0, 0.005).unwrap();
        assert_eq!(domain.chromosome_length(), 24);

        let mut bits = vec![false; 12];
        bits.extend([true; 12]);
        assert_eq!(domain.decode_pair(&bits), (-10.0, 10.0));
        assert!(domain.resolution() <= domain.precision());
    }
}
