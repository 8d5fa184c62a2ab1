#![no_main]

use arbitrary::Arbitrary;
use bitga::ga::{Domain, bits_per_variable, decode};
use libfuzzer_sys::fuzz_target;

/// Structured input for codec fuzzing.
#[derive(Arbitrary, Debug)]
struct DecodeInput {
    /// Raw bits (capped to the widest supported width).
    bits: Vec<bool>,
    /// Lower interval bound.
    lo: f64,
    /// Interval width.
    width: f64,
    /// Requested precision.
    precision: f64,
}

fuzz_target!(|input: DecodeInput| {
    // Width computation must either fail cleanly or meet the precision
    if let Ok(bits) = bits_per_variable(input.lo, input.lo + input.width, input.precision) {
        let hi = input.lo + input.width;
        let step = (hi - input.lo) / (2f64.powi(bits as i32) - 1.0);
        assert!(step <= input.precision, "step {step} exceeds {}", input.precision);

        if let Ok(domain) = Domain::new(input.lo, hi, input.precision) {
            let (x, y) = domain.decode_pair(&vec![true; domain.chromosome_length()]);
            assert_eq!(x.to_bits(), hi.to_bits());
            assert_eq!(y.to_bits(), hi.to_bits());
        }
    }

    let lo = input.lo;
    let hi = input.lo + input.width;
    if !(lo.is_finite() && hi.is_finite() && lo < hi) {
        return;
    }

    let bits = &input.bits[..input.bits.len().min(53)];
    let value = decode(bits, lo, hi);
    assert!(value >= lo && value <= hi, "{value} outside [{lo}, {hi}]");
});
