//! Integration tests covering the ten testable properties of the public
//! grammar and numeric contract. Unit tests colocated with each module cover
//! internal invariants; these exercise only `parse_double`/`parse_double_bytes`.

use fast_double_parse::parse_double;

/// A small, dependency-free splitmix64 generator, deterministic across runs
/// (fixed seed), used only to get a reasonable spread of `f64` bit patterns
/// for the bit-exactness sweep below. Not intended to be cryptographically
/// random, just reproducible.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

/// Renders `d`'s exact bit pattern as a hexadecimal-significand literal this
/// crate's own grammar accepts (`0x1.{52-bit mantissa in hex}p{exponent}`,
/// or the subnormal/zero forms), so hex round-tripping can be exercised
/// without a `{:x}` formatter for `f64` (the standard library has none).
fn hex_render(d: f64) -> String {
    let bits = d.to_bits();
    let sign = if bits >> 63 == 1 { "-" } else { "" };
    let exp_bits = ((bits >> 52) & 0x7FF) as i64;
    let mantissa = bits & 0x000F_FFFF_FFFF_FFFF;
    if exp_bits == 0 && mantissa == 0 {
        return format!("{sign}0x0p0");
    }
    if exp_bits == 0 {
        format!("{sign}0x0.{mantissa:013x}p-1022")
    } else {
        format!("{sign}0x1.{mantissa:013x}p{}", exp_bits - 1023)
    }
}

// Property 1 & 2: bit-exactness and round-trip against the standard library's
// own `f64::from_str`, over a large random set of bit patterns, each checked
// via both a decimal rendering (`format!("{d:e}")`) and a hex rendering
// (`hex_render`, since `f64` has no `{:x}` formatter of its own).
#[test]
fn bit_exactness_over_random_values() {
    let mut rng = SplitMix64(0x5EED_F00D_CAFE_BABE);
    for _ in 0..100_000 {
        let bits = rng.next();
        let d = f64::from_bits(bits);
        if d.is_nan() || d.is_infinite() {
            continue;
        }
        let decimal = format!("{d:e}");
        let parsed = parse_double(&decimal).unwrap();
        assert_eq!(parsed.to_bits(), d.to_bits(), "mismatch parsing {decimal:?} (want {d:?})");

        let hex = hex_render(d);
        let parsed_hex = parse_double(&hex).unwrap();
        assert_eq!(parsed_hex.to_bits(), d.to_bits(), "mismatch parsing {hex:?} (want {d:?})");
    }
}

#[test]
fn round_trip_curated_values() {
    let values: &[f64] = &[
        0.0,
        -0.0,
        1.0,
        -1.0,
        0.1,
        123456789.123456,
        f64::MIN_POSITIVE,
        f64::MAX,
        f64::MIN,
        f64::from_bits(1), // smallest positive subnormal
        f64::from_bits(0x000F_FFFF_FFFF_FFFF), // largest subnormal
        2.2250738585072014e-308,
        1.7976931348623157e308,
    ];
    for &d in values {
        let decimal = format!("{d:e}");
        assert_eq!(parse_double(&decimal).unwrap().to_bits(), d.to_bits(), "decimal round-trip of {d:e}");

        let hex = hex_render(d);
        assert_eq!(parse_double(&hex).unwrap().to_bits(), d.to_bits(), "hex round-trip of {hex:?}");
    }
}

#[test]
fn sign_of_zero() {
    assert!(parse_double("-0").unwrap().is_sign_negative());
    assert!(parse_double("0").unwrap().is_sign_positive());
    assert!(parse_double("-0.0").unwrap().is_sign_negative());
}

#[test]
fn symbolics() {
    assert!(parse_double("NaN").unwrap().is_nan());
    assert!(parse_double("+NaN").unwrap().is_nan());
    assert!(parse_double("-NaN").unwrap().is_nan());
    assert_eq!(parse_double("Infinity").unwrap(), f64::INFINITY);
    assert_eq!(parse_double("+Infinity").unwrap(), f64::INFINITY);
    assert_eq!(parse_double("-Infinity").unwrap(), f64::NEG_INFINITY);
}

#[test]
fn whitespace_handling() {
    assert_eq!(parse_double("  1.5  ").unwrap(), 1.5);
    assert_eq!(parse_double("\t1.5\n").unwrap(), 1.5);
    assert!(parse_double("1 .5").is_err());
    assert!(parse_double("+ 1.5").is_err());
}

#[test]
fn grammar_rejection_list() {
    let bad = [
        "", ".", "+", "1e", "1e+", "0x", "0x1", "0x1.0.0p0", "1.2.3", "Infini", "nan",
    ];
    for s in bad {
        assert!(parse_double(s).is_err(), "expected {s:?} to be rejected");
    }
}

#[test]
fn boundary_values() {
    assert_eq!(parse_double("1.7976931348623157e308").unwrap(), f64::MAX);
    assert_eq!(parse_double("4.9e-324").unwrap(), f64::from_bits(1));
    assert_eq!(parse_double("2.2250738585072014e-308").unwrap(), f64::MIN_POSITIVE);
    assert_eq!(parse_double("1e400").unwrap(), f64::INFINITY);
    assert_eq!(parse_double("1e-400").unwrap(), 0.0);
    assert!(parse_double("1e-400").unwrap().is_sign_positive());
    assert_eq!(parse_double("0x1.fffffffffffffp+1023").unwrap(), f64::MAX);
    assert_eq!(parse_double("0x1p-1074").unwrap(), f64::from_bits(1));
}

#[test]
fn truncation_correctness() {
    let long_fraction = format!("1.{}1", "0".repeat(50));
    assert_eq!(parse_double(&long_fraction).unwrap(), 1.0);

    let long_integer = format!("1{}", "0".repeat(20));
    assert_eq!(parse_double(&long_integer).unwrap(), 1e20);
}

#[test]
fn overflow_safe_accumulator() {
    let s = format!("1{}e-30", "0".repeat(30));
    assert_eq!(parse_double(&s).unwrap(), 1.0);
}

#[test]
fn exponent_clamp() {
    let huge_positive = format!("1e{}", "9".repeat(20));
    assert_eq!(parse_double(&huge_positive).unwrap(), f64::INFINITY);

    let huge_negative = format!("1e-{}", "9".repeat(20));
    assert_eq!(parse_double(&huge_negative).unwrap(), 0.0);
}

// The truncating re-scan's exponent realignment must match the reference
// converter even when the point falls inside the truncated window (not just
// after it).
#[test]
fn truncation_realignment_across_the_point() {
    let s = format!("{}.{}", "1".repeat(25), "9".repeat(25));
    let expected: f64 = s.parse().unwrap();
    assert_eq!(parse_double(&s).unwrap(), expected);
}
