//! Numeric back-end: given a scanned [`Number`](crate::scanner::Number),
//! computes the correctly-rounded `f64`.
//!
//! Three sub-paths, tried in order for decimal literals:
//! the Clinger fast path (a single exact machine-float multiply/divide),
//! the Eisel-Lemire path (`crate::lemire`), and the fallback bridge
//! (`crate::slow`) for whatever's left. Hex literals never need any of
//! this. `hex_to_f64` below is exact by construction, so they never
//! reach the fallback bridge.

use crate::common::BiasedFp;
use crate::float::RawFloat;
use crate::lemire;
use crate::scanner::{Base, Number};
use crate::slow;

/// Computes the `f64` a fully-scanned [`Number`] denotes.
pub(crate) fn to_f64(n: &Number) -> f64 {
    match n.base {
        Base::Decimal => decimal_to_f64(n),
        Base::Hex => hex_to_f64(n),
    }
}

#[inline(always)]
fn with_sign(bits: u64, negative: bool) -> f64 {
    f64::from_bits(if negative { bits | (1u64 << 63) } else { bits })
}

/// Decimal fast dispatch.
fn decimal_to_f64(n: &Number) -> f64 {
    if n.mantissa == 0 {
        return with_sign(0, n.negative);
    }

    // Clinger fast path. Only tried when the mantissa is exactly
    // representable as an `f64` (< 2^53); truncated mantissas never reach
    // this range (truncation only ever kicks in above 19 decimal digits,
    // far past 2^53 ~ 9.007e15), so no separate truncation check is needed
    // here.
    if n.mantissa >> 53 == 0 {
        if let Some(f) = clinger_fast_path(n.exponent, n.mantissa) {
            let result = if n.negative { -f } else { f };
            debug_assert_cross_checks_against_fallback(n, result);
            return result;
        }
    }

    // Eisel-Lemire.
    let mut fp = lemire::compute_float(n.exponent, n.mantissa);

    // If digits were truncated, the Eisel-Lemire result is only
    // trustworthy if nudging the mantissa up by one (representing the
    // worst case of the discarded digits being nonzero) still lands on the
    // same rounded value. If it doesn't, the rounding direction genuinely
    // depends on digits we don't have, and only the fallback bridge (which
    // sees the original text, truncated digits and all) can resolve it.
    if n.is_truncated && !fp.did_abstain() {
        let fp_if_rounded_up = lemire::compute_float(n.exponent, n.mantissa + 1);
        if fp != fp_if_rounded_up {
            fp = BiasedFp::abstain();
        }
    }

    if fp.did_abstain() {
        // `n.raw` carries the sign already (see `scanner::Number::raw`), so
        // the fallback's result needs no further sign handling.
        return slow::reference(n.raw).unwrap_or_else(|| with_sign(0, n.negative));
    }

    let result = biased_fp_to_float::<f64>(fp);
    debug_assert_cross_checks_against_fallback(n, result);
    result
}

/// Test-only cross-check: every fast-path/Eisel-Lemire result must agree
/// bit-for-bit with the fallback bridge's own (independently
/// correctly-rounded) answer. Never compiled into release builds: this
/// would double the cost of every call by paying for the fallback bridge
/// unconditionally.
#[cfg(test)]
fn debug_assert_cross_checks_against_fallback(n: &Number, got: f64) {
    if let Some(want) = slow::reference(n.raw) {
        assert_eq!(
            got.to_bits(),
            want.to_bits(),
            "fast path disagrees with fallback bridge for {:?}: got {got:e}, reference {want:e}",
            std::str::from_utf8(n.raw)
        );
    }
}

/// No-op outside test builds; see the `#[cfg(test)]` definition above.
#[cfg(not(test))]
#[inline(always)]
fn debug_assert_cross_checks_against_fallback(_n: &Number, _got: f64) {}

/// Powers of ten exactly representable as `f64`, `10^0 ..= 10^22`.
const POW10_FLOAT: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Clinger's fast path: the subcase where the exact decimal result is
/// representable as a single `f64` multiplication or division, because both
/// operands are exactly representable. Extended to cover decimal exponents
/// up to 37 (not just the textbook ±22) by performing the multiplication in
/// two exact steps and range-checking the intermediate result, still
/// provably exact, never a source of incorrect rounding, just a wider fast
/// domain than the minimal textbook version.
fn clinger_fast_path(exp10: i32, mantissa: u64) -> Option<f64> {
    let d = mantissa as f64;
    if exp10 == 0 {
        return Some(d);
    }
    if exp10 > 0 {
        if exp10 <= 22 {
            return Some(d * POW10_FLOAT[exp10 as usize]);
        }
        if exp10 <= 22 + 15 {
            let scaled = d * POW10_FLOAT[exp10 as usize - 22];
            return if (-1e15..=1e15).contains(&scaled) {
                Some(scaled * POW10_FLOAT[22])
            } else {
                None
            };
        }
        None
    } else if exp10 >= -22 {
        Some(d / POW10_FLOAT[(-exp10) as usize])
    } else {
        None
    }
}

/// Converts a `BiasedFp` (the output of `crate::lemire::compute_float`) to
/// the nearest machine float. Generic over `RawFloat`, even though this
/// crate only ever instantiates it for `f64` (see `crate::float`'s module
/// doc).
#[inline(always)]
fn biased_fp_to_float<T: RawFloat>(fp: BiasedFp) -> T {
    let mut word = fp.f;
    word |= (fp.e as u64) << T::MANTISSA_EXPLICIT_BITS;
    T::from_u64_bits(word)
}

const F64_MANTISSA_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;
const F64_EXPONENT_BIAS: i64 = 1023;
const F64_SUBNORMAL_FLOOR: i64 = -1022;

/// Constructs the `f64` directly from a hex literal's significand and
/// power-of-two exponent, exact by construction, so this never abstains
/// and never needs the fallback bridge.
///
/// `n.exponent` already carries the ×4 conversion from hex-digit position to
/// binary power and the point-induced shift, so `value == n.mantissa *
/// 2^n.exponent` up to the truncation sticky bit.
fn hex_to_f64(n: &Number) -> f64 {
    if n.mantissa == 0 {
        return with_sign(0, n.negative);
    }

    let lz = n.mantissa.leading_zeros();
    let mantissa64 = n.mantissa << lz;
    // Exponent of the leading bit of `mantissa64` (which sits at bit 63).
    let mut true_exp: i64 = 63 + n.exponent as i64 - lz as i64;

    let mut drop: u32 = 64 - 53; // keep 53 significant bits for a normal result
    if true_exp < F64_SUBNORMAL_FLOOR {
        let extra = (F64_SUBNORMAL_FLOOR - true_exp) as u64;
        drop = drop.saturating_add(extra.min(128) as u32);
    }

    let (mut top, _) = round_shift(mantissa64, drop, n.is_truncated);

    if drop <= 64 - 53 {
        // Normal path: `top` holds 53 significant bits (or 54 on carry).
        if top == 1u64 << 53 {
            top >>= 1;
            true_exp += 1;
        }
        let biased_exp = true_exp + F64_EXPONENT_BIAS;
        if biased_exp >= 0x7FF {
            return with_sign(0x7FF << 52, n.negative); // +/- infinity
        }
        debug_assert!(biased_exp >= 1);
        let bits = ((biased_exp as u64) << 52) | (top & F64_MANTISSA_MASK);
        with_sign(bits, n.negative)
    } else {
        // Subnormal path: `top` already holds the 52-bit mantissa field
        // directly (biased exponent 0), unless rounding carried all the way
        // up into the smallest normal value.
        if top == 1u64 << 52 {
            return with_sign(1u64 << 52, n.negative); // biased_exp = 1, mantissa = 0
        }
        with_sign(top, n.negative)
    }
}

/// Rounds the top `64 - drop` bits out of a 64-bit value normalized with its
/// MSB at bit 63, round-to-nearest-even, OR-ing `sticky_extra` into the
/// sticky bit (used to fold in `Number::is_truncated`). Returns the rounded
/// value in the low `64 - drop` bits (or one bit wider, on carry).
///
/// `drop` may exceed 64: once the round bit itself would come from beyond
/// the 64 bits we have, no amount of sticky information can round the
/// result up (there's nothing left to round from), so the result is
/// unconditionally zero.
fn round_shift(value: u64, drop: u32, sticky_extra: bool) -> (u64, bool) {
    if drop > 64 {
        return (0, false);
    }
    let kept = if drop == 64 { 0 } else { value >> drop };
    let round_bit = (value >> (drop - 1)) & 1;
    let low_mask = (1u64 << (drop - 1)) - 1;
    let sticky = (value & low_mask) != 0 || sticky_extra;
    let round_up = round_bit == 1 && (sticky || (kept & 1) == 1);
    if round_up {
        (kept + 1, true)
    } else {
        (kept, false)
    }
}
