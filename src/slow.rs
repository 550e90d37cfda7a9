//! Fallback bridge: a single operation that hands the original character
//! sequence to the host platform's own correctly-rounded decimal-to-binary64
//! converter, treated as an opaque, trusted black box.
//!
//! Only decimal literals ever reach this module; hex literals are always
//! resolved exactly by `backend::hex_to_f64`, which never abstains.

/// Parses the exact numeric token text (sign, digits, optional exponent,
/// no surrounding whitespace, no symbolic tokens) via the standard library's
/// own `f64` parser.
///
/// `std::str::FromStr for f64` implements a correctly-rounded decimal
/// converter in its own right (itself Eisel-Lemire-based upstream), so
/// delegating here for the rare cases our fast back-end abstains on costs
/// some speed but never correctness.
pub(crate) fn reference(token: &[u8]) -> Option<f64> {
    std::str::from_utf8(token).ok()?.parse::<f64>().ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_plain_decimal() {
        assert_eq!(reference(b"123.456"), Some(123.456));
    }

    #[test]
    fn parses_with_exponent() {
        assert_eq!(reference(b"1.5e10"), Some(1.5e10));
    }

    #[test]
    fn rejects_non_utf8() {
        assert_eq!(reference(&[0xFF, 0xFE]), None);
    }
}
