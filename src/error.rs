//! Errors.

/// The error produced by [`parse_double`](crate::parse_double) and
/// [`parse_double_bytes`](crate::parse_double_bytes) when the input is not a
/// valid floating-point literal.
///
/// There is a single error kind, `InvalidNumber`; the empty-input subcase is
/// distinguished only in the diagnostic text, not in a separate variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid number{}", diagnostic_suffix(.reason, .snippet.as_deref()))]
pub struct ParseFloatError {
    reason: Reason,
    snippet: Option<Box<str>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reason {
    Empty,
    BadSign,
    BadSymbol,
    BadDigits,
    BadHexPrefix,
    MissingHexExponent,
    MultiplePoints,
    TrailingGarbage,
}

impl ParseFloatError {
    pub(crate) fn new(reason: Reason, input: &[u8]) -> Self {
        const MAX_SNIPPET: usize = 1024;
        let snippet = input
            .get(..input.len().min(MAX_SNIPPET))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned().into_boxed_str());
        ParseFloatError { reason, snippet }
    }

    /// A short, stable, machine-readable reason code for the failure.
    pub fn reason(&self) -> &'static str {
        match self.reason {
            Reason::Empty => "empty",
            Reason::BadSign => "bad-sign",
            Reason::BadSymbol => "bad-symbol",
            Reason::BadDigits => "bad-digits",
            Reason::BadHexPrefix => "bad-hex-prefix",
            Reason::MissingHexExponent => "missing-hex-exponent",
            Reason::MultiplePoints => "multiple-points",
            Reason::TrailingGarbage => "trailing-garbage",
        }
    }
}

fn diagnostic_suffix(reason: &Reason, snippet: Option<&str>) -> String {
    let reason = match reason {
        Reason::Empty => "empty input",
        Reason::BadSign => "sign with no digits following it",
        Reason::BadSymbol => "unrecognized symbolic token",
        Reason::BadDigits => "no digits in significand",
        Reason::BadHexPrefix => "invalid hexadecimal-float prefix",
        Reason::MissingHexExponent => "hexadecimal float is missing its binary exponent",
        Reason::MultiplePoints => "more than one decimal point",
        Reason::TrailingGarbage => "unexpected trailing characters",
    };
    match snippet {
        Some(s) if !s.is_empty() => format!(": {reason} (in {s:?})"),
        _ => format!(": {reason}"),
    }
}
