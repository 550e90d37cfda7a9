//! Common utilities, for internal use only.

// Adapted from the `sonic-number` crate (part of cloudwego/sonic-rs), which
// in turn notes it was cloned from rust-lang/rust's `core::num::dec2flt`.

/// A custom 64-bit floating point type, representing `f * 2^e`.
///
/// `e` is biased so that it can be directly shifted into the exponent bits
/// of the target float's bit pattern. `e < 0` is used as the sentinel for
/// "the Eisel-Lemire algorithm could not resolve this value; abstain".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct BiasedFp {
    /// The significand, including the implicit leading bit where applicable.
    pub f: u64,
    /// The biased binary exponent, or a negative sentinel on abstention.
    pub e: i32,
}

impl BiasedFp {
    #[inline]
    pub const fn zero_pow2(e: i32) -> Self {
        Self { f: 0, e }
    }

    #[inline]
    pub const fn abstain() -> Self {
        Self { f: 0, e: -1 }
    }

    #[inline]
    pub const fn did_abstain(&self) -> bool {
        self.e < 0
    }
}
