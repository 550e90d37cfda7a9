//! Static table of 128-bit approximations of `5^q` for `q` in
//! `[MIN_EXPONENT, MAX_EXPONENT]`, used by the Eisel-Lemire back-end
//! (`src/lemire.rs`) together with the exponent formula there, which expects
//! exactly this normalization: each entry holds the top 128 bits of `5^q`
//! alone (the `2^q` factor of `10^q = 5^q * 2^q` is folded into that
//! formula, not into the table).
//!
//! Rather than transcribing roughly 650 128-bit literals by hand, the table
//! is computed once, lazily, from a small arbitrary-precision integer built
//! for this purpose alone (`BigUint` below). This keeps the table exact
//! (no accumulated floating-point error across entries) and avoids the risk
//! of a transcription mistake in a single literal silently breaking
//! bit-exactness for every decimal exponent that shares it.

use std::sync::OnceLock;

/// Smallest decimal exponent with a table entry.
pub(crate) const MIN_EXPONENT: i32 = -342;
/// Largest decimal exponent with a table entry.
pub(crate) const MAX_EXPONENT: i32 = 308;

/// Number of explicit `5^n` values precomputed; covers both the direct
/// lookups for `q >= 0` and the divisors needed to build reciprocals for
/// `q < 0` (`-MIN_EXPONENT` of those are needed).
const MAX_POW5: usize = (-MIN_EXPONENT) as usize;

/// `table()[q - MIN_EXPONENT]` is `(hi, lo)`: the top 128 bits of `5^q`,
/// normalized so the most significant bit of `hi` is 1, rounded up (toward
/// positive infinity) whenever bits below the kept 128 were nonzero.
pub(crate) fn table() -> &'static [(u64, u64)] {
    static TABLE: OnceLock<Vec<(u64, u64)>> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

fn build_table() -> Vec<(u64, u64)> {
    // Exact values of 5^n for n in 0..=MAX_POW5, built incrementally.
    let mut powers_of_five = Vec::with_capacity(MAX_POW5 + 1);
    let mut current = BigUint::one();
    powers_of_five.push(current.clone());
    for _ in 1..=MAX_POW5 {
        current.mul_small(5);
        powers_of_five.push(current.clone());
    }

    let mut table = Vec::with_capacity((MAX_EXPONENT - MIN_EXPONENT + 1) as usize);
    for q in MIN_EXPONENT..=MAX_EXPONENT {
        let entry = if q >= 0 {
            powers_of_five[q as usize].top_128_round_up(false)
        } else {
            let n = (-q) as usize;
            let divisor = &powers_of_five[n];
            // Want floor(2^shift / 5^n) to have somewhat more than 128 bits,
            // so truncating it to the top 128 bits below is exact enough that
            // the extra division remainder cannot flip the rounding decision.
            let shift = divisor.bit_length() + 160;
            let mut numerator = BigUint::one();
            numerator.shl(shift);
            let (quotient, remainder) = BigUint::div_rem(&numerator, divisor);
            quotient.top_128_round_up(!remainder.is_zero())
        };
        table.push(entry);
    }
    table
}

/// A minimal, unsigned, arbitrary-precision integer used only to build
/// [`table`] once at process startup. Not intended for any hot path: methods
/// favor clarity over speed, and `div_rem` in particular is a simple
/// bit-by-bit restoring division rather than a Knuth-style multi-word one.
#[derive(Clone, Debug, Default)]
struct BigUint {
    /// Little-endian 64-bit limbs; no nonzero-stripped trailing zero limbs,
    /// i.e. `limbs.last() != Some(&0)` always holds except transiently.
    limbs: Vec<u64>,
}

impl BigUint {
    fn zero() -> Self {
        BigUint { limbs: Vec::new() }
    }

    fn one() -> Self {
        BigUint { limbs: vec![1] }
    }

    fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    fn trim(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }

    fn bit_length(&self) -> u32 {
        match self.limbs.last() {
            None => 0,
            Some(&top) => (self.limbs.len() as u32 - 1) * 64 + (64 - top.leading_zeros()),
        }
    }

    fn get_bit(&self, i: u32) -> bool {
        let limb = (i / 64) as usize;
        if limb >= self.limbs.len() {
            return false;
        }
        (self.limbs[limb] >> (i % 64)) & 1 == 1
    }

    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.limbs.len() != other.limbs.len() {
            return self.limbs.len().cmp(&other.limbs.len());
        }
        for i in (0..self.limbs.len()).rev() {
            if self.limbs[i] != other.limbs[i] {
                return self.limbs[i].cmp(&other.limbs[i]);
            }
        }
        std::cmp::Ordering::Equal
    }

    /// Multiply in place by a value that fits in a single limb.
    fn mul_small(&mut self, m: u64) {
        let mut carry: u128 = 0;
        for limb in self.limbs.iter_mut() {
            let v = (*limb as u128) * (m as u128) + carry;
            *limb = v as u64;
            carry = v >> 64;
        }
        if carry != 0 {
            self.limbs.push(carry as u64);
        }
    }

    /// Shift left by an arbitrary number of bits, growing as needed.
    fn shl(&mut self, bits: u32) {
        if self.is_zero() || bits == 0 {
            return;
        }
        let limb_shift = (bits / 64) as usize;
        let bit_shift = bits % 64;
        let mut new_limbs = vec![0u64; limb_shift];
        if bit_shift == 0 {
            new_limbs.extend_from_slice(&self.limbs);
        } else {
            let mut carry = 0u64;
            for &limb in &self.limbs {
                new_limbs.push((limb << bit_shift) | carry);
                carry = limb >> (64 - bit_shift);
            }
            if carry != 0 {
                new_limbs.push(carry);
            }
        }
        self.limbs = new_limbs;
    }

    /// Shift right by an arbitrary number of bits, discarding low bits.
    fn shr(&mut self, bits: u32) {
        if bits == 0 {
            return;
        }
        let limb_shift = (bits / 64) as usize;
        let bit_shift = bits % 64;
        if limb_shift >= self.limbs.len() {
            self.limbs.clear();
            return;
        }
        self.limbs.drain(0..limb_shift);
        if bit_shift != 0 {
            let mut carry = 0u64;
            for limb in self.limbs.iter_mut().rev() {
                let new_carry = *limb << (64 - bit_shift);
                *limb = (*limb >> bit_shift) | carry;
                carry = new_carry;
            }
        }
        self.trim();
    }

    fn shl1_assign(&mut self) {
        let mut carry = 0u64;
        for limb in self.limbs.iter_mut() {
            let new_carry = *limb >> 63;
            *limb = (*limb << 1) | carry;
            carry = new_carry;
        }
        if carry != 0 {
            self.limbs.push(carry);
        }
    }

    fn set_bit0(&mut self) {
        if self.limbs.is_empty() {
            self.limbs.push(1);
        } else {
            self.limbs[0] |= 1;
        }
    }

    /// `self -= other`, assuming `self >= other`.
    fn sub_assign(&mut self, other: &Self) {
        let mut borrow = false;
        for i in 0..self.limbs.len() {
            let o = other.limbs.get(i).copied().unwrap_or(0);
            let (v1, b1) = self.limbs[i].overflowing_sub(o);
            let (v2, b2) = v1.overflowing_sub(borrow as u64);
            self.limbs[i] = v2;
            borrow = b1 || b2;
        }
        self.trim();
    }

    /// Bit-by-bit restoring division: `numerator / divisor`, both nonzero.
    fn div_rem(numerator: &Self, divisor: &Self) -> (Self, Self) {
        let bits = numerator.bit_length();
        let mut quotient = BigUint {
            limbs: vec![0u64; bits.div_ceil(64) as usize],
        };
        let mut remainder = BigUint::zero();
        for i in (0..bits).rev() {
            remainder.shl1_assign();
            if numerator.get_bit(i) {
                remainder.set_bit0();
            }
            if remainder.cmp(divisor) != std::cmp::Ordering::Less {
                remainder.sub_assign(divisor);
                let limb = (i / 64) as usize;
                if limb >= quotient.limbs.len() {
                    quotient.limbs.resize(limb + 1, 0);
                }
                quotient.limbs[limb] |= 1u64 << (i % 64);
            }
        }
        quotient.trim();
        (quotient, remainder)
    }

    /// Extract the normalized top 128 bits (`hi`, `lo`) with the MSB of `hi`
    /// set, rounding up if any bit below the kept 128 is nonzero (including
    /// `extra_sticky`, used by callers that discarded a division remainder
    /// before calling this).
    fn top_128_round_up(&self, extra_sticky: bool) -> (u64, u64) {
        let bits = self.bit_length();
        debug_assert!(bits > 0);
        let (hi, lo, sticky) = if bits <= 128 {
            let mut tmp = self.clone();
            tmp.shl(128 - bits);
            (
                tmp.limbs.get(1).copied().unwrap_or(0),
                tmp.limbs.first().copied().unwrap_or(0),
                extra_sticky,
            )
        } else {
            let drop = bits - 128;
            let mut sticky = extra_sticky;
            for i in 0..drop {
                if self.get_bit(i) {
                    sticky = true;
                    break;
                }
            }
            let mut tmp = self.clone();
            tmp.shr(drop);
            (
                tmp.limbs.get(1).copied().unwrap_or(0),
                tmp.limbs.first().copied().unwrap_or(0),
                sticky,
            )
        };
        if sticky {
            let (lo, carry) = lo.overflowing_add(1);
            let hi = if carry { hi.wrapping_add(1) } else { hi };
            (hi, lo)
        } else {
            (hi, lo)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn five_to_the_zero_is_one() {
        // bit_length(1) == 1, so top_128_round_up aligns the single bit to
        // the very top of `hi`.
        let one = BigUint::one();
        let (hi, lo) = one.top_128_round_up(false);
        assert_eq!(hi, 1u64 << 63);
        assert_eq!(lo, 0);
    }

    #[test]
    fn five_to_the_one_normalizes_correctly() {
        let mut five = BigUint::one();
        five.mul_small(5);
        let (hi, lo) = five.top_128_round_up(false);
        // 5 = 0b101, bit_length 3, shifted left by 125 bits.
        assert_eq!(hi, 0b101u64 << 61);
        assert_eq!(lo, 0);
    }

    #[test]
    fn table_has_expected_length_and_normalization() {
        let t = table();
        assert_eq!(t.len(), (MAX_EXPONENT - MIN_EXPONENT + 1) as usize);
        for &(hi, _) in t {
            assert_ne!(hi & (1 << 63), 0, "every entry must be normalized");
        }
    }

    #[test]
    fn q_zero_entry_is_one() {
        let t = table();
        let idx = (0 - MIN_EXPONENT) as usize;
        assert_eq!(t[idx], (1u64 << 63, 0));
    }

    #[test]
    fn div_rem_matches_small_values() {
        let mut n = BigUint::one();
        n.mul_small(100);
        let mut d = BigUint::one();
        d.mul_small(7);
        let (q, r) = BigUint::div_rem(&n, &d);
        assert_eq!(q.limbs.first().copied().unwrap_or(0), 14);
        assert_eq!(r.limbs.first().copied().unwrap_or(0), 2);
    }
}
