// -*- mode: rust; -*-
//
// This file is part of curve25519-dalek.
// Copyright (c) 2016-2021 isis lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\), using ten signed
//! 25.5-bit limbs (radix \\(2\^{25.5}\\)).
//!
//! A [`FieldElement2625`] represents an integer
//! \\(h\_0 + h\_1 2\^{26} + h\_2 2\^{51} + h\_3 2\^{77} + h\_4 2\^{102} +
//! h\_5 2\^{128} + h\_6 2\^{153} + h\_7 2\^{179} + h\_8 2\^{204} + h\_9
//! 2\^{230}\\), with even-indexed limbs nominally 26 bits and odd-indexed
//! limbs nominally 25 bits.
//!
//! Limbs are kept in a signed integer type so that [`sub`](core::ops::Sub)
//! and the Montgomery ladder's differential addition can be expressed
//! without eager borrow propagation. The invariant "ten limbs, each within
//! its nominal bit bound, non-negative" holds only immediately after
//! [`FieldElement2625::reduce_coefficients`] has run; between operations
//! limbs may be signed and slightly oversized. Full non-negativity and
//! canonical range are only established by [`FieldElement2625::to_bytes`].

use core::ops::{Add, Mul, Sub};

use subtle::{Choice, ConditionallySelectable};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// `(p - 1) / 4`'s analogue for the Montgomery curve constant used by the
/// ladder: `a24 = (486662 - 2) / 4 = 121665`.
const A24: i64 = 121665;

/// Bitmask for a nominally 26-bit limb.
const MASK_L26: u32 = (1 << 26) - 1;
/// Bitmask for a nominally 25-bit limb.
const MASK_L25: u32 = (1 << 25) - 1;

/// An element of the field \\( \mathbb Z / (2\^{255} - 19) \\), in the
/// ten-limb radix-\\(2\^{25.5}\\) representation.
///
/// This type is an implementation detail of the backend and is never
/// exposed outside the crate; callers only ever see the 32-byte canonical
/// encoding via [`crate::montgomery::MontgomeryPoint`].
#[derive(Copy, Clone, Debug)]
pub(crate) struct FieldElement2625(pub(crate) [i64; 10]);

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement2625 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl ConditionallySelectable for FieldElement2625 {
    /// Branchless select via the mask-and-xor trick: `mask` is all-ones
    /// when `choice` is 1 and all-zero when `choice` is 0, so
    /// `b ^ (mask & (a ^ b))` is `a` or `b` with no data-dependent branch
    /// or memory index -- the same construction the Montgomery ladder uses
    /// a layer up to swap whole projective points.
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mask = -(choice.unwrap_u8() as i64);
        let mut out = [0i64; 10];
        for i in 0..10 {
            out[i] = b.0[i] ^ (mask & (a.0[i] ^ b.0[i]));
        }
        FieldElement2625(out)
    }
}

impl FieldElement2625 {
    /// The additive identity.
    pub(crate) const ZERO: FieldElement2625 = FieldElement2625([0; 10]);

    /// The multiplicative identity.
    pub(crate) const ONE: FieldElement2625 = FieldElement2625([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// `u = 9`, the canonical X25519 base point.
    pub(crate) const BASEPOINT_U: FieldElement2625 = FieldElement2625([9, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    pub(crate) const fn from_limbs(limbs: [i64; 10]) -> FieldElement2625 {
        FieldElement2625(limbs)
    }

    /// Schoolbook convolution of two ten-limb polynomials, producing the
    /// unreduced product in the low 19 limbs of a 20-limb scratch buffer.
    ///
    /// When both `i` and `j` are odd the cross term is doubled: odd limbs
    /// carry an implicit factor of `2^25` rather than `2^26`, so `a[i]*b[j]`
    /// lands one bit short of the even-weighted target limb; doubling
    /// compensates exactly.
    fn mul_wide(a: &[i64; 10], b: &[i64; 10]) -> [i64; 20] {
        debug_assert!(a.iter().all(|limb| limb.abs() < (1 << 29)));
        debug_assert!(b.iter().all(|limb| limb.abs() < (1 << 29)));
        let mut r = [0i64; 20];
        for i in 0..10 {
            for j in 0..10 {
                let p = a[i] * b[j];
                r[i + j] += if i & 1 == 1 && j & 1 == 1 { p + p } else { p };
            }
        }
        r
    }

    /// Folds the upper ten limbs of an unreduced product back into the
    /// lower ten, using `2^255 = 19 (mod p)`, i.e. `x^10 = 19` in the
    /// polynomial ring this representation evaluates at `x = 2^25.5`.
    fn reduce_degree(poly: &mut [i64; 20]) {
        for i in 0..9 {
            poly[i] += 19 * poly[i + 10];
        }
        for limb in poly.iter_mut().skip(10) {
            *limb = 0;
        }
    }

    /// Restores limb bounds after [`reduce_degree`](Self::reduce_degree):
    /// `|poly[i]| < 2^26` for even `i`, `|poly[i]| < 2^25 + 2^16` for odd
    /// `i`. Sign may still be negative. Requires `poly.len() >= 11`; index
    /// 10 receives the carry spilled past limb 9 and is always left zero.
    fn reduce_coefficients(poly: &mut [i64]) {
        let mut i = 0;
        while i < 10 {
            // Arithmetic (floor) right shift; the subtraction below undoes
            // exactly whichever rounding convention `>>` implements, so the
            // choice of rounding here doesn't affect correctness.
            let carry = poly[i] >> 26;
            poly[i + 1] += carry;
            poly[i] -= carry << 26;

            let carry = poly[i + 1] >> 25;
            poly[i + 2] += carry;
            poly[i + 1] -= carry << 25;
            i += 2;
        }

        // poly[10] carries the overflow past limb 9; fold it back with the
        // same times-19 trick as reduce_degree.
        poly[0] += 19 * poly[10];
        poly[10] = 0;

        let carry = poly[0] >> 26;
        poly[1] += carry;
        poly[0] -= carry << 26;

        debug_assert!(poly[10] == 0);
        for (i, limb) in poly[0..10].iter().enumerate() {
            let bound = if i & 1 == 1 { (1i64 << 25) + (1i64 << 16) } else { 1i64 << 26 };
            debug_assert!(
                limb.abs() < bound,
                "limb {i} out of bound after reduce_coefficients: {limb}"
            );
        }
    }

    /// `self * other`, reduced to ten limbs in bound.
    pub(crate) fn mul_reduced(&self, other: &FieldElement2625) -> FieldElement2625 {
        let mut wide = FieldElement2625::mul_wide(&self.0, &other.0);
        FieldElement2625::reduce_degree(&mut wide);
        FieldElement2625::reduce_coefficients(&mut wide[..11]);
        let mut limbs = [0i64; 10];
        limbs.copy_from_slice(&wide[..10]);
        FieldElement2625(limbs)
    }

    /// `self^2`, reduced to ten limbs in bound.
    pub(crate) fn square(&self) -> FieldElement2625 {
        self.mul_reduced(self)
    }

    /// `self * 121665`, reduced. Used by the Montgomery ladder's doubling
    /// step, which needs `(A + 2)/4` scaled by the squared limb difference.
    fn mul_by_a24(&self) -> FieldElement2625 {
        let mut wide = [0i64; 11];
        for i in 0..10 {
            wide[i] = self.0[i] * A24;
        }
        FieldElement2625::reduce_coefficients(&mut wide);
        let mut limbs = [0i64; 10];
        limbs.copy_from_slice(&wide[..10]);
        FieldElement2625(limbs)
    }

    /// `self^(p-2) = self^(2^255 - 21)`, the modular inverse (zero maps to
    /// zero, matching the behavior of the fixed exponent).
    ///
    /// Uses the addition chain from the reference implementation: 250
    /// consecutive squarings each followed by a multiply by `self`, then the
    /// binary tail `0, 1, 0, 1, 1` (LSB-first) of the remaining exponent
    /// bits. Any correct constant-time addition chain for the same exponent
    /// would do; this one is simply the one this crate has always shipped.
    pub(crate) fn invert(&self) -> FieldElement2625 {
        let mut t = FieldElement2625::ONE;
        for _ in 0..250 {
            let r = t.square();
            t = r.mul_reduced(self);
        }

        // Binary tail: 0, 1, 0, 1, 1.
        let mut r = t.square(); // 0
        t = r.square();
        r = t.mul_reduced(self); // 1
        t = r.square(); // 0
        r = t.square();
        t = r.mul_reduced(self); // 1
        r = t.square();
        t = r.mul_reduced(self); // 1
        t
    }

    /// Extracts ten limbs from a 32-byte little-endian encoding. Bit 7 of
    /// byte 31 is discarded by limb 9's 25-bit mask, matching the
    /// "ignore the high bit" rule for decoding peer public values.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> FieldElement2625 {
        #[inline(always)]
        fn load(bytes: &[u8; 32], offset: usize) -> u32 {
            (bytes[offset] as u32)
                | (bytes[offset + 1] as u32) << 8
                | (bytes[offset + 2] as u32) << 16
                | (bytes[offset + 3] as u32) << 24
        }

        // (offset, cutoff, mask) per limb.
        const LAYOUT: [(usize, u32, u32); 10] = [
            (0, 0, MASK_L26),
            (3, 2, MASK_L25),
            (6, 3, MASK_L26),
            (9, 5, MASK_L25),
            (12, 6, MASK_L26),
            (16, 0, MASK_L25),
            (19, 1, MASK_L26),
            (22, 3, MASK_L25),
            (25, 4, MASK_L26),
            (28, 6, MASK_L25),
        ];

        let mut limbs = [0i64; 10];
        for (i, (offset, cutoff, mask)) in LAYOUT.into_iter().enumerate() {
            limbs[i] = ((load(bytes, offset) >> cutoff) & mask) as i64;
        }
        FieldElement2625(limbs)
    }

    /// Emits the canonical 32-byte little-endian encoding of the integer in
    /// `[0, p)` represented by `self`.
    ///
    /// Ported bit-for-bit from Adam Langley's curve25519-donna, the same
    /// serialization this crate's C ancestor (`edu25519`) borrowed from.
    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        let mut input = [0i32; 10];
        for i in 0..10 {
            input[i] = self.0[i] as i32;
        }

        // Sign normalization: borrow from higher limbs until every limb is
        // non-negative. Two passes are required because the limb-9 -> limb-0
        // wraparound (via the times-19 reduction) can reintroduce a
        // negative limb 0.
        for _ in 0..2 {
            for i in 0..9 {
                let w: u32 = if i & 1 == 1 { 25 } else { 26 };
                let mask = input[i] >> 31;
                let carry = -((input[i] & mask) >> w);
                input[i] += carry << w;
                input[i + 1] -= carry;
            }
            let mask = input[9] >> 31;
            let carry = -((input[9] & mask) >> 25);
            input[9] += carry << 25;
            input[0] -= carry * 19;
        }
        let mask = input[0] >> 31;
        let carry = -((input[0] & mask) >> 26);
        input[0] += carry << 26;
        input[1] -= carry;

        // Size normalization: every limb is now non-negative, but a
        // "25-bit" limb may still hold a value up to 2^26 - 1.
        for _ in 0..2 {
            for i in 0..9 {
                let w: u32 = if i & 1 == 1 { 25 } else { 26 };
                let carry = input[i] >> w;
                input[i] &= (1 << w) - 1;
                input[i + 1] += carry;
            }
            let carry = input[9] >> 25;
            input[9] &= MASK_L25 as i32;
            input[0] += 19 * carry;
        }

        // Conditional subtraction of p = 2^255 - 19: the value is now in
        // [0, 2p), so compare against p and subtract branchlessly.
        let mut mask = s32_gte(input[0], 0x3ffffed);
        for i in 1..10 {
            let max = if i & 1 == 1 { 0x1ffffff } else { 0x3ffffff };
            mask &= s32_eq(input[i], max);
        }
        input[0] -= mask & 0x3ffffed;
        for i in 1..10 {
            let max = if i & 1 == 1 { 0x1ffffff } else { 0x3ffffff };
            input[i] -= mask & max;
        }

        const SHIFT: [u32; 10] = [0, 2, 3, 5, 6, 0, 1, 3, 4, 6];
        for i in 0..10 {
            input[i] <<= SHIFT[i];
        }

        let mut bytes = [0u8; 32];
        const OFFSET: [usize; 10] = [0, 3, 6, 9, 12, 16, 19, 22, 25, 28];
        for i in 0..10 {
            let s = OFFSET[i];
            bytes[s] |= (input[i] & 0xff) as u8;
            bytes[s + 1] = ((input[i] >> 8) & 0xff) as u8;
            bytes[s + 2] = ((input[i] >> 16) & 0xff) as u8;
            bytes[s + 3] = ((input[i] >> 24) & 0xff) as u8;
        }
        bytes
    }
}

/// Returns all-ones if `a == b`, else zero.
fn s32_eq(a: i32, b: i32) -> i32 {
    let mut a = !(a ^ b);
    a &= a << 16;
    a &= a << 8;
    a &= a << 4;
    a &= a << 2;
    a &= a << 1;
    a >> 31
}

/// Returns all-ones if `a >= b`, else zero. Valid for `a - b` not
/// overflowing `i32`, which holds for the bounded limb values here.
fn s32_gte(a: i32, b: i32) -> i32 {
    !((a - b) >> 31)
}

impl Add<&FieldElement2625> for &FieldElement2625 {
    type Output = FieldElement2625;
    fn add(self, rhs: &FieldElement2625) -> FieldElement2625 {
        let mut out = self.0;
        for i in 0..10 {
            out[i] += rhs.0[i];
        }
        FieldElement2625(out)
    }
}

impl Sub<&FieldElement2625> for &FieldElement2625 {
    type Output = FieldElement2625;
    fn sub(self, rhs: &FieldElement2625) -> FieldElement2625 {
        let mut out = self.0;
        for i in 0..10 {
            out[i] -= rhs.0[i];
        }
        FieldElement2625(out)
    }
}

impl Mul<&FieldElement2625> for &FieldElement2625 {
    type Output = FieldElement2625;
    fn mul(self, rhs: &FieldElement2625) -> FieldElement2625 {
        self.mul_reduced(rhs)
    }
}

impl FieldElement2625 {
    /// `self * 121665`, exposed for the ladder's doubling step.
    pub(crate) fn times_a24(&self) -> FieldElement2625 {
        self.mul_by_a24()
    }
}
