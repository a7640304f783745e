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

//! The Montgomery form of Curve25519 and the associated `X25519` function.
//!
//! This module contains the `u`-coordinate-only scalar multiplication used
//! by X25519 (RFC 7748), plus the two entry points built on top of it:
//! deriving a public key from a private scalar, and deriving a shared
//! secret from a private scalar and a peer's public value.
//!
//! No `y`-coordinate is ever materialized, so this representation cannot
//! express point addition of two *different* points, sign ambiguity
//! checks, or subgroup membership -- only the differential addition that
//! the ladder needs.

use subtle::{Choice, ConditionallySelectable};

use crate::field::FieldElement2625;

/// A Montgomery `u`-coordinate, encoded as 32 bytes exactly as it would
/// travel over the wire.
///
/// Bit 7 of the last byte is ignored on decode (RFC 7748 section 5), so an
/// adversarially-set high bit does not change which point this decodes to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MontgomeryPoint(pub [u8; 32]);

/// `u = 9`, the X25519 base point, encoded as bytes.
pub const X25519_BASEPOINT_BYTES: [u8; 32] = [
    9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// The X25519 base point, `u = 9`.
pub const X25519_BASEPOINT: MontgomeryPoint = MontgomeryPoint(X25519_BASEPOINT_BYTES);

impl MontgomeryPoint {
    /// Returns the all-zero identity encoding.
    ///
    /// A caller deriving a shared secret whose output equals this is
    /// expected to reject the exchange; this crate does not reject it for
    /// you (RFC 7748's scalarmult has no failure mode, so neither do we).
    pub fn is_identity(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

/// An X-only projective point `(U : W)` on the Montgomery curve, with the
/// point at infinity represented by `W = 0`. No `y`-coordinate is stored.
#[derive(Copy, Clone)]
struct ProjectivePoint {
    u: FieldElement2625,
    w: FieldElement2625,
}

impl ProjectivePoint {
    const IDENTITY: ProjectivePoint = ProjectivePoint {
        u: FieldElement2625::ONE,
        w: FieldElement2625::ZERO,
    };
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectivePoint {
            u: FieldElement2625::conditional_select(&a.u, &b.u, choice),
            w: FieldElement2625::conditional_select(&a.w, &b.w, choice),
        }
    }
}

/// One step of X-only differential addition-and-doubling.
///
/// Given `p = (Up : Wp)`, `q = (Uq : Wq)` and the `u`-coordinate of `p - q`
/// (`affine_diff`), returns `(2p, p + q)`.
fn differential_add_and_double(
    p: &ProjectivePoint,
    q: &ProjectivePoint,
    affine_diff: &FieldElement2625,
) -> (ProjectivePoint, ProjectivePoint) {
    let a = &p.u + &p.w; // Up + Wp
    let b = &p.u - &p.w; // Up - Wp
    let c = &q.u + &q.w; // Uq + Wq
    let d = &q.u - &q.w; // Uq - Wq

    let e = &a * &d; // (Up + Wp)(Uq - Wq)
    let f = &b * &c; // (Up - Wp)(Uq + Wq)

    let sum = &e + &f;
    let diff = &e - &f;

    let sum_point = ProjectivePoint {
        u: sum.square(),
        w: affine_diff * &diff.square(),
    };

    let g = a.square(); // (Up + Wp)^2
    let h = b.square(); // (Up - Wp)^2

    let gh_diff = &g - &h; // 4 Up Wp
    let double_point = ProjectivePoint {
        u: &g * &h,
        w: &gh_diff * &(&g + &gh_diff.times_a24()),
    };

    (double_point, sum_point)
}

/// Computes `scalar * basepoint_u`, where `scalar` has already been
/// clamped, by walking its 256 bits from MSB to LSB and maintaining two
/// adjacent multiples of the base point at every step.
fn montgomery_ladder(scalar: &[u8; 32], basepoint_u: &FieldElement2625) -> ProjectivePoint {
    let mut p0 = ProjectivePoint::IDENTITY;
    let mut p1 = ProjectivePoint {
        u: *basepoint_u,
        w: FieldElement2625::ONE,
    };

    // Bits are processed MSB-first; `swap` tracks whether p0/p1 were
    // swapped on the *previous* iteration so that the swap here exactly
    // undoes or continues it, per the standard ladder "swap on bit change"
    // trick, without ever branching on the bit value itself.
    let mut swap = Choice::from(0);
    for i in (0..32).rev() {
        let byte = scalar[i];
        for j in (0..8).rev() {
            let bit = Choice::from((byte >> j) & 1);
            swap ^= bit;
            ProjectivePoint::conditional_swap(&mut p0, &mut p1, swap);
            swap = bit;

            let (double, sum) = differential_add_and_double(&p0, &p1, basepoint_u);
            p0 = double;
            p1 = sum;
        }
    }
    ProjectivePoint::conditional_swap(&mut p0, &mut p1, swap);

    p0
}

/// Clamps a 32-byte scalar per RFC 7748: clears the low 3 bits of byte 0
/// (forcing a multiple of 8, to land in the prime-order subgroup and avoid
/// small-subgroup points) and normalizes byte 31 to set bit 254 and clear
/// bit 255.
pub(crate) fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0xF8;
    bytes[31] &= 0x7F;
    bytes[31] |= 0x40;
    bytes
}

/// The X25519 function (RFC 7748 section 5): `scalar * u_point`, with
/// `scalar` clamped first. Infallible -- every input produces an output,
/// including inputs that yield the all-zero "non-contributory" result.
pub fn x25519(scalar: &[u8; 32], u_point: &MontgomeryPoint) -> [u8; 32] {
    let e = clamp_integer(*scalar);
    let base = FieldElement2625::from_bytes(&u_point.0);

    let result = montgomery_ladder(&e, &base);
    let z_inv = result.w.invert();
    let affine_u = &result.u * &z_inv;
    affine_u.to_bytes()
}

/// Derives the public key bytes for a clamped private `scalar`, using the
/// canonical base point `u = 9`.
pub fn x25519_public_key(scalar: &[u8; 32]) -> [u8; 32] {
    x25519(scalar, &X25519_BASEPOINT)
}

#[cfg(test)]
mod test {
    use super::*;

    fn hex32(s: &str) -> [u8; 32] {
        let bytes = hex::decode(s).expect("valid hex");
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        out
    }

    #[test]
    fn rfc7748_vector_1() {
        let scalar = hex32("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
        let u = hex32("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
        let expected = hex32("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552");
        assert_eq!(x25519(&scalar, &MontgomeryPoint(u)), expected);
    }

    #[test]
    fn rfc7748_vector_2() {
        let scalar = hex32("4b66e9d4d1b4673c5ad22691957d6af5c11b6421e0ea01d42ca4169e7918ba0d");
        let u = hex32("e5210f12786811d3f4b7959d0538ae2c31dbe7106fc03c3efc4cd549c715a493");
        let expected = hex32("95cbde9476e8907d7aade45cb4b873f88b595a68799fa152e6f8f7647aac7957");
        assert_eq!(x25519(&scalar, &MontgomeryPoint(u)), expected);
    }

    #[test]
    fn rfc7748_vector_3_pubkey() {
        let scalar = hex32("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
        let expected = hex32("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a");
        assert_eq!(x25519_public_key(&scalar), expected);
    }

    #[test]
    fn rfc7748_vector_4_pubkey() {
        let scalar = hex32("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb");
        let expected = hex32("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dddc1c3e1db4835cd");
        assert_eq!(x25519_public_key(&scalar), expected);
    }

    #[test]
    fn rfc7748_vector_5_shared() {
        let alice = hex32("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
        let bob = hex32("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb");
        let expected = hex32("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");
        let bob_pub = x25519_public_key(&bob);
        assert_eq!(x25519(&alice, &MontgomeryPoint(bob_pub)), expected);
    }

    #[test]
    fn clamp_idempotence() {
        // Two scalars differing only in the bits clamping overwrites must
        // yield the same public key.
        let mut a = [0x42u8; 32];
        let mut b = a;
        a[0] &= !0x07;
        b[0] |= 0x07;
        a[31] &= 0x3F;
        b[31] |= 0xC0;
        assert_eq!(clamp_integer(a), clamp_integer(b));
        assert_eq!(x25519_public_key(&a), x25519_public_key(&b));
    }

    #[test]
    fn clamped_zero_scalar_is_nonidentity() {
        let zero = [0u8; 32];
        let out = x25519_public_key(&zero);
        assert_ne!(out, [0u8; 32]);
    }

    #[test]
    fn diffie_hellman_symmetry() {
        let alice = hex32("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
        let bob = hex32("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb");
        let alice_pub = x25519_public_key(&alice);
        let bob_pub = x25519_public_key(&bob);
        let shared1 = x25519(&alice, &MontgomeryPoint(bob_pub));
        let shared2 = x25519(&bob, &MontgomeryPoint(alice_pub));
        assert_eq!(shared1, shared2);
    }

    #[test]
    fn peer_key_high_bit_is_ignored() {
        let scalar = hex32("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
        let mut u = hex32("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
        assert_eq!(u[31] & 0x80, 0, "fixture must have the high bit clear");
        let with_high_bit_clear = x25519(&scalar, &MontgomeryPoint(u));
        u[31] |= 0x80;
        let with_high_bit_set = x25519(&scalar, &MontgomeryPoint(u));
        assert_eq!(with_high_bit_clear, with_high_bit_set);
    }
}
