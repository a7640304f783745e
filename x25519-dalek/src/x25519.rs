// -*- mode: rust; -*-
//
// This file is part of x25519-dalek.
// Copyright (c) 2017-2021 isis lovecruft
// Copyright (c) 2019 DebugSteven
// Copyright (c) 2017-2021 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - DebugSteven <debugsteven@gmail.com>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! x25519 Diffie-Hellman key exchange, built on the
//! [`curve25519_dalek::montgomery`] X-only scalar multiplication.
//!
//! This module provides three kinds of secret key ([`EphemeralSecret`],
//! [`ReusableSecret`], [`StaticSecret`]) that differ only in how many times
//! they may be used to call [`diffie_hellman`](EphemeralSecret::diffie_hellman)
//! and whether their bytes can be extracted, plus the [`PublicKey`] and
//! [`SharedSecret`] types that round out the exchange.

use core::fmt;

use rand_core::{CryptoRng, RngCore};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use curve25519_dalek::{montgomery, MontgomeryPoint};

pub use curve25519_dalek::X25519_BASEPOINT_BYTES;

/// The bare X25519 function (RFC 7748 section 5): `scalar * u_point`, with
/// `scalar` clamped internally. Useful for implementations that want the
/// raw RFC 7748 entry points instead of the typed [`EphemeralSecret`] /
/// [`PublicKey`] API below.
pub fn x25519(k: [u8; 32], u: [u8; 32]) -> [u8; 32] {
    montgomery::x25519(&k, &MontgomeryPoint(u))
}

/// A Diffie-Hellman public key, corresponding to some secret key.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct PublicKey(pub(crate) MontgomeryPoint);

impl From<[u8; 32]> for PublicKey {
    /// Given a byte array, construct a `PublicKey`.
    fn from(bytes: [u8; 32]) -> PublicKey {
        PublicKey(MontgomeryPoint(bytes))
    }
}

impl PublicKey {
    /// Convert this public key to a byte array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0 .0
    }

    /// View this public key as a byte array.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0 .0
    }
}

impl AsRef<[u8]> for PublicKey {
    /// View this public key as a byte array.
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// A short-lived Diffie-Hellman secret key that can only be used to compute
/// a single [`SharedSecret`].
///
/// This type is identical to the `StaticSecret` type, except that the
/// [`EphemeralSecret::diffie_hellman`] method consumes and then wipes the
/// secret key, and there is no way to serialize or even to view the bytes
/// of this secret key: it only ever exists ephemerally.
#[derive(Clone)]
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
#[cfg_attr(feature = "zeroize", zeroize(drop))]
pub struct EphemeralSecret(pub(crate) [u8; 32]);

impl EphemeralSecret {
    /// Perform a Diffie-Hellman key agreement between `self` and
    /// `their_public` key, producing a [`SharedSecret`].
    pub fn diffie_hellman(self, their_public: &PublicKey) -> SharedSecret {
        SharedSecret(montgomery::x25519(&self.0, &their_public.0))
    }

    /// Generate a new [`EphemeralSecret`] drawing randomness from `csprng`.
    pub fn random_from_rng<R: CryptoRng + RngCore>(mut csprng: R) -> Self {
        let mut bytes = [0u8; 32];
        csprng.fill_bytes(&mut bytes);
        EphemeralSecret(bytes)
    }

    /// Generate a new [`EphemeralSecret`] from the system's default CSPRNG.
    #[cfg(feature = "os_rng")]
    pub fn random() -> Self {
        Self::random_from_rng(rand_core::OsRng)
    }
}

impl From<&EphemeralSecret> for PublicKey {
    /// Derive the [`PublicKey`] corresponding to this [`EphemeralSecret`].
    fn from(secret: &EphemeralSecret) -> PublicKey {
        PublicKey(MontgomeryPoint(montgomery::x25519_public_key(&secret.0)))
    }
}

impl fmt::Debug for EphemeralSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EphemeralSecret: [REDACTED]")
    }
}

/// A Diffie-Hellman secret key that may be used more than once, but is still
/// recommended to be used for only one key exchange in most circumstances.
///
/// Unlike [`EphemeralSecret`], this key does not consume itself on use, so it
/// is possible to reuse this key for multiple Diffie-Hellman exchanges.
/// Unlike [`StaticSecret`], this key does not allow its bytes to be
/// serialized, making misuse (such as long-term storage) more difficult.
#[cfg(feature = "reusable_secrets")]
#[derive(Clone)]
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
#[cfg_attr(feature = "zeroize", zeroize(drop))]
pub struct ReusableSecret(pub(crate) [u8; 32]);

#[cfg(feature = "reusable_secrets")]
impl ReusableSecret {
    /// Perform a Diffie-Hellman key agreement between `self` and
    /// `their_public` key, producing a [`SharedSecret`].
    pub fn diffie_hellman(&self, their_public: &PublicKey) -> SharedSecret {
        SharedSecret(montgomery::x25519(&self.0, &their_public.0))
    }

    /// Generate a new [`ReusableSecret`] drawing randomness from `csprng`.
    pub fn random_from_rng<R: CryptoRng + RngCore>(mut csprng: R) -> Self {
        let mut bytes = [0u8; 32];
        csprng.fill_bytes(&mut bytes);
        ReusableSecret(bytes)
    }

    /// Generate a new [`ReusableSecret`] from the system's default CSPRNG.
    #[cfg(feature = "os_rng")]
    pub fn random() -> Self {
        Self::random_from_rng(rand_core::OsRng)
    }
}

#[cfg(feature = "reusable_secrets")]
impl From<&ReusableSecret> for PublicKey {
    fn from(secret: &ReusableSecret) -> PublicKey {
        PublicKey(MontgomeryPoint(montgomery::x25519_public_key(&secret.0)))
    }
}

#[cfg(feature = "reusable_secrets")]
impl fmt::Debug for ReusableSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReusableSecret: [REDACTED]")
    }
}

/// A Diffie-Hellman secret key that can be serialized and deserialized, and
/// therefore stored across multiple invocations of a program.
///
/// Keys of this type are can be used to perform multiple key exchanges over
/// the lifetime of the key; callers who do not need this -- i.e. most
/// protocols implementing forward secrecy -- should prefer
/// [`EphemeralSecret`].
#[cfg(feature = "static_secrets")]
#[derive(Clone)]
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
#[cfg_attr(feature = "zeroize", zeroize(drop))]
pub struct StaticSecret(pub(crate) [u8; 32]);

#[cfg(feature = "static_secrets")]
impl StaticSecret {
    /// Perform a Diffie-Hellman key agreement between `self` and
    /// `their_public` key, producing a [`SharedSecret`].
    pub fn diffie_hellman(&self, their_public: &PublicKey) -> SharedSecret {
        SharedSecret(montgomery::x25519(&self.0, &their_public.0))
    }

    /// Generate a new [`StaticSecret`] drawing randomness from `csprng`.
    pub fn random_from_rng<R: CryptoRng + RngCore>(mut csprng: R) -> Self {
        let mut bytes = [0u8; 32];
        csprng.fill_bytes(&mut bytes);
        StaticSecret(bytes)
    }

    /// Generate a new [`StaticSecret`] from the system's default CSPRNG.
    #[cfg(feature = "os_rng")]
    pub fn random() -> Self {
        Self::random_from_rng(rand_core::OsRng)
    }

    /// Convert this secret key to a byte array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

#[cfg(feature = "static_secrets")]
impl From<[u8; 32]> for StaticSecret {
    /// Load a secret key directly from a byte array. Does *not* clamp the
    /// bytes: clamping happens once, inside the ladder itself, each time the
    /// key is used.
    fn from(bytes: [u8; 32]) -> StaticSecret {
        StaticSecret(bytes)
    }
}

#[cfg(feature = "static_secrets")]
impl<'a> From<&'a StaticSecret> for PublicKey {
    fn from(secret: &'a StaticSecret) -> PublicKey {
        PublicKey(MontgomeryPoint(montgomery::x25519_public_key(&secret.0)))
    }
}

#[cfg(feature = "static_secrets")]
impl fmt::Debug for StaticSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StaticSecret: [REDACTED]")
    }
}

/// The result of a Diffie-Hellman key exchange.
///
/// Each party supplies their own secret key and the other party's public
/// key; RFC 7748's scalar multiplication has no failure mode, so this type
/// is always produced -- including, for a maliciously-chosen peer public
/// key, the all-zero non-contributory output. Protocols that care about
/// rejecting that case should check [`SharedSecret::was_contributory`]
/// before using the bytes.
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
#[cfg_attr(feature = "zeroize", zeroize(drop))]
pub struct SharedSecret(pub(crate) [u8; 32]);

impl SharedSecret {
    /// Convert this shared secret to a byte array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// View this shared secret as a byte array.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns `true` if the shared secret was NOT the result of a
    /// key-exchange with a non-contributory public key.
    ///
    /// Both X25519 peers should verify that this is true for a DH exchange
    /// to be considered contributory. This is preferred over checking for
    /// an all-zero output directly, as it is more difficult to miscompile.
    pub fn was_contributory(&self) -> bool {
        self.0 != [0u8; 32]
    }
}

impl AsRef<[u8]> for SharedSecret {
    /// View this shared secret as a byte array.
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
