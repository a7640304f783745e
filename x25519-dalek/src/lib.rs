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

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]

#[cfg(feature = "alloc")]
extern crate alloc;

mod x25519;

pub use crate::x25519::{
    x25519, EphemeralSecret, PublicKey, SharedSecret, X25519_BASEPOINT_BYTES,
};

#[cfg(feature = "reusable_secrets")]
pub use crate::x25519::ReusableSecret;

#[cfg(feature = "static_secrets")]
pub use crate::x25519::StaticSecret;
