// Copyright (c) 2026 Curio Labs. MIT License.
// See LICENSE for details.

//! # Curio Protocol — Core Library
//!
//! The foundation layer for the curio platform: brand-issued collectible
//! tokens with administrator-countersigned claims. Nothing in this crate
//! knows about brands, coupons, or minting — that lives in
//! `curio-contracts`. What lives here is the material everything else is
//! built from:
//!
//! - **crypto** — Ed25519 keys, signatures, and the two hash functions we
//!   allow ourselves. Don't roll your own.
//! - **address** — the 32-byte address type shared by accounts and
//!   contracts. One type, two derivations.
//! - **config** — protocol constants. Every magic number lives here.
//!
//! ## Design Philosophy
//!
//! 1. Correctness over cleverness. Claim authorization is a pure function
//!    of bytes and a verifying key — no ambient state, no exceptions.
//! 2. No unsafe code in crypto paths.
//! 3. If it gates issuance of a token, it has tests. Plural.

pub mod address;
pub mod config;
pub mod crypto;

pub use address::Address;
pub use crypto::keys::{CurioKeypair, CurioPublicKey, CurioSignature};
