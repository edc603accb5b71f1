//! # Cryptographic Primitives
//!
//! Everything security-related in curio bottoms out here. The platform's
//! entire trust model is one sentence: a collectible may only be claimed
//! with an Ed25519 signature from the administrator key bound to the
//! brand's minting contract at deployment. This module provides the keys,
//! the signatures, and the hash functions that make that sentence
//! checkable.
//!
//! ## What we use
//!
//! - **Ed25519** (ed25519-dalek, strict verification) for all signatures.
//! - **SHA-256** for claim-message digests — the packed (recipient,
//!   token-id) pair is hashed before signing, so the signed message has a
//!   fixed shape regardless of payload size.
//! - **BLAKE3** for address derivation and anywhere else we need a fast
//!   non-interoperable hash.
//!
//! Two hash functions, one signature scheme. Requests to add more require
//! a threat model, not a preference.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{blake3_hash, sha256};
pub use keys::{CurioKeypair, CurioPublicKey, CurioSignature, KeyError};
pub use signatures::{claim_message, sign, verify, verify_raw, SignatureError};
