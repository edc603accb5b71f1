//! # Hashing Utilities
//!
//! Two hash functions, two jobs, and we refuse to support more without a
//! very good reason:
//!
//! - **SHA-256** — claim-message digests. The packed (recipient, token-id)
//!   payload is reduced to 32 bytes before signing, so the signed message
//!   has a fixed shape. SHA-256 rather than BLAKE3 here because the claim
//!   convention mirrors the personal-message schemes of account-based
//!   chains, which are universally SHA-2/Keccak territory — any external
//!   signer tooling will have it.
//! - **BLAKE3** — contract address derivation in the factory. Internal,
//!   no interoperability constraint, so the faster function wins.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// Returns the 32-byte digest as a `Vec<u8>` for callers that immediately
/// pass it onward as `&[u8]`. For a fixed-size result use
/// [`sha256_array`].
pub fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// SHA-256 returning a fixed-size array. Used in the claim-message path
/// where the digest length is part of the message format.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute the BLAKE3 hash of the input data.
///
/// The workhorse for curio-internal derivations. The factory feeds this
/// `name || symbol || deploy-nonce` to mint contract addresses; the
/// count-based salt is what guarantees distinct addresses for identical
/// constructor arguments.
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}
