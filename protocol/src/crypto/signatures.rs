//! # Claim Signatures
//!
//! Ed25519 signing and verification, plus the canonical claim-message
//! construction that the entire claim flow hangs off.
//!
//! A claim authorization is a signature by the platform administrator over
//! the pair (recipient address, token id). The message is built in two
//! steps, mirroring the personal-message convention of account-based
//! chains:
//!
//! 1. Digest the tightly packed payload: `sha256(recipient || token_id_be)`.
//! 2. Prepend the domain prefix: `CLAIM_MESSAGE_PREFIX || digest`.
//!
//! Both the off-chain signer and the on-contract verifier build the exact
//! same bytes, so validity is a pure function of (recipient, token id,
//! signature, administrator key). No nonce table, no clock.
//!
//! ## Strictness
//!
//! Verification goes through ed25519-dalek's strict path. We reject
//! edge-case signatures that lenient implementations accept — we have no
//! legacy signers to stay compatible with, so stricter wins.

use ed25519_dalek::{Signature as DalekSignature, Verifier, VerifyingKey};
use thiserror::Error;

use super::hash::sha256_array;
use super::keys::{CurioKeypair, CurioPublicKey, CurioSignature};
use crate::address::Address;
use crate::config::CLAIM_MESSAGE_PREFIX;

/// Errors during signature operations.
///
/// Intentionally vague — we don't tell callers (or attackers) which part
/// of a verification failed.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid public key")]
    InvalidPublicKey,
}

/// Build the canonical claim message for (recipient, token id).
///
/// This is the only place the message shape is defined. The administrator
/// signs these bytes; a minting contract rebuilds them to verify. If you
/// change this function you invalidate every outstanding authorization —
/// see the warning in [`crate::config`].
pub fn claim_message(recipient: &Address, token_id: u64) -> Vec<u8> {
    let mut packed = Vec::with_capacity(32 + 8);
    packed.extend_from_slice(recipient.as_bytes());
    packed.extend_from_slice(&token_id.to_be_bytes());
    let digest = sha256_array(&packed);

    let mut message = Vec::with_capacity(CLAIM_MESSAGE_PREFIX.len() + digest.len());
    message.extend_from_slice(CLAIM_MESSAGE_PREFIX);
    message.extend_from_slice(&digest);
    message
}

/// Sign a message with a curio keypair.
///
/// Thin wrapper over the keypair method, kept so every signing operation
/// in the workspace flows through one auditable chokepoint.
pub fn sign(keypair: &CurioKeypair, message: &[u8]) -> CurioSignature {
    keypair.sign(message)
}

/// Verify an Ed25519 signature against a public key and message.
///
/// Returns `true` or `false` — "invalid signature" and "wrong key" are
/// deliberately indistinguishable.
pub fn verify(public_key: &CurioPublicKey, message: &[u8], signature: &CurioSignature) -> bool {
    public_key.verify(message, signature)
}

/// Verify a signature from raw byte components.
///
/// The "I got these bytes off the wire" variant: parses the public key
/// and signature, then verifies. Used by the minting contract, which
/// stores the administrator key as a `VerifyingKey` but receives claim
/// signatures as raw bytes.
pub fn verify_raw(
    public_key_bytes: &[u8; 32],
    message: &[u8],
    signature_bytes: &[u8; 64],
) -> Result<(), SignatureError> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key_bytes).map_err(|_| SignatureError::InvalidPublicKey)?;
    let signature = DalekSignature::from_bytes(signature_bytes);
    verifying_key
        .verify(message, &signature)
        .map_err(|_| SignatureError::VerificationFailed)
}
