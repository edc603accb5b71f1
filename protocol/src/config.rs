//! # Protocol Configuration & Constants
//!
//! Every magic number in curio lives here. If you're hardcoding a constant
//! somewhere else, you're doing it wrong and you owe the team coffee.
//!
//! Most of these values are part of the platform's public contract —
//! changing the coupon allotment or the claim domain prefix after brands
//! are onboarded invalidates outstanding authorizations, so treat edits
//! here as breaking changes.

// ---------------------------------------------------------------------------
// Coupon Economics
// ---------------------------------------------------------------------------

/// The reserved coupon class that gates pre-minting. Every brand's minting
/// contract spends exactly one unit of this class per pre-minted token.
///
/// Class 0 is intentionally unused so that a zero-valued class id in a
/// balance query is always "no such class" rather than "minting coupons".
pub const MINTING_COUPON_CLASS: u64 = 1;

/// The fixed coupon allotment granted to a brand's minting contract at
/// approval time. Granted exactly once per brand, as a single auditable
/// ledger event.
pub const BRAND_COUPON_ALLOTMENT: u64 = 30;

// ---------------------------------------------------------------------------
// Claim Authorization
// ---------------------------------------------------------------------------

/// Domain-separation prefix for claim authorization messages.
///
/// The canonical claim message is `prefix || sha256(recipient || token_id)`.
/// The prefix guarantees a claim signature can never double as a signature
/// over any other protocol message, and the leading 0x19 byte makes the
/// message invalid as the start of any structured payload we sign.
pub const CLAIM_MESSAGE_PREFIX: &[u8] = b"\x19Curio Signed Claim:\n32";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 signing algorithm identifier, for display and audit logs.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Ed25519 secret keys are 32 bytes.
pub const SIGNING_KEY_LENGTH: usize = 32;

/// Public (verifying) key length in bytes.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes. If yours isn't, something
/// has gone terribly wrong.
pub const SIGNATURE_LENGTH: usize = 64;

/// Address length in bytes — raw public key bytes for accounts, a BLAKE3
/// digest for factory-deployed contracts. Same width either way.
pub const ADDRESS_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Versioning
// ---------------------------------------------------------------------------

/// Platform version string, assembled at compile time so we don't allocate
/// for something this trivial at runtime.
pub const PLATFORM_VERSION: &str = "0.1.0";
