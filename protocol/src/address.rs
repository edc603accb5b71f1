//! # Addresses
//!
//! One 32-byte address type for every participant in the system. Account
//! addresses (administrator, brand owners, delegates, customers) are raw
//! Ed25519 public key bytes; contract addresses are BLAKE3 digests minted
//! by the factory. Same width, same comparisons, same map keys — the two
//! derivations never collide in practice because a factory digest is
//! astronomically unlikely to be a valid curve point anyone holds the
//! secret for.
//!
//! The all-zero address is reserved as "nobody": it is what an empty
//! brand record points at and what no keypair can ever produce an
//! authorization for.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::crypto::keys::CurioPublicKey;

/// Errors parsing an address from its textual form.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid address: expected 64 hex characters")]
    InvalidHex,
}

/// A 32-byte curio address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 32]);

// Addresses serialize as hex strings rather than byte arrays so they can
// key JSON maps (ledger balances, registry records) without a custom
// map-key adapter.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(D::Error::custom)
    }
}

impl Address {
    /// The reserved "nobody" address. Appears in empty brand records and
    /// nowhere else.
    pub const ZERO: Address = Address([0u8; 32]);

    /// Construct an address from raw bytes. Used by the factory for
    /// derived contract addresses. `const` so tests can name fixture
    /// addresses as constants.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The account address of a public key — the key bytes themselves.
    pub fn from_public_key(public_key: &CurioPublicKey) -> Self {
        Self(*public_key.as_bytes())
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns `true` for the reserved zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Hex-encoded form. 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a hex-encoded address.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(s).map_err(|_| AddressError::InvalidHex)?;
        let arr: [u8; 32] = bytes.as_slice().try_into().map_err(|_| AddressError::InvalidHex)?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form: enough to tell addresses apart in logs, not enough
        // to clutter them.
        write!(f, "Address({}..)", &self.to_hex()[..12])
    }
}
