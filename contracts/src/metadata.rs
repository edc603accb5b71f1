//! # Brand Metadata Store
//!
//! External collaborator, deliberately thin: an opaque string reference
//! per brand owner (an IPFS CID, a URL, whatever the brand's tooling
//! emits). The core imposes no schema and reads nothing back — the store
//! exists so display-layer concerns have somewhere to live that is not
//! the registry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use curio_protocol::Address;

use crate::roles::{AccessControl, RoleError, ADMIN_ROLE};

/// Errors from metadata mutations.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The caller may not write metadata.
    #[error("unauthorized: {address} may not write brand metadata")]
    Unauthorized {
        /// The address that attempted the write.
        address: Address,
    },
}

impl From<RoleError> for MetadataError {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::Unauthorized { address } => MetadataError::Unauthorized { address },
        }
    }
}

/// Opaque metadata references keyed by brand owner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BrandMetadataStore {
    refs: HashMap<Address, String>,
    access: AccessControl,
}

impl BrandMetadataStore {
    /// Creates a store whose sole writer is `orchestrator`.
    pub fn new(orchestrator: Address) -> Self {
        Self {
            refs: HashMap::new(),
            access: AccessControl::seeded(orchestrator),
        }
    }

    /// Records `reference` for `owner`, replacing any previous value.
    pub fn set(
        &mut self,
        caller: &Address,
        owner: Address,
        reference: String,
    ) -> Result<(), MetadataError> {
        self.access.require(ADMIN_ROLE, caller)?;
        self.refs.insert(owner, reference);
        Ok(())
    }

    /// The stored reference for `owner`, if any. Reads are unrestricted.
    pub fn get(&self, owner: &Address) -> Option<&str> {
        self.refs.get(owner).map(String::as_str)
    }
}
