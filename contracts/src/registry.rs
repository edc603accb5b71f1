//! # Brand Registry
//!
//! The record of who has registered, who has been legally verified, and
//! which minting contract belongs to whom. One active record per owner
//! address, created unverified at registration and mutated exactly once
//! at approval. Records are never deleted — an owner with any active
//! record, pending or verified, cannot register again.
//!
//! Mutations require [`ADMIN_ROLE`] (held only by the orchestrator);
//! reads are unrestricted, and [`get_brand_info`](BrandRegistry::get_brand_info)
//! returns an empty record rather than an error so callers can existence-check
//! without a result dance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use curio_protocol::Address;

use crate::roles::{AccessControl, RoleError, ADMIN_ROLE};

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The caller lacks [`ADMIN_ROLE`] on the registry.
    #[error("unauthorized: {address} may not mutate the registry")]
    Unauthorized {
        /// The address that attempted the mutation.
        address: Address,
    },

    /// The owner already has an active record, pending or verified.
    #[error("duplicate registration: {owner} already has an active brand record")]
    DuplicateRegistration {
        /// The owner that attempted to re-register.
        owner: Address,
    },

    /// No record exists for this owner.
    #[error("no brand record for {owner}")]
    NotFound {
        /// The owner that was looked up.
        owner: Address,
    },

    /// The record has already been verified — approval is once-only.
    #[error("brand for {owner} is already approved")]
    AlreadyApproved {
        /// The owner whose record is already verified.
        owner: Address,
    },
}

impl From<RoleError> for RegistryError {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::Unauthorized { address } => RegistryError::Unauthorized { address },
        }
    }
}

/// A brand's registration record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BrandRecord {
    /// Display name (e.g., "Harkon").
    pub name: String,
    /// Ticker-style symbol (e.g., "HKN").
    pub symbol: String,
    /// The brand owner's account address. [`Address::ZERO`] in the empty
    /// record returned for unknown owners.
    pub owner: Address,
    /// Opaque metadata reference, mirrored into the metadata store.
    pub metadata_ref: String,
    /// Set by the administrator's approval; false until then.
    pub is_legal_verified: bool,
    /// The brand's minting contract. Unset until approval.
    pub nft_contract: Option<Address>,
    /// When the registration was submitted.
    pub registered_at: DateTime<Utc>,
    /// When the administrator approved, if ever.
    pub approved_at: Option<DateTime<Utc>>,
}

impl BrandRecord {
    /// The empty record: what [`BrandRegistry::get_brand_info`] hands back
    /// for owners that never registered. All fields zeroed, timestamps at
    /// the epoch.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            owner: Address::ZERO,
            metadata_ref: String::new(),
            is_legal_verified: false,
            nft_contract: None,
            registered_at: DateTime::<Utc>::UNIX_EPOCH,
            approved_at: None,
        }
    }

    /// Returns `true` if this is a real record rather than the empty one.
    pub fn exists(&self) -> bool {
        !self.owner.is_zero()
    }
}

/// The brand registry: owner address → record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BrandRegistry {
    records: HashMap<Address, BrandRecord>,
    access: AccessControl,
}

impl BrandRegistry {
    /// Creates a registry whose sole admin is `orchestrator`.
    pub fn new(orchestrator: Address) -> Self {
        Self {
            records: HashMap::new(),
            access: AccessControl::seeded(orchestrator),
        }
    }

    /// Creates an unverified record for `owner`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Unauthorized`] unless `caller` holds admin;
    /// [`RegistryError::DuplicateRegistration`] if `owner` already has an
    /// active record — pending registrations included, so a second
    /// registration can never race an in-flight approval.
    pub fn create_record(
        &mut self,
        caller: &Address,
        name: String,
        symbol: String,
        owner: Address,
        metadata_ref: String,
    ) -> Result<(), RegistryError> {
        self.access.require(ADMIN_ROLE, caller)?;

        if self.records.contains_key(&owner) {
            return Err(RegistryError::DuplicateRegistration { owner });
        }

        self.records.insert(
            owner,
            BrandRecord {
                name,
                symbol,
                owner,
                metadata_ref,
                is_legal_verified: false,
                nft_contract: None,
                registered_at: Utc::now(),
                approved_at: None,
            },
        );
        Ok(())
    }

    /// Marks `owner`'s record verified and binds its minting contract.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Unauthorized`], [`RegistryError::NotFound`], or
    /// [`RegistryError::AlreadyApproved`]. On any error the record is
    /// untouched.
    pub fn mark_verified(
        &mut self,
        caller: &Address,
        owner: &Address,
        nft_contract: Address,
    ) -> Result<(), RegistryError> {
        self.access.require(ADMIN_ROLE, caller)?;

        let record = self
            .records
            .get_mut(owner)
            .ok_or(RegistryError::NotFound { owner: *owner })?;
        if record.is_legal_verified {
            return Err(RegistryError::AlreadyApproved { owner: *owner });
        }

        record.is_legal_verified = true;
        record.nft_contract = Some(nft_contract);
        record.approved_at = Some(Utc::now());
        Ok(())
    }

    /// Reverts a verification performed in the same unit of work.
    ///
    /// Only the orchestrator's approval rollback path calls this; it is
    /// deliberately not public API.
    pub(crate) fn revert_verification(&mut self, owner: &Address) {
        if let Some(record) = self.records.get_mut(owner) {
            record.is_legal_verified = false;
            record.nft_contract = None;
            record.approved_at = None;
        }
    }

    /// Returns `owner`'s record, or the empty record if none exists.
    /// Read access is unrestricted and this never fails.
    pub fn get_brand_info(&self, owner: &Address) -> BrandRecord {
        self.records
            .get(owner)
            .cloned()
            .unwrap_or_else(BrandRecord::empty)
    }

    /// Borrowing lookup for callers that only need to peek.
    pub fn get(&self, owner: &Address) -> Option<&BrandRecord> {
        self.records.get(owner)
    }

    /// Number of registered brands (any verification state).
    pub fn brand_count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORCH: Address = Address::from_bytes([1u8; 32]);
    const OWNER: Address = Address::from_bytes([2u8; 32]);
    const CONTRACT: Address = Address::from_bytes([9u8; 32]);

    fn registry_with_record() -> BrandRegistry {
        let mut reg = BrandRegistry::new(ORCH);
        reg.create_record(
            &ORCH,
            "Harkon".into(),
            "HKN".into(),
            OWNER,
            "ipfs://brand".into(),
        )
        .unwrap();
        reg
    }

    #[test]
    fn created_record_is_unverified() {
        let reg = registry_with_record();
        let info = reg.get_brand_info(&OWNER);
        assert!(info.exists());
        assert_eq!(info.name, "Harkon");
        assert_eq!(info.symbol, "HKN");
        assert!(!info.is_legal_verified);
        assert!(info.nft_contract.is_none());
    }

    #[test]
    fn unknown_owner_gets_empty_record_not_error() {
        let reg = BrandRegistry::new(ORCH);
        let info = reg.get_brand_info(&OWNER);
        assert!(!info.exists());
        assert_eq!(info.name, "");
        assert!(!info.is_legal_verified);
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut reg = registry_with_record();
        let result = reg.create_record(&ORCH, "Again".into(), "AGN".into(), OWNER, "".into());
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateRegistration { .. })
        ));
        // Original record untouched.
        assert_eq!(reg.get_brand_info(&OWNER).name, "Harkon");
    }

    #[test]
    fn re_registration_after_approval_also_rejected() {
        let mut reg = registry_with_record();
        reg.mark_verified(&ORCH, &OWNER, CONTRACT).unwrap();
        let result = reg.create_record(&ORCH, "Again".into(), "AGN".into(), OWNER, "".into());
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateRegistration { .. })
        ));
    }

    #[test]
    fn non_admin_cannot_mutate() {
        let mut reg = BrandRegistry::new(ORCH);
        let result = reg.create_record(&OWNER, "X".into(), "X".into(), OWNER, "".into());
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
        assert!(matches!(
            reg.mark_verified(&OWNER, &OWNER, CONTRACT),
            Err(RegistryError::Unauthorized { .. })
        ));
    }

    #[test]
    fn mark_verified_sets_flag_and_contract() {
        let mut reg = registry_with_record();
        reg.mark_verified(&ORCH, &OWNER, CONTRACT).unwrap();
        let info = reg.get_brand_info(&OWNER);
        assert!(info.is_legal_verified);
        assert_eq!(info.nft_contract, Some(CONTRACT));
        assert!(info.approved_at.is_some());
    }

    #[test]
    fn mark_verified_without_record_is_not_found() {
        let mut reg = BrandRegistry::new(ORCH);
        assert!(matches!(
            reg.mark_verified(&ORCH, &OWNER, CONTRACT),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn double_approval_rejected() {
        let mut reg = registry_with_record();
        reg.mark_verified(&ORCH, &OWNER, CONTRACT).unwrap();
        assert!(matches!(
            reg.mark_verified(&ORCH, &OWNER, CONTRACT),
            Err(RegistryError::AlreadyApproved { .. })
        ));
    }

    #[test]
    fn revert_restores_pending_state() {
        let mut reg = registry_with_record();
        reg.mark_verified(&ORCH, &OWNER, CONTRACT).unwrap();
        reg.revert_verification(&OWNER);
        let info = reg.get_brand_info(&OWNER);
        assert!(!info.is_legal_verified);
        assert!(info.nft_contract.is_none());
        assert!(info.approved_at.is_none());
    }

    #[test]
    fn record_serialization_roundtrip() {
        let reg = registry_with_record();
        let info = reg.get_brand_info(&OWNER);
        let json = serde_json::to_string(&info).expect("serialize");
        let recovered: BrandRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(recovered.name, "Harkon");
        assert_eq!(recovered.owner, OWNER);
    }
}
