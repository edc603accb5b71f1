//! # Orchestrator
//!
//! The single externally-administered entry point. Brands talk to the
//! orchestrator to register; the administrator talks to it to approve.
//! Approval is the one multi-contract sequence in the system — deploy,
//! verify, grant — and the orchestrator owns making it atomic: either
//! all three effects land or none do. After approval the orchestrator is
//! out of the picture; the brand works its minting contract directly.
//!
//! The orchestrator holds [`ADMIN_ROLE`] on the registry, factory,
//! ledger, and metadata store (wired at bootstrap), and is itself gated
//! by a single administrator account address for approvals.

use thiserror::Error;

use curio_protocol::config::{BRAND_COUPON_ALLOTMENT, MINTING_COUPON_CLASS};
use curio_protocol::Address;

use crate::factory::{ContractFactory, FactoryError};
use crate::ledger::{LedgerError, SharedLedger};
use crate::metadata::BrandMetadataStore;
use crate::minting::MintingContract;
use crate::registry::{BrandRecord, BrandRegistry, RegistryError};

/// Errors that can occur during orchestrator operations.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The caller is not the platform administrator.
    #[error("unauthorized: {address} is not the platform administrator")]
    Unauthorized {
        /// The address that attempted the operation.
        address: Address,
    },

    /// The owner already has an active registration.
    #[error("duplicate registration: {owner} already has an active brand record")]
    DuplicateRegistration {
        /// The owner that attempted to re-register.
        owner: Address,
    },

    /// No pending registration for this owner.
    #[error("no brand record for {owner}")]
    NotFound {
        /// The owner that was looked up.
        owner: Address,
    },

    /// The brand has already been approved — the coupon grant is
    /// once-only, so approval is too.
    #[error("brand for {owner} is already approved")]
    AlreadyApproved {
        /// The owner whose record is already verified.
        owner: Address,
    },

    /// Deployment failed; no partial state persists.
    #[error(transparent)]
    Factory(#[from] FactoryError),

    /// The coupon grant failed; deployment and verification were rolled
    /// back before this surfaced.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<RegistryError> for OrchestratorError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Unauthorized { address } => OrchestratorError::Unauthorized { address },
            RegistryError::DuplicateRegistration { owner } => {
                OrchestratorError::DuplicateRegistration { owner }
            }
            RegistryError::NotFound { owner } => OrchestratorError::NotFound { owner },
            RegistryError::AlreadyApproved { owner } => OrchestratorError::AlreadyApproved { owner },
        }
    }
}

/// The orchestrator. Owns the registry, factory, and metadata store;
/// shares the ledger with every deployed minting contract.
pub struct Orchestrator {
    /// This orchestrator's own address — the identity its role grants
    /// are bound to on each sub-resource.
    address: Address,
    /// The administrator account allowed to approve brands.
    administrator: Address,
    registry: BrandRegistry,
    factory: ContractFactory,
    metadata: BrandMetadataStore,
    ledger: SharedLedger,
}

impl Orchestrator {
    /// Wires up an orchestrator over already-privileged sub-resources.
    /// Called once, from [`Platform::bootstrap`](crate::platform::Platform::bootstrap).
    pub(crate) fn new(
        address: Address,
        administrator: Address,
        registry: BrandRegistry,
        factory: ContractFactory,
        metadata: BrandMetadataStore,
        ledger: SharedLedger,
    ) -> Self {
        Self {
            address,
            administrator,
            registry,
            factory,
            metadata,
            ledger,
        }
    }

    /// Registers a brand: creates the unverified record and mirrors the
    /// metadata reference. Open to anyone — registration is a request,
    /// not a privilege.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::DuplicateRegistration`] if `owner` already
    /// has an active record, pending or verified.
    pub fn register_brand(
        &mut self,
        name: &str,
        symbol: &str,
        owner: Address,
        metadata_ref: &str,
    ) -> Result<(), OrchestratorError> {
        self.registry.create_record(
            &self.address,
            name.to_string(),
            symbol.to_string(),
            owner,
            metadata_ref.to_string(),
        )?;
        // The store write cannot fail once the record landed — the
        // orchestrator is its seeded admin.
        self.metadata
            .set(&self.address, owner, metadata_ref.to_string())
            .expect("orchestrator is the metadata store admin");

        tracing::info!(
            brand = name,
            symbol,
            owner = %owner,
            "brand registered, pending legal verification"
        );
        Ok(())
    }

    /// Approves a registered brand: deploys its minting contract, marks
    /// the record verified, and grants the fixed coupon allotment to the
    /// new contract. Administrator-only.
    ///
    /// The three effects are one unit of work. Deployment failures leave
    /// nothing behind; a grant failure (defensively handled, practically
    /// unreachable for a fresh holder) unwinds the verification and the
    /// deployment before surfacing.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::Unauthorized`], [`OrchestratorError::NotFound`],
    /// [`OrchestratorError::AlreadyApproved`], or a wrapped factory/ledger
    /// failure.
    pub fn approve_brand(
        &mut self,
        caller: &Address,
        owner: Address,
        minter_delegate: Address,
    ) -> Result<Address, OrchestratorError> {
        if *caller != self.administrator {
            return Err(OrchestratorError::Unauthorized { address: *caller });
        }

        let record = self
            .registry
            .get(&owner)
            .ok_or(OrchestratorError::NotFound { owner })?;
        if record.is_legal_verified {
            return Err(OrchestratorError::AlreadyApproved { owner });
        }
        let (name, symbol) = (record.name.clone(), record.symbol.clone());

        let contract_address =
            self.factory
                .deploy(&self.address, &name, &symbol, owner, minter_delegate)?;

        if let Err(err) = self
            .registry
            .mark_verified(&self.address, &owner, contract_address)
        {
            self.factory.revoke_deployment(&contract_address);
            return Err(err.into());
        }

        if let Err(err) = self.ledger.write().grant(
            &self.address,
            contract_address,
            MINTING_COUPON_CLASS,
            BRAND_COUPON_ALLOTMENT,
        ) {
            self.registry.revert_verification(&owner);
            self.factory.revoke_deployment(&contract_address);
            return Err(err.into());
        }

        tracing::info!(
            brand = %name,
            owner = %owner,
            contract = %contract_address,
            delegate = %minter_delegate,
            coupons = BRAND_COUPON_ALLOTMENT,
            "brand approved and funded"
        );
        Ok(contract_address)
    }

    // -- read-through accessors --------------------------------------------

    /// The brand record for `owner` — empty record if none.
    pub fn brand_info(&self, owner: &Address) -> BrandRecord {
        self.registry.get_brand_info(owner)
    }

    /// The administrator account address.
    pub fn administrator(&self) -> Address {
        self.administrator
    }

    /// This orchestrator's own address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The registry, read-only.
    pub fn registry(&self) -> &BrandRegistry {
        &self.registry
    }

    /// The factory, read-only.
    pub fn factory(&self) -> &ContractFactory {
        &self.factory
    }

    /// The metadata store, read-only.
    pub fn metadata(&self) -> &BrandMetadataStore {
        &self.metadata
    }

    /// Borrow a deployed minting contract.
    pub fn minting_contract(&self, address: &Address) -> Option<&MintingContract> {
        self.factory.contract(address)
    }

    /// Mutably borrow a deployed minting contract — the path brands take
    /// for pre-mints and claims.
    pub fn minting_contract_mut(&mut self, address: &Address) -> Option<&mut MintingContract> {
        self.factory.contract_mut(address)
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("address", &self.address)
            .field("administrator", &self.administrator)
            .field("brands", &self.registry.brand_count())
            .field("deployed", &self.factory.deployed_count())
            .finish()
    }
}
