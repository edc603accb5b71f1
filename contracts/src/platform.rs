//! # Platform Bootstrap
//!
//! The one-shot wiring step. In the original two-phase pattern, each
//! sub-resource is deployed bare and then grants the orchestrator its
//! admin role in a separate call — a window where the system exists but
//! is not yet safe to use. Here the wire-up is a single construction:
//! every resource is born already knowing the orchestrator as its sole
//! privileged caller, and there is no `initialize()` to forget or to
//! call twice.

use parking_lot::RwLock;
use std::sync::Arc;

use curio_protocol::crypto::hash::blake3_hash;
use curio_protocol::{Address, CurioPublicKey};

use crate::factory::ContractFactory;
use crate::ledger::{CouponClass, CouponLedger, SharedLedger};
use crate::metadata::BrandMetadataStore;
use crate::minting::MintingContract;
use crate::orchestrator::Orchestrator;
use crate::registry::BrandRegistry;

/// A fully wired platform instance.
pub struct Platform {
    orchestrator: Orchestrator,
    ledger: SharedLedger,
}

impl Platform {
    /// Derives the orchestrator's own address from the administrator
    /// account, so a platform bootstrapped for the same administrator is
    /// reproducibly addressed.
    fn orchestrator_address(administrator: &Address) -> Address {
        let mut preimage = Vec::with_capacity(32 + 20);
        preimage.extend_from_slice(b"curio/orchestrator/");
        preimage.extend_from_slice(administrator.as_bytes());
        Address::from_bytes(blake3_hash(&preimage))
    }

    /// Constructs the ledger, registry, factory, metadata store, and
    /// orchestrator, with all role grants in place before the value is
    /// ever observable.
    ///
    /// * `administrator` — the account allowed to approve brands.
    /// * `admin_key` — the verifying key bound into every deployed
    ///   minting contract as the claim-signing authority. Injected, not
    ///   hardcoded: rotate between deployments, mock in tests.
    pub fn bootstrap(administrator: Address, admin_key: CurioPublicKey) -> Self {
        let orchestrator_address = Self::orchestrator_address(&administrator);

        let ledger: SharedLedger =
            Arc::new(RwLock::new(CouponLedger::new(orchestrator_address)));
        let registry = BrandRegistry::new(orchestrator_address);
        let factory = ContractFactory::new(orchestrator_address, admin_key, ledger.clone());
        let metadata = BrandMetadataStore::new(orchestrator_address);

        let orchestrator = Orchestrator::new(
            orchestrator_address,
            administrator,
            registry,
            factory,
            metadata,
            ledger.clone(),
        );

        tracing::debug!(
            orchestrator = %orchestrator_address,
            administrator = %administrator,
            "platform bootstrapped"
        );
        Self {
            orchestrator,
            ledger,
        }
    }

    /// The orchestrator, read-only.
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// The orchestrator, for registration and approval calls.
    pub fn orchestrator_mut(&mut self) -> &mut Orchestrator {
        &mut self.orchestrator
    }

    /// The shared coupon ledger handle.
    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    /// Read-through balance query on the ledger.
    pub fn coupon_balance(&self, holder: &Address, class: CouponClass) -> u64 {
        self.ledger.read().balance_of(holder, class)
    }

    /// Borrow a deployed minting contract.
    pub fn minting_contract(&self, address: &Address) -> Option<&MintingContract> {
        self.orchestrator.minting_contract(address)
    }

    /// Mutably borrow a deployed minting contract.
    pub fn minting_contract_mut(&mut self, address: &Address) -> Option<&mut MintingContract> {
        self.orchestrator.minting_contract_mut(address)
    }
}
