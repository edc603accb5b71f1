//! # Contract Factory
//!
//! Deploys one [`MintingContract`] per approved brand and owns the map
//! from contract address to instance. "Deployment" here is explicit
//! construction into an in-process registry — the environment-level
//! code-deployment primitive of the original pattern becomes a factory
//! that returns an opaque address and keeps the aggregate behind it.
//!
//! Addresses are count-salted BLAKE3 digests over the constructor
//! arguments, so two deployments with identical (name, symbol) still get
//! distinct addresses. A derived address that already exists in the map
//! would mean a 256-bit hash collision; that is reported as a fatal
//! error, not something a caller can recover from.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use curio_protocol::crypto::hash::blake3_hash;
use curio_protocol::{Address, CurioPublicKey};

use crate::ledger::SharedLedger;
use crate::minting::MintingContract;
use crate::roles::{AccessControl, RoleError, ADMIN_ROLE};

/// Errors that can occur during factory operations.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// The caller may not deploy contracts.
    #[error("unauthorized: {address} may not deploy minting contracts")]
    Unauthorized {
        /// The address that attempted the deployment.
        address: Address,
    },

    /// The derived address already exists. A 256-bit collision — fatal,
    /// never user-recoverable.
    #[error("address collision on deployment: {address}")]
    AddressCollision {
        /// The colliding derived address.
        address: Address,
    },
}

impl From<RoleError> for FactoryError {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::Unauthorized { address } => FactoryError::Unauthorized { address },
        }
    }
}

/// Metadata kept per deployment, for audit queries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// The deployed contract's address.
    pub address: Address,
    /// The deploy nonce that salted the address.
    pub nonce: u64,
    /// The brand owner the contract was deployed for.
    pub brand_owner: Address,
}

/// The factory: deploys and stores per-brand minting contracts.
pub struct ContractFactory {
    access: AccessControl,
    /// The administrator verifying key handed to every deployed contract
    /// as its claim-signing authority.
    admin_key: CurioPublicKey,
    /// The shared coupon ledger handle injected into every deployment.
    ledger: SharedLedger,
    contracts: HashMap<Address, MintingContract>,
    deployments: Vec<DeploymentRecord>,
    /// Monotone deployment counter — the salt that keeps identical
    /// constructor arguments from colliding.
    deploy_nonce: u64,
}

impl ContractFactory {
    /// Creates a factory whose sole deployer is `orchestrator`, binding
    /// the claim authority and ledger handle for all future deployments.
    pub fn new(orchestrator: Address, admin_key: CurioPublicKey, ledger: SharedLedger) -> Self {
        Self {
            access: AccessControl::seeded(orchestrator),
            admin_key,
            ledger,
            contracts: HashMap::new(),
            deployments: Vec::new(),
            deploy_nonce: 0,
        }
    }

    /// Derives the address for a deployment with the given salt.
    fn derive_address(name: &str, symbol: &str, nonce: u64) -> Address {
        let mut preimage = Vec::with_capacity(16 + name.len() + symbol.len() + 10);
        preimage.extend_from_slice(b"curio/contract/");
        preimage.extend_from_slice(name.as_bytes());
        preimage.push(0);
        preimage.extend_from_slice(symbol.as_bytes());
        preimage.push(0);
        preimage.extend_from_slice(&nonce.to_be_bytes());
        Address::from_bytes(blake3_hash(&preimage))
    }

    /// Deploys a fresh minting contract and returns its address.
    ///
    /// Restricted to [`ADMIN_ROLE`] (the orchestrator). Every call
    /// produces a distinct address, identical arguments or not; the
    /// nonce only advances on success, so a failed deployment leaves the
    /// factory byte-for-byte unchanged.
    pub fn deploy(
        &mut self,
        caller: &Address,
        name: &str,
        symbol: &str,
        brand_owner: Address,
        minter_delegate: Address,
    ) -> Result<Address, FactoryError> {
        self.access.require(ADMIN_ROLE, caller)?;

        let nonce = self.deploy_nonce;
        let address = Self::derive_address(name, symbol, nonce);
        if self.contracts.contains_key(&address) {
            return Err(FactoryError::AddressCollision { address });
        }

        let contract = MintingContract::new(
            address,
            name.to_string(),
            symbol.to_string(),
            brand_owner,
            minter_delegate,
            self.admin_key.clone(),
            self.ledger.clone(),
        );
        self.contracts.insert(address, contract);
        self.deployments.push(DeploymentRecord {
            address,
            nonce,
            brand_owner,
        });
        self.deploy_nonce += 1;
        Ok(address)
    }

    /// Removes a deployment made earlier in the same unit of work.
    ///
    /// Only the orchestrator's approval rollback path calls this. The
    /// nonce is not rewound — distinctness of future addresses matters
    /// more than a gap in the salt sequence.
    pub(crate) fn revoke_deployment(&mut self, address: &Address) {
        self.contracts.remove(address);
        self.deployments.retain(|d| d.address != *address);
    }

    /// Borrow a deployed contract by address.
    pub fn contract(&self, address: &Address) -> Option<&MintingContract> {
        self.contracts.get(address)
    }

    /// Mutably borrow a deployed contract by address. This is the path
    /// brands take to call their contract directly — the factory does
    /// not mediate pre-mints or claims.
    pub fn contract_mut(&mut self, address: &Address) -> Option<&mut MintingContract> {
        self.contracts.get_mut(address)
    }

    /// Number of live deployments.
    pub fn deployed_count(&self) -> usize {
        self.contracts.len()
    }

    /// The audit log of deployments, in order.
    pub fn deployments(&self) -> &[DeploymentRecord] {
        &self.deployments
    }
}

impl std::fmt::Debug for ContractFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractFactory")
            .field("deployed", &self.contracts.len())
            .field("deploy_nonce", &self.deploy_nonce)
            .finish()
    }
}
