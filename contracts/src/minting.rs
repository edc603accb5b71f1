//! # Per-Brand Minting Contract
//!
//! One instance per approved brand, deployed by the factory, owning that
//! brand's entire token-id keyspace. Each token id walks a one-way state
//! machine:
//!
//! ```text
//!    Unissued ──pre_mint──► PreMinted ──claim_nft──► Claimed
//! ```
//!
//! No transition skips a state, none reverses. `Unissued` is represented
//! by absence — the token map only holds ids that have consumed a coupon.
//!
//! Pre-minting is the brand's act: it reserves an id and its display
//! payload, and spends exactly one minting coupon from the contract's own
//! ledger balance. Claiming is the customer's act, authorized not by who
//! calls but by what they carry: an administrator signature over
//! (recipient, token id). Because a claimed id can never return to
//! `PreMinted`, each authorization is single-use — replaying a successful
//! claim fails on state, not on a nonce table.
//!
//! The contract's only outward dependency is the shared coupon ledger
//! handle injected at deployment. Token state is written before that
//! external call and compensated if it fails, so no observer ever sees a
//! coupon spent without a reserved token or vice versa.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use curio_protocol::config::MINTING_COUPON_CLASS;
use curio_protocol::crypto::signatures::claim_message;
use curio_protocol::{Address, CurioPublicKey, CurioSignature};

use crate::ledger::{LedgerError, SharedLedger};

/// Token identifier within one minting contract's keyspace.
pub type TokenId = u64;

/// Errors that can occur during minting-contract operations.
#[derive(Debug, Error)]
pub enum MintError {
    /// The caller may not perform this operation.
    #[error("unauthorized: {address} may not perform this operation")]
    Unauthorized {
        /// The address that attempted the operation.
        address: Address,
    },

    /// The token id has already consumed a coupon (pre-minted or claimed).
    #[error("token {token_id} already issued")]
    AlreadyIssued {
        /// The id that was re-pre-minted.
        token_id: TokenId,
    },

    /// The token id has not been pre-minted, so there is nothing to claim.
    #[error("token {token_id} is not pre-minted")]
    NotPreMinted {
        /// The id that was claimed.
        token_id: TokenId,
    },

    /// The token id has already been claimed — authorizations are
    /// single-use.
    #[error("token {token_id} already claimed")]
    AlreadyClaimed {
        /// The id that was re-claimed.
        token_id: TokenId,
    },

    /// The claim signature did not validate.
    ///
    /// Carries no detail about which part failed. An error oracle here
    /// would hand attackers a forgery-debugging service.
    #[error("invalid claim signature")]
    InvalidSignature,

    /// A ledger failure, surfaced as-is — in practice
    /// [`LedgerError::InsufficientBalance`] when the brand is out of
    /// minting coupons.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Lifecycle state of an issued token id.
///
/// `Unissued` has no variant: unissued ids are simply absent from the
/// token map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenState {
    /// Reserved by the brand; coupon consumed; no owner yet.
    PreMinted,
    /// Owned by a recipient; display payload frozen.
    Claimed,
}

/// Whether `claim_nft` restricts the *caller* in addition to validating
/// the authorization it carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimPolicy {
    /// The signature is the sole authorization; anyone may submit it.
    /// The default — an authorization that only works from one address
    /// adds an availability risk without adding forgery resistance.
    #[default]
    SignatureOnly,
    /// Claims must additionally be submitted by the minter delegate
    /// recorded at deployment.
    DelegateOnly,
}

/// A single issued token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    /// Current lifecycle state.
    pub state: TokenState,
    /// The display payload fixed at pre-mint time.
    pub payload: String,
    /// The owner assigned at claim time. `None` while pre-minted.
    pub owner: Option<Address>,
    /// When the id was pre-minted.
    pub preminted_at: DateTime<Utc>,
    /// When the id was claimed, if it has been.
    pub claimed_at: Option<DateTime<Utc>>,
}

/// A brand's minting contract.
///
/// Not serializable as a whole — it holds a live ledger handle. The
/// token table and every record type inside it are.
pub struct MintingContract {
    address: Address,
    name: String,
    symbol: String,
    brand_owner: Address,
    minter_delegate: Address,
    /// Addresses the brand owner has additionally allowed to pre-mint.
    /// The owner itself is always allowed and is not stored here.
    designated_minters: HashSet<Address>,
    claim_policy: ClaimPolicy,
    /// The administrator verifying key bound at deployment. Immutable —
    /// rotating the platform key means newly deployed contracts pick up
    /// the new key while existing authorizations stay checkable.
    admin_key: CurioPublicKey,
    tokens: HashMap<TokenId, Token>,
    ledger: SharedLedger,
    deployed_at: DateTime<Utc>,
}

impl MintingContract {
    /// Constructs a deployed contract. Factory-internal — brands never
    /// build one of these directly.
    pub(crate) fn new(
        address: Address,
        name: String,
        symbol: String,
        brand_owner: Address,
        minter_delegate: Address,
        admin_key: CurioPublicKey,
        ledger: SharedLedger,
    ) -> Self {
        Self {
            address,
            name,
            symbol,
            brand_owner,
            minter_delegate,
            designated_minters: HashSet::new(),
            claim_policy: ClaimPolicy::default(),
            admin_key,
            tokens: HashMap::new(),
            ledger,
            deployed_at: Utc::now(),
        }
    }

    /// Reserves `token_id` with its display payload, consuming one
    /// minting coupon from this contract's balance.
    ///
    /// Callable by the brand owner or a designated minter.
    ///
    /// # Errors
    ///
    /// [`MintError::Unauthorized`], [`MintError::AlreadyIssued`], or a
    /// propagated ledger failure ([`LedgerError::InsufficientBalance`]
    /// when the coupon balance is 0). A failed call leaves the token
    /// unissued and the balance untouched.
    pub fn pre_mint(
        &mut self,
        caller: &Address,
        token_id: TokenId,
        payload: String,
    ) -> Result<(), MintError> {
        if *caller != self.brand_owner && !self.designated_minters.contains(caller) {
            return Err(MintError::Unauthorized { address: *caller });
        }
        if self.tokens.contains_key(&token_id) {
            return Err(MintError::AlreadyIssued { token_id });
        }

        // Effects before interactions: the token is reserved before the
        // ledger call, so a callee can never observe (or re-enter into)
        // an unissued id whose coupon is mid-spend. If the spend fails,
        // the reservation is compensated below and the call is a no-op.
        self.tokens.insert(
            token_id,
            Token {
                state: TokenState::PreMinted,
                payload,
                owner: None,
                preminted_at: Utc::now(),
                claimed_at: None,
            },
        );

        let spend = self.ledger.write().consume(
            &self.address,
            &self.address,
            MINTING_COUPON_CLASS,
            1,
        );
        if let Err(err) = spend {
            self.tokens.remove(&token_id);
            return Err(err.into());
        }
        Ok(())
    }

    /// Assigns ownership of a pre-minted token to `recipient`, gated on
    /// an administrator signature over (recipient, token id).
    ///
    /// Under [`ClaimPolicy::SignatureOnly`] the caller is irrelevant;
    /// under [`ClaimPolicy::DelegateOnly`] it must be the minter delegate.
    ///
    /// # Errors
    ///
    /// [`MintError::Unauthorized`] (policy), [`MintError::InvalidSignature`],
    /// [`MintError::NotPreMinted`], or [`MintError::AlreadyClaimed`] — in
    /// that order: an unauthorized claim fails on its signature regardless
    /// of token state. All failures leave the token exactly as it was.
    pub fn claim_nft(
        &mut self,
        caller: &Address,
        recipient: Address,
        token_id: TokenId,
        signature: &CurioSignature,
    ) -> Result<(), MintError> {
        if self.claim_policy == ClaimPolicy::DelegateOnly && *caller != self.minter_delegate {
            return Err(MintError::Unauthorized { address: *caller });
        }

        if !self.is_valid_signature(&recipient, token_id, signature) {
            return Err(MintError::InvalidSignature);
        }

        match self.tokens.get(&token_id).map(|t| t.state) {
            None => return Err(MintError::NotPreMinted { token_id }),
            Some(TokenState::Claimed) => return Err(MintError::AlreadyClaimed { token_id }),
            Some(TokenState::PreMinted) => {}
        }

        let token = self
            .tokens
            .get_mut(&token_id)
            .expect("token checked present above");
        token.state = TokenState::Claimed;
        token.owner = Some(recipient);
        token.claimed_at = Some(Utc::now());
        Ok(())
    }

    /// Pure verification helper: would this signature authorize a claim
    /// of `nonce` for `recipient`? No state is read beyond the bound
    /// administrator key and none is written — off-chain callers use this
    /// to pre-check an authorization before submitting.
    pub fn is_valid_signature(
        &self,
        recipient: &Address,
        nonce: u64,
        signature: &CurioSignature,
    ) -> bool {
        let message = claim_message(recipient, nonce);
        self.admin_key.verify(&message, signature)
    }

    /// Allows `minter` to pre-mint on this contract. Owner-only,
    /// idempotent.
    pub fn designate_minter(&mut self, caller: &Address, minter: Address) -> Result<(), MintError> {
        if *caller != self.brand_owner {
            return Err(MintError::Unauthorized { address: *caller });
        }
        self.designated_minters.insert(minter);
        Ok(())
    }

    /// Switches the claim policy. Owner-only: the policy tightens or
    /// relaxes who may *submit* claims for this brand, never the
    /// signature requirement itself.
    pub fn set_claim_policy(&mut self, caller: &Address, policy: ClaimPolicy) -> Result<(), MintError> {
        if *caller != self.brand_owner {
            return Err(MintError::Unauthorized { address: *caller });
        }
        self.claim_policy = policy;
        Ok(())
    }

    // -- read accessors -----------------------------------------------------

    /// Number of claimed tokens owned by `owner`.
    pub fn balance_of(&self, owner: &Address) -> u64 {
        self.tokens
            .values()
            .filter(|t| t.owner.as_ref() == Some(owner))
            .count() as u64
    }

    /// The display payload of `token_id`, or `None` if unissued.
    pub fn token_uri(&self, token_id: TokenId) -> Option<&str> {
        self.tokens.get(&token_id).map(|t| t.payload.as_str())
    }

    /// The owner of `token_id`, or `None` if unissued or not yet claimed.
    pub fn owner_of(&self, token_id: TokenId) -> Option<Address> {
        self.tokens.get(&token_id).and_then(|t| t.owner)
    }

    /// The lifecycle state of `token_id`, or `None` if unissued.
    pub fn token_state(&self, token_id: TokenId) -> Option<TokenState> {
        self.tokens.get(&token_id).map(|t| t.state)
    }

    /// Brand display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Brand symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// This contract's address — also its holder address on the ledger.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The brand owner's account address.
    pub fn brand_owner(&self) -> Address {
        self.brand_owner
    }

    /// The minter delegate recorded at deployment.
    pub fn minter_delegate(&self) -> Address {
        self.minter_delegate
    }

    /// The active claim policy.
    pub fn claim_policy(&self) -> ClaimPolicy {
        self.claim_policy
    }

    /// When this contract was deployed.
    pub fn deployed_at(&self) -> DateTime<Utc> {
        self.deployed_at
    }

    /// Count of ids currently in [`TokenState::PreMinted`].
    pub fn total_preminted(&self) -> usize {
        self.tokens
            .values()
            .filter(|t| t.state == TokenState::PreMinted)
            .count()
    }

    /// Count of ids in [`TokenState::Claimed`].
    pub fn total_claimed(&self) -> usize {
        self.tokens
            .values()
            .filter(|t| t.state == TokenState::Claimed)
            .count()
    }
}

impl std::fmt::Debug for MintingContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MintingContract")
            .field("address", &self.address)
            .field("name", &self.name)
            .field("symbol", &self.symbol)
            .field("brand_owner", &self.brand_owner)
            .field("claim_policy", &self.claim_policy)
            .field("tokens", &self.tokens.len())
            .finish()
    }
}
