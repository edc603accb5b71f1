//! # Coupon Ledger
//!
//! A multi-asset balance table: how many redeemable coupons each holder
//! address has, per coupon class. The holders that matter are brand
//! minting contracts, and the class that matters is
//! [`MINTING_COUPON_CLASS`] — but the ledger itself is policy-free.
//! Keeping it decoupled from the minting logic means the allotment size
//! and any future coupon classes can change without touching a deployed
//! contract, and every grant is a single auditable ledger event instead
//! of something buried in constructor logic.
//!
//! Mutation rules:
//!
//! - `grant` — additive, restricted to [`ADMIN_ROLE`] holders (the
//!   orchestrator).
//! - `consume` — subtractive, self-service: a holder spends its own
//!   balance, or an admin operator spends on its behalf.
//! - `balance_of` — total function; unknown holders and classes are 0.
//!
//! All arithmetic is checked. Wrapping arithmetic and credits do not mix.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use curio_protocol::Address;
use parking_lot::RwLock;

use crate::roles::{AccessControl, RoleError, RoleId, ADMIN_ROLE};

/// Identifier for a coupon class. Class
/// [`MINTING_COUPON_CLASS`](curio_protocol::config::MINTING_COUPON_CLASS)
/// is reserved for minting coupons; other classes are free for future
/// policy.
pub type CouponClass = u64;

/// The shared handle contracts use to reach the ledger.
///
/// The ledger is the one resource mutated by more than one component
/// (orchestrator grants, minting contracts consume), so it lives behind a
/// lock: check-then-act on a balance always happens under a single write
/// guard.
pub type SharedLedger = Arc<RwLock<CouponLedger>>;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The caller may not perform this operation on this holder's balance.
    #[error("unauthorized: {address} may not move this balance")]
    Unauthorized {
        /// The address that attempted the operation.
        address: Address,
    },

    /// A consume exceeded the available balance.
    #[error("insufficient balance: available {available}, requested {requested} (class {class})")]
    InsufficientBalance {
        /// The coupon class being consumed.
        class: CouponClass,
        /// The current balance.
        available: u64,
        /// The amount that was requested.
        requested: u64,
    },

    /// Arithmetic overflow during a grant.
    ///
    /// Practically unreachable at platform volumes, but a ledger that
    /// doesn't check is a ledger that can't be trusted.
    #[error("balance overflow: current {current}, grant {amount} (class {class})")]
    Overflow {
        /// The coupon class being granted.
        class: CouponClass,
        /// The balance before the failed grant.
        current: u64,
        /// The amount that caused the overflow.
        amount: u64,
    },
}

impl From<RoleError> for LedgerError {
    fn from(err: RoleError) -> Self {
        match err {
            RoleError::Unauthorized { address } => LedgerError::Unauthorized { address },
        }
    }
}

/// The coupon ledger. Balances keyed by holder, then class.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CouponLedger {
    /// Per-holder, per-class balances: `holder -> (class -> amount)`.
    balances: HashMap<Address, HashMap<CouponClass, u64>>,
    /// Role table. Seeded with the orchestrator at bootstrap.
    access: AccessControl,
}

impl CouponLedger {
    /// Creates a ledger whose sole admin is `orchestrator`.
    pub fn new(orchestrator: Address) -> Self {
        Self {
            balances: HashMap::new(),
            access: AccessControl::seeded(orchestrator),
        }
    }

    /// Adds `amount` of `class` to `holder`'s balance.
    ///
    /// Restricted to [`ADMIN_ROLE`] holders. The grant is a single
    /// all-or-nothing mutation: on [`LedgerError::Overflow`] the balance
    /// is untouched.
    pub fn grant(
        &mut self,
        caller: &Address,
        holder: Address,
        class: CouponClass,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.access.require(ADMIN_ROLE, caller)?;

        let balance = self
            .balances
            .entry(holder)
            .or_default()
            .entry(class)
            .or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow {
                class,
                current: *balance,
                amount,
            })?;
        Ok(())
    }

    /// Removes `amount` of `class` from `holder`'s balance.
    ///
    /// Callable by the holder itself (self-service spend) or by an
    /// [`ADMIN_ROLE`] operator. The check and the decrement happen under
    /// the same `&mut self` — there is no externally observable state
    /// between them, and no partial consumption on any path.
    pub fn consume(
        &mut self,
        caller: &Address,
        holder: &Address,
        class: CouponClass,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if caller != holder && !self.access.has_role(ADMIN_ROLE, caller) {
            return Err(LedgerError::Unauthorized { address: *caller });
        }

        let available = self.balance_of(holder, class);
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                class,
                available,
                requested: amount,
            });
        }

        // available >= amount; when amount > 0 the entry must exist.
        if amount > 0 {
            let balance = self
                .balances
                .get_mut(holder)
                .and_then(|classes| classes.get_mut(&class))
                .expect("balance entry exists when available > 0");
            *balance -= amount;
        }
        Ok(())
    }

    /// Returns `holder`'s balance of `class`. Never fails; unknown
    /// holders and classes are 0.
    pub fn balance_of(&self, holder: &Address, class: CouponClass) -> u64 {
        self.balances
            .get(holder)
            .and_then(|classes| classes.get(&class))
            .copied()
            .unwrap_or(0)
    }

    /// Grant `role` on this ledger. Admin-gated, idempotent.
    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: RoleId,
        grantee: Address,
    ) -> Result<(), RoleError> {
        self.access.grant_role(caller, role, grantee)
    }

    /// Returns `true` if `who` holds `role` on this ledger.
    pub fn has_role(&self, role: RoleId, who: &Address) -> bool {
        self.access.has_role(role, who)
    }
}
