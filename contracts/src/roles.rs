//! # Role-Based Access Control
//!
//! The capability relation that binds the orchestrator to its
//! sub-resources. Each resource (ledger, registry, factory, metadata
//! store) owns an [`AccessControl`] table mapping a role id to the set of
//! addresses holding it. The orchestrator receives [`ADMIN_ROLE`] on
//! every resource at bootstrap — via pre-seeded construction, not a
//! post-deploy grant call — and is the only privileged caller the system
//! ever wires up. Brand minting contracts are deliberately never granted
//! a role on anything: once deployed they are independent.
//!
//! Grants are idempotent and can only be extended by an existing admin of
//! the same resource. There is no revocation path — governance over the
//! administrator set is out of scope, and a revoke nobody can call is
//! just attack surface.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

use curio_protocol::Address;

/// Errors from role checks and grants.
#[derive(Debug, Error)]
pub enum RoleError {
    /// The caller does not hold the role required for this operation.
    #[error("unauthorized: {address} lacks the required role")]
    Unauthorized {
        /// The address that attempted the operation.
        address: Address,
    },
}

/// A 32-byte role identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId([u8; 32]);

/// The default administrative role. The all-zero id, matching the
/// convention of every access-control scheme this design descends from.
pub const ADMIN_ROLE: RoleId = RoleId([0u8; 32]);

impl RoleId {
    /// Construct a role id from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == ADMIN_ROLE {
            write!(f, "RoleId(ADMIN)")
        } else {
            write!(f, "RoleId({}..)", &hex::encode(self.0)[..12])
        }
    }
}

/// Per-resource role table.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AccessControl {
    roles: HashMap<RoleId, HashSet<Address>>,
}

impl AccessControl {
    /// An empty table. Nobody holds anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table pre-seeded with one admin. This is the bootstrap path:
    /// resources are constructed already knowing their privileged caller,
    /// so there is no window where a resource exists un-administered.
    pub fn seeded(admin: Address) -> Self {
        let mut roles: HashMap<RoleId, HashSet<Address>> = HashMap::new();
        roles.entry(ADMIN_ROLE).or_default().insert(admin);
        Self { roles }
    }

    /// Returns `true` if `who` holds `role`.
    pub fn has_role(&self, role: RoleId, who: &Address) -> bool {
        self.roles
            .get(&role)
            .map(|holders| holders.contains(who))
            .unwrap_or(false)
    }

    /// Fails with [`RoleError::Unauthorized`] unless `who` holds `role`.
    pub fn require(&self, role: RoleId, who: &Address) -> Result<(), RoleError> {
        if self.has_role(role, who) {
            Ok(())
        } else {
            Err(RoleError::Unauthorized { address: *who })
        }
    }

    /// Grant `role` to `grantee`. Idempotent: re-granting an existing
    /// holder succeeds and changes nothing.
    ///
    /// Only a current [`ADMIN_ROLE`] holder on this resource may grant,
    /// which is what makes grants irrevocable-by-non-admins: there is no
    /// path by which an outsider mutates the table at all.
    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: RoleId,
        grantee: Address,
    ) -> Result<(), RoleError> {
        self.require(ADMIN_ROLE, caller)?;
        self.roles.entry(role).or_default().insert(grantee);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    #[test]
    fn seeded_admin_holds_admin_role() {
        let ac = AccessControl::seeded(addr(1));
        assert!(ac.has_role(ADMIN_ROLE, &addr(1)));
        assert!(!ac.has_role(ADMIN_ROLE, &addr(2)));
    }

    #[test]
    fn admin_can_extend_grants() {
        let mut ac = AccessControl::seeded(addr(1));
        ac.grant_role(&addr(1), ADMIN_ROLE, addr(2)).unwrap();
        assert!(ac.has_role(ADMIN_ROLE, &addr(2)));
    }

    #[test]
    fn non_admin_cannot_grant() {
        let mut ac = AccessControl::seeded(addr(1));
        let result = ac.grant_role(&addr(2), ADMIN_ROLE, addr(2));
        assert!(matches!(result, Err(RoleError::Unauthorized { .. })));
        assert!(!ac.has_role(ADMIN_ROLE, &addr(2)));
    }

    #[test]
    fn grants_are_idempotent() {
        let mut ac = AccessControl::seeded(addr(1));
        ac.grant_role(&addr(1), ADMIN_ROLE, addr(2)).unwrap();
        ac.grant_role(&addr(1), ADMIN_ROLE, addr(2)).unwrap();
        assert!(ac.has_role(ADMIN_ROLE, &addr(2)));
    }

    #[test]
    fn require_surfaces_offending_address() {
        let ac = AccessControl::seeded(addr(1));
        match ac.require(ADMIN_ROLE, &addr(9)) {
            Err(RoleError::Unauthorized { address }) => assert_eq!(address, addr(9)),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }
}
