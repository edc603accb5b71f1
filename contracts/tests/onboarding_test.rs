//! Integration tests for the onboarding flow: registration, approval,
//! and the coupon grant, exercised across the orchestrator, registry,
//! factory, and ledger together.

use curio_contracts::{OrchestratorError, Platform};
use curio_protocol::config::{BRAND_COUPON_ALLOTMENT, MINTING_COUPON_CLASS};
use curio_protocol::{Address, CurioKeypair};

const ADMIN: Address = Address::from_bytes([1u8; 32]);
const OWNER: Address = Address::from_bytes([2u8; 32]);
const DELEGATE: Address = Address::from_bytes([3u8; 32]);

/// Helper: a fresh platform with a throwaway administrator signing key.
fn platform() -> Platform {
    Platform::bootstrap(ADMIN, CurioKeypair::generate().public_key())
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn register_then_approve_happy_path() {
    let mut p = platform();

    // 1. Register — record exists, unverified, no contract.
    p.orchestrator_mut()
        .register_brand("Harkon", "HKN", OWNER, "anjay")
        .unwrap();
    let info = p.orchestrator().brand_info(&OWNER);
    assert_eq!(info.name, "Harkon");
    assert_eq!(info.symbol, "HKN");
    assert!(!info.is_legal_verified);
    assert!(info.nft_contract.is_none());

    // 2. Approve — verified, contract deployed, 30 coupons granted.
    let contract = p
        .orchestrator_mut()
        .approve_brand(&ADMIN, OWNER, DELEGATE)
        .unwrap();
    let info = p.orchestrator().brand_info(&OWNER);
    assert!(info.is_legal_verified);
    assert_eq!(info.nft_contract, Some(contract));
    assert_eq!(
        p.coupon_balance(&contract, MINTING_COUPON_CLASS),
        BRAND_COUPON_ALLOTMENT
    );
}

#[test]
fn deployed_contract_carries_brand_identity() {
    let mut p = platform();
    p.orchestrator_mut()
        .register_brand("Harkon", "HKN", OWNER, "anjay")
        .unwrap();
    let addr = p
        .orchestrator_mut()
        .approve_brand(&ADMIN, OWNER, DELEGATE)
        .unwrap();

    let contract = p.minting_contract(&addr).unwrap();
    assert_eq!(contract.name(), "Harkon");
    assert_eq!(contract.symbol(), "HKN");
    assert_eq!(contract.brand_owner(), OWNER);
    assert_eq!(contract.minter_delegate(), DELEGATE);
}

#[test]
fn unapproved_brand_has_no_contract_to_mint_on() {
    let mut p = platform();
    p.orchestrator_mut()
        .register_brand("Harkon", "HKN", OWNER, "")
        .unwrap();

    // No approval, no contract: pre_mint and claim_nft are unreachable.
    let info = p.orchestrator().brand_info(&OWNER);
    assert!(info.nft_contract.is_none());
    assert_eq!(p.orchestrator().factory().deployed_count(), 0);
}

#[test]
fn metadata_reference_is_mirrored() {
    let mut p = platform();
    p.orchestrator_mut()
        .register_brand("Harkon", "HKN", OWNER, "ipfs://harkon-card")
        .unwrap();
    assert_eq!(
        p.orchestrator().metadata().get(&OWNER),
        Some("ipfs://harkon-card")
    );
    assert_eq!(
        p.orchestrator().brand_info(&OWNER).metadata_ref,
        "ipfs://harkon-card"
    );
}

// ---------------------------------------------------------------------------
// Error cases
// ---------------------------------------------------------------------------

#[test]
fn owner_cannot_register_twice() {
    let mut p = platform();
    p.orchestrator_mut()
        .register_brand("Harkon", "HKN", OWNER, "")
        .unwrap();
    let result = p
        .orchestrator_mut()
        .register_brand("Harkon Again", "HK2", OWNER, "");
    assert!(matches!(
        result,
        Err(OrchestratorError::DuplicateRegistration { owner }) if owner == OWNER
    ));
}

#[test]
fn verified_owner_cannot_register_again_either() {
    let mut p = platform();
    p.orchestrator_mut()
        .register_brand("Harkon", "HKN", OWNER, "")
        .unwrap();
    p.orchestrator_mut()
        .approve_brand(&ADMIN, OWNER, DELEGATE)
        .unwrap();

    let result = p.orchestrator_mut().register_brand("New", "NEW", OWNER, "");
    assert!(matches!(
        result,
        Err(OrchestratorError::DuplicateRegistration { .. })
    ));
}

#[test]
fn non_administrator_cannot_approve() {
    let mut p = platform();
    p.orchestrator_mut()
        .register_brand("Harkon", "HKN", OWNER, "")
        .unwrap();
    let result = p.orchestrator_mut().approve_brand(&OWNER, OWNER, DELEGATE);
    assert!(matches!(result, Err(OrchestratorError::Unauthorized { .. })));

    // Nothing happened: still unverified, nothing deployed, no grant.
    assert!(!p.orchestrator().brand_info(&OWNER).is_legal_verified);
    assert_eq!(p.orchestrator().factory().deployed_count(), 0);
}

#[test]
fn approving_unknown_owner_is_not_found() {
    let mut p = platform();
    let result = p.orchestrator_mut().approve_brand(&ADMIN, OWNER, DELEGATE);
    assert!(matches!(result, Err(OrchestratorError::NotFound { .. })));
}

#[test]
fn grant_happens_exactly_once_per_brand() {
    let mut p = platform();
    p.orchestrator_mut()
        .register_brand("Harkon", "HKN", OWNER, "")
        .unwrap();
    let contract = p
        .orchestrator_mut()
        .approve_brand(&ADMIN, OWNER, DELEGATE)
        .unwrap();

    let result = p.orchestrator_mut().approve_brand(&ADMIN, OWNER, DELEGATE);
    assert!(matches!(
        result,
        Err(OrchestratorError::AlreadyApproved { .. })
    ));
    assert_eq!(
        p.coupon_balance(&contract, MINTING_COUPON_CLASS),
        BRAND_COUPON_ALLOTMENT
    );
    assert_eq!(p.orchestrator().factory().deployed_count(), 1);
}

// ---------------------------------------------------------------------------
// Multi-brand isolation
// ---------------------------------------------------------------------------

#[test]
fn each_brand_gets_its_own_contract_and_allotment() {
    let owner_b = Address::from_bytes([4u8; 32]);
    let mut p = platform();
    p.orchestrator_mut()
        .register_brand("Harkon", "HKN", OWNER, "")
        .unwrap();
    p.orchestrator_mut()
        .register_brand("Velda", "VLD", owner_b, "")
        .unwrap();

    let c_a = p
        .orchestrator_mut()
        .approve_brand(&ADMIN, OWNER, DELEGATE)
        .unwrap();
    let c_b = p
        .orchestrator_mut()
        .approve_brand(&ADMIN, owner_b, DELEGATE)
        .unwrap();

    assert_ne!(c_a, c_b);

    // Spending from one brand's balance leaves the other untouched.
    p.minting_contract_mut(&c_a)
        .unwrap()
        .pre_mint(&OWNER, 1, "a-1".into())
        .unwrap();
    assert_eq!(
        p.coupon_balance(&c_a, MINTING_COUPON_CLASS),
        BRAND_COUPON_ALLOTMENT - 1
    );
    assert_eq!(
        p.coupon_balance(&c_b, MINTING_COUPON_CLASS),
        BRAND_COUPON_ALLOTMENT
    );

    // Token keyspaces are per-contract: the same id exists independently.
    p.minting_contract_mut(&c_b)
        .unwrap()
        .pre_mint(&owner_b, 1, "b-1".into())
        .unwrap();
    assert_eq!(p.minting_contract(&c_a).unwrap().token_uri(1), Some("a-1"));
    assert_eq!(p.minting_contract(&c_b).unwrap().token_uri(1), Some("b-1"));
}
