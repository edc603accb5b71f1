//! Integration tests for the pre-mint and claim flow, end to end: a
//! brand is onboarded through the orchestrator, spends coupons to
//! reserve tokens, and customers claim them with administrator-signed
//! authorizations.

use curio_contracts::{ClaimPolicy, LedgerError, MintError, Platform, TokenState};
use curio_protocol::config::{BRAND_COUPON_ALLOTMENT, MINTING_COUPON_CLASS};
use curio_protocol::crypto::signatures::{claim_message, sign};
use curio_protocol::{Address, CurioKeypair, CurioSignature};

const ADMIN: Address = Address::from_bytes([1u8; 32]);
const OWNER: Address = Address::from_bytes([2u8; 32]);
const DELEGATE: Address = Address::from_bytes([3u8; 32]);
const RECIPIENT: Address = Address::from_bytes([4u8; 32]);

/// Helper: an approved brand, ready to mint. Returns the platform, the
/// administrator keypair, and the minting contract's address.
fn approved_brand() -> (Platform, CurioKeypair, Address) {
    let admin_keys = CurioKeypair::generate();
    let mut p = Platform::bootstrap(ADMIN, admin_keys.public_key());
    p.orchestrator_mut()
        .register_brand("Harkon", "HKN", OWNER, "anjay")
        .unwrap();
    let contract = p
        .orchestrator_mut()
        .approve_brand(&ADMIN, OWNER, DELEGATE)
        .unwrap();
    (p, admin_keys, contract)
}

/// Helper: administrator authorization over (recipient, token id).
fn authorization(admin: &CurioKeypair, recipient: &Address, token_id: u64) -> CurioSignature {
    sign(admin, &claim_message(recipient, token_id))
}

// ---------------------------------------------------------------------------
// The reference scenario
// ---------------------------------------------------------------------------

#[test]
fn full_scenario_register_approve_premint_claim() {
    let admin_keys = CurioKeypair::generate();
    let mut p = Platform::bootstrap(ADMIN, admin_keys.public_key());

    // Register brand "Harkon"/"HKN" for owner O → unverified record.
    p.orchestrator_mut()
        .register_brand("Harkon", "HKN", OWNER, "anjay")
        .unwrap();
    assert_eq!(p.orchestrator().brand_info(&OWNER).name, "Harkon");
    assert!(!p.orchestrator().brand_info(&OWNER).is_legal_verified);

    // Approve(O, M) → verified, balance == 30.
    let contract = p
        .orchestrator_mut()
        .approve_brand(&ADMIN, OWNER, DELEGATE)
        .unwrap();
    assert!(p.orchestrator().brand_info(&OWNER).is_legal_verified);
    assert_eq!(p.coupon_balance(&contract, MINTING_COUPON_CLASS), 30);

    // preMint(1, "anjay") by O → balance 29, token 1 pre-minted.
    p.minting_contract_mut(&contract)
        .unwrap()
        .pre_mint(&OWNER, 1, "anjay".into())
        .unwrap();
    assert_eq!(p.coupon_balance(&contract, MINTING_COUPON_CLASS), 29);
    assert_eq!(
        p.minting_contract(&contract).unwrap().token_state(1),
        Some(TokenState::PreMinted)
    );

    // claimNFT(R, 1, sig) by M → token 1 owned by R, balance_of(R) == 1.
    let sig = authorization(&admin_keys, &RECIPIENT, 1);
    p.minting_contract_mut(&contract)
        .unwrap()
        .claim_nft(&DELEGATE, RECIPIENT, 1, &sig)
        .unwrap();
    let minted = p.minting_contract(&contract).unwrap();
    assert_eq!(minted.owner_of(1), Some(RECIPIENT));
    assert_eq!(minted.balance_of(&RECIPIENT), 1);
}

// ---------------------------------------------------------------------------
// Coupon accounting
// ---------------------------------------------------------------------------

#[test]
fn each_pre_mint_costs_exactly_one_coupon() {
    let (mut p, _, contract) = approved_brand();
    for id in 1..=5u64 {
        p.minting_contract_mut(&contract)
            .unwrap()
            .pre_mint(&OWNER, id, format!("card #{id}"))
            .unwrap();
    }
    assert_eq!(
        p.coupon_balance(&contract, MINTING_COUPON_CLASS),
        BRAND_COUPON_ALLOTMENT - 5
    );
}

#[test]
fn exhausted_allotment_stops_pre_minting() {
    let (mut p, _, contract) = approved_brand();
    for id in 1..=BRAND_COUPON_ALLOTMENT {
        p.minting_contract_mut(&contract)
            .unwrap()
            .pre_mint(&OWNER, id, format!("card #{id}"))
            .unwrap();
    }
    assert_eq!(p.coupon_balance(&contract, MINTING_COUPON_CLASS), 0);

    let result = p
        .minting_contract_mut(&contract)
        .unwrap()
        .pre_mint(&OWNER, 1000, "one too many".into());
    assert!(matches!(
        result,
        Err(MintError::Ledger(LedgerError::InsufficientBalance { .. }))
    ));
    // The failed pre-mint reserved nothing.
    assert_eq!(
        p.minting_contract(&contract).unwrap().token_state(1000),
        None
    );
}

#[test]
fn claiming_does_not_spend_coupons() {
    let (mut p, admin_keys, contract) = approved_brand();
    p.minting_contract_mut(&contract)
        .unwrap()
        .pre_mint(&OWNER, 1, "x".into())
        .unwrap();
    let before = p.coupon_balance(&contract, MINTING_COUPON_CLASS);

    let sig = authorization(&admin_keys, &RECIPIENT, 1);
    p.minting_contract_mut(&contract)
        .unwrap()
        .claim_nft(&DELEGATE, RECIPIENT, 1, &sig)
        .unwrap();
    assert_eq!(p.coupon_balance(&contract, MINTING_COUPON_CLASS), before);
}

// ---------------------------------------------------------------------------
// Claim authorization
// ---------------------------------------------------------------------------

#[test]
fn payload_round_trips_from_pre_mint_to_claimed_token_uri() {
    let (mut p, admin_keys, contract) = approved_brand();
    p.minting_contract_mut(&contract)
        .unwrap()
        .pre_mint(&OWNER, 7, "anjay".into())
        .unwrap();
    let sig = authorization(&admin_keys, &RECIPIENT, 7);
    p.minting_contract_mut(&contract)
        .unwrap()
        .claim_nft(&DELEGATE, RECIPIENT, 7, &sig)
        .unwrap();
    assert_eq!(
        p.minting_contract(&contract).unwrap().token_uri(7),
        Some("anjay")
    );
}

#[test]
fn non_administrator_signature_always_fails() {
    let (mut p, _, contract) = approved_brand();
    let intruder = CurioKeypair::generate();

    // Regardless of token state: unissued...
    let sig = authorization(&intruder, &RECIPIENT, 1);
    let result = p
        .minting_contract_mut(&contract)
        .unwrap()
        .claim_nft(&DELEGATE, RECIPIENT, 1, &sig);
    assert!(matches!(result, Err(MintError::InvalidSignature)));

    // ...and pre-minted.
    p.minting_contract_mut(&contract)
        .unwrap()
        .pre_mint(&OWNER, 1, "x".into())
        .unwrap();
    let result = p
        .minting_contract_mut(&contract)
        .unwrap()
        .claim_nft(&DELEGATE, RECIPIENT, 1, &sig);
    assert!(matches!(result, Err(MintError::InvalidSignature)));
    assert_eq!(
        p.minting_contract(&contract).unwrap().token_state(1),
        Some(TokenState::PreMinted)
    );
}

#[test]
fn successful_claim_cannot_be_replayed() {
    let (mut p, admin_keys, contract) = approved_brand();
    p.minting_contract_mut(&contract)
        .unwrap()
        .pre_mint(&OWNER, 1, "x".into())
        .unwrap();
    let sig = authorization(&admin_keys, &RECIPIENT, 1);
    p.minting_contract_mut(&contract)
        .unwrap()
        .claim_nft(&DELEGATE, RECIPIENT, 1, &sig)
        .unwrap();

    let result = p
        .minting_contract_mut(&contract)
        .unwrap()
        .claim_nft(&DELEGATE, RECIPIENT, 1, &sig);
    assert!(matches!(result, Err(MintError::AlreadyClaimed { .. })));
    assert_eq!(p.minting_contract(&contract).unwrap().balance_of(&RECIPIENT), 1);
}

#[test]
fn off_chain_precheck_matches_claim_outcome() {
    let (mut p, admin_keys, contract) = approved_brand();
    p.minting_contract_mut(&contract)
        .unwrap()
        .pre_mint(&OWNER, 5, "x".into())
        .unwrap();

    let good = authorization(&admin_keys, &RECIPIENT, 5);
    let bad = authorization(&CurioKeypair::generate(), &RECIPIENT, 5);

    let minted = p.minting_contract(&contract).unwrap();
    assert!(minted.is_valid_signature(&RECIPIENT, 5, &good));
    assert!(!minted.is_valid_signature(&RECIPIENT, 5, &bad));

    p.minting_contract_mut(&contract)
        .unwrap()
        .claim_nft(&DELEGATE, RECIPIENT, 5, &good)
        .unwrap();
}

#[test]
fn delegate_only_policy_gates_submission_not_authorization() {
    let (mut p, admin_keys, contract) = approved_brand();
    p.minting_contract_mut(&contract)
        .unwrap()
        .set_claim_policy(&OWNER, ClaimPolicy::DelegateOnly)
        .unwrap();
    p.minting_contract_mut(&contract)
        .unwrap()
        .pre_mint(&OWNER, 1, "x".into())
        .unwrap();
    let sig = authorization(&admin_keys, &RECIPIENT, 1);

    // A non-delegate submitter is turned away even with a valid
    // authorization...
    let result = p
        .minting_contract_mut(&contract)
        .unwrap()
        .claim_nft(&RECIPIENT, RECIPIENT, 1, &sig);
    assert!(matches!(result, Err(MintError::Unauthorized { .. })));

    // ...and the delegate still needs the signature to be valid.
    let forged = authorization(&CurioKeypair::generate(), &RECIPIENT, 1);
    let result = p
        .minting_contract_mut(&contract)
        .unwrap()
        .claim_nft(&DELEGATE, RECIPIENT, 1, &forged);
    assert!(matches!(result, Err(MintError::InvalidSignature)));

    p.minting_contract_mut(&contract)
        .unwrap()
        .claim_nft(&DELEGATE, RECIPIENT, 1, &sig)
        .unwrap();
}
