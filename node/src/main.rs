// Copyright (c) 2026 Curio Labs. MIT License.
// See LICENSE for details.

//! # Curio Node
//!
//! Entry point for the `curio-node` binary. Parses CLI arguments,
//! initializes logging, and drives the platform library.
//!
//! The binary supports three subcommands:
//!
//! - `demo`    — run the full onboarding and claim scenario
//! - `keygen`  — generate an administrator keypair
//! - `version` — print build version information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;

use curio_contracts::Platform;
use curio_protocol::config::{MINTING_COUPON_CLASS, PLATFORM_VERSION};
use curio_protocol::crypto::signatures::{claim_message, sign};
use curio_protocol::{Address, CurioKeypair};

use cli::{Commands, CurioNodeCli, DemoArgs};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = CurioNodeCli::parse();

    match cli.command {
        Commands::Demo(args) => run_demo(args),
        Commands::Keygen => {
            keygen();
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Runs the reference scenario: bootstrap → register → approve →
/// pre-mint → claim, logging each state transition.
fn run_demo(args: DemoArgs) -> Result<()> {
    logging::init_logging(
        "curio_node=info,curio_contracts=info",
        LogFormat::from_str_lossy(&args.log_format),
    );

    if args.tokens == 0 {
        bail!("--tokens must be at least 1");
    }

    // Administrator identity: provided or throwaway.
    let admin_keys = match &args.admin_key {
        Some(hex_key) => CurioKeypair::from_hex(hex_key)
            .context("failed to parse --admin-key (expected 64 hex characters)")?,
        None => CurioKeypair::generate(),
    };
    let admin_address = Address::from_public_key(&admin_keys.public_key());

    // Participants. Fresh keys each run — the demo is self-contained.
    let brand_owner = Address::from_public_key(&CurioKeypair::generate().public_key());
    let delegate = Address::from_public_key(&CurioKeypair::generate().public_key());
    let customer = Address::from_public_key(&CurioKeypair::generate().public_key());

    tracing::info!(administrator = %admin_address, "bootstrapping platform");
    let mut platform = Platform::bootstrap(admin_address, admin_keys.public_key());

    platform
        .orchestrator_mut()
        .register_brand("Harkon", "HKN", brand_owner, "ipfs://harkon-card")
        .context("brand registration failed")?;

    let contract = platform
        .orchestrator_mut()
        .approve_brand(&admin_address, brand_owner, delegate)
        .context("brand approval failed")?;
    tracing::info!(
        contract = %contract,
        coupons = platform.coupon_balance(&contract, MINTING_COUPON_CLASS),
        "brand approved"
    );

    for token_id in 1..=args.tokens {
        platform
            .minting_contract_mut(&contract)
            .context("approved contract missing from factory")?
            .pre_mint(&brand_owner, token_id, format!("harkon card #{token_id}"))
            .with_context(|| format!("pre-mint of token {token_id} failed"))?;

        let authorization = sign(&admin_keys, &claim_message(&customer, token_id));
        platform
            .minting_contract_mut(&contract)
            .context("approved contract missing from factory")?
            .claim_nft(&delegate, customer, token_id, &authorization)
            .with_context(|| format!("claim of token {token_id} failed"))?;
        tracing::info!(token_id, recipient = %customer, "token claimed");
    }

    let minted = platform
        .minting_contract(&contract)
        .context("approved contract missing from factory")?;
    tracing::info!(
        claimed = minted.total_claimed(),
        customer_balance = minted.balance_of(&customer),
        remaining_coupons = platform.coupon_balance(&contract, MINTING_COUPON_CLASS),
        "demo complete"
    );
    Ok(())
}

/// Generates an administrator keypair and prints it to stdout.
///
/// The secret key goes to stdout on purpose — pipe it somewhere safe.
/// Everything else this binary says goes to stderr.
fn keygen() {
    let keypair = CurioKeypair::generate();
    println!("secret: {}", hex::encode(keypair.to_bytes()));
    println!("public: {}", keypair.public_key_hex());
    println!("address: {}", Address::from_public_key(&keypair.public_key()));
}

/// Prints version information.
fn print_version() {
    println!("curio-node {PLATFORM_VERSION}");
    println!("  crate version: {}", env!("CARGO_PKG_VERSION"));
}
