//! # Curio Platform Contracts
//!
//! The four cooperating authorities behind brand-issued collectibles,
//! plus the wiring that binds them:
//!
//! - **Orchestrator** — the single administered entry point: brand
//!   registration and atomic approval (deploy + verify + coupon grant).
//! - **Brand Registry & Factory** — who registered, who is verified, and
//!   one independently-addressed minting contract per approved brand.
//! - **Coupon Ledger** — multi-asset balance table; 30 minting coupons
//!   per approval, one spent per pre-minted token.
//! - **Minting Contract** — per-brand token state machine with
//!   administrator-signature-gated claims.
//!
//! ## Design Principles
//!
//! 1. All balance arithmetic is checked — wrapping arithmetic and
//!    credits do not mix.
//! 2. State transitions are explicit enums, not boolean flags, and they
//!    only move forward.
//! 3. Multi-contract sequences are single units of work: a failure
//!    anywhere unwinds everything, byte for byte.
//! 4. Claim authorization is a pure function of (recipient, token id,
//!    signature, administrator key). No ambient trust.

pub mod factory;
pub mod ledger;
pub mod metadata;
pub mod minting;
pub mod orchestrator;
pub mod platform;
pub mod registry;
pub mod roles;

pub use factory::{ContractFactory, FactoryError};
pub use ledger::{CouponClass, CouponLedger, LedgerError, SharedLedger};
pub use metadata::BrandMetadataStore;
pub use minting::{ClaimPolicy, MintError, MintingContract, TokenId, TokenState};
pub use orchestrator::{Orchestrator, OrchestratorError};
pub use platform::Platform;
pub use registry::{BrandRecord, BrandRegistry, RegistryError};
pub use roles::{AccessControl, RoleError, RoleId, ADMIN_ROLE};
