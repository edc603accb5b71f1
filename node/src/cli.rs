//! # CLI Interface
//!
//! Command-line argument structure for `curio-node` using `clap` derive.
//! Three subcommands: `demo`, `keygen`, and `version`.

use clap::{Parser, Subcommand};

/// Curio platform node.
///
/// Bootstraps an in-process curio platform and drives the onboarding and
/// claim flows against it. The heavy lifting lives in `curio-contracts`;
/// this binary stays a thin wrapper around it.
#[derive(Parser, Debug)]
#[command(
    name = "curio-node",
    about = "Curio collectible platform CLI",
    version,
    propagate_version = true
)]
pub struct CurioNodeCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the curio-node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the reference scenario end to end: bootstrap, register a
    /// brand, approve it, pre-mint, and claim — with structured logs of
    /// every step.
    Demo(DemoArgs),
    /// Generate a fresh administrator keypair and print it as hex.
    Keygen,
    /// Print version information and exit.
    Version,
}

/// Arguments for the `demo` subcommand.
#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Hex-encoded administrator secret key. A throwaway key is
    /// generated when omitted.
    #[arg(long, env = "CURIO_ADMIN_KEY")]
    pub admin_key: Option<String>,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "CURIO_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Number of tokens to pre-mint and claim in the scenario.
    #[arg(long, default_value_t = 3)]
    pub tokens: u64,
}
